//! Data-driven content definitions and loaders.
//!
//! This crate houses static game content and provides loaders for RON/TOML data files:
//! - Enemy archetypes (built-in catalog, data-driven via RON)
//! - Arena layouts (ASCII grids, data-driven via RON)
//! - Letter drop table for defeated enemies
//! - Game configuration (data-driven via TOML)
//!
//! Content is turned into `game-core` templates and worlds; the rules never
//! read data files themselves.

pub mod archetypes;
pub mod drops;
pub mod layout;

#[cfg(feature = "loaders")]
pub mod loaders;

pub use archetypes::{Archetype, ArchetypeCatalog, Movement};
pub use drops::DropLedger;
pub use layout::{Arena, ArenaLayout, LayoutError, default_legend, player_template};

#[cfg(feature = "loaders")]
pub use loaders::{ArchetypeLoader, ConfigLoader, LoadResult, MapLoader};
