//! Deterministic combat rules for a turn-based grid dungeon crawler.
//!
//! `game-core` resolves what happens when an actor acts: the snap chain in
//! [`targeting`] turns a nominal vector into a target, [`area`] expands it
//! into squares, [`effect`] mutates the occupants found through
//! [`grid::GridWorld`], and [`state::TurnOrder`] holds the round-robin roster.
//! Nothing here performs I/O or logging; every operation returns a report or
//! a typed error instead.
pub mod area;
pub mod combat;
pub mod config;
pub mod effect;
pub mod error;
pub mod grid;
pub mod spell;
pub mod state;
pub mod targeting;

pub use area::{Area, Shape};
pub use config::{GameConfig, PlayerProfile};
pub use effect::{Effect, EffectReport};
pub use error::{ErrorSeverity, GameError};
pub use grid::{GridError, GridWorld, RayHit, get_line, rotations};
pub use spell::{
    CastError, CastPlan, CastReport, Reach, RegistryError, Spell, SpellBook, SpellBookError,
    SpellKind, SpellParams, SpellRegistry,
};
pub use state::{
    Actor, ActorTemplate, DamageType, DamageTypes, Density, DensitySet, EntityId, Faction,
    FactionSet, Position, Purged, ResourceMeter, TurnOrder,
};
pub use targeting::{EntityFilter, TargetRejection, TargetResolver, snap_to_line, snap_to_range};
