//! Entity state shared by the grid, effects and the scheduler.
//!
//! Value types (ids, positions, tags) live here together with the [`Actor`]
//! record and the [`TurnOrder`] roster. Spatial indexing is the grid's job.
pub mod actor;
pub mod common;
pub mod tags;
pub mod turn;

pub use actor::{Actor, ActorTemplate, DamageOutcome};
pub use common::{EntityId, Position, ResourceMeter, round_half_even};
pub use tags::{DamageType, DamageTypes, Density, DensitySet, Faction, FactionSet};
pub use turn::{Purged, TurnOrder};
