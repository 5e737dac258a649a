//! Enemy decision making.
//!
//! Every enemy runs the same behavior tree ([`presets::standard_enemy`]) over
//! an [`AiContext`] borrowing the session. The tree only *decides*; the
//! [`AiProvider`] then commits the [`Decision`] to the session, so evaluation
//! stays side-effect free apart from the shuffle RNG.
//!
//! Priority, highest first:
//!
//! 1. continue a multi-turn cast
//! 2. rest after finishing one
//! 3. attack with the first equipped spell that threatens an opponent
//! 4. hunt the nearest visible opponent
//! 5. wander

pub mod context;
pub mod nodes;
pub mod presets;
pub mod provider;

pub use context::{AiContext, Decision};
pub use provider::AiProvider;
