//! Lightweight behavior tree library optimized for turn-based games.
//!
//! - **No delta time**: every tick completes immediately
//! - **No Running state**: a node either commits or fails this tick
//! - **Borrowed contexts**: trees carry a lifetime instead of `'static`
//!   bounds, so a decision can be evaluated against a view that borrows the
//!   live game state
//!
//! # Architecture
//!
//! - [`Behavior`]: core trait for all nodes, returning a [`Status`]
//! - Leaves: [`Action`], [`Condition`]
//! - Composites: [`Sequence`], [`Selector`]
//! - Decorators: [`Inverter`], [`AlwaysSucceed`]
//! - [`builder`]: boxed shorthands for assembling trees

pub mod behavior;
pub mod builder;
pub mod composite;
pub mod decorator;

pub use behavior::{Action, Behavior, BoxedBehavior, Condition, Status};
pub use builder::{action, always_succeed, condition, inverter, selector, sequence};
pub use composite::{Selector, Sequence};
pub use decorator::{AlwaysSucceed, Inverter};
