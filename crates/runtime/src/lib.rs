//! Turn resolution for a dungeon run.
//!
//! This crate wires the combat core to whoever supplies intent: a
//! [`Session`] holds everything a run owns, the [`TurnScheduler`] walks the
//! round-robin roster, and [`ActionProvider`]s decide what each actor does.
//! Hosts embed [`Runtime`] and tick it from their own loop.
//!
//! Modules are organized by responsibility:
//! - [`runtime`] hosts the orchestrator and builder
//! - [`api`] exposes the types downstream clients interact with
//! - [`scheduler`] owns turn order, stuns, combos and round bookkeeping
//! - [`session`] is the run-scoped context handed to providers
//! - [`providers`] contains the player and enemy providers
//! - [`events`] records what happened, in order
pub mod api;
pub mod events;
pub mod providers;
pub mod runtime;
pub mod scheduler;
pub mod session;

pub use api::{ActionProvider, ProviderKind, Result, RuntimeError, TurnStatus, WaitActionProvider};
pub use events::{EventLog, TurnEvent};
pub use providers::{AiProvider, InputSource, PlayerIntent, PlayerProvider, ScriptedInput};
pub use runtime::{Runtime, RuntimeBuilder, RuntimeConfig};
pub use scheduler::{TickOutcome, TurnScheduler};
pub use session::{CastProgress, Codex, EnemyMemory, Outcome, Session};
