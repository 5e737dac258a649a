//! Public runtime API surface.
//!
//! Error types and the provider abstraction that player input and enemy AI
//! both implement.

pub mod errors;
pub mod providers;

pub use errors::{ProviderKind, Result, RuntimeError};
pub use providers::{ActionProvider, TurnStatus, WaitActionProvider};
