//! Action provider implementations for different entity behaviors.

pub mod ai;
pub mod player;

pub use ai::AiProvider;
pub use player::{InputSource, PlayerIntent, PlayerProvider, ScriptedInput};
