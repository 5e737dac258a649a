//! Unified error types surfaced by the runtime API.
//!
//! Targeting rejections never reach this type: providers treat them as "pick
//! another action". What remains are broken preconditions and grid failures.
use std::fmt;

use game_core::{
    CastError, EntityId, ErrorSeverity, GameError, GridError, SpellBookError,
};
use thiserror::Error;

pub type Result<T> = std::result::Result<T, RuntimeError>;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum RuntimeError {
    #[error("no live entities available for turn scheduling")]
    EmptyRoster,

    #[error("{kind} action provider not set")]
    ProviderNotSet { kind: ProviderKind },

    #[error("runtime requires a world before building")]
    MissingWorld,

    #[error("entity {0} is not in the world")]
    MissingActor(EntityId),

    #[error("entity {entity} names unknown archetype '{key}'")]
    UnknownArchetype { entity: EntityId, key: String },

    #[error(transparent)]
    Grid(#[from] GridError),

    #[error(transparent)]
    Cast(#[from] CastError),

    #[error(transparent)]
    SpellBook(#[from] SpellBookError),
}

impl GameError for RuntimeError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::EmptyRoster | Self::ProviderNotSet { .. } | Self::MissingWorld => {
                ErrorSeverity::Fatal
            }
            Self::MissingActor(_) | Self::UnknownArchetype { .. } => ErrorSeverity::Internal,
            Self::Grid(err) => err.severity(),
            Self::Cast(err) => err.severity(),
            Self::SpellBook(err) => err.severity(),
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::EmptyRoster => "RUNTIME_EMPTY_ROSTER",
            Self::ProviderNotSet { .. } => "RUNTIME_PROVIDER_NOT_SET",
            Self::MissingWorld => "RUNTIME_MISSING_WORLD",
            Self::MissingActor(_) => "RUNTIME_MISSING_ACTOR",
            Self::UnknownArchetype { .. } => "RUNTIME_UNKNOWN_ARCHETYPE",
            Self::Grid(err) => err.error_code(),
            Self::Cast(err) => err.error_code(),
            Self::SpellBook(err) => err.error_code(),
        }
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum ProviderKind {
    Player,
    Npc,
}

impl fmt::Display for ProviderKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            ProviderKind::Player => "player",
            ProviderKind::Npc => "npc",
        };
        write!(f, "{}", label)
    }
}
