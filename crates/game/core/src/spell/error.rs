//! Spell casting, registry and spell book errors.

use crate::error::{ErrorSeverity, GameError};
use crate::grid::GridError;
use crate::state::EntityId;
use crate::targeting::TargetRejection;

use super::SpellKind;

/// Why a cast did not happen.
#[derive(Clone, Debug, PartialEq, thiserror::Error)]
pub enum CastError {
    /// Target rejected by the snap chain; nothing was mutated.
    #[error(transparent)]
    Rejected(#[from] TargetRejection),

    #[error("caster {0} is not on the grid")]
    MissingCaster(EntityId),

    #[error(transparent)]
    Grid(#[from] GridError),
}

impl CastError {
    /// True if the caller should simply pick another action.
    pub fn is_rejection(&self) -> bool {
        matches!(self, Self::Rejected(_))
    }
}

impl GameError for CastError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::Rejected(rejection) => rejection.severity(),
            Self::MissingCaster(_) => ErrorSeverity::Internal,
            Self::Grid(err) => err.severity(),
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::Rejected(rejection) => rejection.error_code(),
            Self::MissingCaster(_) => "CAST_MISSING_CASTER",
            Self::Grid(err) => err.error_code(),
        }
    }
}

/// Spell identifier lookup failures.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum RegistryError {
    #[error("unknown spell '{0}'")]
    UnknownSpell(String),

    #[error("spell '{0}' is already registered")]
    Duplicate(String),
}

impl GameError for RegistryError {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Validation
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::UnknownSpell(_) => "REGISTRY_UNKNOWN_SPELL",
            Self::Duplicate(_) => "REGISTRY_DUPLICATE",
        }
    }
}

/// Slot preparation and crafting failures.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum SpellBookError {
    #[error("slot {0} does not exist")]
    InvalidSlot(usize),

    #[error("slot {0} is empty")]
    EmptySlot(usize),

    #[error("slot {slot} is recharging ({remaining} turns left)")]
    OnCooldown { slot: usize, remaining: u32 },

    #[error("no free slot for a crafted spell")]
    NoFreeSlot,

    #[error("{0} is already equipped")]
    AlreadyKnown(SpellKind),

    #[error("missing letters to spell '{0}'")]
    MissingLetters(String),

    #[error(transparent)]
    Registry(#[from] RegistryError),
}

impl GameError for SpellBookError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::OnCooldown { .. } => ErrorSeverity::Recoverable,
            _ => ErrorSeverity::Validation,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::InvalidSlot(_) => "BOOK_INVALID_SLOT",
            Self::EmptySlot(_) => "BOOK_EMPTY_SLOT",
            Self::OnCooldown { .. } => "BOOK_ON_COOLDOWN",
            Self::NoFreeSlot => "BOOK_NO_FREE_SLOT",
            Self::AlreadyKnown(_) => "BOOK_ALREADY_KNOWN",
            Self::MissingLetters(_) => "BOOK_MISSING_LETTERS",
            Self::Registry(err) => err.error_code(),
        }
    }
}
