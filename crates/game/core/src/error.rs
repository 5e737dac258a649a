//! Common error infrastructure for game-core.
//!
//! Domain errors (`GridError`, `TargetRejection`, `CastError`, ...) live next
//! to the code that raises them and share the [`GameError`] trait defined here.

/// Severity level of an error, used for categorization and recovery strategies.
///
/// - **Recoverable**: the caller should pick another action (blocked square,
///   rejected target, spell on cooldown)
/// - **Validation**: invalid input that should not be retried unchanged
/// - **Internal**: unexpected state inconsistency, indicates a bug
/// - **Fatal**: the session cannot continue
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ErrorSeverity {
    Recoverable,
    Validation,
    Internal,
    Fatal,
}

impl ErrorSeverity {
    /// Returns a human-readable description of this severity level.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Recoverable => "recoverable",
            Self::Validation => "validation",
            Self::Internal => "internal",
            Self::Fatal => "fatal",
        }
    }

    /// Returns true if this error is potentially recoverable.
    pub const fn is_recoverable(&self) -> bool {
        matches!(self, Self::Recoverable)
    }

    /// Returns true if this error indicates an internal bug.
    pub const fn is_internal(&self) -> bool {
        matches!(self, Self::Internal | Self::Fatal)
    }
}

/// Common trait for all game-core errors.
///
/// All error enums implement this trait alongside `thiserror::Error`.
/// Severity is classified by recoverability, not impact.
pub trait GameError: core::fmt::Display + core::fmt::Debug {
    /// Returns the severity level of this error.
    fn severity(&self) -> ErrorSeverity;

    /// Returns a static string identifier for this error variant.
    ///
    /// Stable across releases; useful for logging and tests.
    fn error_code(&self) -> &'static str {
        core::any::type_name::<Self>()
    }
}
