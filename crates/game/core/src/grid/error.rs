//! Grid placement and movement errors.

use crate::error::{ErrorSeverity, GameError};
use crate::state::{EntityId, Position};

/// Errors raised while placing or moving grid occupants.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum GridError {
    /// Position is outside the map bounds.
    #[error("Position {position} is out of bounds (map size: {width}x{height})")]
    OutOfBounds {
        position: Position,
        width: u32,
        height: u32,
    },

    /// Tile already holds the maximum number of occupants.
    #[error("Tile {position} is full (capacity: {capacity})")]
    TileFull { position: Position, capacity: usize },

    /// Destination holds a solid occupant.
    #[error("Entity {entity} cannot enter {position}")]
    Blocked { entity: EntityId, position: Position },

    #[error("Entity {0} is not on the grid")]
    UnknownEntity(EntityId),

    #[error("Entity {0} already exists")]
    DuplicateEntity(EntityId),
}

impl GameError for GridError {
    fn severity(&self) -> ErrorSeverity {
        use GridError::*;
        match self {
            Blocked { .. } => ErrorSeverity::Recoverable,
            OutOfBounds { .. } | TileFull { .. } => ErrorSeverity::Validation,
            UnknownEntity(_) | DuplicateEntity(_) => ErrorSeverity::Internal,
        }
    }

    fn error_code(&self) -> &'static str {
        use GridError::*;
        match self {
            OutOfBounds { .. } => "GRID_OUT_OF_BOUNDS",
            TileFull { .. } => "GRID_TILE_FULL",
            Blocked { .. } => "GRID_BLOCKED",
            UnknownEntity(_) => "GRID_UNKNOWN_ENTITY",
            DuplicateEntity(_) => "GRID_DUPLICATE_ENTITY",
        }
    }
}
