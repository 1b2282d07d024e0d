//! State management errors.

use crate::error::{ErrorSeverity, GameError};
use crate::state::{EntityId, LevelId, Position};

/// Errors raised while building a level from generator output.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum LevelError {
    #[error("layout has {actual} cells, expected {expected}")]
    LayoutSizeMismatch { expected: usize, actual: usize },

    #[error("free cell {position} lies outside the grid")]
    FreeCellOutOfBounds { position: Position },

    #[error("free cell {position} is not a floor cell")]
    FreeCellNotFloor { position: Position },
}

impl GameError for LevelError {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Internal
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::LayoutSizeMismatch { .. } => "LEVEL_LAYOUT_SIZE_MISMATCH",
            Self::FreeCellOutOfBounds { .. } => "LEVEL_FREE_CELL_OUT_OF_BOUNDS",
            Self::FreeCellNotFloor { .. } => "LEVEL_FREE_CELL_NOT_FLOOR",
        }
    }
}

/// Errors that occur during game state operations.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum StateError {
    /// Entity ID allocation overflow (all IDs exhausted).
    #[error("entity ID overflow (current: {current})")]
    EntityIdOverflow { current: u32 },

    /// The level has not been generated yet.
    #[error("level {level} is not loaded")]
    LevelNotLoaded { level: LevelId },

    /// The level was already installed.
    #[error("level {level} is already loaded")]
    LevelAlreadyLoaded { level: LevelId },

    #[error("actor {0} not found")]
    ActorNotFound(EntityId),

    /// No free floor cell left for a mandatory spawn.
    #[error("level {level} has no free floor cell left")]
    NoFreeCell { level: LevelId },
}

impl GameError for StateError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::LevelNotLoaded { .. } => ErrorSeverity::Recoverable,
            Self::ActorNotFound(_) | Self::LevelAlreadyLoaded { .. } => ErrorSeverity::Internal,
            Self::EntityIdOverflow { .. } | Self::NoFreeCell { .. } => ErrorSeverity::Fatal,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::EntityIdOverflow { .. } => "STATE_ENTITY_ID_OVERFLOW",
            Self::LevelNotLoaded { .. } => "STATE_LEVEL_NOT_LOADED",
            Self::LevelAlreadyLoaded { .. } => "STATE_LEVEL_ALREADY_LOADED",
            Self::ActorNotFound(_) => "STATE_ACTOR_NOT_FOUND",
            Self::NoFreeCell { .. } => "STATE_NO_FREE_CELL",
        }
    }
}
