//! Oracle access errors.

use crate::error::{ErrorSeverity, GameError};
use crate::state::ItemHandle;

/// Errors that occur when accessing oracle data.
///
/// Missing oracles are fatal since the engine cannot proceed without item
/// definitions, randomness or configuration.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum OracleError {
    #[error("ItemOracle not available")]
    ItemsNotAvailable,

    #[error("RngOracle not available")]
    RngNotAvailable,

    #[error("GameConfig not available")]
    ConfigNotAvailable,

    /// Item definition was not found by handle.
    #[error("item definition {0} not found")]
    ItemNotFound(ItemHandle),
}

impl GameError for OracleError {
    fn severity(&self) -> ErrorSeverity {
        use OracleError::*;
        match self {
            ItemsNotAvailable | RngNotAvailable | ConfigNotAvailable => ErrorSeverity::Fatal,
            ItemNotFound(_) => ErrorSeverity::Validation,
        }
    }

    fn error_code(&self) -> &'static str {
        use OracleError::*;
        match self {
            ItemsNotAvailable => "ORACLE_ITEMS_NOT_AVAILABLE",
            RngNotAvailable => "ORACLE_RNG_NOT_AVAILABLE",
            ConfigNotAvailable => "ORACLE_CONFIG_NOT_AVAILABLE",
            ItemNotFound(_) => "ORACLE_ITEM_NOT_FOUND",
        }
    }
}
