//! Level generation collaborator.
//!
//! The runtime treats map generation as an opaque asynchronous producer of a
//! [`LevelLayout`]: a grid of floor and wall cells plus the floor cells free
//! for spawning. Exits are opened later by the engine on free cells.

mod rooms;

pub use rooms::RoomsGenerator;

use async_trait::async_trait;
use game_core::{LevelId, LevelLayout};
use thiserror::Error;

/// Parameters for one level.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MapRequest {
    pub level: LevelId,
    pub width: u32,
    pub height: u32,
    pub seed: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MapGenError {
    #[error("map of {width}x{height} is too small (minimum {min}x{min})")]
    TooSmall { width: u32, height: u32, min: u32 },

    #[error("generator produced no floor cells")]
    NoFloor,

    #[error("generator failed: {0}")]
    Other(String),
}

/// Produces level layouts. Implementations must be deterministic for a
/// given request.
#[async_trait]
pub trait MapGenerator: Send + Sync {
    async fn generate(&self, request: MapRequest) -> Result<LevelLayout, MapGenError>;
}
