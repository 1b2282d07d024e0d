//! Unified error types surfaced by the runtime API.
//!
//! Wraps failures from worker coordination, session setup and level
//! generation so clients can bubble them up with consistent context.
use thiserror::Error;
use tokio::sync::oneshot;

use game_core::{
    EntityId, ExecuteError, InventoryError, LevelError, LevelId, SessionError, TurnError,
};

use crate::mapgen::MapGenError;
use crate::workers::SchedulerPhase;

pub type Result<T> = std::result::Result<T, RuntimeError>;

#[derive(Debug, Error)]
pub enum RuntimeError {
    #[error("simulation worker command channel closed")]
    CommandChannelClosed,

    #[error("simulation worker reply channel closed")]
    ReplyChannelClosed(#[source] oneshot::error::RecvError),

    #[error("runtime worker join failed")]
    WorkerJoin(#[source] tokio::task::JoinError),

    #[error("failed to load built-in content: {reason}")]
    Content { reason: String },

    #[error("creature {0} is not on the active level")]
    UnknownCreature(EntityId),

    #[error("creature {0} has no AI strategy registered")]
    MissingStrategy(EntityId),

    #[error("player commands are not accepted while {phase}")]
    NotAwaitingInput { phase: SchedulerPhase },

    #[error("failed to generate level {level}")]
    MapGeneration {
        level: LevelId,
        #[source]
        source: MapGenError,
    },

    #[error("generated level {level} is malformed")]
    MalformedLevel {
        level: LevelId,
        #[source]
        source: LevelError,
    },

    #[error(transparent)]
    Execute(#[from] ExecuteError),

    #[error(transparent)]
    Inventory(#[from] InventoryError),

    #[error(transparent)]
    Session(#[from] SessionError),

    #[error(transparent)]
    Turn(#[from] TurnError),
}
