//! Error types for the action execution pipeline and session management.

use crate::action::{
    ActionTransition, CreatureAction, InteractAction, MoveAction, WaitAction,
};
use crate::env::OracleError;
use crate::error::{ErrorSeverity, GameError};
use crate::state::{EntityId, LevelId, StateError};

/// Identifies which stage of the transition pipeline produced an error.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TransitionPhase {
    PreValidate,
    Apply,
    PostValidate,
}

impl TransitionPhase {
    pub fn as_str(&self) -> &'static str {
        match self {
            TransitionPhase::PreValidate => "pre_validate",
            TransitionPhase::Apply => "apply",
            TransitionPhase::PostValidate => "post_validate",
        }
    }
}

/// Associates a transition phase with the underlying error.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TransitionPhaseError<E> {
    pub phase: TransitionPhase,
    pub error: E,
}

impl<E> TransitionPhaseError<E> {
    pub fn new(phase: TransitionPhase, error: E) -> Self {
        Self { phase, error }
    }

    /// True when the error surfaced before any mutation.
    pub fn is_rejection(&self) -> bool {
        self.phase == TransitionPhase::PreValidate
    }
}

impl<E: std::fmt::Display> std::fmt::Display for TransitionPhaseError<E> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} failed: {}", self.phase.as_str(), self.error)
    }
}

impl<E: std::fmt::Display + std::fmt::Debug> std::error::Error for TransitionPhaseError<E> {}

impl<E: GameError> GameError for TransitionPhaseError<E> {
    fn severity(&self) -> ErrorSeverity {
        match self.phase {
            TransitionPhase::PreValidate => self.error.severity(),
            // A mutation already happened; the state no longer matches the rules.
            TransitionPhase::Apply | TransitionPhase::PostValidate => {
                match self.error.severity() {
                    ErrorSeverity::Fatal => ErrorSeverity::Fatal,
                    _ => ErrorSeverity::Internal,
                }
            }
        }
    }

    fn error_code(&self) -> &'static str {
        self.error.error_code()
    }
}

/// Errors surfaced while executing an action through the game engine.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ExecuteError {
    #[error("move action failed: {0}")]
    Move(TransitionPhaseError<<MoveAction as ActionTransition>::Error>),

    #[error("wait action failed: {0}")]
    Wait(TransitionPhaseError<<WaitAction as ActionTransition>::Error>),

    #[error("interact action failed: {0}")]
    Interact(TransitionPhaseError<<InteractAction as ActionTransition>::Error>),

    #[error("creature action failed: {0}")]
    Creature(TransitionPhaseError<<CreatureAction as ActionTransition>::Error>),

    #[error("invalid actor: action actor {actor} does not match current turn actor {current_actor:?}")]
    ActorNotCurrent {
        actor: EntityId,
        current_actor: Option<EntityId>,
    },

    #[error("the session is over")]
    SessionOver,
}

impl ExecuteError {
    pub fn actor_not_current(actor: EntityId, current_actor: Option<EntityId>) -> Self {
        Self::ActorNotCurrent {
            actor,
            current_actor,
        }
    }

    /// True when the action was turned down before touching the state, so the
    /// actor still owns the turn.
    pub fn is_rejection(&self) -> bool {
        match self {
            Self::Move(error) => error.is_rejection(),
            Self::Wait(_) => true,
            Self::Interact(error) => error.is_rejection(),
            Self::Creature(error) => error.is_rejection(),
            Self::ActorNotCurrent { .. } | Self::SessionOver => true,
        }
    }
}

impl GameError for ExecuteError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::Move(error) => error.severity(),
            Self::Wait(error) => error.severity(),
            Self::Interact(error) => error.severity(),
            Self::Creature(error) => error.severity(),
            Self::ActorNotCurrent { .. } | Self::SessionOver => ErrorSeverity::Validation,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::Move(error) => error.error_code(),
            Self::Wait(error) => error.error_code(),
            Self::Interact(error) => error.error_code(),
            Self::Creature(error) => error.error_code(),
            Self::ActorNotCurrent { .. } => "EXECUTE_ACTOR_NOT_CURRENT",
            Self::SessionOver => "EXECUTE_SESSION_OVER",
        }
    }
}

/// Errors raised while starting the session or switching levels.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SessionError {
    #[error("the session has already started")]
    AlreadyStarted,

    #[error("the session has not started yet")]
    NotStarted,

    #[error("level {level} has no {direction} exit")]
    MissingExit {
        level: LevelId,
        direction: crate::state::ExitDirection,
    },

    #[error(transparent)]
    State(#[from] StateError),

    #[error(transparent)]
    Oracle(#[from] OracleError),
}

impl GameError for SessionError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::AlreadyStarted | Self::NotStarted => ErrorSeverity::Validation,
            Self::MissingExit { .. } => ErrorSeverity::Internal,
            Self::State(error) => error.severity(),
            Self::Oracle(error) => error.severity(),
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::AlreadyStarted => "SESSION_ALREADY_STARTED",
            Self::NotStarted => "SESSION_NOT_STARTED",
            Self::MissingExit { .. } => "SESSION_MISSING_EXIT",
            Self::State(error) => error.error_code(),
            Self::Oracle(error) => error.error_code(),
        }
    }
}
