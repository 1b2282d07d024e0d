use super::ActionTransition;
use crate::env::{GameEnv, OracleError};
use crate::error::{ErrorSeverity, GameError};
use crate::state::{
    EntityId, ExitDirection, GameState, ItemHandle, LevelId, SessionStatus, StateError,
};

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum InteractError {
    #[error("actor {0} cannot interact on player input")]
    NotPlayer(EntityId),

    #[error(transparent)]
    State(#[from] StateError),

    #[error(transparent)]
    Oracle(#[from] OracleError),
}

impl GameError for InteractError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::NotPlayer(_) => ErrorSeverity::Internal,
            Self::State(error) => error.severity(),
            Self::Oracle(error) => error.severity(),
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::NotPlayer(_) => "INTERACT_NOT_PLAYER",
            Self::State(error) => error.error_code(),
            Self::Oracle(error) => error.error_code(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum InteractResult {
    /// The topmost item under the player moved into the inventory.
    PickedUp { item: ItemHandle },

    /// The player took an exit. The level switch itself happens once the
    /// destination level is available.
    Transition {
        from: LevelId,
        to: LevelId,
        /// Exit the player arrives on at the destination.
        arrival: ExitDirection,
    },

    /// The player took the up-exit of the last level.
    Escaped,

    /// Nothing under the player.
    Nothing,
}

impl InteractResult {
    /// Level transitions reschedule everyone on arrival instead.
    pub fn consumes_turn(&self) -> bool {
        !matches!(self, InteractResult::Transition { .. })
    }
}

/// Use whatever lies under the player: an exit first, otherwise an item.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct InteractAction {
    pub actor: EntityId,
}

impl InteractAction {
    pub fn new(actor: EntityId) -> Self {
        Self { actor }
    }
}

impl ActionTransition for InteractAction {
    type Error = InteractError;
    type Result = InteractResult;

    fn actor(&self) -> EntityId {
        self.actor
    }

    fn pre_validate(&self, state: &GameState, _env: &GameEnv<'_>) -> Result<(), Self::Error> {
        if !self.actor.is_player() {
            return Err(InteractError::NotPlayer(self.actor));
        }
        state.current_level()?;
        Ok(())
    }

    fn apply(
        &self,
        state: &mut GameState,
        env: &GameEnv<'_>,
    ) -> Result<InteractResult, InteractError> {
        let position = state.player.position;
        let from = state.active_level;

        if let Some((direction, link)) = state.current_level()?.exit_at(position) {
            if env.config()?.is_beyond_last_level(link.target.0) {
                state.turn.halt();
                state.finish(SessionStatus::Escaped);
                return Ok(InteractResult::Escaped);
            }
            return Ok(InteractResult::Transition {
                from,
                to: link.target,
                arrival: direction.opposite(),
            });
        }

        match state.current_level_mut()?.take_item_at(position) {
            Some(item) => {
                state.inventory.push(item.handle);
                Ok(InteractResult::PickedUp { item: item.handle })
            }
            None => Ok(InteractResult::Nothing),
        }
    }
}
