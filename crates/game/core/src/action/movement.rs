use super::{ActionTransition, Direction};
use crate::combat::{AttackOutcome, AttackResult, resolve_attack};
use crate::env::{GameEnv, OracleError};
use crate::error::{ErrorSeverity, GameError};
use crate::state::{
    EntityId, ExitDirection, GameState, ItemHandle, ItemState, Position, StateError,
};

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum MoveError {
    #[error("actor {0} cannot move on player input")]
    NotPlayer(EntityId),

    #[error("destination {destination} is blocked")]
    Blocked { destination: Position },

    #[error("creature {0} not found on the active level")]
    TargetNotFound(EntityId),

    #[error(transparent)]
    State(#[from] StateError),

    #[error(transparent)]
    Oracle(#[from] OracleError),
}

impl GameError for MoveError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::Blocked { .. } => ErrorSeverity::Validation,
            Self::NotPlayer(_) | Self::TargetNotFound(_) => ErrorSeverity::Internal,
            Self::State(error) => error.severity(),
            Self::Oracle(error) => error.severity(),
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::NotPlayer(_) => "MOVE_NOT_PLAYER",
            Self::Blocked { .. } => "MOVE_BLOCKED",
            Self::TargetNotFound(_) => "MOVE_TARGET_NOT_FOUND",
            Self::State(error) => error.error_code(),
            Self::Oracle(error) => error.error_code(),
        }
    }
}

/// What a directional input turned into.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum MoveResult {
    /// The player stepped onto `to`, possibly on top of an item or an exit.
    Moved {
        to: Position,
        item: Option<ItemHandle>,
        exit: Option<ExitDirection>,
    },

    /// The destination held a creature, so the player struck it instead.
    Attacked {
        target: EntityId,
        name: String,
        attack: AttackResult,
        /// Item left behind when the blow was fatal.
        loot: Option<ItemHandle>,
    },

    /// The destination held an inert blocker. Nothing happened.
    Bumped { name: String },
}

impl MoveResult {
    pub fn consumes_turn(&self) -> bool {
        !matches!(self, MoveResult::Bumped { .. })
    }
}

/// Directional player input: step, attack or bump depending on the target cell.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MoveAction {
    pub actor: EntityId,
    pub direction: Direction,
}

impl MoveAction {
    pub fn new(actor: EntityId, direction: Direction) -> Self {
        Self { actor, direction }
    }

    fn strike(
        &self,
        state: &mut GameState,
        env: &GameEnv<'_>,
        target: EntityId,
    ) -> Result<MoveResult, MoveError> {
        let roll = env.rng()?.uniform(state.next_seed(self.actor));
        let active = state.active_level;
        let level = state
            .levels
            .get_mut(&active)
            .ok_or(StateError::LevelNotLoaded { level: active })?;
        let defender = level
            .creature_mut(target)
            .ok_or(MoveError::TargetNotFound(target))?;

        let attack = resolve_attack(&state.player, defender, roll);
        let name = defender.name.clone();
        let fallen_at = defender.position;

        if attack.outcome != AttackOutcome::Killed {
            return Ok(MoveResult::Attacked {
                target,
                name,
                attack,
                loot: None,
            });
        }

        level.remove_creature(target);
        state.turn.retire(target);

        let id = state.allocate_entity_id()?;
        state
            .current_level_mut()?
            .items
            .push(ItemState::new(id, fallen_at, ItemHandle::CARCASS));

        Ok(MoveResult::Attacked {
            target,
            name,
            attack,
            loot: Some(ItemHandle::CARCASS),
        })
    }
}

impl ActionTransition for MoveAction {
    type Error = MoveError;
    type Result = MoveResult;

    fn actor(&self) -> EntityId {
        self.actor
    }

    fn pre_validate(&self, state: &GameState, _env: &GameEnv<'_>) -> Result<(), Self::Error> {
        if !self.actor.is_player() {
            return Err(MoveError::NotPlayer(self.actor));
        }

        let destination = self.direction.step(state.player.position);
        if !state.current_level()?.is_passable(destination) {
            return Err(MoveError::Blocked { destination });
        }

        Ok(())
    }

    fn apply(&self, state: &mut GameState, env: &GameEnv<'_>) -> Result<MoveResult, MoveError> {
        let destination = self.direction.step(state.player.position);

        let blocker = state
            .current_level()?
            .blocker_at(destination)
            .map(|actor| (actor.id, actor.is_hostile(), actor.name.clone()));
        match blocker {
            Some((target, true, _)) => return self.strike(state, env, target),
            Some((_, false, name)) => return Ok(MoveResult::Bumped { name }),
            None => {}
        }

        state.player.position = destination;
        state.refresh_camera();

        let level = state.current_level()?;
        Ok(MoveResult::Moved {
            to: destination,
            item: level.item_at(destination).map(|item| item.handle),
            exit: level.exit_at(destination).map(|(direction, _)| direction),
        })
    }

    fn post_validate(&self, state: &GameState, _env: &GameEnv<'_>) -> Result<(), Self::Error> {
        let position = state.player.position;
        if !state.current_level()?.is_passable(position) {
            return Err(MoveError::Blocked {
                destination: position,
            });
        }
        Ok(())
    }
}
