//! Creature turns.
//!
//! The AI layer decides a [`CreatureIntent`]; this transition checks it
//! against the current level and carries it out.

use super::{ActionTransition, Direction};
use crate::combat::{AttackOutcome, AttackResult, resolve_attack};
use crate::env::{GameEnv, OracleError};
use crate::error::{ErrorSeverity, GameError};
use crate::state::{EntityId, GameState, Position, SessionStatus, StateError};

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CreatureError {
    #[error("creature {0} not found on the active level")]
    NotFound(EntityId),

    #[error("creature {creature} cannot step to {destination}")]
    Blocked {
        creature: EntityId,
        destination: Position,
    },

    #[error("creature {creature} is not adjacent to the player")]
    OutOfReach { creature: EntityId },

    #[error(transparent)]
    State(#[from] StateError),

    #[error(transparent)]
    Oracle(#[from] OracleError),
}

impl GameError for CreatureError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::NotFound(_) => ErrorSeverity::Internal,
            Self::Blocked { .. } | Self::OutOfReach { .. } => ErrorSeverity::Validation,
            Self::State(error) => error.severity(),
            Self::Oracle(error) => error.severity(),
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::NotFound(_) => "CREATURE_NOT_FOUND",
            Self::Blocked { .. } => "CREATURE_BLOCKED",
            Self::OutOfReach { .. } => "CREATURE_OUT_OF_REACH",
            Self::State(error) => error.error_code(),
            Self::Oracle(error) => error.error_code(),
        }
    }
}

/// What a creature wants to do with its turn.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CreatureIntent {
    Idle,
    Step(Direction),
    Attack,
}

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CreatureResult {
    Idled,
    Stepped {
        to: Position,
    },
    Attacked {
        name: String,
        attack: AttackResult,
    },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CreatureAction {
    pub actor: EntityId,
    pub intent: CreatureIntent,
}

impl CreatureAction {
    pub fn new(actor: EntityId, intent: CreatureIntent) -> Self {
        Self { actor, intent }
    }

    fn position(&self, state: &GameState) -> Result<Position, CreatureError> {
        state
            .current_level()?
            .creature(self.actor)
            .filter(|creature| creature.is_hostile() && creature.is_alive())
            .map(|creature| creature.position)
            .ok_or(CreatureError::NotFound(self.actor))
    }
}

impl ActionTransition for CreatureAction {
    type Error = CreatureError;
    type Result = CreatureResult;

    fn actor(&self) -> EntityId {
        self.actor
    }

    fn pre_validate(&self, state: &GameState, _env: &GameEnv<'_>) -> Result<(), Self::Error> {
        let origin = self.position(state)?;

        match self.intent {
            CreatureIntent::Idle => Ok(()),
            CreatureIntent::Step(direction) => {
                let destination = direction.step(origin);
                let level = state.current_level()?;
                let free = level.is_passable(destination)
                    && level.blocker_at(destination).is_none()
                    && state.player.position != destination;
                if free {
                    Ok(())
                } else {
                    Err(CreatureError::Blocked {
                        creature: self.actor,
                        destination,
                    })
                }
            }
            CreatureIntent::Attack => {
                if origin.chebyshev(state.player.position) == 1 {
                    Ok(())
                } else {
                    Err(CreatureError::OutOfReach {
                        creature: self.actor,
                    })
                }
            }
        }
    }

    fn apply(
        &self,
        state: &mut GameState,
        env: &GameEnv<'_>,
    ) -> Result<CreatureResult, CreatureError> {
        match self.intent {
            CreatureIntent::Idle => Ok(CreatureResult::Idled),
            CreatureIntent::Step(direction) => {
                let creature = state
                    .current_level_mut()?
                    .creature_mut(self.actor)
                    .ok_or(CreatureError::NotFound(self.actor))?;
                let to = direction.step(creature.position);
                creature.position = to;
                Ok(CreatureResult::Stepped { to })
            }
            CreatureIntent::Attack => {
                let roll = env.rng()?.uniform(state.next_seed(self.actor));
                let active = state.active_level;
                let attacker = state
                    .levels
                    .get(&active)
                    .and_then(|level| level.creature(self.actor))
                    .ok_or(CreatureError::NotFound(self.actor))?;

                let attack = resolve_attack(attacker, &mut state.player, roll);
                let name = attacker.name.clone();

                if attack.outcome == AttackOutcome::Killed {
                    state.turn.halt();
                    state.finish(SessionStatus::Dead {
                        killer: name.clone(),
                    });
                }

                Ok(CreatureResult::Attacked { name, attack })
            }
        }
    }
}
