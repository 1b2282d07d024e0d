//! Turn scheduling and action execution pipeline.
//!
//! The [`GameEngine`] is the authoritative reducer for [`GameState`]. It
//! orchestrates the transition phases, keeps the schedule in step with what
//! happened, and narrates every outcome for the presentation layer.

mod errors;
mod level;
mod narrate;
mod transition;
mod turns;

pub use errors::{ExecuteError, SessionError, TransitionPhase, TransitionPhaseError};
pub use narrate::inventory_failure;
pub use turns::TurnError;

use crate::action::{
    Action, ActionResult, InventoryCommand, InventoryError, InventoryOutcome,
    apply_inventory_command,
};
use crate::env::GameEnv;
use crate::message::GameMessage;
use crate::state::GameState;

/// Complete outcome of action execution.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ExecutionOutcome {
    /// Action-specific execution result (combat outcome, pickup, exit...).
    pub action_result: ActionResult,

    /// Log lines describing the result, in order.
    pub messages: Vec<GameMessage>,

    /// Whether the actor spent its turn and was rescheduled.
    pub turn_consumed: bool,
}

/// Outcome of an inventory command.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct InventoryReport {
    pub outcome: InventoryOutcome,
    pub messages: Vec<GameMessage>,
}

/// Game engine that manages action execution, turn scheduling, and game logic.
///
/// All turn-taking mutations flow through the three-phase action pipeline:
/// pre_validate → apply → post_validate
pub struct GameEngine<'a> {
    state: &'a mut GameState,
}

impl<'a> GameEngine<'a> {
    /// Creates a new game engine with the given state.
    pub fn new(state: &'a mut GameState) -> Self {
        Self { state }
    }

    /// Executes an action on behalf of the entity whose turn it is.
    ///
    /// A rejected action (wall, out of reach, wrong actor) leaves the state
    /// untouched and the turn with the same actor.
    pub fn execute(
        &mut self,
        env: GameEnv<'_>,
        action: &Action,
    ) -> Result<ExecutionOutcome, ExecuteError> {
        if self.state.status.is_over() {
            return Err(ExecuteError::SessionOver);
        }
        self.validate_actor(action)?;

        let action_result = transition::execute_transition(action, self.state, &env)?;
        self.state.turn.nonce += 1;

        let turn_consumed = action_result.consumes_turn();
        if turn_consumed {
            self.reschedule(action.actor());
        }

        let messages = narrate::action(&action_result, &env);
        Ok(ExecutionOutcome {
            action_result,
            messages,
            turn_consumed,
        })
    }

    /// Applies an inventory command. Never touches the schedule.
    pub fn manage_inventory(
        &mut self,
        env: GameEnv<'_>,
        command: &InventoryCommand,
    ) -> Result<InventoryReport, InventoryError> {
        let outcome = apply_inventory_command(self.state, &env, command)?;
        let messages = narrate::inventory(&outcome, &env);
        Ok(InventoryReport { outcome, messages })
    }

    /// Validates action actor matches turn state.
    fn validate_actor(&self, action: &Action) -> Result<(), ExecuteError> {
        let current_actor = self.state.turn.current_actor;
        if current_actor != Some(action.actor()) {
            return Err(ExecuteError::actor_not_current(action.actor(), current_actor));
        }
        Ok(())
    }

    pub fn state(&self) -> &GameState {
        self.state
    }
}
