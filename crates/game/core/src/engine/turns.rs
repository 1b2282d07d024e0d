use crate::error::{ErrorSeverity, GameError};
use crate::state::{EntityId, Tick};
use crate::stats::turn_delay;

use super::GameEngine;

/// Errors that can occur during turn operations
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TurnError {
    #[error("no entities are currently active")]
    NoActiveEntities,

    #[error("the session is over")]
    Halted,
}

impl GameError for TurnError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::NoActiveEntities => ErrorSeverity::Internal,
            Self::Halted => ErrorSeverity::Validation,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::NoActiveEntities => "TURN_NO_ACTIVE_ENTITIES",
            Self::Halted => "TURN_HALTED",
        }
    }
}

/// Internal representation of a scheduled turn
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct ScheduledTurn {
    entity: EntityId,
    ready_at: Tick,
}

/// Turn scheduling methods for GameEngine.
///
/// Every registered entity carries a `ready_at` tick. The entity with the
/// smallest tick acts next (ties go to the lower id), and after a consumed
/// turn it is pushed back by a delay inversely proportional to its dexterity.
impl<'a> GameEngine<'a> {
    /// Returns the current timeline clock value.
    pub fn clock(&self) -> Tick {
        self.state.turn.clock
    }

    /// Checks if an entity is currently scheduled.
    pub fn is_entity_active(&self, entity: EntityId) -> bool {
        self.state.turn.active_actors.contains(&entity)
    }

    /// Registers an entity so that it first acts one full delay from now.
    pub fn activate(&mut self, entity: EntityId) {
        let clock = self.state.turn.clock;
        self.schedule_at(entity, |delay| clock + delay);
    }

    /// Registers an entity so that it acts before anyone already waiting.
    pub fn activate_now(&mut self, entity: EntityId) {
        let clock = self.state.turn.clock;
        self.schedule_at(entity, |_| clock);
    }

    fn schedule_at(&mut self, entity: EntityId, at: impl FnOnce(u64) -> Tick) {
        let Some(actor) = self.state.actor_mut(entity) else {
            return;
        };
        if !actor.is_schedulable() {
            return;
        }
        actor.ready_at = Some(at(turn_delay(&actor.stats)));
        self.state.turn.active_actors.insert(entity);
    }

    /// Deactivates an entity, removing it from scheduling and the active set.
    /// Returns true if the entity was active.
    pub fn deactivate(&mut self, entity: EntityId) -> bool {
        if let Some(actor) = self.state.actor_mut(entity) {
            actor.ready_at = None;
        }
        self.state.turn.retire(entity)
    }

    /// Pushes the entity's next turn back by its delay.
    pub(super) fn reschedule(&mut self, entity: EntityId) {
        if !self.is_entity_active(entity) {
            return;
        }
        let clock = self.state.turn.clock;
        if let Some(actor) = self.state.actor_mut(entity) {
            actor.ready_at = Some(clock + turn_delay(&actor.stats));
        }
        if self.state.turn.current_actor == Some(entity) {
            self.state.turn.current_actor = None;
        }
    }

    /// Selects the next entity to act by finding the one with the smallest ready_at tick.
    /// Returns None if no entities are active.
    fn select_next_turn(&self) -> Option<ScheduledTurn> {
        self.state
            .turn
            .active_actors
            .iter()
            .filter_map(|&id| {
                let actor = self.state.actor(id)?;
                if !actor.is_alive() {
                    return None;
                }
                actor.ready_at.map(|tick| (tick, id))
            })
            .min_by_key(|(tick, entity)| (*tick, *entity))
            .map(|(ready_at, entity)| ScheduledTurn { entity, ready_at })
    }

    /// Prepares for the next turn by selecting the next entity and updating the clock.
    ///
    /// Returns the entity that must act next. The caller then provides its
    /// action via `execute()`. Calling this again before that action was
    /// executed returns the same entity.
    pub fn prepare_next_turn(&mut self) -> Result<EntityId, TurnError> {
        if self.state.status.is_over() {
            return Err(TurnError::Halted);
        }
        if let Some(current) = self.state.turn.current_actor {
            return Ok(current);
        }

        let scheduled = self.select_next_turn().ok_or(TurnError::NoActiveEntities)?;
        self.state.turn.clock = scheduled.ready_at;
        self.state.turn.current_actor = Some(scheduled.entity);

        Ok(scheduled.entity)
    }

    /// Returns the entity currently taking their turn.
    pub fn current_actor(&self) -> Option<EntityId> {
        self.state.turn.current_actor
    }
}
