//! Asynchronous abstraction for sourcing creature intent.
//!
//! The simulation worker asks an [`ActionProvider`] for every non-player
//! turn, so sessions can run with the built-in AI table, scripted fixtures
//! or any other policy.
use async_trait::async_trait;
use game_core::{Action, CreatureAction, CreatureIntent, EntityId, GameState};

use super::errors::Result;

/// Trait for providing actions based on the current game state.
#[async_trait]
pub trait ActionProvider: Send + Sync {
    /// Provide an action for `entity` based on a read-only view of the session.
    async fn provide_action(&self, entity: EntityId, state: &GameState) -> Result<Action>;
}

/// Provider whose creatures never do anything.
pub struct IdleActionProvider;

#[async_trait]
impl ActionProvider for IdleActionProvider {
    async fn provide_action(&self, entity: EntityId, _state: &GameState) -> Result<Action> {
        Ok(Action::Creature(CreatureAction::new(
            entity,
            CreatureIntent::Idle,
        )))
    }
}
