use std::collections::BTreeSet;

use super::{EntityId, Tick};

/// Turn state managing the speed-based scheduling timeline.
#[derive(Clone, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TurnState {
    /// Current timeline clock.
    pub clock: Tick,

    /// Entities currently registered with the scheduler.
    pub active_actors: BTreeSet<EntityId>,

    /// The entity currently taking its turn. Cleared when that entity is
    /// removed mid-turn.
    pub current_actor: Option<EntityId>,

    /// Sequential action identifier that increments with every executed action.
    pub nonce: u64,
}

impl TurnState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Removes `entity` from the schedule, clearing the current turn if it
    /// was the one acting. Returns true if the entity was registered.
    pub fn retire(&mut self, entity: EntityId) -> bool {
        if self.current_actor == Some(entity) {
            self.current_actor = None;
        }
        self.active_actors.remove(&entity)
    }

    /// Drops every registration. Nothing acts until entities are activated again.
    pub fn halt(&mut self) {
        self.active_actors.clear();
        self.current_actor = None;
    }
}
