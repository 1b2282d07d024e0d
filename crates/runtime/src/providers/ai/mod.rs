//! Creature AI.
//!
//! Every creature carries an [`AiKind`] tag. [`AiTable`] maps each tag to a
//! [`CreatureAi`] strategy, and [`AiProvider`] plugs the table into the
//! simulation worker as its [`ActionProvider`].

mod chase;

pub use chase::ChaseAi;

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use game_core::{
    Action, ActorState, AiKind, CreatureAction, CreatureIntent, EntityId, GameState,
};
use strum::IntoEnumIterator;

use crate::api::{ActionProvider, Result, RuntimeError};

/// Decision step for one creature turn.
///
/// Strategies only read the state; the engine validates and applies the
/// returned intent.
pub trait CreatureAi: Send + Sync {
    fn decide(&self, creature: &ActorState, state: &GameState) -> CreatureIntent;
}

/// Strategy per creature archetype.
#[derive(Clone)]
pub struct AiTable {
    strategies: HashMap<AiKind, Arc<dyn CreatureAi>>,
}

impl AiTable {
    /// Table with no strategies registered.
    pub fn empty() -> Self {
        Self {
            strategies: HashMap::new(),
        }
    }

    /// Registers (or replaces) the strategy for `kind`.
    pub fn with_strategy(mut self, kind: AiKind, strategy: Arc<dyn CreatureAi>) -> Self {
        self.strategies.insert(kind, strategy);
        self
    }

    pub fn strategy(&self, kind: AiKind) -> Option<&dyn CreatureAi> {
        self.strategies.get(&kind).map(|strategy| strategy.as_ref())
    }
}

impl Default for AiTable {
    /// Every archetype chases the player once within its aggro range.
    fn default() -> Self {
        let chase: Arc<dyn CreatureAi> = Arc::new(ChaseAi);
        AiKind::iter().fold(Self::empty(), |table, kind| {
            table.with_strategy(kind, Arc::clone(&chase))
        })
    }
}

/// [`ActionProvider`] dispatching through an [`AiTable`].
#[derive(Clone, Default)]
pub struct AiProvider {
    table: AiTable,
}

impl AiProvider {
    pub fn new(table: AiTable) -> Self {
        Self { table }
    }

    pub fn table(&self) -> &AiTable {
        &self.table
    }
}

#[async_trait]
impl ActionProvider for AiProvider {
    async fn provide_action(&self, entity: EntityId, state: &GameState) -> Result<Action> {
        let creature = state
            .actor(entity)
            .filter(|actor| !actor.is_player())
            .ok_or(RuntimeError::UnknownCreature(entity))?;
        let kind = creature.ai().ok_or(RuntimeError::MissingStrategy(entity))?;
        let strategy = self
            .table
            .strategy(kind)
            .ok_or(RuntimeError::MissingStrategy(entity))?;

        let intent = strategy.decide(creature, state);
        tracing::trace!(?entity, ?kind, ?intent, "creature decided");

        Ok(Action::Creature(CreatureAction::new(entity, intent)))
    }
}
