//! Actor-related state types.
//!
//! - ActorState: shared attributes of every acting or blocking entity
//! - ActorKind: the tagged variant selecting input-driven, AI-driven or inert behavior
//! - AiKind: creature archetypes
//! - Inventory: item storage for the player

pub mod archetype;
pub mod inventory;

pub use archetype::AiKind;
pub use inventory::{Equip, InventorySlot, InventoryState};

use super::{EntityId, Position, ResourceMeter, Tick};
use crate::stats::{CoreStats, DerivedStats};

/// Behavior tag of an actor.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ActorKind {
    /// Acts on external input.
    Player,
    /// Acts through the AI strategy registered for its archetype.
    Creature { ai: AiKind },
    /// Blocks movement but never acts and cannot be attacked.
    Hearth,
}

/// Plain data shared by the player, creatures and inert blockers.
///
/// # Invariants
///
/// - `hp` stays within `[0, hp_max]`
/// - an actor with zero hp is never scheduled
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ActorState {
    pub id: EntityId,
    pub kind: ActorKind,
    pub name: String,
    pub glyph: char,
    pub position: Position,
    pub stats: CoreStats,
    pub hp: ResourceMeter,
    pub blocks: bool,

    /// Next tick at which the actor acts. `None` while unscheduled.
    pub ready_at: Option<Tick>,
}

impl ActorState {
    fn with_stats(
        id: EntityId,
        kind: ActorKind,
        name: impl Into<String>,
        glyph: char,
        position: Position,
        stats: CoreStats,
    ) -> Self {
        let derived = DerivedStats::compute(&stats);
        Self {
            id,
            kind,
            name: name.into(),
            glyph,
            position,
            stats,
            hp: ResourceMeter::full(derived.hp_max),
            blocks: true,
            ready_at: None,
        }
    }

    pub fn player(position: Position) -> Self {
        Self::with_stats(
            EntityId::PLAYER,
            ActorKind::Player,
            "Player",
            '@',
            position,
            CoreStats::default(),
        )
    }

    pub fn creature(id: EntityId, ai: AiKind, position: Position) -> Self {
        Self::with_stats(
            id,
            ActorKind::Creature { ai },
            ai.creature_name(),
            ai.glyph(),
            position,
            ai.stats(),
        )
    }

    pub fn hearth(id: EntityId, position: Position) -> Self {
        Self::with_stats(
            id,
            ActorKind::Hearth,
            "A Hearth",
            '=',
            position,
            CoreStats::new(1, 1, 1),
        )
    }

    pub fn derived(&self) -> DerivedStats {
        DerivedStats::compute(&self.stats)
    }

    pub fn is_alive(&self) -> bool {
        !self.hp.is_depleted()
    }

    pub fn is_player(&self) -> bool {
        matches!(self.kind, ActorKind::Player)
    }

    /// Creatures can be attacked; the player and inert blockers cannot be bumped into combat.
    pub fn is_hostile(&self) -> bool {
        matches!(self.kind, ActorKind::Creature { .. })
    }

    pub fn ai(&self) -> Option<AiKind> {
        match self.kind {
            ActorKind::Creature { ai } => Some(ai),
            _ => None,
        }
    }

    /// Player and creatures take turns; inert blockers never do.
    pub fn is_schedulable(&self) -> bool {
        self.is_alive() && !matches!(self.kind, ActorKind::Hearth)
    }
}
