//! Authoritative session state.
//!
//! This module owns the data structures that describe the player, the
//! generated levels, turn bookkeeping and the session outcome. Runtime layers
//! clone or query this state but mutate it exclusively through the engine.
pub mod camera;
pub mod controls;
pub mod error;
pub mod types;

use std::collections::BTreeMap;

pub use camera::Camera;
pub use controls::Controls;
pub use error::{LevelError, StateError};
pub use types::{
    ActorKind, ActorState, AiKind, CellKind, EntityId, Equip, ExitDirection, ExitLink,
    InventorySlot, InventoryState, ItemHandle, ItemState, Level, LevelId, LevelLayout, Position,
    ResourceMeter, Tick, TurnState,
};

use crate::config::GameConfig;
use crate::env::compute_seed;

/// How the session currently stands.
#[derive(Clone, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SessionStatus {
    #[default]
    Running,
    /// The player was killed by the named creature.
    Dead { killer: String },
    /// The player left through the last level's up-exit.
    Escaped,
}

impl SessionStatus {
    pub fn is_over(&self) -> bool {
        !matches!(self, SessionStatus::Running)
    }
}

/// Canonical snapshot of one game session.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GameState {
    /// Set once at session start and never modified.
    pub game_seed: u64,

    /// Sequential entity ID allocator. Never reused; 0 is the player.
    next_entity_id: u32,

    /// Distinguishes consecutive random rolls made within one action.
    roll_counter: u32,

    pub turn: TurnState,
    pub player: ActorState,
    pub inventory: InventoryState,

    /// Levels delivered by the generator so far.
    pub levels: BTreeMap<LevelId, Level>,
    pub active_level: LevelId,

    /// Whether the entrance level has already been populated.
    pub started: bool,

    pub camera: Camera,
    pub controls: Controls,
    pub status: SessionStatus,
}

impl GameState {
    /// Fresh session. The player carries fire and has not been placed yet.
    pub fn new(game_seed: u64, config: &GameConfig) -> Self {
        Self {
            game_seed,
            next_entity_id: 1,
            roll_counter: 0,
            turn: TurnState::new(),
            player: ActorState::player(Position::ORIGIN),
            inventory: InventoryState::with_items([ItemHandle::FIRE]),
            levels: BTreeMap::new(),
            active_level: LevelId::ENTRANCE,
            started: false,
            camera: Camera::new(config.view_width, config.view_height),
            controls: Controls::all(),
            status: SessionStatus::Running,
        }
    }

    /// Allocates a new unique EntityId.
    pub fn allocate_entity_id(&mut self) -> Result<EntityId, StateError> {
        let id = EntityId(self.next_entity_id);
        self.next_entity_id =
            self.next_entity_id
                .checked_add(1)
                .ok_or(StateError::EntityIdOverflow {
                    current: self.next_entity_id,
                })?;
        Ok(id)
    }

    /// Seed for the next random roll made on behalf of `actor`.
    pub fn next_seed(&mut self, actor: EntityId) -> u64 {
        let context = self.roll_counter;
        self.roll_counter = self.roll_counter.wrapping_add(1);
        compute_seed(self.game_seed, self.turn.nonce, actor.0, context)
    }

    pub fn is_level_loaded(&self, level: LevelId) -> bool {
        self.levels.contains_key(&level)
    }

    /// Stores a freshly generated level.
    pub fn install_level(&mut self, level: Level) -> Result<(), StateError> {
        if self.levels.contains_key(&level.id) {
            return Err(StateError::LevelAlreadyLoaded { level: level.id });
        }
        self.levels.insert(level.id, level);
        Ok(())
    }

    pub fn level(&self, id: LevelId) -> Result<&Level, StateError> {
        self.levels
            .get(&id)
            .ok_or(StateError::LevelNotLoaded { level: id })
    }

    pub fn level_mut(&mut self, id: LevelId) -> Result<&mut Level, StateError> {
        self.levels
            .get_mut(&id)
            .ok_or(StateError::LevelNotLoaded { level: id })
    }

    pub fn current_level(&self) -> Result<&Level, StateError> {
        self.level(self.active_level)
    }

    pub fn current_level_mut(&mut self) -> Result<&mut Level, StateError> {
        self.level_mut(self.active_level)
    }

    /// The player or a creature on the active level.
    pub fn actor(&self, id: EntityId) -> Option<&ActorState> {
        if id.is_player() {
            return Some(&self.player);
        }
        self.levels.get(&self.active_level)?.creature(id)
    }

    pub fn actor_mut(&mut self, id: EntityId) -> Option<&mut ActorState> {
        if id.is_player() {
            return Some(&mut self.player);
        }
        self.levels.get_mut(&self.active_level)?.creature_mut(id)
    }

    /// Centres the camera on the player within the active level.
    pub fn refresh_camera(&mut self) {
        if let Some(level) = self.levels.get(&self.active_level) {
            self.camera
                .follow(self.player.position, level.width, level.height);
        }
    }

    /// Ends the session and disables every player command.
    pub fn finish(&mut self, status: SessionStatus) {
        self.status = status;
        self.controls = Controls::empty();
    }
}
