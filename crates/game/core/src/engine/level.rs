//! Session start and level transitions.
//!
//! Entering a level lazily opens its exits, places the player, tops the
//! item and creature population back up and rebuilds the schedule so that
//! only the player and the creatures of that level take turns.

use strum::EnumCount;

use crate::action::Direction;
use crate::env::GameEnv;
use crate::message::GameMessage;
use crate::state::{
    ActorState, AiKind, CellKind, EntityId, ExitDirection, ExitLink, ItemHandle, ItemState,
    LevelId, Position, StateError,
};

use super::{GameEngine, SessionError};

impl<'a> GameEngine<'a> {
    /// Places the player on the entrance level and starts the schedule.
    ///
    /// The entrance level must already be installed.
    pub fn start_session(&mut self, env: GameEnv<'_>) -> Result<(), SessionError> {
        if self.state.started {
            return Err(SessionError::AlreadyStarted);
        }

        let entrance = LevelId::ENTRANCE;
        self.state.level(entrance)?;
        self.state.active_level = entrance;

        let start = self.take_random_cell(&env, entrance)?;
        self.state.player.position = start;
        self.place_hearth(&env, entrance, start)?;

        self.state.started = true;
        self.settle(&env, entrance)
    }

    /// Moves the player to `to`, arriving on its `arrival` exit.
    pub fn enter_level(
        &mut self,
        env: GameEnv<'_>,
        to: LevelId,
        arrival: ExitDirection,
    ) -> Result<Vec<GameMessage>, SessionError> {
        if !self.state.started {
            return Err(SessionError::NotStarted);
        }
        self.state.level(to)?;

        let from = self.state.active_level;
        self.suspend_level(from);
        self.state.active_level = to;

        self.open_exits(&env, to)?;
        let exit = self
            .state
            .level(to)?
            .exit(arrival)
            .ok_or(SessionError::MissingExit {
                level: to,
                direction: arrival,
            })?;
        self.state.player.position = exit.cell;
        self.clear_arrival(&env, to, exit.cell)?;

        self.settle(&env, to)?;
        Ok(vec![
            GameMessage::LevelChange { from, to },
            GameMessage::FoundExit(arrival),
        ])
    }

    /// Moves a creature that wandered onto the arrival cell somewhere else.
    fn clear_arrival(
        &mut self,
        env: &GameEnv<'_>,
        level: LevelId,
        cell: Position,
    ) -> Result<(), SessionError> {
        let Some(squatter) = self.state.level(level)?.blocker_at(cell).map(|actor| actor.id) else {
            return Ok(());
        };
        let Some(elsewhere) = self.try_take_vacant_cell(env, level)? else {
            return Ok(());
        };
        if let Some(creature) = self.state.level_mut(level)?.creature_mut(squatter) {
            creature.position = elsewhere;
        }
        Ok(())
    }

    /// Shared tail of session start and level entry.
    fn settle(&mut self, env: &GameEnv<'_>, level: LevelId) -> Result<(), SessionError> {
        self.open_exits(env, level)?;
        self.populate(env, level)?;
        self.rebuild_schedule(level)?;
        self.state.refresh_camera();
        Ok(())
    }

    fn take_random_cell(
        &mut self,
        env: &GameEnv<'_>,
        level: LevelId,
    ) -> Result<Position, SessionError> {
        self.try_take_random_cell(env, level)?
            .ok_or(SessionError::State(StateError::NoFreeCell { level }))
    }

    fn try_take_random_cell(
        &mut self,
        env: &GameEnv<'_>,
        level: LevelId,
    ) -> Result<Option<Position>, SessionError> {
        let rng = env.rng()?;
        let seed = self.state.next_seed(EntityId::PLAYER);
        Ok(self
            .state
            .level_mut(level)?
            .take_free_cell(|len| rng.index(seed, len)))
    }

    /// A free cell that neither a blocker nor the player occupies. Creatures
    /// roam over cells still listed as free.
    fn try_take_vacant_cell(
        &mut self,
        env: &GameEnv<'_>,
        level: LevelId,
    ) -> Result<Option<Position>, SessionError> {
        let rng = env.rng()?;
        let seed = self.state.next_seed(EntityId::PLAYER);
        let player = self.state.player.position;
        Ok(self
            .state
            .level_mut(level)?
            .take_vacant_cell(player, |len| rng.index(seed, len)))
    }

    /// Puts the inert hearth on a free cell next to `anchor`, or anywhere if
    /// all neighbours are taken.
    fn place_hearth(
        &mut self,
        env: &GameEnv<'_>,
        level: LevelId,
        anchor: Position,
    ) -> Result<(), SessionError> {
        let id = self.state.allocate_entity_id()?;
        let target = self.state.level_mut(level)?;
        let beside = Direction::ALL
            .into_iter()
            .map(|direction| direction.step(anchor))
            .find(|&cell| target.claim_cell(cell));

        let position = match beside {
            Some(position) => position,
            None => self.take_random_cell(env, level)?,
        };
        self.state
            .level_mut(level)?
            .creatures
            .push(ActorState::hearth(id, position));
        Ok(())
    }

    fn open_exits(&mut self, env: &GameEnv<'_>, level: LevelId) -> Result<(), SessionError> {
        let has_up = self.state.level(level)?.exit_up.is_some();
        if !has_up {
            self.open_exit(env, level, ExitDirection::Up, level.above())?;
        }

        if let Some(below) = level.below() {
            let has_down = self.state.level(level)?.exit_down.is_some();
            if !has_down {
                self.open_exit(env, level, ExitDirection::Down, below)?;
            }
        }
        Ok(())
    }

    fn open_exit(
        &mut self,
        env: &GameEnv<'_>,
        level: LevelId,
        direction: ExitDirection,
        target: LevelId,
    ) -> Result<(), SessionError> {
        let cell = self.take_random_cell(env, level)?;
        let current = self.state.level_mut(level)?;
        current.set_cell(cell, direction.cell());
        let link = Some(ExitLink { cell, target });
        match direction {
            ExitDirection::Up => current.exit_up = link,
            ExitDirection::Down => current.exit_down = link,
        }
        Ok(())
    }

    /// Tops items and creatures up to their caps. Stops quietly when the
    /// level runs out of free floor.
    fn populate(&mut self, env: &GameEnv<'_>, level: LevelId) -> Result<(), SessionError> {
        let config = env.config()?;
        let rng = env.rng()?;
        let (low, high) = ItemHandle::SPAWNABLE;

        while self.state.level(level)?.items.len() < config.max_items as usize {
            let Some(position) = self.try_take_random_cell(env, level)? else {
                return Ok(());
            };
            let seed = self.state.next_seed(EntityId::PLAYER);
            let handle = ItemHandle(rng.range(seed, low, high));
            let id = self.state.allocate_entity_id()?;
            self.state
                .level_mut(level)?
                .items
                .push(ItemState::new(id, position, handle));
        }

        let cap = config.creature_cap(level.0) as usize;
        while self.state.level(level)?.hostile_count() < cap {
            let Some(position) = self.try_take_vacant_cell(env, level)? else {
                return Ok(());
            };
            let seed = self.state.next_seed(EntityId::PLAYER);
            let ai = AiKind::from_repr(rng.index(seed, AiKind::COUNT) as u8)
                .unwrap_or(AiKind::Normal);
            let id = self.state.allocate_entity_id()?;
            self.state
                .level_mut(level)?
                .creatures
                .push(ActorState::creature(id, ai, position));
        }
        Ok(())
    }

    /// Unschedules everything; creatures left behind keep their state.
    fn suspend_level(&mut self, level: LevelId) {
        self.state.turn.halt();
        self.state.player.ready_at = None;
        if let Ok(current) = self.state.level_mut(level) {
            for creature in &mut current.creatures {
                creature.ready_at = None;
            }
        }
    }

    /// Player first, then every living creature of `level`.
    fn rebuild_schedule(&mut self, level: LevelId) -> Result<(), SessionError> {
        self.state.turn.halt();
        let creatures: Vec<EntityId> = self
            .state
            .level(level)?
            .creatures
            .iter()
            .filter(|creature| creature.is_schedulable())
            .map(|creature| creature.id)
            .collect();

        self.activate_now(EntityId::PLAYER);
        for id in creatures {
            self.activate(id);
        }
        Ok(())
    }
}
