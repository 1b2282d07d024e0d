//! Action domain.
//!
//! Turn-taking actions implement [`ActionTransition`] and are wrapped in
//! [`Action`] before they reach the engine. Inventory commands sit beside
//! them: they mutate the pack without spending a turn.
//!
//! # Module Structure
//!
//! - `direction`: eight-way grid directions
//! - `movement`: directional player input (step, melee, bump)
//! - `interact`: pick up, take an exit, escape
//! - `wait`: pass the turn
//! - `creature`: carry out an AI intent
//! - `inventory`: craft, drop, equip and use commands

mod creature;
mod direction;
mod interact;
mod inventory;
mod movement;
mod wait;

pub use creature::{CreatureAction, CreatureError, CreatureIntent, CreatureResult};
pub use direction::Direction;
pub use interact::{InteractAction, InteractError, InteractResult};
pub use inventory::{
    InventoryCommand, InventoryError, InventoryOutcome, apply_inventory_command,
};
pub use movement::{MoveAction, MoveError, MoveResult};
pub use wait::WaitAction;

use crate::combat::AttackOutcome;
use crate::env::GameEnv;
use crate::state::{EntityId, GameState};

/// Defines how a concrete action variant mutates game state.
///
/// Validation hooks receive read-only access to the state and environment and
/// must stay side-effect free. A failing `pre_validate` guarantees that the
/// state was not touched.
pub trait ActionTransition {
    type Error;
    type Result;

    /// Returns the entity performing this action.
    fn actor(&self) -> EntityId;

    /// Validates pre-conditions using the state **before** mutation.
    fn pre_validate(&self, _state: &GameState, _env: &GameEnv<'_>) -> Result<(), Self::Error> {
        Ok(())
    }

    /// Applies the action by mutating the game state directly.
    fn apply(&self, state: &mut GameState, env: &GameEnv<'_>) -> Result<Self::Result, Self::Error>;

    /// Validates post-conditions using the state **after** mutation.
    fn post_validate(&self, _state: &GameState, _env: &GameEnv<'_>) -> Result<(), Self::Error> {
        Ok(())
    }
}

/// Abstract player input delivered by the input collaborator.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum PlayerInput {
    Move(Direction),
    Wait,
    Interact,
}

impl PlayerInput {
    pub fn into_action(self) -> Action {
        let actor = EntityId::PLAYER;
        match self {
            PlayerInput::Move(direction) => Action::Move(MoveAction::new(actor, direction)),
            PlayerInput::Wait => Action::Wait(WaitAction::new(actor)),
            PlayerInput::Interact => Action::Interact(InteractAction::new(actor)),
        }
    }
}

/// A turn-taking action.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Action {
    Move(MoveAction),
    Wait(WaitAction),
    Interact(InteractAction),
    Creature(CreatureAction),
}

impl Action {
    /// Returns the entity ID performing this action.
    pub fn actor(&self) -> EntityId {
        match self {
            Action::Move(action) => action.actor(),
            Action::Wait(action) => action.actor(),
            Action::Interact(action) => action.actor(),
            Action::Creature(action) => action.actor(),
        }
    }

    pub fn as_snake_case(&self) -> &'static str {
        match self {
            Action::Move(_) => "move",
            Action::Wait(_) => "wait",
            Action::Interact(_) => "interact",
            Action::Creature(_) => "creature",
        }
    }
}

impl From<PlayerInput> for Action {
    fn from(input: PlayerInput) -> Self {
        input.into_action()
    }
}

/// Action-specific execution result.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ActionResult {
    Move(MoveResult),
    Wait,
    Interact(InteractResult),
    Creature(CreatureResult),
}

impl ActionResult {
    /// Whether the actor spent its turn. Bumping an inert blocker and taking
    /// an exit do not.
    pub fn consumes_turn(&self) -> bool {
        match self {
            ActionResult::Move(result) => result.consumes_turn(),
            ActionResult::Wait | ActionResult::Creature(_) => true,
            ActionResult::Interact(result) => result.consumes_turn(),
        }
    }

    /// True when the result ended the session.
    pub fn ends_session(&self) -> bool {
        match self {
            ActionResult::Interact(InteractResult::Escaped) => true,
            ActionResult::Creature(CreatureResult::Attacked { attack, .. }) => {
                attack.outcome == AttackOutcome::Killed
            }
            _ => false,
        }
    }
}
