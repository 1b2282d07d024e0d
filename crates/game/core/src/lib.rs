//! Deterministic game logic and data types shared across clients.
//!
//! `game-core` defines the canonical rules (crafting, combat, pathfinding,
//! turn scheduling, level transitions) and exposes pure APIs that the runtime
//! drives. All turn-taking state mutation flows through
//! [`engine::GameEngine`], and supporting crates depend on the types
//! re-exported here.
pub mod action;
pub mod combat;
pub mod config;
pub mod crafting;
pub mod engine;
pub mod env;
pub mod error;
pub mod message;
pub mod path;
pub mod state;
pub mod stats;

pub use action::{
    Action, ActionResult, ActionTransition, CreatureAction, CreatureError, CreatureIntent,
    CreatureResult, Direction, InteractAction, InteractError, InteractResult, InventoryCommand,
    InventoryError, InventoryOutcome, MoveAction, MoveError, MoveResult, PlayerInput, WaitAction,
};
pub use combat::{AttackOutcome, AttackResult};
pub use config::GameConfig;
pub use crafting::{CraftError, CraftOutcome, ItemRegistry, RecipeKey, RegistryError};
pub use engine::{
    ExecuteError, ExecutionOutcome, GameEngine, InventoryReport, SessionError, TransitionPhase,
    TransitionPhaseError, TurnError,
};
pub use env::{
    Env, FixedRng, GameEnv, ItemDefinition, ItemOracle, OracleError, PcgRng, RngOracle,
};
pub use error::{ErrorSeverity, GameError};
pub use message::{GameMessage, MessageTone};
pub use path::find_path;
pub use state::{
    ActorKind, ActorState, AiKind, Camera, CellKind, Controls, EntityId, Equip, ExitDirection,
    ExitLink, GameState, InventorySlot, InventoryState, ItemHandle, ItemState, Level, LevelError,
    LevelId, LevelLayout, Position, ResourceMeter, SessionStatus, StateError, Tick, TurnState,
};
pub use stats::{CoreStats, DerivedStats};
