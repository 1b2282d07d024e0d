//! Runtime orchestration for the turn-based simulation.
//!
//! This crate wires together the creature AI, oracle access, level
//! generation and worker tasks into a cohesive runtime API. Consumers embed
//! [`Runtime`] to start a session, subscribe to events, and drive the player
//! through [`RuntimeHandle`].
//!
//! Modules are organized by responsibility:
//! - [`runtime`] hosts the orchestrator and builder
//! - [`api`] exposes the types downstream clients interact with
//! - [`events`] provides topic-based event bus for flexible event routing
//! - [`providers`] holds the creature AI strategy table
//! - [`mapgen`] defines the map generator collaborator and the built-in one
//! - [`presentation`] defines the render and log collaborators
//! - [`oracle`] bundles the static content handed to game-core
pub mod api;
pub mod events;
pub mod mapgen;
pub mod oracle;
pub mod presentation;
pub mod providers;
pub mod runtime;

mod workers;

pub use api::{
    ActionProvider, IdleActionProvider, InputDisposition, Result, RuntimeError, RuntimeHandle,
};
pub use events::{Event, EventBus, InventoryEvent, LogEvent, SessionEvent, Topic, TurnEvent};
pub use mapgen::{MapGenError, MapGenerator, MapRequest, RoomsGenerator};
pub use oracle::OracleManager;
pub use presentation::{LogEntry, LogSink, MessageLog, Renderer, StatusLine, render_level};
pub use providers::{AiProvider, AiTable, ChaseAi, CreatureAi};
pub use runtime::{Runtime, RuntimeBuilder, RuntimeConfig};
pub use workers::SchedulerPhase;
