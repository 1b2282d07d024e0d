//! Cloneable façade for issuing commands to the runtime.
//!
//! [`RuntimeHandle`] hides channel plumbing and offers async helpers for
//! submitting player input, managing the inventory or streaming events from
//! specific topics.
use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use tokio::sync::{broadcast, mpsc, oneshot};

use game_core::{GameState, InventoryCommand, InventoryReport, PlayerInput};

use super::errors::{Result, RuntimeError};
use crate::events::{Event, EventBus, Topic};
use crate::workers::{Command, SchedulerPhase};

/// What happened to a submitted player input.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum InputDisposition {
    /// The input resolved; the scheduler moved on.
    Accepted,
    /// The move was refused (wall, blocked exit...). Still the player's turn.
    Rejected { reason: String },
    /// The scheduler was not waiting for input, so the input was dropped.
    Ignored,
}

/// Client-facing handle to interact with the runtime
#[derive(Clone)]
pub struct RuntimeHandle {
    command_tx: mpsc::Sender<Command>,
    event_bus: EventBus,
}

impl RuntimeHandle {
    pub(crate) fn new(command_tx: mpsc::Sender<Command>, event_bus: EventBus) -> Self {
        Self {
            command_tx,
            event_bus,
        }
    }

    async fn request<T>(&self, command: impl FnOnce(oneshot::Sender<T>) -> Command) -> Result<T> {
        let (reply_tx, reply_rx) = oneshot::channel();

        self.command_tx
            .send(command(reply_tx))
            .await
            .map_err(|_| RuntimeError::CommandChannelClosed)?;

        reply_rx.await.map_err(RuntimeError::ReplyChannelClosed)
    }

    /// Submit a player input. This is the only way to resume the scheduler.
    ///
    /// Inputs that arrive while the scheduler is not awaiting input are
    /// dropped and reported as [`InputDisposition::Ignored`].
    pub async fn submit_input(&self, input: PlayerInput) -> Result<InputDisposition> {
        self.request(|reply| Command::SubmitInput { input, reply })
            .await?
    }

    /// Apply an inventory command (craft, drop, wear, wield, remove, use).
    pub async fn inventory(&self, command: InventoryCommand) -> Result<InventoryReport> {
        self.request(|reply| Command::Inventory { command, reply })
            .await?
    }

    /// Query the current game state (read-only snapshot)
    pub async fn query_state(&self) -> Result<GameState> {
        self.request(|reply| Command::QueryState { reply }).await
    }

    /// Query the scheduler phase.
    pub async fn phase(&self) -> Result<SchedulerPhase> {
        self.request(|reply| Command::QueryPhase { reply }).await
    }

    /// Subscribe to events from a specific topic
    ///
    /// # Topics
    ///
    /// - `Topic::Turn` - Player turns, executed and rejected actions
    /// - `Topic::Inventory` - Inventory mutations
    /// - `Topic::Log` - Log lines and status snapshots
    /// - `Topic::Session` - Level generation, transitions and the outcome
    pub fn subscribe(&self, topic: Topic) -> broadcast::Receiver<Event> {
        self.event_bus.subscribe(topic)
    }

    /// Subscribe to multiple topics at once
    pub fn subscribe_multiple(&self, topics: &[Topic]) -> HashMap<Topic, broadcast::Receiver<Event>> {
        self.event_bus.subscribe_multiple(topics)
    }

    /// Get a reference to the event bus for advanced usage
    pub fn event_bus(&self) -> &EventBus {
        &self.event_bus
    }
}
