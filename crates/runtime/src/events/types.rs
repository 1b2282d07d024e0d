//! Event types for different topics.

use game_core::{
    Action, ActionResult, GameMessage, InventoryCommand, InventoryOutcome, InventoryState,
    LevelId, MessageTone, SessionStatus, Tick,
};
use serde::{Deserialize, Serialize};

use crate::presentation::StatusLine;

/// Events related to turn management
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum TurnEvent {
    /// The scheduler reached the player and waits for input.
    AwaitingInput { clock: Tick },

    /// An action ran to completion.
    ActionExecuted {
        action: Action,
        result: ActionResult,
        turn_consumed: bool,
        clock: Tick,
    },

    /// An action was refused before touching the state.
    ActionRejected {
        action: Action,
        error: String,
        clock: Tick,
    },
}

/// Inventory mutations, published after every successful command.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum InventoryEvent {
    Changed {
        outcome: InventoryOutcome,
        inventory: InventoryState,
    },
    Failed {
        command: InventoryCommand,
        error: String,
    },
}

/// Lines for the message log and the status panel.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum LogEvent {
    Message {
        message: GameMessage,
        /// Rendered text of `message`.
        text: String,
        tone: MessageTone,
    },
    Status(StatusLine),
}

impl LogEvent {
    pub fn message(message: GameMessage) -> Self {
        LogEvent::Message {
            text: message.to_string(),
            tone: message.tone(),
            message,
        }
    }
}

/// Session lifecycle.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum SessionEvent {
    /// The background generator delivered a level.
    LevelGenerated { level: LevelId },
    /// The player was placed on the entrance level.
    Started { level: LevelId },
    /// The player took an exit to a level that is still being generated.
    Loading { level: LevelId },
    LevelEntered { from: LevelId, to: LevelId },
    /// The scheduler stopped for good.
    Ended { status: SessionStatus },
    /// The session cannot continue.
    Failed { error: String },
}
