//! Presentation collaborators.
//!
//! The runtime never draws anything itself. Frontends implement
//! [`Renderer`] and [`LogSink`]; the helpers here walk the session state and
//! the event stream and call into them.

mod log;
mod view;

pub use log::{LogEntry, MessageLog};
pub use view::render_level;

use std::fmt;

use game_core::{ActorState, CellKind, MessageTone};
use serde::{Deserialize, Serialize};

/// Draws the visible part of the active level.
pub trait Renderer {
    /// Terrain at view coordinates `(x, y)`.
    fn draw_cell(&mut self, x: u32, y: u32, cell: CellKind);

    /// Free text (item and actor glyphs, labels) at view coordinates.
    fn draw_text(&mut self, x: u32, y: u32, text: &str, tone: Option<MessageTone>);
}

/// Receives log lines and status snapshots. The sink owns retention.
pub trait LogSink {
    fn log_message(&mut self, text: &str, tone: Option<MessageTone>);

    fn write_status(&mut self, status: &StatusLine);
}

/// Snapshot of the player shown in the status panel.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusLine {
    pub hp: u32,
    pub hp_max: u32,
    pub strength: u32,
    pub dexterity: u32,
    pub constitution: u32,
    /// Score. Nothing awards points yet.
    pub points: u32,
}

impl From<&ActorState> for StatusLine {
    fn from(actor: &ActorState) -> Self {
        Self {
            hp: actor.hp.current(),
            hp_max: actor.hp.maximum(),
            strength: actor.stats.str,
            dexterity: actor.stats.dex,
            constitution: actor.stats.con,
            points: 0,
        }
    }
}

impl fmt::Display for StatusLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "HP: {}/{} STR: {} DEX: {} CON: {} PTS: {}",
            self.hp, self.hp_max, self.strength, self.dexterity, self.constitution, self.points
        )
    }
}
