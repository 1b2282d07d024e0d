//! Worker tasks that back the runtime orchestration.
//!
//! The simulation worker owns the session and runs the scheduler, while the
//! generation worker produces levels in the background and hands them over.

mod generation;
mod simulation;

pub use generation::{GenerationWorker, LevelDelivery};
pub use simulation::{Command, SimulationWorker};

use serde::{Deserialize, Serialize};

/// Where the scheduler currently stands.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize, strum::Display)]
pub enum SchedulerPhase {
    /// Waiting for the level the player is headed to.
    #[strum(serialize = "loading")]
    Loading,
    /// Suspended on the player's turn.
    #[strum(serialize = "awaiting input")]
    AwaitingInput,
    /// Running creature turns.
    #[strum(serialize = "resolving")]
    Resolving,
    /// Locked for good after death, escape or a fatal error.
    #[strum(serialize = "stopped")]
    Stopped,
}
