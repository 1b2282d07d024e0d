//! Topic-based event bus for runtime events.
//!
//! Events are published to specific topics, and consumers subscribe only to
//! the topics they need. The presentation layer drives its render and log
//! collaborators from these streams.

mod bus;
mod types;

pub use bus::{Event, EventBus, Topic};
pub use types::{InventoryEvent, LogEvent, SessionEvent, TurnEvent};
