//! Stat system.
//!
//! ```text
//! [ Core Stats ]   STR / DEX / CON, permanently stored per actor
//!      ↓
//! [ Derived Stats ] hit points, attack, defense (never stored)
//!      ↓
//! [ Speed ]         turn delay on the scheduling timeline
//! ```
//!
//! Upper layers never depend on lower layers and every formula is a pure
//! function of the core attributes.

pub mod core;
pub mod derived;
pub mod speed;

pub use self::core::CoreStats;
pub use derived::DerivedStats;
pub use speed::{TURN_DURATION, turn_delay};
