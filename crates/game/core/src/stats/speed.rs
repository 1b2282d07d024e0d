//! Speed - Layer 3 of the stat system.
//!
//! Dexterity is the speed attribute. An actor with speed `s` acts once every
//! `TURN_DURATION / s` ticks, so doubling dexterity doubles turn frequency.

use super::core::CoreStats;

/// Ticks in one timeline unit. Divisible by every speed from 1 to 12.
pub const TURN_DURATION: u64 = 27_720;

/// Delay between two consecutive turns of an actor.
pub fn turn_delay(core: &CoreStats) -> u64 {
    TURN_DURATION / u64::from(core.dex.max(1))
}
