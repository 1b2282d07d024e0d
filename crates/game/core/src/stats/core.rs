//! Core Stats - Layer 1 of the stat system.
//!
//! Strength, dexterity and constitution are the only stored attributes.
//! Everything else is derived from them.

/// The three core attributes that define an actor.
///
/// - **STR** (Strength): melee power and hit points
/// - **DEX** (Dexterity): melee power and turn frequency
/// - **CON** (Constitution): melee power and hit points
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CoreStats {
    pub str: u32,
    pub dex: u32,
    pub con: u32,
}

impl CoreStats {
    /// Creates core stats. Attributes are positive; zeroes are raised to one.
    pub const fn new(str: u32, dex: u32, con: u32) -> Self {
        Self {
            str: if str == 0 { 1 } else { str },
            dex: if dex == 0 { 1 } else { dex },
            con: if con == 0 { 1 } else { con },
        }
    }

    /// Sum of all three attributes.
    pub const fn total(&self) -> u32 {
        self.str + self.dex + self.con
    }
}

impl Default for CoreStats {
    /// The starting player line: 3 / 3 / 3.
    fn default() -> Self {
        Self::new(3, 3, 3)
    }
}
