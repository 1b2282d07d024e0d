//! Derived Stats - Layer 2 of the stat system.
//!
//! Combat values derived from [`CoreStats`]. These are NOT stored and are
//! recomputed whenever an attack is resolved.

use super::core::CoreStats;

/// Derived combat statistics.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DerivedStats {
    /// Maximum hit points: `5 × (STR + CON)`.
    pub hp_max: u32,

    /// Melee attack: `⌊(STR + DEX + CON) / 3⌋`.
    pub attack: u32,

    /// Melee defense: `max(attack − 2, 0)`.
    pub defense: u32,
}

impl DerivedStats {
    pub fn compute(core: &CoreStats) -> Self {
        let attack = core.total() / 3;
        Self {
            hp_max: 5 * (core.str + core.con),
            attack,
            defense: attack.saturating_sub(2),
        }
    }
}

impl From<&CoreStats> for DerivedStats {
    fn from(core: &CoreStats) -> Self {
        Self::compute(core)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn player_line() {
        let derived = DerivedStats::compute(&CoreStats::new(3, 3, 3));
        assert_eq!(derived.hp_max, 30);
        assert_eq!(derived.attack, 3);
        assert_eq!(derived.defense, 1);
    }

    #[test]
    fn archetype_lines() {
        let timid = DerivedStats::compute(&CoreStats::new(1, 1, 1));
        assert_eq!((timid.hp_max, timid.attack, timid.defense), (10, 1, 0));

        let normal = DerivedStats::compute(&CoreStats::new(2, 2, 2));
        assert_eq!((normal.hp_max, normal.attack, normal.defense), (20, 2, 0));

        let aggressive = DerivedStats::compute(&CoreStats::new(6, 2, 6));
        assert_eq!(
            (aggressive.hp_max, aggressive.attack, aggressive.defense),
            (60, 4, 2)
        );
    }
}
