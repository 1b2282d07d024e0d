//! Creature archetypes.
//!
//! Each archetype fixes a creature's name, glyph, attribute line and the
//! squared distance under which it starts chasing the player.

use crate::stats::CoreStats;

#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::EnumIter,
    strum::EnumCount,
    strum::FromRepr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[repr(u8)]
pub enum AiKind {
    /// Spider: weak and keeps its distance.
    Timid = 0,
    /// Orc.
    Normal = 1,
    /// Giant: strong and notices the player from far away.
    Aggressive = 2,
}

impl AiKind {
    /// Squared distance below which the creature pursues the player.
    pub const fn aggro_threshold(self) -> i64 {
        match self {
            Self::Timid => 36,
            Self::Normal => 64,
            Self::Aggressive => 100,
        }
    }

    pub const fn stats(self) -> CoreStats {
        match self {
            Self::Timid => CoreStats::new(1, 1, 1),
            Self::Normal => CoreStats::new(2, 2, 2),
            Self::Aggressive => CoreStats::new(6, 2, 6),
        }
    }

    pub const fn creature_name(self) -> &'static str {
        match self {
            Self::Timid => "Spider",
            Self::Normal => "Orc",
            Self::Aggressive => "Giant",
        }
    }

    pub const fn glyph(self) -> char {
        match self {
            Self::Timid => 's',
            Self::Normal => 'o',
            Self::Aggressive => 'G',
        }
    }
}
