//! Player-facing log lines.
//!
//! The engine narrates every outcome as [`GameMessage`] values. Sinks render
//! them through `Display` and pick a colour from [`MessageTone`].

use std::fmt;

use crate::state::{ExitDirection, LevelId};

/// Colour hint for a log line.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default, strum::Display)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case")]
pub enum MessageTone {
    #[default]
    Info,
    Danger,
    Success,
    Transition,
}

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum GameMessage {
    FoundItem { item: String },
    FoundExit(ExitDirection),
    PickedUp { item: String },
    LevelChange { from: LevelId, to: LevelId },
    Bumped { name: String },
    PlayerHit { target: String, damage: u32 },
    PlayerMissed,
    Killed { target: String },
    CreatureHit { attacker: String, damage: u32 },
    CreatureMissed { attacker: String },
    PlayerKilled { killer: String },
    GameOver,
    Escaped,
    Crafted { item: String },
    CraftFailed,
    CraftNeedsMore,
    MissingIngredients,
    Dropped { item: String },
    Wore { item: String },
    Wielded { item: String },
    Removed { item: String },
    CannotUse,
}

impl GameMessage {
    pub fn tone(&self) -> MessageTone {
        match self {
            GameMessage::Killed { .. }
            | GameMessage::CreatureHit { .. }
            | GameMessage::PlayerKilled { .. }
            | GameMessage::GameOver => MessageTone::Danger,
            GameMessage::Crafted { .. } | GameMessage::Escaped => MessageTone::Success,
            GameMessage::LevelChange { .. } => MessageTone::Transition,
            _ => MessageTone::Info,
        }
    }
}

impl fmt::Display for GameMessage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GameMessage::FoundItem { item } => write!(f, "You Found {item}"),
            GameMessage::FoundExit(direction) => write!(f, "You Found An Exit {direction}"),
            GameMessage::PickedUp { item } => write!(f, "You Pick Up {item}"),
            GameMessage::LevelChange { from, to } => {
                write!(f, "Leaving Level {from} and Entering Level {to}")
            }
            GameMessage::Bumped { name } => write!(f, "Player Runs Into {name}"),
            GameMessage::PlayerHit { target, damage } => {
                write!(f, "Player Attacks {target} For {damage} Damage")
            }
            GameMessage::PlayerMissed => f.write_str("Player's Attack Was Ineffectual"),
            GameMessage::Killed { target } => write!(f, "You Killed The {target}!"),
            GameMessage::CreatureHit { attacker, damage } => {
                write!(f, "{attacker} Attacks For {damage} Damage")
            }
            GameMessage::CreatureMissed { attacker } => {
                write!(f, "{attacker}'s Attack Was Ineffectual")
            }
            GameMessage::PlayerKilled { killer } => write!(f, "You Were Killed By The {killer}!"),
            GameMessage::GameOver => f.write_str("Game Over, Better Luck Next Time"),
            GameMessage::Escaped => f.write_str("Congratulations, you managed to escape alive!"),
            GameMessage::Crafted { item } => write!(f, "You Crafted {item}!"),
            GameMessage::CraftFailed => f.write_str("Hmm ... That Didn't Work"),
            GameMessage::CraftNeedsMore => {
                f.write_str("Please Select Two Or More Items To Craft")
            }
            GameMessage::MissingIngredients => f.write_str("You Don't Have All Of Those"),
            GameMessage::Dropped { item } => write!(f, "You Dropped {item}!"),
            GameMessage::Wore { item } => write!(f, "You Wear {item}!"),
            GameMessage::Wielded { item } => write!(f, "You Wield {item}!"),
            GameMessage::Removed { item } => write!(f, "You Removed {item}!"),
            GameMessage::CannotUse => f.write_str("I Don't Know How To Use That"),
        }
    }
}
