//! Item-related state types.
//!
//! - ItemHandle: reference to an item definition (lookup via Env)
//! - ItemState: an item lying on a level's floor

use std::fmt;

use super::{EntityId, Position};

/// Reference to an item definition stored outside the core (lookup via Env).
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct ItemHandle(pub u32);

impl ItemHandle {
    /// Every session starts with fire in hand.
    pub const FIRE: Self = Self(1);

    /// Loot left behind by slain creatures.
    pub const CARCASS: Self = Self(8);

    /// Inclusive range of first-order items scattered over fresh levels.
    pub const SPAWNABLE: (u32, u32) = (2, 7);
}

impl fmt::Display for ItemHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Items that exist on the ground (not inside the inventory).
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ItemState {
    pub id: EntityId,
    pub position: Position,
    pub handle: ItemHandle,
}

impl ItemState {
    pub fn new(id: EntityId, position: Position, handle: ItemHandle) -> Self {
        Self {
            id,
            position,
            handle,
        }
    }
}
