//! Inventory commands.
//!
//! These act on the player's pack outside the turn order: they never consume
//! a turn and are gated by [`Controls`] instead of the scheduler.

use crate::crafting::{CraftError, CraftOutcome, craft};
use crate::env::{GameEnv, OracleError};
use crate::error::{ErrorSeverity, GameError};
use crate::state::{Controls, Equip, GameState, ItemHandle, ItemState, StateError};

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum InventoryCommand {
    /// Combine the given items. Order is irrelevant.
    Craft { items: Vec<ItemHandle> },
    /// Put the selected slots on the ground under the player.
    Drop { slots: Vec<usize> },
    Wear { slots: Vec<usize> },
    Wield { slots: Vec<usize> },
    /// Clear the equip marker of the selected slots.
    Remove { slots: Vec<usize> },
    Use { slot: usize },
}

impl InventoryCommand {
    /// Control group that must be enabled for this command.
    pub fn control(&self) -> Controls {
        match self {
            Self::Craft { .. } => Controls::CRAFT,
            Self::Drop { .. } => Controls::DROP,
            Self::Wear { .. } | Self::Wield { .. } | Self::Remove { .. } => Controls::EQUIP,
            Self::Use { .. } => Controls::USE,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Craft { .. } => "craft",
            Self::Drop { .. } => "drop",
            Self::Wear { .. } => "wear",
            Self::Wield { .. } => "wield",
            Self::Remove { .. } => "remove",
            Self::Use { .. } => "use",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum InventoryError {
    #[error("{command} is disabled")]
    Disabled { command: String },

    #[error("no item selected")]
    NothingSelected,

    #[error("inventory slot {slot} is empty")]
    SlotOutOfRange { slot: usize },

    #[error(transparent)]
    Craft(#[from] CraftError),

    #[error(transparent)]
    State(#[from] StateError),

    #[error(transparent)]
    Oracle(#[from] OracleError),
}

impl GameError for InventoryError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::Disabled { .. } | Self::NothingSelected | Self::SlotOutOfRange { .. } => {
                ErrorSeverity::Validation
            }
            Self::Craft(error) => error.severity(),
            Self::State(error) => error.severity(),
            Self::Oracle(error) => error.severity(),
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::Disabled { .. } => "INVENTORY_DISABLED",
            Self::NothingSelected => "INVENTORY_NOTHING_SELECTED",
            Self::SlotOutOfRange { .. } => "INVENTORY_SLOT_OUT_OF_RANGE",
            Self::Craft(error) => error.error_code(),
            Self::State(error) => error.error_code(),
            Self::Oracle(error) => error.error_code(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum InventoryOutcome {
    Crafted(CraftOutcome),
    Dropped { items: Vec<ItemHandle> },
    Equipped { equip: Equip, items: Vec<ItemHandle> },
    Removed { items: Vec<ItemHandle> },
    /// Nothing in the catalogue has a use effect.
    NotUsable { item: ItemHandle },
}

/// Sorted, de-duplicated selection, checked against the inventory length.
fn selection(state: &GameState, slots: &[usize]) -> Result<Vec<usize>, InventoryError> {
    if slots.is_empty() {
        return Err(InventoryError::NothingSelected);
    }

    let mut selected = slots.to_vec();
    selected.sort_unstable();
    selected.dedup();

    match selected.iter().find(|&&slot| slot >= state.inventory.len()) {
        Some(&slot) => Err(InventoryError::SlotOutOfRange { slot }),
        None => Ok(selected),
    }
}

fn mark(
    state: &mut GameState,
    slots: &[usize],
    equip: Option<Equip>,
) -> Result<Vec<ItemHandle>, InventoryError> {
    let selected = selection(state, slots)?;
    let mut items = Vec::with_capacity(selected.len());
    for slot in selected {
        let entry = state
            .inventory
            .slot_mut(slot)
            .ok_or(InventoryError::SlotOutOfRange { slot })?;
        entry.equipped = equip;
        items.push(entry.handle);
    }
    Ok(items)
}

fn drop_items(state: &mut GameState, slots: &[usize]) -> Result<Vec<ItemHandle>, InventoryError> {
    let selected = selection(state, slots)?;
    let position = state.player.position;
    state.current_level()?;

    // Highest slot first so the remaining indices stay valid.
    let mut items = Vec::with_capacity(selected.len());
    for &slot in selected.iter().rev() {
        let taken = state
            .inventory
            .take(slot)
            .ok_or(InventoryError::SlotOutOfRange { slot })?;
        let id = state.allocate_entity_id()?;
        state
            .current_level_mut()?
            .items
            .push(ItemState::new(id, position, taken.handle));
        items.push(taken.handle);
    }
    items.reverse();
    Ok(items)
}

/// Applies an inventory command to the session.
pub fn apply_inventory_command(
    state: &mut GameState,
    env: &GameEnv<'_>,
    command: &InventoryCommand,
) -> Result<InventoryOutcome, InventoryError> {
    if !state.controls.contains(command.control()) {
        return Err(InventoryError::Disabled {
            command: command.as_str().to_owned(),
        });
    }

    match command {
        InventoryCommand::Craft { items } => {
            let outcome = craft(env.items()?, &mut state.inventory, items)?;
            Ok(InventoryOutcome::Crafted(outcome))
        }
        InventoryCommand::Drop { slots } => Ok(InventoryOutcome::Dropped {
            items: drop_items(state, slots)?,
        }),
        InventoryCommand::Wear { slots } => Ok(InventoryOutcome::Equipped {
            equip: Equip::Worn,
            items: mark(state, slots, Some(Equip::Worn))?,
        }),
        InventoryCommand::Wield { slots } => Ok(InventoryOutcome::Equipped {
            equip: Equip::Wielded,
            items: mark(state, slots, Some(Equip::Wielded))?,
        }),
        InventoryCommand::Remove { slots } => Ok(InventoryOutcome::Removed {
            items: mark(state, slots, None)?,
        }),
        InventoryCommand::Use { slot } => {
            let item = state
                .inventory
                .slot(*slot)
                .ok_or(InventoryError::SlotOutOfRange { slot: *slot })?
                .handle;
            Ok(InventoryOutcome::NotUsable { item })
        }
    }
}
