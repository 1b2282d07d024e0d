//! Player inventory.
//!
//! Insertion order is pickup/craft order. The same handle may appear more
//! than once when distinct instances were picked up.

use crate::state::types::ItemHandle;

/// How an inventory item is currently carried.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Equip {
    #[strum(serialize = "worn")]
    Worn,
    #[strum(serialize = "wielded")]
    Wielded,
}

/// One carried item instance.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct InventorySlot {
    pub handle: ItemHandle,
    pub equipped: Option<Equip>,
}

impl InventorySlot {
    pub fn new(handle: ItemHandle) -> Self {
        Self {
            handle,
            equipped: None,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct InventoryState {
    pub items: Vec<InventorySlot>,
}

impl InventoryState {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn with_items(handles: impl IntoIterator<Item = ItemHandle>) -> Self {
        Self {
            items: handles.into_iter().map(InventorySlot::new).collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn push(&mut self, handle: ItemHandle) {
        self.items.push(InventorySlot::new(handle));
    }

    pub fn contains(&self, handle: ItemHandle) -> bool {
        self.items.iter().any(|slot| slot.handle == handle)
    }

    /// Number of carried instances of `handle`.
    pub fn count(&self, handle: ItemHandle) -> usize {
        self.items.iter().filter(|slot| slot.handle == handle).count()
    }

    pub fn handles(&self) -> impl Iterator<Item = ItemHandle> + '_ {
        self.items.iter().map(|slot| slot.handle)
    }

    /// Removes the earliest instance of `handle`.
    pub fn remove_one(&mut self, handle: ItemHandle) -> Option<InventorySlot> {
        let index = self.items.iter().position(|slot| slot.handle == handle)?;
        Some(self.items.remove(index))
    }

    pub fn slot(&self, index: usize) -> Option<&InventorySlot> {
        self.items.get(index)
    }

    pub fn slot_mut(&mut self, index: usize) -> Option<&mut InventorySlot> {
        self.items.get_mut(index)
    }

    pub fn take(&mut self, index: usize) -> Option<InventorySlot> {
        (index < self.items.len()).then(|| self.items.remove(index))
    }
}
