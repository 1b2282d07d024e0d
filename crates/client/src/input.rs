//! Keyboard mapping.
//!
//! This module owns the key bindings so the event loop only deals with
//! [`KeyAction`]s. Two modes exist: map play and the inventory panel, where
//! letters select slots and shifted letters run a command on the selection.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use game_core::{Direction, InventoryCommand, InventoryState, PlayerInput};

/// High-level outcome of processing a keyboard event.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum KeyAction {
    Quit,
    /// Forward to the runtime as the player's input.
    Submit(PlayerInput),
    /// The inventory panel was opened or closed.
    ToggleInventory,
    /// Flip the selection of an inventory slot.
    ToggleSlot(usize),
    Inventory(InventoryVerb),
    None,
}

/// Inventory command applied to the current selection.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum InventoryVerb {
    Craft,
    Drop,
    Wear,
    Wield,
    Remove,
    Use,
}

impl InventoryVerb {
    /// Builds the command for the selected slots.
    ///
    /// Crafting names items rather than slots. `Use` acts on the first
    /// selected slot and needs one.
    pub fn command(self, selection: &[usize], inventory: &InventoryState) -> Option<InventoryCommand> {
        let slots = selection.to_vec();
        match self {
            Self::Craft => Some(InventoryCommand::Craft {
                items: selection
                    .iter()
                    .filter_map(|&slot| inventory.slot(slot).map(|entry| entry.handle))
                    .collect(),
            }),
            Self::Drop => Some(InventoryCommand::Drop { slots }),
            Self::Wear => Some(InventoryCommand::Wear { slots }),
            Self::Wield => Some(InventoryCommand::Wield { slots }),
            Self::Remove => Some(InventoryCommand::Remove { slots }),
            Self::Use => selection
                .first()
                .map(|&slot| InventoryCommand::Use { slot }),
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum InputMode {
    #[default]
    Map,
    Inventory,
}

/// Translates `KeyEvent`s into [`KeyAction`]s, tracking the current mode.
#[derive(Debug, Default)]
pub struct InputHandler {
    mode: InputMode,
}

impl InputHandler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn mode(&self) -> InputMode {
        self.mode
    }

    pub fn handle_key(&mut self, key: KeyEvent) -> KeyAction {
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            return KeyAction::Quit;
        }

        match self.mode {
            InputMode::Map => self.handle_map_key(key),
            InputMode::Inventory => self.handle_inventory_key(key),
        }
    }

    fn toggle_inventory(&mut self) -> KeyAction {
        self.mode = match self.mode {
            InputMode::Map => InputMode::Inventory,
            InputMode::Inventory => InputMode::Map,
        };
        KeyAction::ToggleInventory
    }

    fn handle_map_key(&mut self, key: KeyEvent) -> KeyAction {
        let step = |direction| KeyAction::Submit(PlayerInput::Move(direction));
        match key.code {
            KeyCode::Up | KeyCode::Char('k') | KeyCode::Char('8') => step(Direction::North),
            KeyCode::Down | KeyCode::Char('j') | KeyCode::Char('2') => step(Direction::South),
            KeyCode::Left | KeyCode::Char('h') | KeyCode::Char('4') => step(Direction::West),
            KeyCode::Right | KeyCode::Char('l') | KeyCode::Char('6') => step(Direction::East),
            KeyCode::Char('y') | KeyCode::Char('7') => step(Direction::NorthWest),
            KeyCode::Char('u') | KeyCode::Char('9') => step(Direction::NorthEast),
            KeyCode::Char('b') | KeyCode::Char('1') => step(Direction::SouthWest),
            KeyCode::Char('n') | KeyCode::Char('3') => step(Direction::SouthEast),

            KeyCode::Char('.') | KeyCode::Char(' ') | KeyCode::Char('5') => {
                KeyAction::Submit(PlayerInput::Wait)
            }
            KeyCode::Char('g') | KeyCode::Char(',') | KeyCode::Enter => {
                KeyAction::Submit(PlayerInput::Interact)
            }

            KeyCode::Char('i') => self.toggle_inventory(),
            KeyCode::Char('q') | KeyCode::Esc => KeyAction::Quit,
            _ => KeyAction::None,
        }
    }

    fn handle_inventory_key(&mut self, key: KeyEvent) -> KeyAction {
        match key.code {
            KeyCode::Esc | KeyCode::Char('i') => self.toggle_inventory(),
            KeyCode::Enter | KeyCode::Char('C') => KeyAction::Inventory(InventoryVerb::Craft),
            KeyCode::Char('D') => KeyAction::Inventory(InventoryVerb::Drop),
            KeyCode::Char('W') => KeyAction::Inventory(InventoryVerb::Wear),
            KeyCode::Char('E') => KeyAction::Inventory(InventoryVerb::Wield),
            KeyCode::Char('R') => KeyAction::Inventory(InventoryVerb::Remove),
            KeyCode::Char('U') => KeyAction::Inventory(InventoryVerb::Use),
            KeyCode::Char(letter @ 'a'..='z') => {
                KeyAction::ToggleSlot(usize::from(letter as u8 - b'a'))
            }
            _ => KeyAction::None,
        }
    }
}

/// Label of inventory slot `index` as shown in the panel (`a`..`z`).
pub fn slot_label(index: usize) -> Option<char> {
    u8::try_from(index)
        .ok()
        .filter(|&index| index < 26)
        .map(|index| char::from(b'a' + index))
}
