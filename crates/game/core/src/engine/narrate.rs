//! Turns structured outcomes into log lines.

use crate::action::{
    ActionResult, CreatureResult, InteractResult, InventoryError, InventoryOutcome, MoveResult,
};
use crate::combat::{AttackOutcome, AttackResult};
use crate::crafting::CraftError;
use crate::env::GameEnv;
use crate::message::GameMessage;
use crate::state::{Equip, ItemHandle};

fn item_name(env: &GameEnv<'_>, handle: ItemHandle) -> String {
    match env.items() {
        Ok(items) => items.name(handle),
        Err(_) => format!("Item {handle}"),
    }
}

fn player_blow(messages: &mut Vec<GameMessage>, target: &str, attack: &AttackResult) {
    match attack.outcome {
        AttackOutcome::Ineffectual => messages.push(GameMessage::PlayerMissed),
        AttackOutcome::Hit | AttackOutcome::Killed => messages.push(GameMessage::PlayerHit {
            target: target.to_owned(),
            damage: attack.damage,
        }),
    }
    if attack.outcome == AttackOutcome::Killed {
        messages.push(GameMessage::Killed {
            target: target.to_owned(),
        });
    }
}

fn creature_blow(messages: &mut Vec<GameMessage>, attacker: &str, attack: &AttackResult) {
    let attacker = attacker.to_owned();
    match attack.outcome {
        AttackOutcome::Ineffectual => messages.push(GameMessage::CreatureMissed { attacker }),
        AttackOutcome::Hit => messages.push(GameMessage::CreatureHit {
            attacker,
            damage: attack.damage,
        }),
        AttackOutcome::Killed => {
            messages.push(GameMessage::CreatureHit {
                attacker: attacker.clone(),
                damage: attack.damage,
            });
            messages.push(GameMessage::PlayerKilled { killer: attacker });
            messages.push(GameMessage::GameOver);
        }
    }
}

pub(super) fn action(result: &ActionResult, env: &GameEnv<'_>) -> Vec<GameMessage> {
    let mut messages = Vec::new();
    match result {
        ActionResult::Move(MoveResult::Moved { item, exit, .. }) => {
            if let Some(item) = item {
                messages.push(GameMessage::FoundItem {
                    item: item_name(env, *item),
                });
            }
            if let Some(direction) = exit {
                messages.push(GameMessage::FoundExit(*direction));
            }
        }
        ActionResult::Move(MoveResult::Attacked { name, attack, .. }) => {
            player_blow(&mut messages, name, attack);
        }
        ActionResult::Move(MoveResult::Bumped { name }) => {
            messages.push(GameMessage::Bumped { name: name.clone() });
        }
        ActionResult::Interact(InteractResult::PickedUp { item }) => {
            messages.push(GameMessage::PickedUp {
                item: item_name(env, *item),
            });
        }
        ActionResult::Interact(InteractResult::Escaped) => messages.push(GameMessage::Escaped),
        ActionResult::Creature(CreatureResult::Attacked { name, attack }) => {
            creature_blow(&mut messages, name, attack);
        }
        ActionResult::Wait
        | ActionResult::Interact(InteractResult::Transition { .. } | InteractResult::Nothing)
        | ActionResult::Creature(CreatureResult::Idled | CreatureResult::Stepped { .. }) => {}
    }
    messages
}

pub(super) fn inventory(outcome: &InventoryOutcome, env: &GameEnv<'_>) -> Vec<GameMessage> {
    let names = |items: &[ItemHandle]| -> Vec<String> {
        items.iter().map(|&item| item_name(env, item)).collect()
    };

    match outcome {
        InventoryOutcome::Crafted(crafted) => vec![GameMessage::Crafted {
            item: crafted.name.clone(),
        }],
        InventoryOutcome::Dropped { items } => names(items)
            .into_iter()
            .map(|item| GameMessage::Dropped { item })
            .collect(),
        InventoryOutcome::Equipped { equip, items } => names(items)
            .into_iter()
            .map(|item| match equip {
                Equip::Worn => GameMessage::Wore { item },
                Equip::Wielded => GameMessage::Wielded { item },
            })
            .collect(),
        InventoryOutcome::Removed { items } => names(items)
            .into_iter()
            .map(|item| GameMessage::Removed { item })
            .collect(),
        InventoryOutcome::NotUsable { .. } => vec![GameMessage::CannotUse],
    }
}

/// The log line for a refused inventory command, if the player should see one.
pub fn inventory_failure(error: &InventoryError) -> Option<GameMessage> {
    match error {
        InventoryError::Craft(CraftError::NoRecipe { .. }) => Some(GameMessage::CraftFailed),
        InventoryError::Craft(CraftError::InvalidInput { .. }) => Some(GameMessage::CraftNeedsMore),
        InventoryError::Craft(CraftError::NotHeld { .. }) => Some(GameMessage::MissingIngredients),
        _ => None,
    }
}
