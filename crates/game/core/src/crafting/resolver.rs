use super::RecipeKey;
use crate::env::{ItemDefinition, ItemOracle};
use crate::error::{ErrorSeverity, GameError};
use crate::state::{InventoryState, ItemHandle};

/// Crafting failures.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CraftError {
    /// Fewer than two ingredients were supplied.
    #[error("crafting needs at least two items, got {supplied}")]
    InvalidInput { supplied: usize },

    /// The combination is not a known recipe.
    #[error("no recipe for {key}")]
    NoRecipe { key: String },

    /// The combination names more instances of an item than the player carries.
    #[error("item {item} is not in the inventory")]
    NotHeld { item: ItemHandle },
}

impl GameError for CraftError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::InvalidInput { .. } => ErrorSeverity::Fatal,
            Self::NoRecipe { .. } => ErrorSeverity::Recoverable,
            Self::NotHeld { .. } => ErrorSeverity::Validation,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::InvalidInput { .. } => "CRAFT_INVALID_INPUT",
            Self::NoRecipe { .. } => "CRAFT_NO_RECIPE",
            Self::NotHeld { .. } => "CRAFT_NOT_HELD",
        }
    }
}

/// Result of a successful craft.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CraftOutcome {
    pub crafted: ItemHandle,
    pub name: String,
    /// Ingredients removed from the inventory.
    pub consumed: Vec<ItemHandle>,
    /// False when the inventory already held the crafted item, in which case
    /// nothing was added.
    pub granted: bool,
}

/// Resolves a combination of items against the recipe index.
///
/// The order of `inputs` is irrelevant.
pub fn resolve<'o, O>(oracle: &'o O, inputs: &[ItemHandle]) -> Result<&'o ItemDefinition, CraftError>
where
    O: ItemOracle + ?Sized,
{
    let key = RecipeKey::from_handles(inputs).ok_or(CraftError::InvalidInput {
        supplied: inputs.len(),
    })?;

    oracle.recipe(key.as_str()).ok_or_else(|| CraftError::NoRecipe {
        key: key.to_string(),
    })
}

/// Crafts from the inventory.
///
/// On success each entry of the recipe's ingredient list removes one matching
/// instance from the inventory. The crafted item is appended only when no
/// instance of it is already carried; the ingredients are consumed either way.
/// Any failure leaves the inventory untouched.
pub fn craft<O>(
    oracle: &O,
    inventory: &mut InventoryState,
    inputs: &[ItemHandle],
) -> Result<CraftOutcome, CraftError>
where
    O: ItemOracle + ?Sized,
{
    let definition = resolve(oracle, inputs)?;

    let mut sorted = inputs.to_vec();
    sorted.sort_unstable();
    sorted.dedup();
    for item in sorted {
        let wanted = inputs.iter().filter(|&&handle| handle == item).count();
        if inventory.count(item) < wanted {
            return Err(CraftError::NotHeld { item });
        }
    }

    let consumed: Vec<ItemHandle> = definition
        .ingredients
        .iter()
        .filter_map(|&ingredient| inventory.remove_one(ingredient).map(|slot| slot.handle))
        .collect();

    let granted = !inventory.contains(definition.handle);
    if granted {
        inventory.push(definition.handle);
    }

    Ok(CraftOutcome {
        crafted: definition.handle,
        name: definition.name.clone(),
        consumed,
        granted,
    })
}
