use std::collections::{BTreeMap, HashMap};
use std::fmt;

use crate::env::{ItemDefinition, ItemOracle};
use crate::error::{ErrorSeverity, GameError};
use crate::state::ItemHandle;

/// Canonical recipe key: ascending handles joined with `+`.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RecipeKey(String);

impl RecipeKey {
    /// Builds the key for any ordering of `handles`. Returns `None` for fewer
    /// than two handles, which never form a recipe.
    pub fn from_handles(handles: &[ItemHandle]) -> Option<Self> {
        if handles.len() < 2 {
            return None;
        }
        let mut sorted = handles.to_vec();
        sorted.sort_unstable();
        let key = sorted
            .iter()
            .map(ItemHandle::to_string)
            .collect::<Vec<_>>()
            .join("+");
        Some(Self(key))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RecipeKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Problems found while building a registry from a catalogue.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum RegistryError {
    #[error("item {0} is defined twice")]
    DuplicateItem(ItemHandle),

    #[error("recipe {key} produces both {first} and {second}")]
    DuplicateRecipe {
        key: String,
        first: ItemHandle,
        second: ItemHandle,
    },

    #[error("recipe for {item} needs at least two components")]
    RecipeTooShort { item: ItemHandle },

    #[error("item {item} consumes {ingredient}, which is not part of its recipe")]
    IngredientNotInRecipe {
        item: ItemHandle,
        ingredient: ItemHandle,
    },

    #[error("item {item} refers to unknown item {missing}")]
    UnknownComponent {
        item: ItemHandle,
        missing: ItemHandle,
    },
}

impl GameError for RegistryError {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Fatal
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::DuplicateItem(_) => "REGISTRY_DUPLICATE_ITEM",
            Self::DuplicateRecipe { .. } => "REGISTRY_DUPLICATE_RECIPE",
            Self::RecipeTooShort { .. } => "REGISTRY_RECIPE_TOO_SHORT",
            Self::IngredientNotInRecipe { .. } => "REGISTRY_INGREDIENT_NOT_IN_RECIPE",
            Self::UnknownComponent { .. } => "REGISTRY_UNKNOWN_COMPONENT",
        }
    }
}

/// Immutable item catalogue with a recipe index.
#[derive(Clone, Debug, Default)]
pub struct ItemRegistry {
    definitions: BTreeMap<ItemHandle, ItemDefinition>,
    recipes: HashMap<RecipeKey, ItemHandle>,
}

impl ItemRegistry {
    /// Validates and indexes a catalogue.
    ///
    /// Every handle must be unique, every recipe must have at least two
    /// components that exist in the catalogue, and consumed ingredients must
    /// be drawn from the recipe (respecting multiplicity).
    pub fn new(
        definitions: impl IntoIterator<Item = ItemDefinition>,
    ) -> Result<Self, RegistryError> {
        let mut registry = Self::default();

        for definition in definitions {
            let handle = definition.handle;
            if registry.definitions.insert(handle, definition).is_some() {
                return Err(RegistryError::DuplicateItem(handle));
            }
        }

        for definition in registry.definitions.values() {
            if !definition.is_craftable() {
                continue;
            }
            registry.validate_recipe(definition)?;
        }

        let mut recipes = HashMap::new();
        for definition in registry.definitions.values() {
            let Some(key) = RecipeKey::from_handles(&definition.recipe) else {
                continue;
            };
            if let Some(first) = recipes.insert(key.clone(), definition.handle) {
                return Err(RegistryError::DuplicateRecipe {
                    key: key.to_string(),
                    first,
                    second: definition.handle,
                });
            }
        }
        registry.recipes = recipes;

        Ok(registry)
    }

    fn validate_recipe(&self, definition: &ItemDefinition) -> Result<(), RegistryError> {
        let item = definition.handle;
        if definition.recipe.len() < 2 {
            return Err(RegistryError::RecipeTooShort { item });
        }

        for &component in definition.recipe.iter().chain(&definition.ingredients) {
            if !self.definitions.contains_key(&component) {
                return Err(RegistryError::UnknownComponent {
                    item,
                    missing: component,
                });
            }
        }

        let mut remaining = definition.recipe.clone();
        for &ingredient in &definition.ingredients {
            match remaining.iter().position(|&component| component == ingredient) {
                Some(index) => {
                    remaining.swap_remove(index);
                }
                None => {
                    return Err(RegistryError::IngredientNotInRecipe { item, ingredient });
                }
            }
        }

        Ok(())
    }

    pub fn len(&self) -> usize {
        self.definitions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.definitions.is_empty()
    }

    pub fn recipe_count(&self) -> usize {
        self.recipes.len()
    }
}

impl ItemOracle for ItemRegistry {
    fn definition(&self, handle: ItemHandle) -> Option<&ItemDefinition> {
        self.definitions.get(&handle)
    }

    fn recipe(&self, key: &str) -> Option<&ItemDefinition> {
        let handle = self.recipes.get(&RecipeKey(key.to_owned()))?;
        self.definitions.get(handle)
    }

    fn all_definitions(&self) -> Vec<&ItemDefinition> {
        self.definitions.values().collect()
    }
}
