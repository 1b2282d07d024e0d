use crate::state::ItemHandle;

/// Read-only access to the item catalogue and its recipes.
pub trait ItemOracle: Send + Sync {
    fn definition(&self, handle: ItemHandle) -> Option<&ItemDefinition>;

    /// Looks up a recipe by its canonical key (`"1+3+20"`).
    fn recipe(&self, key: &str) -> Option<&ItemDefinition>;

    /// Returns all item definitions available in this oracle.
    fn all_definitions(&self) -> Vec<&ItemDefinition>;

    /// Display name, falling back to the raw handle for unknown items.
    fn name(&self, handle: ItemHandle) -> String {
        self.definition(handle)
            .map(|definition| definition.name.clone())
            .unwrap_or_else(|| format!("Item {handle}"))
    }
}

/// Item definition.
///
/// First-order items have an empty `recipe`. Crafted items list the
/// combination that produces them in `recipe` and the subset of that
/// combination destroyed by crafting in `ingredients`.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ItemDefinition {
    pub handle: ItemHandle,
    pub name: String,
    pub glyph: char,
    #[cfg_attr(feature = "serde", serde(default))]
    pub recipe: Vec<ItemHandle>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub ingredients: Vec<ItemHandle>,
}

impl ItemDefinition {
    pub fn raw(handle: ItemHandle, name: impl Into<String>, glyph: char) -> Self {
        Self {
            handle,
            name: name.into(),
            glyph,
            recipe: Vec::new(),
            ingredients: Vec::new(),
        }
    }

    pub fn crafted(
        handle: ItemHandle,
        name: impl Into<String>,
        recipe: impl Into<Vec<ItemHandle>>,
        ingredients: impl Into<Vec<ItemHandle>>,
    ) -> Self {
        Self {
            handle,
            name: name.into(),
            glyph: '*',
            recipe: recipe.into(),
            ingredients: ingredients.into(),
        }
    }

    pub fn is_craftable(&self) -> bool {
        !self.recipe.is_empty()
    }
}
