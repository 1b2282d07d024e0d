//! Item catalog loader.

use std::path::Path;

use game_core::{ItemDefinition, ItemRegistry};
use serde::{Deserialize, Serialize};

use crate::loaders::{LoadResult, read_file};

const BUILTIN_ITEMS: &str = include_str!("../../data/items.ron");

/// Item catalog structure for RON files.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ItemCatalog {
    pub items: Vec<ItemDefinition>,
}

/// Loader for item catalog from RON files.
pub struct ItemLoader;

impl ItemLoader {
    /// Load item catalog from a RON file.
    pub fn load(path: &Path) -> LoadResult<Vec<ItemDefinition>> {
        let content = read_file(path)?;
        Self::parse(&content)
            .map_err(|e| anyhow::anyhow!("{} ({})", e, path.display()))
    }

    /// Parse an item catalog from RON text.
    pub fn parse(content: &str) -> LoadResult<Vec<ItemDefinition>> {
        let catalog: ItemCatalog = ron::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse item catalog RON: {}", e))?;

        Ok(catalog.items)
    }

    /// The catalogue shipped with the game.
    pub fn builtin() -> LoadResult<Vec<ItemDefinition>> {
        Self::parse(BUILTIN_ITEMS)
    }

    /// Validate definitions and index their recipes.
    pub fn registry(items: Vec<ItemDefinition>) -> LoadResult<ItemRegistry> {
        ItemRegistry::new(items).map_err(|e| anyhow::anyhow!("Invalid item catalog: {}", e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use game_core::{ItemHandle, ItemOracle};

    #[test]
    fn builtin_catalogue_is_complete() {
        let registry = ItemLoader::registry(ItemLoader::builtin().unwrap()).unwrap();
        assert_eq!(registry.len(), 27);
        assert_eq!(registry.recipe_count(), 19);

        let carcass = registry.definition(ItemHandle::CARCASS).unwrap();
        assert_eq!(carcass.name, "A Carcass");
        assert_eq!(carcass.glyph, '%');
        assert!(
            registry
                .all_definitions()
                .iter()
                .filter(|definition| definition.is_craftable())
                .all(|definition| definition.glyph == '*')
        );
    }

    #[test]
    fn omitted_recipe_fields_default_to_empty() {
        let items = ItemLoader::parse(r#"(items: [(handle: 4, name: "A Stone", glyph: '.')])"#)
            .unwrap();
        assert!(items[0].recipe.is_empty());
        assert!(items[0].ingredients.is_empty());
    }

    #[test]
    fn malformed_catalogue_is_reported() {
        let error = ItemLoader::parse("(items: [(handle: \"one\")])").unwrap_err();
        assert!(error.to_string().contains("item catalog"));
    }
}
