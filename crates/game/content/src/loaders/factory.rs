//! Content factory for building oracles from data files.

use std::path::{Path, PathBuf};

use game_core::{GameConfig, ItemDefinition, ItemRegistry};

use crate::loaders::{ConfigLoader, ItemLoader, LoadResult};

/// Content factory that loads all game content from a data directory.
///
/// # Directory Structure
///
/// ```text
/// data_dir/
/// ├── config.toml
/// └── items.ron
/// ```
///
/// Both files are optional; a missing file falls back to the built-in
/// content, a malformed one is an error.
pub struct ContentFactory {
    data_dir: PathBuf,
}

impl ContentFactory {
    /// Creates a new content factory pointing to a data directory.
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }

    /// Load game configuration from `config.toml`.
    pub fn load_config(&self) -> LoadResult<GameConfig> {
        let path = self.data_dir.join("config.toml");
        if !path.exists() {
            return Ok(GameConfig::default());
        }
        ConfigLoader::load(&path)
    }

    /// Load item catalog from `items.ron`.
    pub fn load_items(&self) -> LoadResult<Vec<ItemDefinition>> {
        let path = self.data_dir.join("items.ron");
        if !path.exists() {
            return ItemLoader::builtin();
        }
        ItemLoader::load(&path)
    }

    /// Load and validate the item registry.
    pub fn load_registry(&self) -> LoadResult<ItemRegistry> {
        ItemLoader::registry(self.load_items()?)
    }

    /// Returns the data directory path.
    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }
}
