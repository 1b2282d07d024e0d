//! Runtime wrapper around the static session oracles.
//!
//! [`OracleManager`] bundles the item catalogue, the random source and the
//! tunables so the runtime can build [`game_core::GameEnv`] snapshots on
//! demand. The data is immutable at runtime; dynamic state lives in
//! [`game_core::GameState`].
use std::sync::Arc;

use game_core::{Env, GameConfig, GameEnv, ItemOracle, PcgRng, RngOracle};

/// Manages all oracle implementations and provides unified access
#[derive(Clone)]
pub struct OracleManager {
    pub(crate) items: Arc<dyn ItemOracle>,
    pub(crate) rng: Arc<dyn RngOracle>,
    pub(crate) config: Arc<GameConfig>,
}

impl OracleManager {
    /// Creates a new oracle manager backed by the stateless PCG generator.
    pub fn new(items: Arc<dyn ItemOracle>, config: GameConfig) -> Self {
        Self {
            items,
            rng: Arc::new(PcgRng),
            config: Arc::new(config),
        }
    }

    /// Replaces the random source, e.g. with a pinned roll for tests.
    pub fn with_rng(mut self, rng: Arc<dyn RngOracle>) -> Self {
        self.rng = rng;
        self
    }

    /// Converts oracle manager into GameEnv for game-core
    pub fn as_game_env(&self) -> GameEnv<'_> {
        let items: &dyn ItemOracle = self.items.as_ref();
        let rng: &dyn RngOracle = self.rng.as_ref();
        Env::with_all(items, rng, self.config.as_ref())
    }

    pub fn items(&self) -> &dyn ItemOracle {
        self.items.as_ref()
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }
}
