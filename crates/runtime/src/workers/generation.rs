//! Background level generation.

use std::sync::Arc;

use game_core::env::compute_seed;
use game_core::{GameConfig, Level, LevelId};
use tokio::sync::mpsc;
use tracing::{debug, error, info};

use crate::api::{Result, RuntimeError};
use crate::mapgen::{MapGenerator, MapRequest};

/// A generated level, or the reason it could not be produced.
pub type LevelDelivery = Result<Level>;

/// Distinguishes map seeds from gameplay rolls derived from the same game seed.
const MAP_SEED_CONTEXT: u32 = 0x6d61_7067;

/// Generates every level of the session one after another, entrance first.
pub struct GenerationWorker {
    generator: Arc<dyn MapGenerator>,
    config: GameConfig,
    game_seed: u64,
    level_tx: mpsc::Sender<LevelDelivery>,
}

impl GenerationWorker {
    pub fn new(
        generator: Arc<dyn MapGenerator>,
        config: GameConfig,
        game_seed: u64,
        level_tx: mpsc::Sender<LevelDelivery>,
    ) -> Self {
        Self {
            generator,
            config,
            game_seed,
            level_tx,
        }
    }

    /// Seed for the map of `level`.
    pub fn map_seed(game_seed: u64, level: LevelId) -> u64 {
        compute_seed(game_seed, u64::from(level.0), 0, MAP_SEED_CONTEXT)
    }

    async fn generate(&self, level: LevelId) -> LevelDelivery {
        let request = MapRequest {
            level,
            width: self.config.map_width,
            height: self.config.map_height,
            seed: Self::map_seed(self.game_seed, level),
        };
        let layout = self
            .generator
            .generate(request)
            .await
            .map_err(|source| RuntimeError::MapGeneration { level, source })?;
        Level::from_layout(level, layout)
            .map_err(|source| RuntimeError::MalformedLevel { level, source })
    }

    /// Main worker loop. Stops after the last level, on the first failure, or
    /// when the simulation worker goes away.
    pub async fn run(self) {
        for depth in 0..self.config.max_levels {
            let level = LevelId(depth);
            let delivery = self.generate(level).await;
            let failed = delivery.is_err();
            match &delivery {
                Ok(_) => debug!(
                    target: "runtime::generation",
                    level = %level,
                    total = self.config.max_levels,
                    "Generated level"
                ),
                Err(error) => error!(
                    target: "runtime::generation",
                    level = %level,
                    error = %error,
                    "Level generation failed"
                ),
            }

            if self.level_tx.send(delivery).await.is_err() {
                debug!(target: "runtime::generation", "Simulation worker gone, stopping");
                return;
            }
            if failed {
                return;
            }
        }
        info!(target: "runtime::generation", "Finished generating levels");
    }
}
