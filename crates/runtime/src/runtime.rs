//! High-level runtime orchestrator.
//!
//! The runtime owns background workers, wires up command/event channels, and
//! exposes a builder-based API for clients to drive the simulation.

use std::sync::Arc;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;

use game_content::ItemLoader;
use game_core::{GameConfig, GameState, ItemOracle, RngOracle};

use crate::api::{ActionProvider, Result, RuntimeError, RuntimeHandle};
use crate::events::EventBus;
use crate::mapgen::{MapGenerator, RoomsGenerator};
use crate::oracle::OracleManager;
use crate::providers::{AiProvider, AiTable};
use crate::workers::{GenerationWorker, LevelDelivery, SimulationWorker};

/// Runtime configuration shared across the orchestrator and workers.
#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    pub game_config: GameConfig,
    /// Seed for maps and every random roll of the session.
    pub game_seed: u64,
    pub event_buffer_size: usize,
    pub command_buffer_size: usize,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            game_config: GameConfig::default(),
            game_seed: 0,
            event_buffer_size: 100,
            command_buffer_size: 32,
        }
    }
}

/// Main runtime that orchestrates game simulation
///
/// Design: Runtime owns workers and coordinates execution.
/// [`RuntimeHandle`] provides a cloneable façade for clients.
///
/// Nothing happens until [`Runtime::start`] launches level generation, so
/// clients can subscribe to every topic first.
pub struct Runtime {
    handle: RuntimeHandle,
    oracles: OracleManager,
    sim_worker_handle: JoinHandle<()>,
    generation_worker: Option<GenerationWorker>,
    generation_worker_handle: Option<JoinHandle<()>>,
}

impl Runtime {
    /// Create a new runtime builder
    pub fn builder() -> RuntimeBuilder {
        RuntimeBuilder::new()
    }

    /// Get a cloneable handle to this runtime
    ///
    /// The handle can be shared across clients and async tasks.
    pub fn handle(&self) -> RuntimeHandle {
        self.handle.clone()
    }

    /// Starts generating levels. The session begins as soon as the entrance
    /// level is ready. Calling this more than once has no effect.
    pub fn start(&mut self) {
        if let Some(worker) = self.generation_worker.take() {
            self.generation_worker_handle = Some(tokio::spawn(async move {
                worker.run().await;
            }));
        }
    }

    /// Static content the session runs on, for presentation lookups.
    pub fn oracles(&self) -> &OracleManager {
        &self.oracles
    }

    /// Shutdown the runtime gracefully
    ///
    /// Workers exit once every handle clone is dropped and the generator has
    /// nothing left to deliver.
    pub async fn shutdown(self) -> Result<()> {
        drop(self.handle);
        drop(self.generation_worker);

        if let Some(generation) = self.generation_worker_handle {
            generation.await.map_err(RuntimeError::WorkerJoin)?;
        }
        self.sim_worker_handle
            .await
            .map_err(RuntimeError::WorkerJoin)?;

        Ok(())
    }
}

/// Builder for [`Runtime`] with flexible configuration.
pub struct RuntimeBuilder {
    config: RuntimeConfig,
    items: Option<Arc<dyn ItemOracle>>,
    rng: Option<Arc<dyn RngOracle>>,
    generator: Option<Arc<dyn MapGenerator>>,
    creatures: Option<Arc<dyn ActionProvider>>,
}

impl RuntimeBuilder {
    fn new() -> Self {
        Self {
            config: RuntimeConfig::default(),
            items: None,
            rng: None,
            generator: None,
            creatures: None,
        }
    }

    /// Override runtime configuration
    pub fn config(mut self, config: RuntimeConfig) -> Self {
        self.config = config;
        self
    }

    /// Item catalogue. Defaults to the built-in catalogue.
    pub fn items(mut self, items: Arc<dyn ItemOracle>) -> Self {
        self.items = Some(items);
        self
    }

    /// Random source. Defaults to the PCG oracle.
    pub fn rng(mut self, rng: Arc<dyn RngOracle>) -> Self {
        self.rng = Some(rng);
        self
    }

    /// Map generator. Defaults to [`RoomsGenerator`].
    pub fn map_generator(mut self, generator: Arc<dyn MapGenerator>) -> Self {
        self.generator = Some(generator);
        self
    }

    /// Creature AI strategies, dispatched by archetype.
    pub fn ai_table(mut self, table: AiTable) -> Self {
        self.creatures = Some(Arc::new(AiProvider::new(table)));
        self
    }

    /// Replaces the creature AI with an arbitrary provider.
    pub fn creature_provider(mut self, provider: Arc<dyn ActionProvider>) -> Self {
        self.creatures = Some(provider);
        self
    }

    /// Build the runtime
    pub async fn build(self) -> Result<Runtime> {
        let items = match self.items {
            Some(items) => items,
            None => builtin_items()?,
        };
        let mut oracles = OracleManager::new(items, self.config.game_config.clone());
        if let Some(rng) = self.rng {
            oracles = oracles.with_rng(rng);
        }
        let generator = self
            .generator
            .unwrap_or_else(|| Arc::new(RoomsGenerator::default()));
        let creatures = self
            .creatures
            .unwrap_or_else(|| Arc::new(AiProvider::default()));

        let state = GameState::new(self.config.game_seed, &self.config.game_config);

        let (command_tx, command_rx) = mpsc::channel(self.config.command_buffer_size.max(1));
        let (level_tx, level_rx) = mpsc::channel::<LevelDelivery>(1);
        let event_bus = EventBus::with_capacity(self.config.event_buffer_size);

        let handle = RuntimeHandle::new(command_tx, event_bus.clone());

        let sim_worker = SimulationWorker::new(
            state,
            oracles.clone(),
            creatures,
            command_rx,
            level_rx,
            event_bus,
        );
        let sim_worker_handle = tokio::spawn(async move {
            sim_worker.run().await;
        });

        let generation_worker = GenerationWorker::new(
            generator,
            self.config.game_config.clone(),
            self.config.game_seed,
            level_tx,
        );

        tracing::debug!(
            target: "runtime",
            seed = self.config.game_seed,
            levels = self.config.game_config.max_levels,
            "Runtime built"
        );

        Ok(Runtime {
            handle,
            oracles,
            sim_worker_handle,
            generation_worker: Some(generation_worker),
            generation_worker_handle: None,
        })
    }
}

fn builtin_items() -> Result<Arc<dyn ItemOracle>> {
    let registry = ItemLoader::builtin()
        .and_then(ItemLoader::registry)
        .map_err(|error| RuntimeError::Content {
            reason: format!("{error:#}"),
        })?;
    Ok(Arc::new(registry))
}
