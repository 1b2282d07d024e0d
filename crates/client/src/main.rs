//! Dungeon game client binary.
//!
//! Composition root: loads configuration and content, builds the runtime
//! and the terminal frontend and hands both to [`Client`].

use std::sync::Arc;
use std::time::{SystemTime, UNIX_EPOCH};

use anyhow::{Context, Result};
use dungeon_client::{CliFrontend, Client, ClientConfig, logging};
use game_content::ContentFactory;
use game_core::ItemOracle;
use runtime::Runtime;

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if it exists (silently ignore if not found)
    let _ = dotenvy::dotenv();

    let config = ClientConfig::from_env();
    let seed = config.seed.unwrap_or_else(clock_seed);
    let session_id = config
        .session_id
        .clone()
        .unwrap_or_else(|| format!("session_{seed}"));

    let _log_guard = logging::setup_logging(&config, &session_id)?;
    tracing::info!("Starting Dungeon client: seed={seed}");

    let content = ContentFactory::new(config.data_dir());
    tracing::debug!("Content directory: {}", content.data_dir().display());
    let game_config = content
        .load_config()
        .context("Failed to load game configuration")?;
    let items: Arc<dyn ItemOracle> = Arc::new(
        content
            .load_registry()
            .context("Failed to load item catalogue")?,
    );

    let runtime = Runtime::builder()
        .config(config.runtime_config(game_config.clone(), seed))
        .items(Arc::clone(&items))
        .build()
        .await?;
    let frontend = CliFrontend::new(&config, &game_config, items);

    Client::builder()
        .runtime(runtime)
        .frontend(frontend)
        .build()?
        .run()
        .await
}

fn clock_seed() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|elapsed| elapsed.as_nanos() as u64)
        .unwrap_or_default()
}
