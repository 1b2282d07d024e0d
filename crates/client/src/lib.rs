//! Top-level client wiring the runtime to a frontend.
//!
//! ```text
//! Client
//!   ├─→ Runtime  (session, level generation, event bus)
//!   └─→ Frontend (terminal UI, talks to the runtime through a RuntimeHandle)
//! ```
//!
//! The client subscribes the frontend to every topic before generation
//! starts, so no session event is missed.

mod app;
mod builder;
pub mod config;
mod input;
pub mod logging;
mod terminal;
mod ui;

pub use app::CliFrontend;
pub use builder::ClientBuilder;
pub use config::ClientConfig;

use std::collections::HashMap;

use anyhow::Result;
use async_trait::async_trait;
use runtime::{Event, Runtime, RuntimeHandle, Topic};
use strum::IntoEnumIterator;
use tokio::sync::broadcast;

/// Receivers for each runtime topic, keyed by topic.
pub type Subscriptions = HashMap<Topic, broadcast::Receiver<Event>>;

/// A user-facing frontend.
///
/// `run` owns the user interaction and returns when the user quits.
#[async_trait]
pub trait Frontend: Send {
    async fn run(&mut self, handle: RuntimeHandle, subscriptions: Subscriptions) -> Result<()>;
}

/// Composition root: one runtime, one frontend.
pub struct Client {
    runtime: Runtime,
    frontend: Box<dyn Frontend>,
}

impl Client {
    pub fn builder() -> ClientBuilder {
        ClientBuilder::new()
    }

    /// Starts the session and hands control to the frontend until it exits,
    /// then shuts the runtime down.
    pub async fn run(self) -> Result<()> {
        let Self {
            mut runtime,
            mut frontend,
        } = self;

        let handle = runtime.handle();
        let topics: Vec<Topic> = Topic::iter().collect();
        let subscriptions = handle.subscribe_multiple(&topics);

        runtime.start();
        tracing::info!("Session started");

        let result = frontend.run(handle, subscriptions).await;

        if let Err(error) = runtime.shutdown().await {
            tracing::warn!("Runtime shutdown failed: {error}");
        }
        tracing::info!("Client exiting");

        result
    }
}
