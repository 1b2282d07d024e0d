//! File logging for the terminal client.
//!
//! The TUI owns the terminal, so traces go to
//! `<log dir>/<session id>/client.log` only.

use std::fs;

use anyhow::{Context, Result};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

use crate::ClientConfig;

/// Installs the global subscriber. Keep the returned guard alive until exit
/// or buffered lines are lost.
pub fn setup_logging(config: &ClientConfig, session_id: &str) -> Result<WorkerGuard> {
    let session_log_dir = config.log_dir().join(session_id);
    fs::create_dir_all(&session_log_dir).with_context(|| {
        format!(
            "Failed to create log directory: {}",
            session_log_dir.display()
        )
    })?;

    let file_appender = tracing_appender::rolling::never(&session_log_dir, "client.log");
    let (non_blocking_file, guard) = tracing_appender::non_blocking(file_appender);

    let env_filter = tracing_subscriber::EnvFilter::from_default_env()
        .add_directive(tracing::Level::INFO.into());

    let file_layer = tracing_subscriber::fmt::layer()
        .with_writer(non_blocking_file)
        .with_ansi(false);

    tracing_subscriber::registry()
        .with(env_filter)
        .with(file_layer)
        .try_init()
        .context("Failed to install tracing subscriber")?;

    tracing::info!("Logging initialized: session={session_id}");
    tracing::info!("Log file: {}/client.log", session_log_dir.display());

    Ok(guard)
}
