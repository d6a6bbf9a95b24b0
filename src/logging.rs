//! File logging.
//!
//! The TUI owns the terminal, so events go to `finboard.log` in the data
//! directory instead of stdout.

use anyhow::{Context, Result};
use std::fs::OpenOptions;
use std::path::Path;
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

pub const LOG_ENV: &str = "FINBOARD_LOG";

/// Filter from `FINBOARD_LOG`, or `info` when it is unset or unparsable.
pub fn env_filter() -> EnvFilter {
    EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("info"))
}

/// Install the global subscriber, appending to `log_path`.
pub fn setup_logging(log_path: &Path) -> Result<()> {
    let log_file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(log_path)
        .with_context(|| format!("Could not open log file: {}", log_path.display()))?;

    let file_log = tracing_subscriber::fmt::layer()
        .with_ansi(false)
        .with_target(false)
        .with_writer(Arc::new(log_file));

    tracing_subscriber::registry()
        .with(env_filter())
        .with(file_log)
        .try_init()
        .context("Could not install log subscriber")?;

    tracing::debug!(path = %log_path.display(), "logging initialised");
    Ok(())
}
