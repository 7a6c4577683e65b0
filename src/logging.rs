//! Tracing setup.
//!
//! Logs are written to a single never-rotated file:
//!   Linux    ~/.local/share/archviz-studio/archviz-studio.log
//!   macOS    ~/Library/Application Support/archviz-studio/archviz-studio.log
//!   Windows  %LOCALAPPDATA%\archviz-studio\archviz-studio.log
//!
//! `RUST_LOG` takes precedence over the configured filter.

use std::path::PathBuf;

use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;

use crate::config::{LoggingConfig, APP_DIR};
use crate::error::AppError;

const LOG_FILE: &str = "archviz-studio.log";

/// Directory the log file is written to.
pub fn log_dir(config: &LoggingConfig) -> PathBuf {
    config
        .directory
        .clone()
        .unwrap_or_else(|| dirs::data_local_dir().unwrap_or_default().join(APP_DIR))
}

/// Install the global subscriber. Keep the returned guard alive for as long
/// as logs should be flushed.
pub fn init(config: &LoggingConfig) -> Result<WorkerGuard, AppError> {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.filter))
        .map_err(|e| AppError::Config(format!("invalid log filter `{}`: {e}", config.filter)))?;

    // The appender panics if it cannot open its file, so the directory must
    // exist first.
    let dir = log_dir(config);
    std::fs::create_dir_all(&dir)?;

    let file_appender = tracing_appender::rolling::never(&dir, LOG_FILE);
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(non_blocking)
        .try_init()
        .map_err(|e| AppError::Config(format!("logging already initialised: {e}")))?;

    tracing::info!(dir = %dir.display(), "Archviz Studio logging started");
    Ok(guard)
}
