//! File logging for the terminal front end.
//!
//! Stdout belongs to the TUI, so events go to a log file only. The filter is
//! read from `MSWP_LOG` (e.g. `MSWP_LOG=debug`) and defaults to `info`.

use crate::error::{MswpError, Result};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::prelude::*;
use tracing_subscriber::{fmt, EnvFilter};

pub const LOG_FILTER_ENV: &str = "MSWP_LOG";
const DEFAULT_FILTER: &str = "info";
const LOG_FILE_NAME: &str = "mswp.log";

/// Default log location (~/.local/share/mswp/mswp.log on Linux)
pub fn default_log_path() -> Option<PathBuf> {
    dirs::data_local_dir().map(|dir| dir.join("mswp").join(LOG_FILE_NAME))
}

/// Installs the global subscriber. Keep the returned guard alive until exit so
/// buffered lines are flushed.
pub fn init_logging(log_file: Option<&Path>) -> Result<WorkerGuard> {
    let path = match log_file {
        Some(path) => path.to_path_buf(),
        None => default_log_path().ok_or_else(|| {
            MswpError::ConfigError("Could not determine log directory".to_string())
        })?,
    };

    let (dir, file_name) = split_log_path(&path)?;
    fs::create_dir_all(&dir)?;

    let filter = env::var(LOG_FILTER_ENV).unwrap_or_else(|_| DEFAULT_FILTER.to_string());
    let filter_layer = EnvFilter::try_new(&filter).unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

    let file_appender = tracing_appender::rolling::never(dir, file_name);
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_writer(non_blocking)
                .with_ansi(false)
                .with_target(false),
        )
        .with(filter_layer)
        .try_init()
        .map_err(|e| MswpError::ConfigError(format!("Failed to install logger: {}", e)))?;

    tracing::info!(log = %path.display(), "logging initialised");
    Ok(guard)
}

fn split_log_path(path: &Path) -> Result<(PathBuf, PathBuf)> {
    let file_name = path.file_name().ok_or_else(|| {
        MswpError::ConfigError(format!("Log path has no file name: {}", path.display()))
    })?;
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    };
    Ok((dir, PathBuf::from(file_name)))
}
