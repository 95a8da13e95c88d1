//! Log setup for booksearch
//!
//! The TUI owns the terminal, so log output goes to a file instead of stderr.
//! Call sites use the `tracing` macros directly.
//!
//! Filtering follows `RUST_LOG` when set; otherwise `info`, or `debug` when
//! the `--debug` flag is passed.

use crate::error::{BookSearchError, Result};
use std::fs::OpenOptions;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tracing_subscriber::EnvFilter;

const LOG_FILE_NAME: &str = "booksearch.log";

/// Default log file path (same directory as executable)
pub fn default_log_path() -> PathBuf {
    std::env::current_exe()
        .ok()
        .and_then(|p| p.parent().map(|p| p.to_path_buf()))
        .unwrap_or_else(|| PathBuf::from("."))
        .join(LOG_FILE_NAME)
}

fn build_filter(debug: bool) -> EnvFilter {
    let default_level = if debug { "debug" } else { "info" };
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level))
}

/// Install the global subscriber, writing to `log_file` or the default path.
///
/// The file is truncated so each run starts fresh. Returns the path in use.
pub fn init(log_file: Option<&Path>, debug: bool) -> Result<PathBuf> {
    let path = log_file.map(Path::to_path_buf).unwrap_or_else(default_log_path);
    let file = OpenOptions::new()
        .create(true)
        .write(true)
        .truncate(true)
        .open(&path)?;

    tracing_subscriber::fmt()
        .with_env_filter(build_filter(debug))
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .with_target(debug)
        .try_init()
        .map_err(|e| BookSearchError::Logging(e.to_string()))?;

    tracing::info!(version = crate::VERSION, path = %path.display(), "logging started");
    Ok(path)
}
