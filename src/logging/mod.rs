//! Tracing subscriber initialization.
//!
//! Logs go to a file so stdout stays clean for command output (and for
//! `--json`). Follow them with `tail -f`.

use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing_subscriber::EnvFilter;

/// Default filter when `RUST_LOG` is unset.
const DEFAULT_DIRECTIVE: &str = "info";
/// Default filter for `--verbose` runs.
const VERBOSE_DIRECTIVE: &str = "toolbelt=debug,info";

/// Error type for logging initialization failures.
#[derive(Debug, Error)]
pub enum LoggingError {
    /// Failed to create log directory
    #[error("Failed to create log directory at {path:?}: {source}")]
    DirectoryCreation {
        /// The directory path that failed to be created
        path: PathBuf,
        /// The underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// Invalid log file path (no filename component)
    #[error("Invalid log file path: {0:?}")]
    InvalidPath(PathBuf),

    /// Log path has no parent directory
    #[error("Log path has no parent directory: {0:?}")]
    NoParentDirectory(PathBuf),

    /// Tracing subscriber already initialized
    #[error("Tracing subscriber already initialized")]
    SubscriberAlreadySet,
}

/// `RUST_LOG` if set and valid, otherwise `info` (or debug output for this
/// crate when `verbose`).
pub fn env_filter(verbose: bool) -> EnvFilter {
    let fallback = if verbose {
        VERBOSE_DIRECTIVE
    } else {
        DEFAULT_DIRECTIVE
    };
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(fallback))
}

/// Initialize the tracing subscriber with file-based logging.
///
/// Creates the log directory if it doesn't exist.
///
/// # Errors
///
/// Returns `LoggingError` if the directory cannot be created, the path has
/// no file name, or a subscriber is already installed.
pub fn init(log_path: &Path, verbose: bool) -> Result<(), LoggingError> {
    let directory = log_path
        .parent()
        .ok_or_else(|| LoggingError::NoParentDirectory(log_path.to_path_buf()))?;

    // "toolbelt.log" has an empty parent; log next to the working directory
    let directory = if directory.as_os_str().is_empty() {
        Path::new(".")
    } else {
        directory
    };

    std::fs::create_dir_all(directory).map_err(|source| LoggingError::DirectoryCreation {
        path: directory.to_path_buf(),
        source,
    })?;

    let file_name = log_path
        .file_name()
        .and_then(|n| n.to_str())
        .ok_or_else(|| LoggingError::InvalidPath(log_path.to_path_buf()))?;

    let file_appender = tracing_appender::rolling::never(directory, file_name);

    tracing_subscriber::fmt()
        .with_env_filter(env_filter(verbose))
        .with_writer(file_appender)
        .with_ansi(false)
        .try_init()
        .map_err(|_| LoggingError::SubscriberAlreadySet)
}

#[cfg(test)]
#[path = "logging_tests.rs"]
mod tests;
