//! JSON file holding the "last used" choices between runs.

use crate::model::{Axis, Screen};
use crate::terminal::CommandHistory;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, warn};

/// Environment variable overriding the state file location.
pub const STATE_ENV_VAR: &str = "TOOLBELT_STATE_FILE";

/// Errors reading or writing the state file.
#[derive(Debug, Error)]
pub enum StateError {
    /// The file exists but could not be read.
    #[error("Failed to read state file at {path}: {source}")]
    Read {
        /// Path that failed to read.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The file could not be written (or its directory created).
    #[error("Failed to write state file at {path}: {source}")]
    Write {
        /// Path that failed to write.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The state could not be encoded.
    #[error("Failed to encode state: {0}")]
    Encode(#[from] serde_json::Error),
}

/// The last custom command that was run, as its template.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LastCommand {
    pub title: String,
    pub command: String,
}

/// Everything remembered between runs.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LastUsed {
    /// `WIDTHxHEIGHT`
    pub screen: Option<String>,
    pub axis: Option<Axis>,
    pub command: Option<LastCommand>,
    pub history: CommandHistory,
}

impl LastUsed {
    /// The remembered screen, if it still parses.
    pub fn screen(&self) -> Option<Screen> {
        self.screen.as_deref().and_then(|s| Screen::parse(s).ok())
    }

    pub fn set_screen(&mut self, screen: Screen) {
        self.screen = Some(screen.to_string());
    }
}

/// Location of the state file: `TOOLBELT_STATE_FILE`, else
/// `<state dir>/toolbelt/state.json`, else `./toolbelt-state.json`.
pub fn default_state_path() -> PathBuf {
    if let Ok(path) = std::env::var(STATE_ENV_VAR) {
        if !path.trim().is_empty() {
            return PathBuf::from(path);
        }
    }
    match dirs::state_dir() {
        Some(dir) => dir.join("toolbelt").join("state.json"),
        None => PathBuf::from("toolbelt-state.json"),
    }
}

#[derive(Debug, Clone)]
pub struct StateStore {
    path: PathBuf,
}

impl StateStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the stored state.
    ///
    /// A missing file is empty state. A corrupt file is logged and treated
    /// as empty too, so a bad write never blocks the tools.
    ///
    /// # Errors
    ///
    /// Returns `StateError::Read` when the file exists but cannot be read.
    pub fn load(&self) -> Result<LastUsed, StateError> {
        if !self.path.exists() {
            debug!(path = %self.path.display(), "no state file yet");
            return Ok(LastUsed::default());
        }
        let text = fs::read_to_string(&self.path).map_err(|source| StateError::Read {
            path: self.path.clone(),
            source,
        })?;
        match serde_json::from_str(&text) {
            Ok(state) => Ok(state),
            Err(e) => {
                warn!(path = %self.path.display(), error = %e, "discarding unreadable state file");
                Ok(LastUsed::default())
            }
        }
    }

    /// Write `state`, creating the parent directory when needed.
    pub fn save(&self, state: &LastUsed) -> Result<(), StateError> {
        let write_err = |source| StateError::Write {
            path: self.path.clone(),
            source,
        };
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).map_err(write_err)?;
            }
        }
        let json = serde_json::to_string_pretty(state)?;
        fs::write(&self.path, json).map_err(write_err)
    }

    /// Load, apply `f`, save.
    pub fn update<F: FnOnce(&mut LastUsed)>(&self, f: F) -> Result<LastUsed, StateError> {
        let mut state = self.load()?;
        f(&mut state);
        self.save(&state)?;
        Ok(state)
    }
}
