//! Env file on disk: status reads and the switch protocol.

use crate::env::{parse_env_file, plan_switch, EnvSummary, ParsedEnvFile, SwitchOutcome};
use crate::model::error::{EnvError, InputError};
use crate::source::{display_path, read_text, write_text};
use serde::Serialize;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// What a switch did, plus the summary re-read afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "kebab-case")]
pub enum SwitchReport {
    /// The file has no blocks.
    NoBlocks,
    /// The target was already active; nothing was written.
    AlreadyActive { summary: EnvSummary },
    /// The file was rewritten.
    Switched { summary: EnvSummary },
}

impl SwitchReport {
    /// One-line message for a status display.
    pub fn message(&self, target: &str) -> String {
        match self {
            SwitchReport::NoBlocks => "No environment blocks found.".to_string(),
            SwitchReport::AlreadyActive { .. } => {
                format!("Environment '{target}' is already active.")
            }
            SwitchReport::Switched { .. } => format!("Environment switched to {target}"),
        }
    }
}

/// A resolved env file.
#[derive(Debug, Clone)]
pub struct EnvFile {
    path: PathBuf,
    workspace: Option<PathBuf>,
}

impl EnvFile {
    pub fn new(path: impl Into<PathBuf>, workspace: Option<PathBuf>) -> Self {
        Self {
            path: path.into(),
            workspace,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Path shown to the user, relative to the workspace when inside it.
    pub fn display_path(&self) -> String {
        display_path(&self.path, self.workspace.as_deref())
    }

    /// Read and parse the file as it is now.
    pub fn read(&self) -> Result<ParsedEnvFile, InputError> {
        Ok(parse_env_file(&read_text(&self.path)?))
    }

    /// Status summary, or `None` when the file cannot be read.
    ///
    /// An unreadable file means "no environment configured" for status
    /// displays; the failure is logged rather than returned.
    pub fn summary(&self) -> Option<EnvSummary> {
        match self.read() {
            Ok(parsed) => Some(EnvSummary::from_parsed(&parsed)),
            Err(e) => {
                warn!(path = %self.path.display(), error = %e, "env file unavailable");
                None
            }
        }
    }

    /// Activate `target`.
    ///
    /// Re-reads the file, plans the rewrite on that fresh text, writes the
    /// whole file only when it changed, then re-parses to report the new
    /// state.
    ///
    /// # Errors
    ///
    /// Returns `EnvError::BlockDisappeared` when `target` is no longer in
    /// the file, `EnvError::Input` when reading or writing fails.
    pub fn switch(&self, target: &str) -> Result<SwitchReport, EnvError> {
        let current = read_text(&self.path)?;
        match plan_switch(&current, target)? {
            SwitchOutcome::NoBlocks => Ok(SwitchReport::NoBlocks),
            SwitchOutcome::Unchanged => Ok(SwitchReport::AlreadyActive {
                summary: EnvSummary::from_parsed(&parse_env_file(&current)),
            }),
            SwitchOutcome::Rewritten { content } => {
                write_text(&self.path, &content)?;
                info!(path = %self.path.display(), target, "env file rewritten");
                let summary = EnvSummary::from_parsed(&self.read()?);
                Ok(SwitchReport::Switched { summary })
            }
        }
    }
}
