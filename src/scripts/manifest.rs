//! `package.json` loading and package manager detection.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors loading a project manifest.
#[derive(Debug, Error)]
pub enum ManifestError {
    /// The manifest file could not be read.
    #[error("Failed to read {path}: {source}")]
    Read {
        /// Path that was attempted.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The manifest is not valid JSON of the expected shape.
    #[error("Invalid or unreadable package.json at {path}: {reason}")]
    Json {
        /// Path of the manifest.
        path: PathBuf,
        /// Parser message.
        reason: String,
    },
}

/// The parts of `package.json` the script runner reads.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Manifest {
    #[serde(default)]
    pub scripts: BTreeMap<String, String>,
    #[serde(default)]
    pub package_manager: Option<String>,
}

impl Manifest {
    pub const FILE_NAME: &'static str = "package.json";

    pub fn parse(text: &str, path: &Path) -> Result<Self, ManifestError> {
        serde_json::from_str(text).map_err(|e| ManifestError::Json {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })
    }

    /// Load `<root>/package.json`.
    pub fn load(root: &Path) -> Result<Self, ManifestError> {
        let path = root.join(Self::FILE_NAME);
        let text = fs::read_to_string(&path).map_err(|source| ManifestError::Read {
            path: path.clone(),
            source,
        })?;
        Self::parse(&text, &path)
    }
}

/// Lock files checked in order when `packageManager` is absent.
const LOCK_FILES: [(&str, PackageManager); 4] = [
    ("pnpm-lock.yaml", PackageManager::Pnpm),
    ("yarn.lock", PackageManager::Yarn),
    ("bun.lockb", PackageManager::Bun),
    ("bun.lock", PackageManager::Bun),
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PackageManager {
    #[default]
    Npm,
    Pnpm,
    Yarn,
    Bun,
}

impl PackageManager {
    /// `packageManager` field first (`pnpm@9.1.0` → pnpm), then lock files
    /// in `root`, then npm.
    pub fn detect(root: &Path, manifest: &Manifest) -> Self {
        if let Some(field) = manifest.package_manager.as_deref() {
            for pm in [PackageManager::Pnpm, PackageManager::Yarn, PackageManager::Bun] {
                if field.starts_with(pm.name()) {
                    return pm;
                }
            }
        }
        LOCK_FILES
            .iter()
            .find(|(file, _)| root.join(file).exists())
            .map(|(_, pm)| *pm)
            .unwrap_or_default()
    }

    pub fn name(self) -> &'static str {
        match self {
            PackageManager::Npm => "npm",
            PackageManager::Pnpm => "pnpm",
            PackageManager::Yarn => "yarn",
            PackageManager::Bun => "bun",
        }
    }
}

impl fmt::Display for PackageManager {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
