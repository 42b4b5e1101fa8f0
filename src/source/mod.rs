//! Host-side file access.
//!
//! Resolves configured paths and performs whole-file reads and writes for
//! the engines, which never touch the file system themselves.

use crate::model::error::InputError;
use std::fs;
use std::path::{Path, PathBuf};

pub mod env_file;

pub use env_file::{EnvFile, SwitchReport};

/// Expand a leading `~/` with the user's home directory.
fn expand_home(raw: &str) -> PathBuf {
    match (raw.strip_prefix("~/"), dirs::home_dir()) {
        (Some(rest), Some(home)) => home.join(rest),
        _ => PathBuf::from(raw),
    }
}

/// Resolve the configured env file path.
///
/// # Logic:
/// 1. Trim; an empty value means nothing is configured
/// 2. Expand `~/`
/// 3. Absolute paths are used as-is
/// 4. Relative paths are joined to `workspace`
///
/// # Errors
///
/// Returns `InputError::NotConfigured` for an empty value, or for a relative
/// path when there is no workspace to resolve it against.
pub fn resolve_env_path(configured: &str, workspace: Option<&Path>) -> Result<PathBuf, InputError> {
    let raw = configured.trim();
    if raw.is_empty() {
        return Err(InputError::NotConfigured);
    }
    let expanded = expand_home(raw);
    if expanded.is_absolute() {
        return Ok(expanded);
    }
    workspace
        .map(|root| root.join(&expanded))
        .ok_or(InputError::NotConfigured)
}

/// `path` relative to `workspace` for display, falling back to the file name
/// when they are equal and to the full path when `path` is outside.
pub fn display_path(path: &Path, workspace: Option<&Path>) -> String {
    let Some(root) = workspace else {
        return path.display().to_string();
    };
    match path.strip_prefix(root) {
        Ok(relative) if relative.as_os_str().is_empty() => path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string()),
        Ok(relative) => relative.display().to_string(),
        Err(_) => path.display().to_string(),
    }
}

/// Read a whole UTF-8 file.
///
/// # Errors
///
/// Returns `InputError::FileNotFound` if the file does not exist.
/// Returns `InputError::Io` for other I/O errors.
pub fn read_text(path: &Path) -> Result<String, InputError> {
    if !path.exists() {
        return Err(InputError::FileNotFound {
            path: path.to_path_buf(),
        });
    }
    Ok(fs::read_to_string(path)?)
}

/// Replace the whole file with `content` in a single write.
pub fn write_text(path: &Path, content: &str) -> Result<(), InputError> {
    fs::write(path, content)?;
    Ok(())
}
