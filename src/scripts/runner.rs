//! Script ordering and shell command construction.

use crate::scripts::manifest::{Manifest, PackageManager};
use serde::Serialize;
use std::cmp::Ordering;
use std::path::Path;

/// Prefix that switches to the project's Node version first.
const NVM_PREFIX: &str = ". ~/.nvm/nvm.sh && nvm use && ";

/// Default for `max_buttons` when the configured value is zero.
pub const DEFAULT_MAX_BUTTONS: usize = 8;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScriptEntry {
    pub name: String,
    /// The manifest's command text, shown as a hint.
    pub command: String,
}

/// Scripts split into the ones that get a button and the overflow.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ScriptList {
    pub visible: Vec<ScriptEntry>,
    pub overflow: Vec<ScriptEntry>,
}

impl ScriptList {
    pub fn len(&self) -> usize {
        self.visible.len() + self.overflow.len()
    }

    pub fn is_empty(&self) -> bool {
        self.visible.is_empty() && self.overflow.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &ScriptEntry> {
        self.visible.iter().chain(self.overflow.iter())
    }
}

/// Display order of two script names.
///
/// Names listed in `order` come first, by their position there; the rest
/// follow alphabetically, ignoring case, with lowercase first on ties.
pub fn compare_script_names(order: &[String], a: &str, b: &str) -> Ordering {
    let rank = |name: &str| {
        order
            .iter()
            .position(|o| o.as_str() == name)
            .unwrap_or(usize::MAX)
    };
    rank(a)
        .cmp(&rank(b))
        .then_with(|| a.to_lowercase().cmp(&b.to_lowercase()))
        .then_with(|| b.cmp(a))
}

/// Scripts of `manifest` not in `exclude`, in display order.
pub fn sorted_scripts(manifest: &Manifest, exclude: &[String], order: &[String]) -> Vec<ScriptEntry> {
    let mut entries: Vec<ScriptEntry> = manifest
        .scripts
        .iter()
        .filter(|(name, _)| !exclude.contains(*name))
        .map(|(name, command)| ScriptEntry {
            name: name.clone(),
            command: command.clone(),
        })
        .collect();
    entries.sort_by(|a, b| compare_script_names(order, &a.name, &b.name));
    entries
}

/// Split `entries` after the first `max_buttons` (8 when zero).
pub(crate) fn split_overflow<T>(mut entries: Vec<T>, max_buttons: usize) -> (Vec<T>, Vec<T>) {
    let max = if max_buttons == 0 {
        DEFAULT_MAX_BUTTONS
    } else {
        max_buttons
    };
    let overflow = if entries.len() > max {
        entries.split_off(max)
    } else {
        Vec::new()
    };
    (entries, overflow)
}

/// Order the manifest's scripts for display.
///
/// Names in `exclude` are dropped and the rest are sorted by
/// [`compare_script_names`]. The first `max_buttons` (8 when zero) are
/// visible, the rest overflow.
pub fn ordered_scripts(
    manifest: &Manifest,
    exclude: &[String],
    order: &[String],
    max_buttons: usize,
) -> ScriptList {
    let (visible, overflow) = split_overflow(sorted_scripts(manifest, exclude, order), max_buttons);
    ScriptList { visible, overflow }
}

/// Whether `root` pins a Node version with `.nvmrc`.
pub fn has_nvmrc(root: &Path) -> bool {
    root.join(".nvmrc").exists()
}

/// Shell command that runs script `name`.
///
/// ```
/// use toolbelt::scripts::{run_command, PackageManager};
///
/// assert_eq!(run_command(PackageManager::Yarn, "dev", false), "yarn dev");
/// assert_eq!(
///     run_command(PackageManager::Npm, "build", true),
///     ". ~/.nvm/nvm.sh && nvm use && npm run build"
/// );
/// ```
pub fn run_command(pm: PackageManager, name: &str, has_nvmrc: bool) -> String {
    let prefix = if has_nvmrc { NVM_PREFIX } else { "" };
    match pm {
        PackageManager::Yarn => format!("{prefix}yarn {name}"),
        other => format!("{prefix}{other} run {name}"),
    }
}
