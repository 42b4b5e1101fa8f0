//! Project script runner support.
//!
//! Lists the scripts of a `package.json`, orders them for display and builds
//! the shell command that runs one. Multi-root workspaces combine their
//! folders per [`WorkspaceMode`]. Launching the command is up to the host.

mod manifest;
mod runner;
mod workspace;

pub use manifest::{Manifest, ManifestError, PackageManager};
pub use runner::{
    compare_script_names, has_nvmrc, ordered_scripts, run_command, sorted_scripts, ScriptEntry,
    ScriptList, DEFAULT_MAX_BUTTONS,
};
pub use workspace::{
    collect_scripts, ScriptVariant, WorkspaceFolder, WorkspaceMode, WorkspaceScript,
    WorkspaceScripts,
};
