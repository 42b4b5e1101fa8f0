//! Scripts across the folders of a multi-root workspace.

use crate::scripts::manifest::{Manifest, ManifestError, PackageManager};
use crate::scripts::runner::{
    compare_script_names, has_nvmrc, run_command, sorted_scripts, split_overflow,
};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::PathBuf;

/// How scripts from several workspace folders are combined.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WorkspaceMode {
    /// Only the first folder.
    #[default]
    First,
    /// Every folder, one after the other, each in its own display order.
    All,
    /// One entry per script name; the folder is picked when it runs.
    Pick,
}

/// A workspace folder with its manifest loaded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkspaceFolder {
    pub root: PathBuf,
    pub manifest: Manifest,
    pub package_manager: PackageManager,
    pub nvm: bool,
}

impl WorkspaceFolder {
    /// Detects the package manager and `.nvmrc` in `root`.
    pub fn new(root: impl Into<PathBuf>, manifest: Manifest) -> Self {
        let root = root.into();
        let package_manager = PackageManager::detect(&root, &manifest);
        let nvm = has_nvmrc(&root);
        Self {
            root,
            manifest,
            package_manager,
            nvm,
        }
    }

    /// Load `<root>/package.json`.
    pub fn load(root: impl Into<PathBuf>) -> Result<Self, ManifestError> {
        let root = root.into();
        let manifest = Manifest::load(&root)?;
        Ok(Self::new(root, manifest))
    }
}

/// A folder a script can run in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScriptVariant {
    pub folder: PathBuf,
    pub package_manager: PackageManager,
    pub nvm: bool,
    /// The manifest's command text in this folder.
    pub command: String,
    /// Shell command that runs the script here.
    pub run: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WorkspaceScript {
    pub name: String,
    /// Command text of the first variant, shown as a hint.
    pub command: String,
    /// Several only in [`WorkspaceMode::Pick`], in folder order.
    pub variants: Vec<ScriptVariant>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct WorkspaceScripts {
    pub visible: Vec<WorkspaceScript>,
    pub overflow: Vec<WorkspaceScript>,
}

impl WorkspaceScripts {
    pub fn iter(&self) -> impl Iterator<Item = &WorkspaceScript> {
        self.visible.iter().chain(self.overflow.iter())
    }
}

/// Combine the scripts of `folders` according to `mode`.
///
/// `first` and `all` keep each folder's display order and concatenate.
/// `pick` merges scripts of the same name into one entry whose variants
/// remember their folder and package manager, then sorts the merged names.
/// The visible/overflow split applies to the combined list.
pub fn collect_scripts(
    folders: &[WorkspaceFolder],
    mode: WorkspaceMode,
    exclude: &[String],
    order: &[String],
    max_buttons: usize,
) -> WorkspaceScripts {
    let per_folder = |folder: &WorkspaceFolder| -> Vec<(String, ScriptVariant)> {
        sorted_scripts(&folder.manifest, exclude, order)
            .into_iter()
            .map(|entry| {
                let variant = ScriptVariant {
                    folder: folder.root.clone(),
                    package_manager: folder.package_manager,
                    nvm: folder.nvm,
                    run: run_command(folder.package_manager, &entry.name, folder.nvm),
                    command: entry.command,
                };
                (entry.name, variant)
            })
            .collect()
    };
    let single = |(name, variant): (String, ScriptVariant)| WorkspaceScript {
        name,
        command: variant.command.clone(),
        variants: vec![variant],
    };

    let collected: Vec<WorkspaceScript> = match mode {
        WorkspaceMode::First => folders
            .first()
            .map(per_folder)
            .unwrap_or_default()
            .into_iter()
            .map(single)
            .collect(),
        WorkspaceMode::All => folders.iter().flat_map(per_folder).map(single).collect(),
        WorkspaceMode::Pick => {
            let mut merged: BTreeMap<String, Vec<ScriptVariant>> = BTreeMap::new();
            for (name, variant) in folders.iter().flat_map(per_folder) {
                merged.entry(name).or_default().push(variant);
            }
            let mut scripts: Vec<WorkspaceScript> = merged
                .into_iter()
                .map(|(name, variants)| WorkspaceScript {
                    command: variants
                        .first()
                        .map(|v| v.command.clone())
                        .unwrap_or_default(),
                    name,
                    variants,
                })
                .collect();
            scripts.sort_by(|a, b| compare_script_names(order, &a.name, &b.name));
            scripts
        }
    };

    let (visible, overflow) = split_overflow(collected, max_buttons);
    WorkspaceScripts { visible, overflow }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn folder(root: &str, pm: Option<&str>, scripts: &[(&str, &str)]) -> WorkspaceFolder {
        let manifest = Manifest {
            scripts: scripts
                .iter()
                .map(|(n, c)| (n.to_string(), c.to_string()))
                .collect(),
            package_manager: pm.map(str::to_string),
        };
        WorkspaceFolder::new(std::env::temp_dir().join("toolbelt_no_such_dir").join(root), manifest)
    }

    fn order() -> Vec<String> {
        ["dev", "build", "test"].iter().map(|s| s.to_string()).collect()
    }

    fn names(list: &[WorkspaceScript]) -> Vec<&str> {
        list.iter().map(|s| s.name.as_str()).collect()
    }

    fn folders() -> Vec<WorkspaceFolder> {
        vec![
            folder("web", Some("pnpm@9"), &[("lint", "eslint ."), ("dev", "vite")]),
            folder("api", None, &[("test", "jest"), ("dev", "nodemon"), ("seed", "node seed")]),
        ]
    }

    #[test]
    fn first_mode_reads_only_the_first_folder() {
        let list = collect_scripts(&folders(), WorkspaceMode::First, &[], &order(), 8);
        assert_eq!(names(&list.visible), vec!["dev", "lint"]);
        assert_eq!(list.visible[0].variants[0].run, "pnpm run dev");
    }

    #[test]
    fn all_mode_concatenates_folders() {
        let list = collect_scripts(&folders(), WorkspaceMode::All, &[], &order(), 8);
        assert_eq!(names(&list.visible), vec!["dev", "lint", "dev", "test", "seed"]);
        assert_eq!(list.visible[2].variants[0].run, "npm run dev");
    }

    #[test]
    fn pick_mode_merges_same_names() {
        let list = collect_scripts(&folders(), WorkspaceMode::Pick, &[], &order(), 8);
        assert_eq!(names(&list.visible), vec!["dev", "test", "lint", "seed"]);

        let dev = &list.visible[0];
        assert_eq!(dev.command, "vite");
        let runs: Vec<(&str, &str)> = dev
            .variants
            .iter()
            .map(|v| (v.folder.file_name().and_then(|n| n.to_str()).unwrap_or(""), v.run.as_str()))
            .collect();
        assert_eq!(runs, vec![("web", "pnpm run dev"), ("api", "npm run dev")]);
        assert_eq!(list.visible[1].variants.len(), 1);
    }

    #[test]
    fn split_applies_to_the_combined_list() {
        let list = collect_scripts(&folders(), WorkspaceMode::All, &["seed".into()], &order(), 3);
        assert_eq!(names(&list.visible), vec!["dev", "lint", "dev"]);
        assert_eq!(names(&list.overflow), vec!["test"]);
        assert_eq!(list.iter().count(), 4);
    }

    #[test]
    fn no_folders_means_no_scripts() {
        for mode in [WorkspaceMode::First, WorkspaceMode::All, WorkspaceMode::Pick] {
            assert_eq!(collect_scripts(&[], mode, &[], &[], 8), WorkspaceScripts::default());
        }
    }
}
