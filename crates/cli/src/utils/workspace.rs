use anyhow::{Context, Result, anyhow};
use std::path::{Path, PathBuf};
use testscope_core::{CargoWorkspace, ConfigStore, ElementId, WorkspaceSnapshot};
use tracing::debug;

use super::parse_location;

/// A loaded workspace and where its configurations are stored
pub struct LoadedWorkspace {
    pub snapshot: WorkspaceSnapshot,
    pub store_path: PathBuf,
}

impl LoadedWorkspace {
    pub fn load_store(&self) -> Result<ConfigStore> {
        ConfigStore::load_from_file(&self.store_path)
            .with_context(|| format!("Failed to load {}", self.store_path.display()))
    }

    /// Elements for `path[:line]` locations, in the given order
    pub fn select(&self, locations: &[String]) -> Result<Vec<ElementId>> {
        locations
            .iter()
            .map(|location| {
                let (path, line) = parse_location(location);
                let absolute = std::fs::canonicalize(&path)
                    .with_context(|| format!("File not found: {path}"))?;
                debug!("Selecting {:?} at line {:?}", absolute, line);
                self.snapshot
                    .element_at(&absolute, line)
                    .ok_or_else(|| anyhow!("{} is not part of the workspace", absolute.display()))
            })
            .collect()
    }

    /// Display path of an element's file, relative to the workspace root
    pub fn display_path(&self, element: &ElementId) -> String {
        let root = self.snapshot.workspace().root();
        self.snapshot
            .index()
            .path_of(element)
            .map(|path| path.strip_prefix(root).unwrap_or(path).display().to_string())
            .unwrap_or_default()
    }
}

/// Load the workspace named by `--manifest-path`, or the one enclosing the
/// current directory
pub fn load_workspace(manifest_path: Option<&Path>) -> Result<LoadedWorkspace> {
    let manifest = match manifest_path {
        Some(path) => std::fs::canonicalize(path)
            .with_context(|| format!("Manifest not found: {}", path.display()))?,
        None => {
            let cwd = std::fs::canonicalize(std::env::current_dir()?)?;
            CargoWorkspace::find_manifest(&cwd)
                .ok_or_else(|| anyhow!("No Cargo.toml found in {} or its parents", cwd.display()))?
        }
    };
    debug!("Using manifest {:?}", manifest);

    let snapshot = WorkspaceSnapshot::load(&manifest)
        .with_context(|| format!("Failed to load workspace {}", manifest.display()))?;
    let store_path = ConfigStore::path_for(snapshot.workspace().root());
    Ok(LoadedWorkspace {
        snapshot,
        store_path,
    })
}
