use super::{
    cargo_workspace::CargoWorkspace,
    indexed_workspace::IndexedWorkspace,
    source_index::{ElementId, SourceIndex},
};
use crate::error::Result;
use std::path::Path;

/// Workspace metadata plus the parsed sources, loaded together and never
/// changed afterwards
#[derive(Debug)]
pub struct WorkspaceSnapshot {
    workspace: CargoWorkspace,
    index: SourceIndex,
}

impl WorkspaceSnapshot {
    pub fn load(manifest_path: &Path) -> Result<Self> {
        let workspace = CargoWorkspace::load(manifest_path)?;
        let index = SourceIndex::for_workspace(&workspace)?;
        Ok(Self { workspace, index })
    }

    pub fn workspace(&self) -> &CargoWorkspace {
        &self.workspace
    }

    pub fn index(&self) -> &SourceIndex {
        &self.index
    }

    pub fn workspace_oracle(&self) -> IndexedWorkspace<'_> {
        IndexedWorkspace::new(&self.workspace, &self.index)
    }

    /// Element for a location: the innermost item at a 0-based line, or the
    /// whole file without a line
    pub fn element_at(&self, path: &Path, line: Option<u32>) -> Option<ElementId> {
        let file = self.index.file_id(path)?;
        match line {
            Some(line) => self.index.element_at(file, line),
            None => self.index.file_element(file),
        }
    }
}
