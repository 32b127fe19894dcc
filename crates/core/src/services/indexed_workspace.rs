use super::{cargo_workspace::CargoWorkspace, source_index::{ElementId, SourceIndex}};
use crate::{
    interfaces::WorkspaceOracle,
    types::{BuildTarget, Package},
};

/// Answers target ownership for elements of a [`SourceIndex`] from the
/// workspace manifests
#[derive(Debug, Clone, Copy)]
pub struct IndexedWorkspace<'a> {
    workspace: &'a CargoWorkspace,
    index: &'a SourceIndex,
}

impl<'a> IndexedWorkspace<'a> {
    pub fn new(workspace: &'a CargoWorkspace, index: &'a SourceIndex) -> Self {
        Self { workspace, index }
    }
}

impl WorkspaceOracle<ElementId> for IndexedWorkspace<'_> {
    fn containing_build_target(&self, element: &ElementId) -> Option<BuildTarget> {
        self.workspace.target_for_file(self.index.path_of(element)?)
    }

    fn owning_package(&self, target: &BuildTarget) -> Option<Package> {
        self.workspace.package(&target.package).cloned()
    }
}
