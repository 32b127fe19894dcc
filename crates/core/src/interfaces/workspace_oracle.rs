//! Build workspace queries

use crate::types::{BuildTarget, Package};

/// Read-only view of which target and package own a source element
pub trait WorkspaceOracle<E> {
    /// Build target compiling the element, if it can be determined
    fn containing_build_target(&self, element: &E) -> Option<BuildTarget>;

    /// Package owning the target
    fn owning_package(&self, target: &BuildTarget) -> Option<Package>;
}
