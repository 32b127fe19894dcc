//! Oracle interfaces the resolver is written against
//!
//! The resolver never looks at a concrete syntax tree or manifest. It asks a
//! [`TreeOracle`] about source elements and a [`WorkspaceOracle`] about which
//! build target and package own them. `crate::services` provides the
//! implementations backed by tree-sitter and `Cargo.toml` manifests.

pub mod tree_oracle;
pub mod workspace_oracle;

pub use tree_oracle::{Ancestors, ElementKind, TreeOracle};
pub use workspace_oracle::WorkspaceOracle;

/// The pair of oracles a resolution runs against
///
/// Both oracles must present an unchanging view for the duration of one call.
#[derive(Debug)]
pub struct ResolveContext<'a, T, W> {
    pub tree: &'a T,
    pub workspace: &'a W,
}

impl<'a, T, W> ResolveContext<'a, T, W> {
    pub fn new(tree: &'a T, workspace: &'a W) -> Self {
        Self { tree, workspace }
    }
}

impl<T, W> Clone for ResolveContext<'_, T, W> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T, W> Copy for ResolveContext<'_, T, W> {}
