//! Oracle implementations backed by the file system
//!
//! [`SourceIndex`] answers syntax questions from tree-sitter parses and
//! [`CargoWorkspace`] answers ownership questions from `Cargo.toml`
//! manifests. [`WorkspaceSnapshot`] loads both for one workspace.

pub mod cargo_workspace;
pub mod indexed_workspace;
pub mod snapshot;
pub mod source_index;

pub use cargo_workspace::CargoWorkspace;
pub use indexed_workspace::IndexedWorkspace;
pub use snapshot::WorkspaceSnapshot;
pub use source_index::{ElementId, FileId, SourceIndex};
