//! testscope-core - resolve a selection in a Cargo workspace into a test run
//!
//! This crate provides functionality to:
//! - Classify a selection (a test function, a module, or several files) into
//!   a validated [`TestConfig`]
//! - Derive the `cargo test` invocation descriptor for it
//! - Compare and merge it with stored run configurations
//! - Answer the syntax and workspace questions this needs from tree-sitter
//!   parses and `Cargo.toml` manifests
pub mod command;
pub mod config;
pub mod error;
pub mod interfaces;
pub mod parser;
pub mod producer;
pub mod resolve;
pub mod services;
pub mod types;

#[cfg(test)]
pub(crate) mod testing;

// Re-export commonly used types and traits
pub use error::{Error, Result};
pub use types::*;

// Re-export main API components
pub use command::{CargoCommand, CommandDescriptor};
pub use config::{ConfigStore, RunConfiguration};
pub use interfaces::{ElementKind, ResolveContext, TreeOracle, WorkspaceOracle};
pub use producer::{Populated, TestProducer};
pub use resolve::{SelectionClassifier, TestConfig};
pub use services::{CargoWorkspace, ElementId, SourceIndex, WorkspaceSnapshot};
