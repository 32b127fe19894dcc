//! Stored run configurations
//!
//! Configurations live in `.testscope.json` at the workspace root.

pub mod run_config;
pub mod store;

// Re-export main types
pub use run_config::{RunConfiguration, merge_with_default};
pub use store::{CONFIG_FILE_NAME, ConfigStore};
