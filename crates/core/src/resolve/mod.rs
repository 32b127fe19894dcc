//! Resolution of a selection into a test run

pub mod classifier;
pub mod test_config;

pub use classifier::SelectionClassifier;
pub use test_config::{
    FunctionTest, ModuleTest, MultiFileTest, TestConfig, MULTIPLE_FILES_NAME, module_display_name,
    normalize_path,
};
