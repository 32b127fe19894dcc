//! Rust source code parsing using tree-sitter

pub mod item_collector;
pub mod rust_parser;
pub mod utils;

// Re-export commonly used items
pub use item_collector::{ItemCollector, ParsedItem};
pub use rust_parser::RustParser;
pub use utils::{is_test_attribute, node_to_position};
