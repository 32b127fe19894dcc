use crate::types::Position;
use regex::Regex;
use std::sync::LazyLock;
use tree_sitter::Node;

// `#[test]`, `#[tokio::test(...)]`, `#[rstest]`, `#[test_case(...)]`, ...
static TEST_ATTRIBUTE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^#\[\s*(?:[A-Za-z_][A-Za-z0-9_]*\s*::\s*)*(?:test|rstest|test_case)\b")
        .expect("test attribute pattern is valid")
});

pub fn node_to_position(node: &Node, start: bool) -> Position {
    let point = if start {
        node.start_position()
    } else {
        node.end_position()
    };
    Position {
        line: point.row as u32,
        character: point.column as u32,
    }
}

/// Whether the text of an outer attribute marks a function as a test
pub fn is_test_attribute(text: &str) -> bool {
    TEST_ATTRIBUTE.is_match(text.trim())
}
