use super::utils::{is_test_attribute, node_to_position};
use crate::{
    error::{Error, Result},
    types::{ItemKind, Span},
};
use tree_sitter::{Node, Tree};

/// An item found in a file. Index 0 of a collected list is always the file
/// itself; `parent` indexes into the same list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedItem {
    pub kind: ItemKind,
    pub name: Option<String>,
    pub parent: Option<usize>,
    /// Span including leading attributes and doc comments
    pub span: Span,
    pub is_test: bool,
}

/// Collects modules, module declarations and functions from a syntax tree.
///
/// Functions nested inside function bodies or impl blocks are not items of
/// a module and are not collected.
pub struct ItemCollector;

impl Default for ItemCollector {
    fn default() -> Self {
        Self::new()
    }
}

impl ItemCollector {
    pub fn new() -> Self {
        Self
    }

    pub fn collect(&self, tree: &Tree, source: &str) -> Result<Vec<ParsedItem>> {
        let root = tree.root_node();
        let mut items = vec![ParsedItem {
            kind: ItemKind::File,
            name: None,
            parent: None,
            span: Span::new(node_to_position(&root, true), node_to_position(&root, false)),
            is_test: false,
        }];
        self.visit_children(&root, 0, source, &mut items)?;
        Ok(items)
    }

    fn visit_children(
        &self,
        node: &Node,
        parent: usize,
        source: &str,
        items: &mut Vec<ParsedItem>,
    ) -> Result<()> {
        for child in node.children(&mut node.walk()) {
            match child.kind() {
                "function_item" => {
                    let name = self.item_name(&child, source)?;
                    let is_test = self.has_test_attribute(&child, source);
                    items.push(ParsedItem {
                        kind: ItemKind::Function,
                        name: Some(name),
                        parent: Some(parent),
                        span: self.extended_span(&child),
                        is_test,
                    });
                }
                "mod_item" => {
                    let name = self.item_name(&child, source)?;
                    let body = child.child_by_field_name("body");
                    items.push(ParsedItem {
                        kind: if body.is_some() {
                            ItemKind::Module
                        } else {
                            ItemKind::ModDecl
                        },
                        name: Some(name),
                        parent: Some(parent),
                        span: self.extended_span(&child),
                        is_test: false,
                    });
                    if let Some(body) = body {
                        let index = items.len() - 1;
                        self.visit_children(&body, index, source, items)?;
                    }
                }
                _ => {}
            }
        }
        Ok(())
    }

    fn item_name(&self, node: &Node, source: &str) -> Result<String> {
        let name_node = node
            .child_by_field_name("name")
            .ok_or_else(|| Error::ParseError(format!("{} without name", node.kind())))?;

        Ok(name_node
            .utf8_text(source.as_bytes())
            .map_err(|e| Error::ParseError(format!("Invalid UTF-8 in item name: {e}")))?
            .to_string())
    }

    /// Attributes preceding the item, nearest first
    fn attributes<'t>(&self, node: &Node<'t>) -> Vec<Node<'t>> {
        let mut attributes = Vec::new();
        let mut sibling = node.prev_sibling();

        while let Some(s) = sibling {
            match s.kind() {
                "attribute_item" => attributes.push(s),
                "line_comment" | "block_comment" => {}
                // Stop if we hit something that's not an attribute or comment
                _ => break,
            }
            sibling = s.prev_sibling();
        }

        attributes
    }

    fn has_test_attribute(&self, node: &Node, source: &str) -> bool {
        self.attributes(node).iter().any(|attribute| {
            attribute
                .utf8_text(source.as_bytes())
                .map(is_test_attribute)
                .unwrap_or(false)
        })
    }

    fn extended_span(&self, node: &Node) -> Span {
        let start = self
            .attributes(node)
            .last()
            .map(|first| node_to_position(first, true))
            .unwrap_or_else(|| node_to_position(node, true));
        Span::new(start, node_to_position(node, false))
    }
}
