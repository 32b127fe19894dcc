use crate::{
    error::{Error, Result},
    parser::item_collector::{ItemCollector, ParsedItem},
};
use tree_sitter::Parser;

pub struct RustParser {
    parser: Parser,
}

impl RustParser {
    pub fn new() -> Result<Self> {
        let mut parser = Parser::new();
        parser
            .set_language(&tree_sitter_rust::LANGUAGE.into())
            .map_err(|e| Error::TreeSitterError(format!("Failed to set language: {e}")))?;
        Ok(Self { parser })
    }

    pub fn parse(&mut self, source: &str) -> Result<tree_sitter::Tree> {
        self.parser
            .parse(source, None)
            .ok_or_else(|| Error::ParseError("Failed to parse source code".to_string()))
    }

    /// Parse and collect the file's items
    pub fn parse_items(&mut self, source: &str) -> Result<Vec<ParsedItem>> {
        let tree = self.parse(source)?;
        ItemCollector::new().collect(&tree, source)
    }
}
