use serde::{Deserialize, Serialize};

/// Kind of a syntax item tracked by the source index
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ItemKind {
    /// The implicit module formed by a whole file
    File,
    /// An inline `mod name { ... }`
    Module,
    /// An out-of-line `mod name;` declaration
    ModDecl,
    Function,
}

impl ItemKind {
    /// Files and inline modules are modules; a `mod name;` declaration is not
    pub fn is_module(self) -> bool {
        matches!(self, ItemKind::File | ItemKind::Module)
    }
}
