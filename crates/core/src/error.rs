use std::io;

/// Errors that can occur while loading a workspace, indexing sources or
/// reading stored run configurations.
///
/// Resolving a selection never produces one of these: a selection that does
/// not denote runnable tests resolves to `None`.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Parse error: {0}")]
    ParseError(String),

    #[error("IO error: {0}")]
    IoError(#[from] io::Error),

    #[error("Tree-sitter error: {0}")]
    TreeSitterError(String),

    #[error("Manifest error: {0}")]
    ManifestError(String),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("No tests found for the selection")]
    NoTestsFound,
}

/// Result type alias for testscope operations
pub type Result<T> = std::result::Result<T, Error>;
