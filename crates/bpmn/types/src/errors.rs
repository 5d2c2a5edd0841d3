//! Error types for loading and building processes

/// Parse-level failures: the input could not be turned into a [`crate::Process`].
///
/// Rule-level problems (orphaned nodes, dangling flows, ...) are never
/// reported through this type; they are findings of the validator.
#[derive(Debug, thiserror::Error)]
pub enum ProcessError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid JSON document: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid YAML document: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("Document has no root \"process\" object")]
    MissingProcess,

    #[error("Unsupported document format: {0}")]
    UnsupportedFormat(String),

    #[error("Duplicate element ID: {0}")]
    DuplicateElementId(String),

    #[error("Element not found: {0}")]
    ElementNotFound(String),

    #[error("Process builder error: {0}")]
    Builder(String),
}

/// Result type alias for process loading and construction
pub type ProcessResult<T> = Result<T, ProcessError>;
