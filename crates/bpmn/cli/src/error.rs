//! CLI error types

use bpmn_types::ProcessError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CliError {
    /// The document could not be loaded as a process
    #[error("Failed to load '{path}': {source}")]
    Document {
        path: String,
        #[source]
        source: ProcessError,
    },

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl CliError {
    pub fn document(path: &str, source: ProcessError) -> Self {
        Self::Document {
            path: path.to_string(),
            source,
        }
    }
}

impl From<toml::de::Error> for CliError {
    fn from(err: toml::de::Error) -> Self {
        Self::Config(err.to_string())
    }
}

/// Result type for CLI operations
pub type CliResult<T> = Result<T, CliError>;
