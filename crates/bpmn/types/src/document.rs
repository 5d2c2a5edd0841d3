//! Loading process documents from JSON or YAML

use crate::{Process, ProcessError, ProcessResult};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::path::Path;

/// Top-level document wrapping a single process
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ProcessDocument {
    #[serde(rename = "$type", default, skip_serializing_if = "Option::is_none")]
    pub document_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
    pub process: Process,
}

/// On-disk document encoding
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DocumentFormat {
    Json,
    Yaml,
}

impl DocumentFormat {
    /// Pick the format from a file extension
    pub fn from_path(path: &Path) -> ProcessResult<Self> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase)
            .unwrap_or_default();
        match ext.as_str() {
            "json" => Ok(Self::Json),
            "yaml" | "yml" => Ok(Self::Yaml),
            _ => Err(ProcessError::UnsupportedFormat(if ext.is_empty() {
                path.display().to_string()
            } else {
                ext
            })),
        }
    }
}

impl ProcessDocument {
    pub fn new(process: Process) -> Self {
        Self {
            document_type: None,
            version: None,
            process,
        }
    }

    pub fn from_json_str(input: &str) -> ProcessResult<Self> {
        let value: Value = serde_json::from_str(input)?;
        Self::from_value(value)
    }

    pub fn from_yaml_str(input: &str) -> ProcessResult<Self> {
        let value: Value = serde_yaml::from_str(input)?;
        Self::from_value(value)
    }

    pub fn parse(input: &str, format: DocumentFormat) -> ProcessResult<Self> {
        match format {
            DocumentFormat::Json => Self::from_json_str(input),
            DocumentFormat::Yaml => Self::from_yaml_str(input),
        }
    }

    /// Decode a generic value, rejecting documents without a root
    /// `process` object before any field-level decoding happens
    pub fn from_value(value: Value) -> ProcessResult<Self> {
        if !value.get("process").is_some_and(Value::is_object) {
            return Err(ProcessError::MissingProcess);
        }
        Ok(serde_json::from_value(value)?)
    }

    /// Read and decode a document, choosing the format by extension
    pub fn from_path(path: impl AsRef<Path>) -> ProcessResult<Self> {
        let path = path.as_ref();
        let format = DocumentFormat::from_path(path)?;
        let input = std::fs::read_to_string(path)?;
        let document = Self::parse(&input, format)?;
        tracing::debug!(
            path = %path.display(),
            process_id = %document.process.id,
            nodes = document.process.node_count(),
            "Loaded process document"
        );
        Ok(document)
    }

    pub fn into_process(self) -> Process {
        self.process
    }

    pub fn to_json_pretty(&self) -> ProcessResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}
