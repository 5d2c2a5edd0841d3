//! CLI configuration file

use crate::error::CliResult;
use bpmn_analyzer::AnalyzerConfig;
use bpmn_validator::ValidatorConfig;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Contents of the optional TOML config file
///
/// ```toml
/// [validation]
/// require_end_event = false
///
/// [analysis]
/// max_paths = 200
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CliConfig {
    pub validation: ValidatorConfig,
    pub analysis: AnalyzerConfig,
}

impl CliConfig {
    /// Load from `path`; no path or a missing file gives defaults
    pub fn load(path: Option<&str>) -> CliResult<Self> {
        let Some(path) = path else {
            return Ok(Self::default());
        };
        if !Path::new(path).exists() {
            tracing::debug!(path, "Config file not found, using defaults");
            return Ok(Self::default());
        }
        let text = std::fs::read_to_string(path)?;
        let config = toml::from_str(&text)?;
        tracing::debug!(path, "Loaded config file");
        Ok(config)
    }
}
