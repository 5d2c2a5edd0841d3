//! Analyzer configuration

use serde::{Deserialize, Serialize};

/// Bounds and thresholds for one analysis pass, loaded from the
/// `[analysis]` table of the CLI config file
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalyzerConfig {
    /// Stop enumerating start-to-end paths after this many. Together with
    /// `max_path_depth` it also bounds the total steps one walk may take.
    pub max_paths: usize,
    /// Longest path, in flows, that enumeration will follow
    pub max_path_depth: usize,
    /// An agent is overloaded above `mean * overload_factor` tasks
    pub overload_factor: f64,
}

impl Default for AnalyzerConfig {
    fn default() -> Self {
        Self {
            max_paths: 1000,
            max_path_depth: 512,
            overload_factor: 1.5,
        }
    }
}

impl AnalyzerConfig {
    pub fn with_max_paths(mut self, max_paths: usize) -> Self {
        self.max_paths = max_paths;
        self
    }

    pub fn with_max_path_depth(mut self, depth: usize) -> Self {
        self.max_path_depth = depth;
        self
    }

    pub fn with_overload_factor(mut self, factor: f64) -> Self {
        self.overload_factor = factor;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = AnalyzerConfig::default();
        assert_eq!(config.max_paths, 1000);
        assert_eq!(config.max_path_depth, 512);
        assert_eq!(config.overload_factor, 1.5);
    }

    #[test]
    fn test_partial_toml() {
        let config: AnalyzerConfig = toml::from_str("max_paths = 10").unwrap();
        assert_eq!(config.max_paths, 10);
        assert_eq!(config.max_path_depth, 512);
    }
}
