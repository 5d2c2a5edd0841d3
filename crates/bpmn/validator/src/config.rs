//! Validator configuration

use serde::{Deserialize, Serialize};

/// Tunable rule behaviour, loaded from the `[validation]` table of the
/// CLI config file
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ValidatorConfig {
    /// Warn when a user task has no agent assignment
    pub warn_on_missing_agent: bool,
    /// Missing end event is an error (otherwise a warning)
    pub require_end_event: bool,
}

impl Default for ValidatorConfig {
    fn default() -> Self {
        Self {
            warn_on_missing_agent: true,
            require_end_event: true,
        }
    }
}

impl ValidatorConfig {
    pub fn with_missing_agent_warnings(mut self, enabled: bool) -> Self {
        self.warn_on_missing_agent = enabled;
        self
    }

    pub fn with_required_end_event(mut self, required: bool) -> Self {
        self.require_end_event = required;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ValidatorConfig::default();
        assert!(config.warn_on_missing_agent);
        assert!(config.require_end_event);
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config: ValidatorConfig = toml::from_str("require_end_event = false").unwrap();
        assert!(!config.require_end_event);
        assert!(config.warn_on_missing_agent);
    }
}
