//! Validation findings and the aggregated result

use serde::Serialize;
use std::fmt;

/// Severity of a finding
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// The process is unsound
    Error,
    /// Best-practice or ambiguity signal; the process stays valid
    Warning,
}

impl Severity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Error => "error",
            Self::Warning => "warning",
        }
    }
}

/// A single finding produced by a rule
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationIssue {
    pub severity: Severity,
    pub message: String,
    /// Offending element; `None` for process-wide findings
    #[serde(skip_serializing_if = "Option::is_none")]
    pub element_id: Option<String>,
    /// Id of the rule that produced the finding
    pub rule: &'static str,
}

impl ValidationIssue {
    pub fn error(
        element_id: Option<&str>,
        message: impl Into<String>,
        rule: &'static str,
    ) -> Self {
        Self {
            severity: Severity::Error,
            message: message.into(),
            element_id: element_id.map(str::to_string),
            rule,
        }
    }

    pub fn warning(
        element_id: Option<&str>,
        message: impl Into<String>,
        rule: &'static str,
    ) -> Self {
        Self {
            severity: Severity::Warning,
            message: message.into(),
            element_id: element_id.map(str::to_string),
            rule,
        }
    }

    pub fn is_error(&self) -> bool {
        self.severity == Severity::Error
    }
}

impl fmt::Display for ValidationIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.element_id {
            Some(id) => write!(
                f,
                "{} [{}] {}: {}",
                self.severity.as_str(),
                self.rule,
                id,
                self.message
            ),
            None => write!(
                f,
                "{} [{}] {}",
                self.severity.as_str(),
                self.rule,
                self.message
            ),
        }
    }
}

/// Outcome of a validation pass
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct ValidationResult {
    /// True when `errors` is empty
    pub valid: bool,
    pub errors: Vec<ValidationIssue>,
    pub warnings: Vec<ValidationIssue>,
}

impl ValidationResult {
    /// Split findings by severity, keeping their order
    pub fn from_issues(issues: impl IntoIterator<Item = ValidationIssue>) -> Self {
        let (errors, warnings): (Vec<_>, Vec<_>) =
            issues.into_iter().partition(ValidationIssue::is_error);
        Self {
            valid: errors.is_empty(),
            errors,
            warnings,
        }
    }

    pub fn issues(&self) -> impl Iterator<Item = &ValidationIssue> {
        self.errors.iter().chain(self.warnings.iter())
    }

    /// Findings produced by one rule
    pub fn for_rule<'r>(&'r self, rule: &'r str) -> impl Iterator<Item = &'r ValidationIssue> {
        self.issues().filter(move |i| i.rule == rule)
    }

    pub fn has_rule(&self, rule: &str) -> bool {
        self.issues().any(|i| i.rule == rule)
    }

    pub fn error_count(&self) -> usize {
        self.errors.len()
    }

    pub fn warning_count(&self) -> usize {
        self.warnings.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_issues_partitions() {
        let result = ValidationResult::from_issues(vec![
            ValidationIssue::warning(Some("g"), "missing condition", "gateway.conditions"),
            ValidationIssue::error(Some("t"), "has no incoming flow", "node.orphan"),
            ValidationIssue::error(None, "no start event", "event.start"),
        ]);
        assert!(!result.valid);
        assert_eq!(result.error_count(), 2);
        assert_eq!(result.warning_count(), 1);
        assert!(result.has_rule("gateway.conditions"));
        assert_eq!(result.for_rule("node.orphan").count(), 1);
    }

    #[test]
    fn test_empty_result_is_valid() {
        let result = ValidationResult::from_issues(Vec::new());
        assert!(result.valid);
    }

    #[test]
    fn test_wire_shape() {
        let result = ValidationResult::from_issues(vec![ValidationIssue::error(
            Some("t"),
            "Task 't' has no incoming flow",
            "node.orphan",
        )]);
        let json = serde_json::to_value(&result).unwrap();
        assert_eq!(json["valid"], false);
        assert_eq!(json["errors"][0]["elementId"], "t");
        assert_eq!(json["errors"][0]["severity"], "error");
        assert_eq!(json["warnings"].as_array().unwrap().len(), 0);

        let process_wide = ValidationIssue::warning(None, "no end event", "event.end");
        let json = serde_json::to_value(&process_wide).unwrap();
        assert!(json.get("elementId").is_none());
    }

    #[test]
    fn test_display() {
        let issue = ValidationIssue::error(Some("f1"), "dangling", "flow.dangling");
        assert_eq!(issue.to_string(), "error [flow.dangling] f1: dangling");
    }
}
