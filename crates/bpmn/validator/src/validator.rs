//! Runs every rule over one process

use crate::{rules, ValidationResult, ValidationRule, ValidatorConfig};
use bpmn_graph::ProcessGraph;
use bpmn_types::{Process, ProcessDocument, ProcessResult};
use std::path::Path;

/// Holds the ordered rule set and its configuration.
pub struct Validator {
    rules: Vec<Box<dyn ValidationRule>>,
    config: ValidatorConfig,
}

impl Validator {
    /// Validator with every built-in rule and default configuration
    pub fn new() -> Self {
        Self::with_config(ValidatorConfig::default())
    }

    pub fn with_config(config: ValidatorConfig) -> Self {
        Self {
            rules: vec![
                // Structure
                Box::new(rules::EmptyProcessRule),
                Box::new(rules::DuplicateIdRule),
                // Events and connectivity
                Box::new(rules::StartEventRule),
                Box::new(rules::EndEventRule),
                Box::new(rules::BoundaryEventRule),
                Box::new(rules::OrphanNodeRule),
                // Flows
                Box::new(rules::DanglingFlowRule),
                Box::new(rules::SelfLoopRule),
                Box::new(rules::DefaultFlowRule),
                // Gateways
                Box::new(rules::GatewayConditionRule),
                Box::new(rules::ParallelConditionRule),
                Box::new(rules::GatewayDirectionRule),
                Box::new(rules::GatewayPairingRule),
                Box::new(rules::EventBasedGatewayRule),
                // Collaboration and data
                Box::new(rules::MessageFlowRule),
                Box::new(rules::DataAssociationRule),
                // Activities
                Box::new(rules::ScriptTaskRule),
                Box::new(rules::UserTaskAgentRule),
                Box::new(rules::AgentAssignmentRule),
                Box::new(rules::ReviewConfigRule),
            ],
            config,
        }
    }

    pub fn config(&self) -> &ValidatorConfig {
        &self.config
    }

    /// Validate a process. Connectivity is derived once and shared by
    /// every rule.
    pub fn validate(&self, process: &Process) -> ValidationResult {
        let graph = ProcessGraph::build(process);
        self.validate_graph(&graph)
    }

    /// Validate an already derived graph
    pub fn validate_graph(&self, graph: &ProcessGraph<'_>) -> ValidationResult {
        let issues = self.rules.iter().flat_map(|rule| {
            let found = rule.validate(graph, &self.config);
            tracing::debug!(rule = rule.id(), findings = found.len(), "Rule evaluated");
            found
        });
        let result = ValidationResult::from_issues(issues);

        tracing::info!(
            process_id = %graph.process().id,
            valid = result.valid,
            errors = result.error_count(),
            warnings = result.warning_count(),
            "Process validated"
        );
        result
    }

    /// Load and validate a document. Parse failures are returned as
    /// `Err` and no rule runs.
    pub fn validate_document(&self, path: impl AsRef<Path>) -> ProcessResult<ValidationResult> {
        let document = ProcessDocument::from_path(path)?;
        Ok(self.validate(&document.process))
    }

    /// `(id, description)` of every registered rule
    pub fn rules(&self) -> impl Iterator<Item = (&'static str, &'static str)> + '_ {
        self.rules.iter().map(|r| (r.id(), r.description()))
    }
}

impl Default for Validator {
    fn default() -> Self {
        Self::new()
    }
}

/// Validate with the built-in rules and default configuration
pub fn validate(process: &Process) -> ValidationResult {
    Validator::new().validate(process)
}

#[cfg(test)]
mod tests {
    use super::*;
    use bpmn_types::{ProcessBuilder, ProcessError};
    use std::collections::HashSet;

    #[test]
    fn test_rule_ids_unique() {
        let validator = Validator::new();
        let ids: Vec<_> = validator.rules().map(|(id, _)| id).collect();
        let unique: HashSet<_> = ids.iter().collect();
        assert_eq!(ids.len(), unique.len());
        assert_eq!(ids.len(), 20);
    }

    #[test]
    fn test_collects_findings_from_all_rules() {
        let process = ProcessBuilder::new("p", "Many problems")
            .user_task("t", "Task", None)
            .exclusive_gateway("g", "Choice")
            .connect("f1", "t", "g")
            .build()
            .unwrap();
        let result = validate(&process);

        assert!(!result.valid);
        assert!(result.has_rule("event.start"));
        assert!(result.has_rule("event.end"));
        assert!(result.has_rule("node.orphan"));
        assert!(result.has_rule("activity.agent"));
    }

    #[test]
    fn test_valid_process() {
        let process = ProcessBuilder::new("p", "Happy")
            .start_event("s", "Start")
            .service_task("t", "Work", None)
            .end_event("e", "End")
            .connect("f1", "s", "t")
            .connect("f2", "t", "e")
            .build()
            .unwrap();
        let result = validate(&process);
        assert!(result.valid, "unexpected findings: {:?}", result.errors);
        assert!(result.warnings.is_empty());
    }

    #[test]
    fn test_validate_document_parse_failure() {
        let path = std::env::temp_dir().join("bpmn-validator-missing-process.json");
        std::fs::write(&path, r#"{"definitions": []}"#).unwrap();
        let err = Validator::new().validate_document(&path).unwrap_err();
        assert!(matches!(err, ProcessError::MissingProcess));
        let _ = std::fs::remove_file(&path);
    }
}
