//! Rules: Empty Process, Duplicate Id

use crate::{ValidationIssue, ValidationRule, ValidatorConfig};
use bpmn_graph::ProcessGraph;
use std::collections::HashMap;

/// A process needs at least one flow element.
pub struct EmptyProcessRule;

impl ValidationRule for EmptyProcessRule {
    fn id(&self) -> &'static str {
        "structure.empty"
    }

    fn description(&self) -> &'static str {
        "Process must contain at least one flow element"
    }

    fn validate(&self, graph: &ProcessGraph<'_>, _config: &ValidatorConfig) -> Vec<ValidationIssue> {
        if graph.is_empty() {
            vec![ValidationIssue::error(
                None,
                "Process must contain at least one flow element",
                self.id(),
            )]
        } else {
            Vec::new()
        }
    }
}

/// Ids are unique across nodes, flows and data objects.
pub struct DuplicateIdRule;

impl ValidationRule for DuplicateIdRule {
    fn id(&self) -> &'static str {
        "id.duplicate"
    }

    fn description(&self) -> &'static str {
        "Element ids must be unique within a process"
    }

    fn validate(&self, graph: &ProcessGraph<'_>, _config: &ValidatorConfig) -> Vec<ValidationIssue> {
        let process = graph.process();
        let nodes = process
            .flow_elements()
            .map(|e| (e.id(), e.kind().as_str()));
        let flows = process
            .sequence_flows()
            .iter()
            .map(|f| (f.id.as_str(), "sequenceFlow"));
        let data = process
            .declared_data_objects()
            .map(|d| (d.id.as_str(), "dataObject"));

        let mut seen: HashMap<&str, &str> = HashMap::new();
        let mut issues = Vec::new();
        for (id, kind) in nodes.chain(flows).chain(data) {
            if let Some(existing) = seen.get(id) {
                issues.push(ValidationIssue::error(
                    Some(id),
                    format!("Duplicate ID '{id}' ({kind}): also used by a {existing}"),
                    self.id(),
                ));
            } else {
                seen.insert(id, kind);
            }
        }
        issues
    }
}
