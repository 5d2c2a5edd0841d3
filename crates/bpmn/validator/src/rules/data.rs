//! Rule: Data Association
//!
//! Data associations on activities must point at declared data objects,
//! and artifact associations must connect known elements.

use crate::{ValidationIssue, ValidationRule, ValidatorConfig};
use bpmn_graph::ProcessGraph;
use std::collections::HashSet;

pub struct DataAssociationRule;

impl ValidationRule for DataAssociationRule {
    fn id(&self) -> &'static str {
        "data.association"
    }

    fn description(&self) -> &'static str {
        "Associations must reference declared elements"
    }

    fn validate(&self, graph: &ProcessGraph<'_>, _config: &ValidatorConfig) -> Vec<ValidationIssue> {
        let process = graph.process();
        let declared: HashSet<&str> = process
            .declared_data_objects()
            .map(|d| d.id.as_str())
            .collect();
        let mut issues = Vec::new();

        for activity in process.activities() {
            for association in activity.data_associations() {
                let target = association.data_object_ref.as_str();
                if !declared.contains(target) {
                    issues.push(ValidationIssue::error(
                        Some(activity.id.as_str()),
                        format!(
                            "Activity '{}' references undeclared data object '{target}'",
                            activity.id
                        ),
                        self.id(),
                    ));
                }
            }
        }

        let elements = &process.elements;
        let known: HashSet<&str> = process
            .flow_elements()
            .map(|e| e.id())
            .chain(elements.sequence_flows.iter().map(|f| f.id.as_str()))
            .chain(elements.artifacts.iter().map(|a| a.id.as_str()))
            .chain(elements.participants.iter().map(|p| p.id.as_str()))
            .chain(declared.iter().copied())
            .collect();

        for association in &elements.associations {
            for end in [&association.source_ref, &association.target_ref] {
                if !known.contains(end.as_str()) {
                    issues.push(ValidationIssue::error(
                        Some(association.id.as_str()),
                        format!(
                            "Association '{}' references unknown element '{end}'",
                            association.id
                        ),
                        self.id(),
                    ));
                }
            }
        }
        issues
    }
}
