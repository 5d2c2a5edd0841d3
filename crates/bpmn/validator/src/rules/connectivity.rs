//! Rule: Orphan Node
//!
//! Every node other than a start event needs an incoming flow and every
//! node other than an end event needs an outgoing flow. Start, end and
//! boundary events are covered by the event rules and skipped here so
//! the same defect is not reported twice.

use crate::{ValidationIssue, ValidationRule, ValidatorConfig};
use bpmn_graph::ProcessGraph;

pub struct OrphanNodeRule;

impl ValidationRule for OrphanNodeRule {
    fn id(&self) -> &'static str {
        "node.orphan"
    }

    fn description(&self) -> &'static str {
        "Nodes must be connected to the flow on both sides"
    }

    fn validate(&self, graph: &ProcessGraph<'_>, _config: &ValidatorConfig) -> Vec<ValidationIssue> {
        let mut issues = Vec::new();
        for index in graph.indices() {
            let element = graph.element(index);
            if element.is_start() || element.is_end() || element.is_boundary() {
                continue;
            }
            if !graph.is_canonical(index) {
                continue;
            }

            if graph.in_degree(index) == 0 {
                issues.push(ValidationIssue::error(
                    Some(element.id()),
                    format!("{element} has no incoming flow"),
                    self.id(),
                ));
            }
            if graph.out_degree(index) == 0 {
                issues.push(ValidationIssue::error(
                    Some(element.id()),
                    format!("{element} has no outgoing flow"),
                    self.id(),
                ));
            }
        }
        issues
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bpmn_types::{GatewayDirection, ProcessBuilder};

    #[test]
    fn test_task_without_incoming() {
        let process = ProcessBuilder::new("p", "Orphan")
            .start_event("s", "Start")
            .service_task("task", "Lonely", None)
            .end_event("e", "End")
            .connect("f1", "s", "e")
            .connect("f2", "task", "e")
            .build()
            .unwrap();
        let graph = ProcessGraph::build(&process);
        let issues = OrphanNodeRule.validate(&graph, &ValidatorConfig::default());
        assert_eq!(issues.len(), 1);
        assert_eq!(issues[0].element_id.as_deref(), Some("task"));
        assert_eq!(issues[0].message, "serviceTask 'task' has no incoming flow");
    }

    #[test]
    fn test_isolated_gateway_reports_both_sides() {
        let process = ProcessBuilder::new("p", "Island")
            .start_event("s", "Start")
            .end_event("e", "End")
            .parallel_gateway("g", "Nowhere", GatewayDirection::Diverging)
            .connect("f1", "s", "e")
            .build()
            .unwrap();
        let graph = ProcessGraph::build(&process);
        let issues = OrphanNodeRule.validate(&graph, &ValidatorConfig::default());
        assert_eq!(issues.len(), 2);
        assert!(issues.iter().all(|i| i.element_id.as_deref() == Some("g")));
    }
}
