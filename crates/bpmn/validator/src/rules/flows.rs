//! Rules: Dangling Flow, Self Loop, Default Flow

use crate::{ValidationIssue, ValidationRule, ValidatorConfig};
use bpmn_graph::ProcessGraph;
use bpmn_types::GatewayKind;

/// Flow endpoints must name existing nodes.
pub struct DanglingFlowRule;

impl ValidationRule for DanglingFlowRule {
    fn id(&self) -> &'static str {
        "flow.dangling"
    }

    fn description(&self) -> &'static str {
        "Sequence flow source and target must reference existing nodes"
    }

    fn validate(&self, graph: &ProcessGraph<'_>, _config: &ValidatorConfig) -> Vec<ValidationIssue> {
        let mut issues = Vec::new();
        for edge in graph.dangling_edges() {
            if edge.source.is_none() {
                issues.push(ValidationIssue::error(
                    Some(edge.id()),
                    format!(
                        "Sequence flow source '{}' does not exist",
                        edge.flow.source_ref
                    ),
                    self.id(),
                ));
            }
            if edge.target.is_none() {
                issues.push(ValidationIssue::error(
                    Some(edge.id()),
                    format!(
                        "Sequence flow target '{}' does not exist",
                        edge.flow.target_ref
                    ),
                    self.id(),
                ));
            }
        }
        issues
    }
}

/// A flow leading straight back into its source is suspicious.
pub struct SelfLoopRule;

impl ValidationRule for SelfLoopRule {
    fn id(&self) -> &'static str {
        "flow.selfloop"
    }

    fn description(&self) -> &'static str {
        "Sequence flows should not connect a node to itself"
    }

    fn validate(&self, graph: &ProcessGraph<'_>, _config: &ValidatorConfig) -> Vec<ValidationIssue> {
        graph
            .edges()
            .iter()
            .filter(|e| e.flow.source_ref == e.flow.target_ref)
            .map(|e| {
                ValidationIssue::warning(
                    Some(e.id()),
                    format!("Sequence flow '{}' creates a self-loop", e.id()),
                    self.id(),
                )
            })
            .collect()
    }
}

/// A gateway's `defaultFlow` must leave that gateway, and `isDefault`
/// only means something where there is a choice to make.
pub struct DefaultFlowRule;

impl ValidationRule for DefaultFlowRule {
    fn id(&self) -> &'static str {
        "flow.default"
    }

    fn description(&self) -> &'static str {
        "Default flows must be outgoing flows of a branching element"
    }

    fn validate(&self, graph: &ProcessGraph<'_>, _config: &ValidatorConfig) -> Vec<ValidationIssue> {
        let mut issues = Vec::new();

        for index in graph.gateways() {
            let Some(gateway) = graph.element(index).as_gateway() else {
                continue;
            };
            let Some(default) = gateway.default_flow.as_deref() else {
                continue;
            };
            if !graph.node(index).outgoing.contains(&default) {
                issues.push(ValidationIssue::error(
                    Some(gateway.id.as_str()),
                    format!(
                        "Default flow '{default}' is not an outgoing flow of gateway '{}'",
                        gateway.id
                    ),
                    self.id(),
                ));
            }
        }

        for edge in graph.edges().iter().filter(|e| e.flow.is_default) {
            let Some(source) = edge.source else {
                continue;
            };
            let element = graph.element(source);
            let no_choice = matches!(
                element.gateway_kind(),
                Some(GatewayKind::Parallel | GatewayKind::EventBased)
            ) || graph.out_degree(source) < 2;
            if no_choice {
                issues.push(ValidationIssue::warning(
                    Some(edge.id()),
                    format!(
                        "Default flow '{}' leaves {element}, which does not branch",
                        edge.id()
                    ),
                    self.id(),
                ));
            }
        }
        issues
    }
}
