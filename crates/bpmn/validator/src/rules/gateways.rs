//! Gateway Rules
//!
//! Conditions on split branches, declared direction against actual
//! connectivity, split/join pairing and event-based gateway targets.

use crate::{ValidationIssue, ValidationRule, ValidatorConfig};
use bpmn_graph::{NodeIndex, ProcessGraph};
use bpmn_types::{ActivityKind, EventKind, FlowElement, Gateway, GatewayDirection, GatewayKind};
use std::collections::VecDeque;

/// Canonical gateways together with their index
fn gateways<'a>(graph: &ProcessGraph<'a>) -> Vec<(NodeIndex, &'a Gateway)> {
    graph
        .gateways()
        .into_iter()
        .filter(|&i| graph.is_canonical(i))
        .filter_map(|i| graph.element(i).as_gateway().map(|g| (i, g)))
        .collect()
}

/// Exclusive and inclusive splits need conditions on every branch unless
/// a default flow catches the rest.
pub struct GatewayConditionRule;

impl ValidationRule for GatewayConditionRule {
    fn id(&self) -> &'static str {
        "gateway.conditions"
    }

    fn description(&self) -> &'static str {
        "Exclusive and inclusive splits need conditions or a default flow"
    }

    fn validate(&self, graph: &ProcessGraph<'_>, _config: &ValidatorConfig) -> Vec<ValidationIssue> {
        let mut issues = Vec::new();
        for (index, gateway) in gateways(graph) {
            if !matches!(gateway.kind, GatewayKind::Exclusive | GatewayKind::Inclusive) {
                continue;
            }
            if !graph.is_diverging(index) || graph.out_degree(index) < 2 {
                continue;
            }
            let has_default = gateway.default_flow.is_some()
                || graph.outgoing_edges(index).any(|e| e.flow.is_default);
            if has_default {
                continue;
            }

            let unconditioned: Vec<&str> = graph
                .outgoing_edges(index)
                .filter(|e| !e.flow.is_conditional())
                .map(|e| e.id())
                .collect();
            if !unconditioned.is_empty() {
                issues.push(ValidationIssue::warning(
                    Some(gateway.id.as_str()),
                    format!(
                        "{} has no default flow and outgoing flows without a condition: {}",
                        FlowElement::Gateway(gateway),
                        unconditioned.join(", ")
                    ),
                    self.id(),
                ));
            }
        }
        issues
    }
}

/// Parallel splits activate every branch; a condition is meaningless.
pub struct ParallelConditionRule;

impl ValidationRule for ParallelConditionRule {
    fn id(&self) -> &'static str {
        "gateway.parallel.conditions"
    }

    fn description(&self) -> &'static str {
        "Parallel splits must not carry conditions on outgoing flows"
    }

    fn validate(&self, graph: &ProcessGraph<'_>, _config: &ValidatorConfig) -> Vec<ValidationIssue> {
        let mut issues = Vec::new();
        for (index, gateway) in gateways(graph) {
            if gateway.kind != GatewayKind::Parallel || !graph.is_diverging(index) {
                continue;
            }
            for edge in graph.outgoing_edges(index).filter(|e| e.flow.is_conditional()) {
                issues.push(ValidationIssue::error(
                    Some(gateway.id.as_str()),
                    format!(
                        "Parallel gateway '{}' must not have a condition on outgoing flow '{}'",
                        gateway.id,
                        edge.id()
                    ),
                    self.id(),
                ));
            }
        }
        issues
    }
}

/// A declared `gatewayDirection` should agree with the flows attached.
pub struct GatewayDirectionRule;

impl ValidationRule for GatewayDirectionRule {
    fn id(&self) -> &'static str {
        "gateway.direction"
    }

    fn description(&self) -> &'static str {
        "Declared gateway direction should match its connectivity"
    }

    fn validate(&self, graph: &ProcessGraph<'_>, _config: &ValidatorConfig) -> Vec<ValidationIssue> {
        let mut issues = Vec::new();
        for (index, gateway) in gateways(graph) {
            let incoming = graph.in_degree(index);
            let outgoing = graph.out_degree(index);
            let contradiction = match gateway.gateway_direction {
                Some(GatewayDirection::Diverging) if incoming > 1 || outgoing < 2 => {
                    Some("diverging")
                }
                Some(GatewayDirection::Converging) if outgoing > 1 || incoming < 2 => {
                    Some("converging")
                }
                _ => None,
            };
            if let Some(direction) = contradiction {
                issues.push(ValidationIssue::warning(
                    Some(gateway.id.as_str()),
                    format!(
                        "Gateway '{}' is declared {direction} but has {incoming} incoming and {outgoing} outgoing flows",
                        gateway.id
                    ),
                    self.id(),
                ));
            }
        }
        issues
    }
}

/// Concurrent splits should be synchronized downstream by a join of a
/// compatible kind.
pub struct GatewayPairingRule;

impl GatewayPairingRule {
    /// Converging gateways first met on any branch leaving `split`
    fn nearest_joins(graph: &ProcessGraph<'_>, split: NodeIndex) -> Vec<NodeIndex> {
        let mut visited = vec![false; graph.node_count()];
        visited[split.index()] = true;
        let mut queue: VecDeque<NodeIndex> = graph.successors(split).into();
        let mut joins = Vec::new();

        while let Some(current) = queue.pop_front() {
            if visited[current.index()] {
                continue;
            }
            visited[current.index()] = true;

            if graph.element(current).as_gateway().is_some() && graph.is_converging(current) {
                joins.push(current);
                continue;
            }
            queue.extend(graph.successors(current));
        }
        joins
    }
}

impl ValidationRule for GatewayPairingRule {
    fn id(&self) -> &'static str {
        "gateway.pairing"
    }

    fn description(&self) -> &'static str {
        "Splits should be closed by a converging gateway of a compatible kind"
    }

    fn validate(&self, graph: &ProcessGraph<'_>, _config: &ValidatorConfig) -> Vec<ValidationIssue> {
        let mut issues = Vec::new();
        for (index, gateway) in gateways(graph) {
            if !graph.is_diverging(index) || graph.out_degree(index) < 2 {
                continue;
            }
            let joins = Self::nearest_joins(graph, index);

            if joins.is_empty() {
                if gateway.kind.is_concurrent() {
                    issues.push(ValidationIssue::warning(
                        Some(gateway.id.as_str()),
                        format!(
                            "{} has no converging gateway downstream",
                            FlowElement::Gateway(gateway)
                        ),
                        self.id(),
                    ));
                }
                continue;
            }

            let compatible = joins.iter().any(|&j| {
                graph
                    .element(j)
                    .gateway_kind()
                    .is_some_and(|kind| gateway.kind.is_compatible_join(kind))
            });
            if !compatible {
                let found: Vec<String> = joins
                    .iter()
                    .map(|&j| graph.element(j).to_string())
                    .collect();
                issues.push(ValidationIssue::warning(
                    Some(gateway.id.as_str()),
                    format!(
                        "{} is joined by incompatible {}",
                        FlowElement::Gateway(gateway),
                        found.join(", ")
                    ),
                    self.id(),
                ));
            }
        }
        issues
    }
}

/// An event-based gateway waits for one of several events; its branches
/// must start with something that can be waited on.
pub struct EventBasedGatewayRule;

impl EventBasedGatewayRule {
    fn can_wait_on(element: FlowElement<'_>) -> bool {
        match element {
            FlowElement::Event(e) => matches!(
                e.kind,
                EventKind::IntermediateCatchEvent | EventKind::IntermediateEvent
            ),
            FlowElement::Activity(a) => a.kind == ActivityKind::ReceiveTask,
            FlowElement::Gateway(_) => false,
        }
    }
}

impl ValidationRule for EventBasedGatewayRule {
    fn id(&self) -> &'static str {
        "gateway.event-based"
    }

    fn description(&self) -> &'static str {
        "Event-based gateways must lead to catch events or receive tasks"
    }

    fn validate(&self, graph: &ProcessGraph<'_>, _config: &ValidatorConfig) -> Vec<ValidationIssue> {
        let mut issues = Vec::new();
        for (index, gateway) in gateways(graph) {
            if gateway.kind != GatewayKind::EventBased {
                continue;
            }
            for target in graph.successors(index) {
                let element = graph.element(target);
                if !Self::can_wait_on(element) {
                    issues.push(ValidationIssue::error(
                        Some(gateway.id.as_str()),
                        format!(
                            "Event-based gateway '{}' leads to {element}; expected a catch event or receive task",
                            gateway.id
                        ),
                        self.id(),
                    ));
                }
            }
        }
        issues
    }
}
