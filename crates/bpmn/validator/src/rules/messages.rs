//! Rule: Message Flow
//!
//! Message flows model communication between pools. Both ends must
//! exist, and they must sit in different participants. Nodes listed in no
//! participant's `elementRefs` belong to the implicit single pool of the
//! process.

use crate::{ValidationIssue, ValidationRule, ValidatorConfig};
use bpmn_graph::ProcessGraph;
use bpmn_types::Process;

pub struct MessageFlowRule;

/// Where a message flow endpoint lives
#[derive(Debug, PartialEq, Eq)]
enum Endpoint<'a> {
    Missing,
    /// A node; `None` when no participant lists it
    Node(Option<&'a str>),
    /// A pool itself
    Participant(&'a str),
}

impl<'a> Endpoint<'a> {
    fn resolve(process: &'a Process, graph: &ProcessGraph<'_>, id: &str) -> Self {
        let participants = &process.elements.participants;
        if let Some(p) = participants.iter().find(|p| p.id == id) {
            return Self::Participant(&p.id);
        }
        if graph.index_of(id).is_none() {
            return Self::Missing;
        }
        let owner = participants
            .iter()
            .find(|p| p.element_refs.iter().any(|r| r == id))
            .map(|p| p.id.as_str());
        Self::Node(owner)
    }

    fn pool(&self) -> Option<&'a str> {
        match self {
            Self::Missing => None,
            Self::Node(owner) => *owner,
            Self::Participant(id) => Some(*id),
        }
    }
}

impl ValidationRule for MessageFlowRule {
    fn id(&self) -> &'static str {
        "message.flow"
    }

    fn description(&self) -> &'static str {
        "Message flows must connect existing elements in different participants"
    }

    fn validate(&self, graph: &ProcessGraph<'_>, _config: &ValidatorConfig) -> Vec<ValidationIssue> {
        let process = graph.process();
        let mut issues = Vec::new();

        for flow in &process.elements.message_flows {
            let source = Endpoint::resolve(process, graph, &flow.source_ref);
            let target = Endpoint::resolve(process, graph, &flow.target_ref);

            if source == Endpoint::Missing {
                issues.push(ValidationIssue::error(
                    Some(flow.id.as_str()),
                    format!("Message flow source '{}' does not exist", flow.source_ref),
                    self.id(),
                ));
            }
            if target == Endpoint::Missing {
                issues.push(ValidationIssue::error(
                    Some(flow.id.as_str()),
                    format!("Message flow target '{}' does not exist", flow.target_ref),
                    self.id(),
                ));
            }
            if source == Endpoint::Missing || target == Endpoint::Missing {
                continue;
            }

            if source.pool() == target.pool() {
                let pool = source.pool().unwrap_or("the process pool");
                issues.push(ValidationIssue::error(
                    Some(flow.id.as_str()),
                    format!(
                        "Message flow '{}' stays within {pool}; message flows must cross participants",
                        flow.id
                    ),
                    self.id(),
                ));
            }
        }
        issues
    }
}
