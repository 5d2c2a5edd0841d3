//! The rule trait

use crate::{ValidationIssue, ValidatorConfig};
use bpmn_graph::ProcessGraph;

/// A single structural or semantic check.
///
/// Rules are independent of each other: none reads another rule's
/// findings, so the order they run in only affects report order.
pub trait ValidationRule: Send + Sync {
    /// Stable identifier, e.g. `"node.orphan"`
    fn id(&self) -> &'static str;

    /// What the rule checks
    fn description(&self) -> &'static str;

    /// Inspect the graph and return every finding. Empty means clean.
    fn validate(&self, graph: &ProcessGraph<'_>, config: &ValidatorConfig)
        -> Vec<ValidationIssue>;
}
