//! Forward and backward reachability

use bpmn_graph::{Direction, ProcessGraph};
use serde::Serialize;

/// Which nodes a token can reach, and which can still complete
///
/// All lists are in document order and name every node once.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReachabilityAnalysis {
    /// Reachable from some start event
    pub reachable: Vec<String>,
    /// Not reachable from any start event
    pub unreachable: Vec<String>,
    /// No end event is reachable from these
    pub dead_ends: Vec<String>,
}

impl ReachabilityAnalysis {
    pub fn is_reachable(&self, id: &str) -> bool {
        self.reachable.iter().any(|r| r == id)
    }

    pub fn is_dead_end(&self, id: &str) -> bool {
        self.dead_ends.iter().any(|d| d == id)
    }
}

pub(crate) fn analyze_reachability(graph: &ProcessGraph<'_>) -> ReachabilityAnalysis {
    let forward = graph.reachable_from(graph.start_events(), Direction::Forward);
    let backward = graph.reachable_from(graph.end_events(), Direction::Backward);

    let mut result = ReachabilityAnalysis::default();
    for index in graph.indices().filter(|&i| graph.is_canonical(i)) {
        let id = graph.id(index).to_string();
        if !backward.contains(&index) {
            result.dead_ends.push(id.clone());
        }
        if forward.contains(&index) {
            result.reachable.push(id);
        } else {
            result.unreachable.push(id);
        }
    }

    tracing::debug!(
        reachable = result.reachable.len(),
        unreachable = result.unreachable.len(),
        dead_ends = result.dead_ends.len(),
        "Reachability computed"
    );
    result
}
