//! Structural complexity metrics

use crate::paths::PathWalk;
use bpmn_graph::ProcessGraph;
use bpmn_types::GatewayKind;
use serde::Serialize;

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct ElementCount {
    pub total: usize,
    pub events: usize,
    pub activities: usize,
    pub gateways: usize,
    pub flows: usize,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProcessMetrics {
    pub elements: ElementCount,
    /// Cyclomatic complexity `E - N + 2`; 0 for an empty process
    pub complexity: i64,
    /// Flows on the critical path
    pub depth: usize,
    /// Largest fan-out of a diverging gateway on an enumerated path
    pub width: usize,
    /// Resolved flows per node
    pub connectivity: f64,
    pub parallel_gateways: usize,
    /// Diverging gateways that choose rather than fork
    pub decision_points: usize,
}

pub(crate) fn calculate_metrics(graph: &ProcessGraph<'_>, paths: &PathWalk) -> ProcessMetrics {
    let elements = &graph.process().elements;
    let counts = ElementCount {
        total: graph.node_count(),
        events: elements.events.len(),
        activities: elements.activities.len(),
        gateways: elements.gateways.len(),
        flows: elements.sequence_flows.len(),
    };

    let nodes = graph.node_count();
    let edges = graph.resolved_edge_count();
    let (complexity, connectivity) = if nodes == 0 {
        (0, 0.0)
    } else {
        (
            edges as i64 - nodes as i64 + 2,
            edges as f64 / nodes as f64,
        )
    };

    let gateways = graph.gateways();
    let parallel_gateways = gateways
        .iter()
        .filter(|&&g| graph.element(g).gateway_kind() == Some(GatewayKind::Parallel))
        .count();
    let decision_points = gateways
        .iter()
        .filter(|&&g| graph.is_diverging(g))
        .filter(|&&g| graph.element(g).gateway_kind() != Some(GatewayKind::Parallel))
        .count();

    ProcessMetrics {
        elements: counts,
        complexity,
        depth: paths.analysis.critical_path_length,
        width: paths.max_fan_out,
        connectivity,
        parallel_gateways,
        decision_points,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::paths::analyze_paths;
    use crate::AnalyzerConfig;
    use bpmn_types::{GatewayDirection, Process, ProcessBuilder};

    fn metrics(process: &Process) -> ProcessMetrics {
        let graph = ProcessGraph::build(process);
        let paths = analyze_paths(&graph, &AnalyzerConfig::default());
        calculate_metrics(&graph, &paths)
    }

    #[test]
    fn test_linear_metrics() {
        let process = ProcessBuilder::new("p", "Linear")
            .start_event("s", "Start")
            .service_task("t", "Task", None)
            .end_event("e", "End")
            .connect("f1", "s", "t")
            .connect("f2", "t", "e")
            .build()
            .unwrap();
        let m = metrics(&process);
        assert_eq!(m.elements.total, 3);
        assert_eq!(m.elements.flows, 2);
        assert_eq!(m.complexity, 1);
        assert_eq!(m.depth, 2);
        assert_eq!(m.width, 1);
        assert!((m.connectivity - 2.0 / 3.0).abs() < 1e-9);
    }

    #[test]
    fn test_fork_join_metrics() {
        let process = ProcessBuilder::new("p", "Fork")
            .start_event("s", "Start")
            .parallel_gateway("fork", "Fork", GatewayDirection::Diverging)
            .service_task("a", "A", None)
            .service_task("b", "B", None)
            .service_task("c", "C", None)
            .parallel_gateway("join", "Join", GatewayDirection::Converging)
            .exclusive_gateway("x", "Again?")
            .end_event("e", "End")
            .connect("f1", "s", "fork")
            .connect("f2", "fork", "a")
            .connect("f3", "fork", "b")
            .connect("f4", "fork", "c")
            .connect("f5", "a", "join")
            .connect("f6", "b", "join")
            .connect("f7", "c", "join")
            .connect("f8", "join", "x")
            .connect_when("f9", "x", "e", "feel", "done")
            .connect_when("f10", "x", "s", "feel", "again")
            .build()
            .unwrap();
        let m = metrics(&process);
        assert_eq!(m.elements.gateways, 3);
        // 10 flows, 8 nodes
        assert_eq!(m.complexity, 4);
        assert_eq!(m.width, 3);
        assert_eq!(m.parallel_gateways, 2);
        assert_eq!(m.decision_points, 1);
        assert_eq!(m.depth, 5);
    }

    #[test]
    fn test_empty_process() {
        let process = Process::new("p", "Empty");
        let m = metrics(&process);
        assert_eq!(m.complexity, 0);
        assert_eq!(m.connectivity, 0.0);
        assert_eq!(m.depth, 0);
        assert_eq!(m.width, 0);
    }

    #[test]
    fn test_dangling_flows_do_not_count() {
        let mut process = ProcessBuilder::new("p", "Dangling")
            .start_event("s", "Start")
            .end_event("e", "End")
            .connect("f1", "s", "e")
            .build()
            .unwrap();
        process
            .elements
            .sequence_flows
            .push(bpmn_types::SequenceFlow::new("f2", "s", "ghost"));
        let m = metrics(&process);
        assert_eq!(m.elements.flows, 2);
        assert_eq!(m.complexity, 1);
    }
}
