//! Runs every analysis phase over one process

use crate::cycles::find_loops;
use crate::deadlock::detect_deadlocks;
use crate::metrics::calculate_metrics;
use crate::paths::analyze_paths;
use crate::reachability::analyze_reachability;
use crate::workload::analyze_workload;
use crate::{AnalysisFinding, AnalysisResult, AnalyzerConfig, FindingKind};
use bpmn_graph::ProcessGraph;
use bpmn_types::Process;

/// Stateless analysis entry point
#[derive(Clone, Debug, Default)]
pub struct Analyzer {
    config: AnalyzerConfig,
}

impl Analyzer {
    pub fn new(config: AnalyzerConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &AnalyzerConfig {
        &self.config
    }

    pub fn analyze(&self, process: &Process) -> AnalysisResult {
        let graph = ProcessGraph::build(process);
        self.analyze_graph(&graph)
    }

    /// Analyze an already derived graph. Never fails: missing start or
    /// end events show up as findings and empty sets.
    pub fn analyze_graph(&self, graph: &ProcessGraph<'_>) -> AnalysisResult {
        let process = graph.process();

        let reachability = analyze_reachability(graph);
        let loops = find_loops(graph);
        let deadlocks = detect_deadlocks(graph, &loops);
        let walk = analyze_paths(graph, &self.config);
        let metrics = calculate_metrics(graph, &walk);
        let agent_workload = analyze_workload(process, &self.config);

        let mut findings = Vec::new();
        if graph.start_events().is_empty() {
            findings.push(AnalysisFinding::new(
                FindingKind::NoStartEvent,
                "Process has no start event; nothing is reachable",
            ));
        }
        if graph.end_events().is_empty() {
            findings.push(AnalysisFinding::new(
                FindingKind::NoEndEvent,
                "Process has no end event; no node can complete",
            ));
        }
        for id in &reachability.unreachable {
            findings.push(AnalysisFinding::for_element(
                FindingKind::Unreachable,
                id,
                format!("'{id}' cannot be reached from any start event"),
            ));
        }
        for id in &reachability.dead_ends {
            findings.push(AnalysisFinding::for_element(
                FindingKind::DeadEnd,
                id,
                format!("No end event can be reached from '{id}'"),
            ));
        }
        if walk.analysis.capped {
            findings.push(AnalysisFinding::new(
                FindingKind::PathLimitReached,
                format!(
                    "Path enumeration stopped at {} paths (limits: {} paths, depth {})",
                    walk.analysis.path_count, self.config.max_paths, self.config.max_path_depth
                ),
            ));
        }

        let result = AnalysisResult {
            process_id: process.id.clone(),
            reachability,
            loops,
            deadlocks,
            paths: walk.analysis,
            metrics,
            agent_workload,
            findings,
        };

        tracing::info!(
            process_id = %result.process_id,
            unreachable = result.reachability.unreachable.len(),
            deadlocks = result.deadlocks.len(),
            paths = result.paths.path_count,
            complexity = result.metrics.complexity,
            "Process analyzed"
        );
        result
    }
}

/// Analyze with default configuration
pub fn analyze(process: &Process) -> AnalysisResult {
    Analyzer::default().analyze(process)
}
