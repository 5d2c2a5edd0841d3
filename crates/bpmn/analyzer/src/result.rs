//! Analysis result and its flat summary

use crate::{AgentWorkload, Deadlock, Loop, PathAnalysis, ProcessMetrics, ReachabilityAnalysis};
use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt;

/// Kind of informational finding
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum FindingKind {
    NoStartEvent,
    NoEndEvent,
    Unreachable,
    DeadEnd,
    PathLimitReached,
}

impl FindingKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::NoStartEvent => "no-start-event",
            Self::NoEndEvent => "no-end-event",
            Self::Unreachable => "unreachable",
            Self::DeadEnd => "dead-end",
            Self::PathLimitReached => "path-limit-reached",
        }
    }
}

/// Something about the graph's shape worth surfacing. Findings never
/// make a process invalid.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisFinding {
    pub kind: FindingKind,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub element_id: Option<String>,
}

impl AnalysisFinding {
    pub fn new(kind: FindingKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            element_id: None,
        }
    }

    pub fn for_element(kind: FindingKind, element_id: &str, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            element_id: Some(element_id.to_string()),
        }
    }
}

impl fmt::Display for AnalysisFinding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.kind.as_str(), self.message)
    }
}

/// Everything one analysis pass computed
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisResult {
    pub process_id: String,
    pub reachability: ReachabilityAnalysis,
    pub loops: Vec<Loop>,
    pub deadlocks: Vec<Deadlock>,
    pub paths: PathAnalysis,
    pub metrics: ProcessMetrics,
    pub agent_workload: AgentWorkload,
    pub findings: Vec<AnalysisFinding>,
}

impl AnalysisResult {
    /// Flatten into the summary shape consumers print
    pub fn summary(&self) -> AnalysisSummary {
        AnalysisSummary {
            reachable: self.reachability.reachable.clone(),
            unreachable: self.reachability.unreachable.clone(),
            dead_ends: self.reachability.dead_ends.clone(),
            deadlocks: self.deadlocks.clone(),
            path_count: self.paths.path_count,
            critical_path_length: self.paths.critical_path_length,
            complexity: self.metrics.complexity,
            depth: self.metrics.depth,
            width: self.metrics.width,
            connectivity: self.metrics.connectivity,
            agent_workload: self.agent_workload.task_counts.clone(),
        }
    }

    pub fn has_deadlocks(&self) -> bool {
        !self.deadlocks.is_empty()
    }

    pub fn findings_of(&self, kind: FindingKind) -> impl Iterator<Item = &AnalysisFinding> {
        self.findings.iter().filter(move |f| f.kind == kind)
    }
}

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisSummary {
    pub reachable: Vec<String>,
    pub unreachable: Vec<String>,
    pub dead_ends: Vec<String>,
    pub deadlocks: Vec<Deadlock>,
    pub path_count: usize,
    pub critical_path_length: usize,
    pub complexity: i64,
    pub depth: usize,
    pub width: usize,
    pub connectivity: f64,
    /// Task count per agent key
    pub agent_workload: BTreeMap<String, usize>,
}
