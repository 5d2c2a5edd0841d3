//! Agent workload aggregation
//!
//! Groups activities by assigned agent. This is bookkeeping over the
//! activity list; it never looks at flows and never affects soundness.

use crate::AnalyzerConfig;
use bpmn_types::Process;
use serde::Serialize;
use std::collections::BTreeMap;

#[derive(Clone, Debug, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AgentWorkload {
    /// Tasks per agent key (agent id, else name, else type)
    pub task_counts: BTreeMap<String, usize>,
    /// Activity ids per agent key, in document order
    pub agent_tasks: BTreeMap<String, Vec<String>>,
    /// Tasks per agent type
    pub by_type: BTreeMap<String, usize>,
    pub unassigned_tasks: Vec<String>,
    /// `1 - variance / mean²` over task counts; only with two or more
    /// agents
    #[serde(skip_serializing_if = "Option::is_none")]
    pub workload_balance: Option<f64>,
    pub overloaded_agents: Vec<String>,
}

pub(crate) fn analyze_workload(process: &Process, config: &AnalyzerConfig) -> AgentWorkload {
    let mut workload = AgentWorkload::default();

    for activity in process.activities() {
        let Some(agent) = &activity.agent else {
            workload.unassigned_tasks.push(activity.id.clone());
            continue;
        };
        let key = agent.workload_key().to_string();
        *workload.task_counts.entry(key.clone()).or_default() += 1;
        workload
            .agent_tasks
            .entry(key)
            .or_default()
            .push(activity.id.clone());
        *workload
            .by_type
            .entry(agent.agent_type.as_str().to_string())
            .or_default() += 1;
    }

    let agents = workload.task_counts.len();
    if agents >= 2 {
        let counts: Vec<f64> = workload.task_counts.values().map(|&c| c as f64).collect();
        let mean = counts.iter().sum::<f64>() / agents as f64;
        let variance = counts.iter().map(|c| (c - mean).powi(2)).sum::<f64>() / agents as f64;

        workload.workload_balance = Some(1.0 - variance / (mean * mean));
        workload.overloaded_agents = workload
            .task_counts
            .iter()
            .filter(|(_, &count)| count as f64 > mean * config.overload_factor)
            .map(|(agent, _)| agent.clone())
            .collect();
    }

    tracing::debug!(
        agents,
        unassigned = workload.unassigned_tasks.len(),
        overloaded = workload.overloaded_agents.len(),
        "Agent workload aggregated"
    );
    workload
}
