//! Activity Rules
//!
//! Script content, agent assignment and review configuration. None of
//! these affect flow; they catch documents that cannot be handed to a
//! runtime as-is.

use crate::{ValidationIssue, ValidationRule, ValidatorConfig};
use bpmn_graph::ProcessGraph;
use bpmn_types::{ActivityKind, AgentType};

/// Script tasks carry a script.
pub struct ScriptTaskRule;

impl ValidationRule for ScriptTaskRule {
    fn id(&self) -> &'static str {
        "activity.script"
    }

    fn description(&self) -> &'static str {
        "Script tasks must have a script definition"
    }

    fn validate(&self, graph: &ProcessGraph<'_>, _config: &ValidatorConfig) -> Vec<ValidationIssue> {
        graph
            .process()
            .activities()
            .iter()
            .filter(|a| a.kind == ActivityKind::ScriptTask)
            .filter(|a| a.script.as_ref().map_or(true, |s| s.body.trim().is_empty()))
            .map(|a| {
                ValidationIssue::error(
                    Some(a.id.as_str()),
                    format!("Script task '{}' must have a script definition", a.id),
                    self.id(),
                )
            })
            .collect()
    }
}

/// User tasks name who performs them.
pub struct UserTaskAgentRule;

impl ValidationRule for UserTaskAgentRule {
    fn id(&self) -> &'static str {
        "activity.agent"
    }

    fn description(&self) -> &'static str {
        "User tasks should have an agent assignment"
    }

    fn validate(&self, graph: &ProcessGraph<'_>, config: &ValidatorConfig) -> Vec<ValidationIssue> {
        if !config.warn_on_missing_agent {
            return Vec::new();
        }
        graph
            .process()
            .activities()
            .iter()
            .filter(|a| a.kind == ActivityKind::UserTask && a.agent.is_none())
            .map(|a| {
                ValidationIssue::warning(
                    Some(a.id.as_str()),
                    format!("User task '{}' should have an agent assignment", a.id),
                    self.id(),
                )
            })
            .collect()
    }
}

/// Deferred assignments need a way to pick an agent.
pub struct AgentAssignmentRule;

impl ValidationRule for AgentAssignmentRule {
    fn id(&self) -> &'static str {
        "agent.assignment"
    }

    fn description(&self) -> &'static str {
        "Deferred agent assignments need a strategy; assignment rules need a condition"
    }

    fn validate(&self, graph: &ProcessGraph<'_>, _config: &ValidatorConfig) -> Vec<ValidationIssue> {
        let mut issues = Vec::new();
        for activity in graph.process().activities() {
            let Some(agent) = &activity.agent else {
                continue;
            };
            let id = activity.id.as_str();

            let unresolvable = match agent.agent_type {
                AgentType::Unspecified => agent.strategy.is_none(),
                AgentType::Dynamic => agent.strategy.is_none() && agent.assignment_rules.is_empty(),
                _ => false,
            };
            if unresolvable {
                issues.push(ValidationIssue::error(
                    Some(id),
                    format!(
                        "{} agent on '{id}' must have an assignment strategy",
                        agent.agent_type.as_str()
                    ),
                    self.id(),
                ));
            }

            for (n, rule) in agent.assignment_rules.iter().enumerate() {
                if rule.condition.body.trim().is_empty() {
                    issues.push(ValidationIssue::error(
                        Some(id),
                        format!("Assignment rule {} on '{id}' has an empty condition", n + 1),
                        self.id(),
                    ));
                }
            }
        }
        issues
    }
}

/// Required reviews say who reviews and what kind of review it is.
pub struct ReviewConfigRule;

impl ValidationRule for ReviewConfigRule {
    fn id(&self) -> &'static str {
        "review.config"
    }

    fn description(&self) -> &'static str {
        "Required reviews need a reviewer, a type and a timeout action"
    }

    fn validate(&self, graph: &ProcessGraph<'_>, _config: &ValidatorConfig) -> Vec<ValidationIssue> {
        let mut issues = Vec::new();
        for activity in graph.process().activities() {
            let Some(review) = activity.review.as_ref().filter(|r| r.required) else {
                continue;
            };
            let id = activity.id.as_str();

            if review.reviewer.is_none() {
                issues.push(ValidationIssue::error(
                    Some(id),
                    format!("Review on '{id}' must specify a reviewer"),
                    self.id(),
                ));
            }
            if review.review_type.is_none() {
                issues.push(ValidationIssue::error(
                    Some(id),
                    format!("Review on '{id}' must specify a type"),
                    self.id(),
                ));
            }
            if review.timeout.is_some() && review.on_timeout.is_none() {
                issues.push(ValidationIssue::warning(
                    Some(id),
                    format!("Review on '{id}' has a timeout but no timeout action"),
                    self.id(),
                ));
            }
        }
        issues
    }
}
