//! Agent assignments and review configuration
//!
//! Assignments describe *who* performs an activity. They are consulted by
//! workload analysis and by the agent/review validation rules; the flow
//! graph never looks at them.

use crate::Expression;
use serde::{Deserialize, Serialize};

/// The agent responsible for an activity
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AgentAssignment {
    #[serde(rename = "type")]
    pub agent_type: AgentType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub capabilities: Vec<String>,
    /// How a concrete agent is picked at runtime
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub strategy: Option<AssignmentStrategy>,
    #[serde(default)]
    pub priority: i32,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub assignment_rules: Vec<DynamicAssignmentRule>,
}

impl AgentAssignment {
    pub fn new(agent_type: AgentType) -> Self {
        Self {
            agent_type,
            id: None,
            name: None,
            role: None,
            capabilities: Vec::new(),
            strategy: None,
            priority: 0,
            assignment_rules: Vec::new(),
        }
    }

    /// A named human in some role
    pub fn human(name: impl Into<String>, role: impl Into<String>) -> Self {
        let mut agent = Self::new(AgentType::Human);
        agent.name = Some(name.into());
        agent.role = Some(role.into());
        agent
    }

    /// An AI agent with the capabilities it offers
    pub fn ai(name: impl Into<String>, capabilities: Vec<String>) -> Self {
        let mut agent = Self::new(AgentType::Ai);
        agent.name = Some(name.into());
        agent.capabilities = capabilities;
        agent
    }

    /// A system identified by id
    pub fn system(id: impl Into<String>) -> Self {
        Self::new(AgentType::System).with_id(id)
    }

    /// Resolved at runtime through `strategy`
    pub fn unspecified(strategy: AssignmentStrategy) -> Self {
        let mut agent = Self::new(AgentType::Unspecified);
        agent.strategy = Some(strategy);
        agent
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    pub fn with_rule(mut self, rule: DynamicAssignmentRule) -> Self {
        self.assignment_rules.push(rule);
        self
    }

    /// Key used to group work by agent: id, then name, then type
    pub fn workload_key(&self) -> &str {
        self.id
            .as_deref()
            .filter(|id| !id.is_empty())
            .or_else(|| self.name.as_deref().filter(|name| !name.is_empty()))
            .unwrap_or_else(|| self.agent_type.as_str())
    }

    /// Whether a concrete agent is only known at runtime
    pub fn is_deferred(&self) -> bool {
        matches!(self.agent_type, AgentType::Unspecified | AgentType::Dynamic)
    }
}

/// Category of agent
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AgentType {
    Human,
    Ai,
    System,
    Dynamic,
    Unspecified,
}

impl AgentType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Human => "human",
            Self::Ai => "ai",
            Self::System => "system",
            Self::Dynamic => "dynamic",
            Self::Unspecified => "unspecified",
        }
    }
}

/// Runtime selection strategy for deferred assignments
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum AssignmentStrategy {
    Random,
    RoundRobin,
    LeastLoaded,
    CapabilityBased,
    PriorityBased,
}

/// Route to `target_agent` when `condition` holds
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DynamicAssignmentRule {
    pub condition: Expression,
    pub target_agent: AgentAssignment,
}

/// Review requirement attached to an activity
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReviewConfig {
    #[serde(default)]
    pub required: bool,
    #[serde(default, rename = "type", skip_serializing_if = "Option::is_none")]
    pub review_type: Option<ReviewType>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reviewer: Option<AgentAssignment>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub criteria: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub required_score: Option<f64>,
    /// Duration string, e.g. `"24h"`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timeout: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub on_timeout: Option<TimeoutAction>,
}

impl ReviewConfig {
    /// A required review of the given type
    pub fn required(review_type: ReviewType, reviewer: AgentAssignment) -> Self {
        Self {
            required: true,
            review_type: Some(review_type),
            reviewer: Some(reviewer),
            criteria: Vec::new(),
            required_score: None,
            timeout: None,
            on_timeout: None,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ReviewType {
    Approval,
    Validation,
    QualityCheck,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimeoutAction {
    Approve,
    Reject,
    Escalate,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_agent_constructors() {
        let human = AgentAssignment::human("Alice", "approver");
        assert_eq!(human.agent_type, AgentType::Human);
        assert_eq!(human.role.as_deref(), Some("approver"));

        let system = AgentAssignment::system("billing");
        assert_eq!(system.id.as_deref(), Some("billing"));

        let deferred = AgentAssignment::unspecified(AssignmentStrategy::LeastLoaded);
        assert!(deferred.is_deferred());
        assert_eq!(deferred.strategy, Some(AssignmentStrategy::LeastLoaded));
    }

    #[test]
    fn test_workload_key_fallbacks() {
        assert_eq!(AgentAssignment::system("erp").workload_key(), "erp");
        assert_eq!(AgentAssignment::human("Bob", "clerk").workload_key(), "Bob");
        assert_eq!(AgentAssignment::new(AgentType::Ai).workload_key(), "ai");
    }

    #[test]
    fn test_agent_wire_format() {
        let agent: AgentAssignment = serde_json::from_str(
            r#"{"type":"unspecified","strategy":"round-robin","assignmentRules":[{"condition":{"language":"feel","body":"x > 1"},"targetAgent":{"type":"human"}}]}"#,
        )
        .unwrap();
        assert_eq!(agent.strategy, Some(AssignmentStrategy::RoundRobin));
        assert_eq!(agent.assignment_rules.len(), 1);
        assert_eq!(
            agent.assignment_rules[0].target_agent.agent_type,
            AgentType::Human
        );
    }

    #[test]
    fn test_review_wire_format() {
        let review: ReviewConfig = serde_json::from_str(
            r#"{"required":true,"type":"quality-check","reviewer":{"type":"ai"},"timeout":"2h","onTimeout":"escalate"}"#,
        )
        .unwrap();
        assert_eq!(review.review_type, Some(ReviewType::QualityCheck));
        assert_eq!(review.on_timeout, Some(TimeoutAction::Escalate));
    }
}
