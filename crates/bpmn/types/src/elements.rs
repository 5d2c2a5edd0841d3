//! Flow elements, connectors and auxiliary entities
//!
//! Every node type carries an `id` that must be unique within its
//! process, a display `name` and a `type` tag. Sequence flows reference
//! nodes by id; resolving those references is the job of the graph
//! builder, not of deserialization.

use crate::{AgentAssignment, ReviewConfig};
use serde::{Deserialize, Serialize};

// ── Events ───────────────────────────────────────────────────────────

/// A BPMN event
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Event {
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(rename = "type")]
    pub kind: EventKind,
    /// Trigger or result of the event (message, timer, ...)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub event_type: Option<EventDefinition>,
    /// Activity a boundary event is attached to
    #[serde(
        default,
        rename = "attachedToRef",
        skip_serializing_if = "Option::is_none"
    )]
    pub attached_to: Option<String>,
    #[serde(default)]
    pub is_interrupting: bool,
}

impl Event {
    pub fn new(id: impl Into<String>, name: impl Into<String>, kind: EventKind) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            kind,
            event_type: None,
            attached_to: None,
            is_interrupting: false,
        }
    }

    pub fn with_definition(mut self, definition: EventDefinition) -> Self {
        self.event_type = Some(definition);
        self
    }

    /// Attach this event to the boundary of an activity
    pub fn on_boundary_of(mut self, activity_id: impl Into<String>, interrupting: bool) -> Self {
        self.kind = EventKind::BoundaryEvent;
        self.attached_to = Some(activity_id.into());
        self.is_interrupting = interrupting;
        self
    }
}

/// Where an event sits in the flow
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum EventKind {
    StartEvent,
    EndEvent,
    IntermediateEvent,
    IntermediateThrowEvent,
    IntermediateCatchEvent,
    BoundaryEvent,
}

impl EventKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::StartEvent => "startEvent",
            Self::EndEvent => "endEvent",
            Self::IntermediateEvent => "intermediateEvent",
            Self::IntermediateThrowEvent => "intermediateThrowEvent",
            Self::IntermediateCatchEvent => "intermediateCatchEvent",
            Self::BoundaryEvent => "boundaryEvent",
        }
    }

    /// Events that wait for something to happen
    pub fn is_catching(&self) -> bool {
        matches!(
            self,
            Self::IntermediateCatchEvent | Self::IntermediateEvent | Self::BoundaryEvent
        )
    }
}

/// What triggers (or is produced by) an event
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EventDefinition {
    None,
    Message,
    Timer,
    Error,
    Signal,
    Compensation,
    Cancel,
    Conditional,
    Link,
    Terminate,
}

// ── Activities ───────────────────────────────────────────────────────

/// A unit of work in the process
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Activity {
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(rename = "type")]
    pub kind: ActivityKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Who performs this activity
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub agent: Option<AgentAssignment>,
    /// Review gate applied to the activity's output
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub review: Option<ReviewConfig>,
    /// Script body for script tasks
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub script: Option<Script>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub data_input_associations: Vec<DataAssociation>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub data_output_associations: Vec<DataAssociation>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub boundary_event_refs: Vec<String>,
}

impl Activity {
    pub fn new(id: impl Into<String>, name: impl Into<String>, kind: ActivityKind) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            kind,
            description: None,
            agent: None,
            review: None,
            script: None,
            data_input_associations: Vec::new(),
            data_output_associations: Vec::new(),
            boundary_event_refs: Vec::new(),
        }
    }

    pub fn with_agent(mut self, agent: AgentAssignment) -> Self {
        self.agent = Some(agent);
        self
    }

    pub fn with_script(mut self, language: impl Into<String>, body: impl Into<String>) -> Self {
        self.script = Some(Script {
            language: language.into(),
            body: body.into(),
        });
        self
    }

    pub fn with_input(mut self, data_object_ref: impl Into<String>) -> Self {
        self.data_input_associations
            .push(DataAssociation::new(data_object_ref));
        self
    }

    pub fn with_output(mut self, data_object_ref: impl Into<String>) -> Self {
        self.data_output_associations
            .push(DataAssociation::new(data_object_ref));
        self
    }

    /// All data associations, inputs first
    pub fn data_associations(&self) -> impl Iterator<Item = &DataAssociation> {
        self.data_input_associations
            .iter()
            .chain(self.data_output_associations.iter())
    }
}

/// The kind of work an activity represents
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ActivityKind {
    Task,
    UserTask,
    ServiceTask,
    ScriptTask,
    SendTask,
    ReceiveTask,
    ManualTask,
    BusinessRuleTask,
    CallActivity,
    SubProcess,
}

impl ActivityKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Task => "task",
            Self::UserTask => "userTask",
            Self::ServiceTask => "serviceTask",
            Self::ScriptTask => "scriptTask",
            Self::SendTask => "sendTask",
            Self::ReceiveTask => "receiveTask",
            Self::ManualTask => "manualTask",
            Self::BusinessRuleTask => "businessRuleTask",
            Self::CallActivity => "callActivity",
            Self::SubProcess => "subProcess",
        }
    }
}

/// Link between an activity and a declared data object
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DataAssociation {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub data_object_ref: String,
}

impl DataAssociation {
    pub fn new(data_object_ref: impl Into<String>) -> Self {
        Self {
            id: None,
            data_object_ref: data_object_ref.into(),
        }
    }
}

/// Script task content
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Script {
    pub language: String,
    pub body: String,
}

// ── Gateways ─────────────────────────────────────────────────────────

/// A branching or merging point
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Gateway {
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(rename = "type")]
    pub kind: GatewayKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gateway_direction: Option<GatewayDirection>,
    /// Flow taken when no condition on the other outgoing flows holds
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_flow: Option<String>,
}

impl Gateway {
    pub fn new(id: impl Into<String>, name: impl Into<String>, kind: GatewayKind) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            kind,
            gateway_direction: None,
            default_flow: None,
        }
    }

    pub fn diverging(mut self) -> Self {
        self.gateway_direction = Some(GatewayDirection::Diverging);
        self
    }

    pub fn converging(mut self) -> Self {
        self.gateway_direction = Some(GatewayDirection::Converging);
        self
    }

    pub fn with_default_flow(mut self, flow_id: impl Into<String>) -> Self {
        self.default_flow = Some(flow_id.into());
        self
    }
}

/// Branching semantics of a gateway
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GatewayKind {
    #[serde(rename = "exclusiveGateway")]
    Exclusive,
    #[serde(rename = "parallelGateway")]
    Parallel,
    #[serde(rename = "inclusiveGateway")]
    Inclusive,
    #[serde(rename = "eventBasedGateway")]
    EventBased,
    #[serde(rename = "complexGateway")]
    Complex,
}

impl GatewayKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Exclusive => "exclusiveGateway",
            Self::Parallel => "parallelGateway",
            Self::Inclusive => "inclusiveGateway",
            Self::EventBased => "eventBasedGateway",
            Self::Complex => "complexGateway",
        }
    }

    /// Gateways whose split may activate more than one branch at once
    pub fn is_concurrent(&self) -> bool {
        matches!(self, Self::Parallel | Self::Inclusive)
    }

    /// Gateways whose split picks branches by evaluating conditions
    pub fn is_conditional(&self) -> bool {
        matches!(self, Self::Exclusive | Self::Inclusive | Self::Complex)
    }

    /// Whether a join of kind `other` synchronizes a split of this kind
    pub fn is_compatible_join(&self, other: GatewayKind) -> bool {
        match self {
            Self::Parallel => other == Self::Parallel,
            Self::Inclusive => matches!(other, Self::Inclusive | Self::Complex),
            Self::Exclusive | Self::EventBased => other == Self::Exclusive,
            Self::Complex => other == Self::Complex,
        }
    }
}

/// Declared direction of a gateway
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GatewayDirection {
    Diverging,
    Converging,
    Mixed,
}

// ── Connectors ───────────────────────────────────────────────────────

/// A directed connection between two flow nodes
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SequenceFlow {
    pub id: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub name: String,
    pub source_ref: String,
    pub target_ref: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub condition_expression: Option<Expression>,
    #[serde(default)]
    pub is_default: bool,
}

impl SequenceFlow {
    pub fn new(
        id: impl Into<String>,
        source_ref: impl Into<String>,
        target_ref: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            name: String::new(),
            source_ref: source_ref.into(),
            target_ref: target_ref.into(),
            condition_expression: None,
            is_default: false,
        }
    }

    pub fn with_condition(mut self, language: impl Into<String>, body: impl Into<String>) -> Self {
        self.condition_expression = Some(Expression::new(language, body));
        self
    }

    pub fn as_default(mut self) -> Self {
        self.is_default = true;
        self
    }

    pub fn is_conditional(&self) -> bool {
        self.condition_expression.is_some()
    }
}

/// A condition in some expression language
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Expression {
    pub language: String,
    pub body: String,
}

impl Expression {
    pub fn new(language: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            language: language.into(),
            body: body.into(),
        }
    }
}

/// Communication between participants (pools)
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MessageFlow {
    pub id: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub name: String,
    pub source_ref: String,
    pub target_ref: String,
}

/// A pool; owns the flow elements listed in `element_refs`
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Participant {
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub element_refs: Vec<String>,
}

/// Non-flow connection, e.g. between an annotation and a task
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Association {
    pub id: String,
    pub source_ref: String,
    pub target_ref: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub association_direction: Option<String>,
}

/// Documentation element
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Artifact {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
}

// ── Data ─────────────────────────────────────────────────────────────

/// Data read or written by activities; not part of the flow graph
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DataObject {
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub item_subject: Option<String>,
    #[serde(default)]
    pub is_collection: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub state: Option<String>,
}

impl DataObject {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            item_subject: None,
            is_collection: false,
            state: None,
        }
    }
}

/// Process-level variable
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Property {
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub item_subject: Option<String>,
}
