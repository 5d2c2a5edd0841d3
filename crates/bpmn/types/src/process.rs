//! The process root and its element container

use crate::{
    Activity, Artifact, Association, DataObject, Event, FlowElement, Gateway, MessageFlow,
    Participant, Property, SequenceFlow,
};
use serde::{Deserialize, Serialize};

/// A process definition
///
/// Loaded once per validation or analysis pass and never mutated
/// afterwards. Connectivity (`incoming`/`outgoing`) is not stored here;
/// author-supplied arrays with those names are ignored on load.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Process {
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default)]
    pub is_executable: bool,
    #[serde(default)]
    pub elements: Elements,
    /// Data objects declared at process level
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub data_objects: Vec<DataObject>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub properties: Vec<Property>,
}

impl Process {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            ..Default::default()
        }
    }

    /// Every flow node: events, then activities, then gateways, each in
    /// document order
    pub fn flow_elements(&self) -> impl Iterator<Item = FlowElement<'_>> {
        let events = self.elements.events.iter().map(FlowElement::Event);
        let activities = self.elements.activities.iter().map(FlowElement::Activity);
        let gateways = self.elements.gateways.iter().map(FlowElement::Gateway);
        events.chain(activities).chain(gateways)
    }

    /// Look up a flow node by id (first declaration wins)
    pub fn element(&self, id: &str) -> Option<FlowElement<'_>> {
        self.flow_elements().find(|e| e.id() == id)
    }

    pub fn sequence_flow(&self, id: &str) -> Option<&SequenceFlow> {
        self.elements.sequence_flows.iter().find(|f| f.id == id)
    }

    pub fn sequence_flows(&self) -> &[SequenceFlow] {
        &self.elements.sequence_flows
    }

    /// Data objects declared either at process level or in `elements`
    pub fn declared_data_objects(&self) -> impl Iterator<Item = &DataObject> {
        self.data_objects
            .iter()
            .chain(self.elements.data_objects.iter())
    }

    pub fn activities(&self) -> &[Activity] {
        &self.elements.activities
    }

    pub fn node_count(&self) -> usize {
        self.elements.events.len() + self.elements.activities.len() + self.elements.gateways.len()
    }

    /// True when the process has no flow nodes
    pub fn is_empty(&self) -> bool {
        self.node_count() == 0
    }
}

/// All elements of a process, grouped by kind
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Elements {
    #[serde(default)]
    pub events: Vec<Event>,
    #[serde(default)]
    pub activities: Vec<Activity>,
    #[serde(default)]
    pub gateways: Vec<Gateway>,
    #[serde(default)]
    pub sequence_flows: Vec<SequenceFlow>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub data_objects: Vec<DataObject>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub message_flows: Vec<MessageFlow>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub participants: Vec<Participant>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub associations: Vec<Association>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub artifacts: Vec<Artifact>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{ActivityKind, EventKind, GatewayKind};

    fn sample() -> Process {
        let mut process = Process::new("p", "Sample");
        process
            .elements
            .events
            .push(Event::new("start", "Start", EventKind::StartEvent));
        process
            .elements
            .activities
            .push(Activity::new("task", "Task", ActivityKind::Task));
        process
            .elements
            .gateways
            .push(Gateway::new("gw", "Split", GatewayKind::Exclusive));
        process
            .elements
            .events
            .push(Event::new("end", "End", EventKind::EndEvent));
        process
    }

    #[test]
    fn test_flow_elements_order() {
        let process = sample();
        let ids: Vec<&str> = process.flow_elements().map(|e| e.id()).collect();
        assert_eq!(ids, vec!["start", "end", "task", "gw"]);
        assert_eq!(process.node_count(), 4);
    }

    #[test]
    fn test_element_lookup() {
        let process = sample();
        assert!(process.element("gw").and_then(|e| e.as_gateway()).is_some());
        assert!(process.element("missing").is_none());
    }

    #[test]
    fn test_declared_data_objects_both_levels() {
        let mut process = sample();
        process.data_objects.push(DataObject::new("a", "A"));
        process.elements.data_objects.push(DataObject::new("b", "B"));
        let ids: Vec<&str> = process
            .declared_data_objects()
            .map(|d| d.id.as_str())
            .collect();
        assert_eq!(ids, vec!["a", "b"]);
    }

    #[test]
    fn test_empty_process() {
        let process = Process::new("p", "Empty");
        assert!(process.is_empty());
        assert_eq!(process.flow_elements().count(), 0);
    }
}
