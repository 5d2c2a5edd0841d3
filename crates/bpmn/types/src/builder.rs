//! Fluent construction of processes
//!
//! Mostly used by tests and by callers generating processes in code.
//! Problems are collected while chaining and surfaced by [`ProcessBuilder::build`].

use crate::{
    Activity, ActivityKind, AgentAssignment, Artifact, DataObject, Event, EventKind, Gateway,
    GatewayDirection, GatewayKind, Process, ProcessError, ProcessResult, ReviewConfig,
    ReviewType, SequenceFlow,
};
use std::collections::HashSet;

/// Builder for [`Process`]
#[derive(Debug)]
pub struct ProcessBuilder {
    process: Process,
    ids: HashSet<String>,
    errors: Vec<ProcessError>,
}

impl ProcessBuilder {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        let mut process = Process::new(id, name);
        process.is_executable = true;
        Self {
            process,
            ids: HashSet::new(),
            errors: Vec::new(),
        }
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.process.description = Some(description.into());
        self
    }

    pub fn executable(mut self, executable: bool) -> Self {
        self.process.is_executable = executable;
        self
    }

    // ── Nodes ────────────────────────────────────────────────────────

    pub fn event(mut self, event: Event) -> Self {
        if self.claim(&event.id) {
            self.process.elements.events.push(event);
        }
        self
    }

    pub fn start_event(self, id: impl Into<String>, name: impl Into<String>) -> Self {
        self.event(Event::new(id, name, EventKind::StartEvent))
    }

    pub fn end_event(self, id: impl Into<String>, name: impl Into<String>) -> Self {
        self.event(Event::new(id, name, EventKind::EndEvent))
    }

    pub fn activity(mut self, activity: Activity) -> Self {
        if self.claim(&activity.id) {
            self.process.elements.activities.push(activity);
        }
        self
    }

    pub fn user_task(
        self,
        id: impl Into<String>,
        name: impl Into<String>,
        agent: Option<AgentAssignment>,
    ) -> Self {
        let mut task = Activity::new(id, name, ActivityKind::UserTask);
        task.agent = agent;
        self.activity(task)
    }

    pub fn service_task(
        self,
        id: impl Into<String>,
        name: impl Into<String>,
        agent: Option<AgentAssignment>,
    ) -> Self {
        let mut task = Activity::new(id, name, ActivityKind::ServiceTask);
        task.agent = agent;
        self.activity(task)
    }

    pub fn script_task(
        self,
        id: impl Into<String>,
        name: impl Into<String>,
        language: impl Into<String>,
        body: impl Into<String>,
    ) -> Self {
        self.activity(Activity::new(id, name, ActivityKind::ScriptTask).with_script(language, body))
    }

    pub fn gateway(mut self, gateway: Gateway) -> Self {
        if self.claim(&gateway.id) {
            self.process.elements.gateways.push(gateway);
        }
        self
    }

    pub fn exclusive_gateway(self, id: impl Into<String>, name: impl Into<String>) -> Self {
        self.gateway(Gateway::new(id, name, GatewayKind::Exclusive))
    }

    pub fn parallel_gateway(
        self,
        id: impl Into<String>,
        name: impl Into<String>,
        direction: GatewayDirection,
    ) -> Self {
        let mut gateway = Gateway::new(id, name, GatewayKind::Parallel);
        gateway.gateway_direction = Some(direction);
        self.gateway(gateway)
    }

    pub fn inclusive_gateway(
        self,
        id: impl Into<String>,
        name: impl Into<String>,
        direction: GatewayDirection,
    ) -> Self {
        let mut gateway = Gateway::new(id, name, GatewayKind::Inclusive);
        gateway.gateway_direction = Some(direction);
        self.gateway(gateway)
    }

    // ── Flows ────────────────────────────────────────────────────────

    pub fn flow(mut self, flow: SequenceFlow) -> Self {
        if self.claim(&flow.id) {
            self.process.elements.sequence_flows.push(flow);
        }
        self
    }

    pub fn connect(
        self,
        id: impl Into<String>,
        source: impl Into<String>,
        target: impl Into<String>,
    ) -> Self {
        self.flow(SequenceFlow::new(id, source, target))
    }

    /// Connect with a condition expression on the flow
    pub fn connect_when(
        self,
        id: impl Into<String>,
        source: impl Into<String>,
        target: impl Into<String>,
        language: impl Into<String>,
        condition: impl Into<String>,
    ) -> Self {
        self.flow(SequenceFlow::new(id, source, target).with_condition(language, condition))
    }

    /// Connect with a default flow; a gateway source records it as its
    /// `defaultFlow`
    pub fn default_flow(
        mut self,
        id: impl Into<String>,
        source: impl Into<String>,
        target: impl Into<String>,
    ) -> Self {
        let id = id.into();
        let source = source.into();
        if let Some(gateway) = self
            .process
            .elements
            .gateways
            .iter_mut()
            .find(|g| g.id == source)
        {
            gateway.default_flow = Some(id.clone());
        }
        self.flow(SequenceFlow::new(id, source, target).as_default())
    }

    // ── Auxiliary ────────────────────────────────────────────────────

    pub fn data_object(mut self, id: impl Into<String>, name: impl Into<String>) -> Self {
        let object = DataObject::new(id, name);
        if self.claim(&object.id) {
            self.process.data_objects.push(object);
        }
        self
    }

    pub fn text_annotation(mut self, id: impl Into<String>, text: impl Into<String>) -> Self {
        self.process.elements.artifacts.push(Artifact {
            id: id.into(),
            kind: "textAnnotation".into(),
            text: Some(text.into()),
        });
        self
    }

    /// Require a review on the most recently added activity
    pub fn with_review(mut self, review_type: ReviewType, reviewer: AgentAssignment) -> Self {
        match self.process.elements.activities.last_mut() {
            Some(activity) => activity.review = Some(ReviewConfig::required(review_type, reviewer)),
            None => self
                .errors
                .push(ProcessError::Builder("no activity to add review to".into())),
        }
        self
    }

    /// Assign an agent to the most recently added activity
    pub fn with_agent(mut self, agent: AgentAssignment) -> Self {
        match self.process.elements.activities.last_mut() {
            Some(activity) => activity.agent = Some(agent),
            None => self
                .errors
                .push(ProcessError::Builder("no activity to assign an agent to".into())),
        }
        self
    }

    /// Finish the process, failing on the first recorded problem or on a
    /// flow whose endpoints were never declared
    pub fn build(mut self) -> ProcessResult<Process> {
        for flow in &self.process.elements.sequence_flows {
            for endpoint in [&flow.source_ref, &flow.target_ref] {
                if self.process.element(endpoint).is_none() {
                    self.errors
                        .push(ProcessError::ElementNotFound(endpoint.clone()));
                }
            }
        }
        match self.errors.into_iter().next() {
            Some(err) => Err(err),
            None => Ok(self.process),
        }
    }

    fn claim(&mut self, id: &str) -> bool {
        if self.ids.insert(id.to_string()) {
            true
        } else {
            self.errors
                .push(ProcessError::DuplicateElementId(id.to_string()));
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_linear_process() {
        let process = ProcessBuilder::new("p", "Linear")
            .description("three steps")
            .start_event("start", "Start")
            .user_task("task", "Do it", Some(AgentAssignment::human("Ann", "clerk")))
            .end_event("end", "End")
            .connect("f1", "start", "task")
            .connect("f2", "task", "end")
            .build()
            .unwrap();

        assert_eq!(process.node_count(), 3);
        assert_eq!(process.sequence_flows().len(), 2);
        assert!(process.is_executable);
        assert!(process.activities()[0].agent.is_some());
    }

    #[test]
    fn test_conditional_and_default_flows() {
        let process = ProcessBuilder::new("p", "Decision")
            .start_event("s", "Start")
            .exclusive_gateway("gw", "Approved?")
            .end_event("yes", "Yes")
            .end_event("no", "No")
            .connect("f1", "s", "gw")
            .connect_when("f2", "gw", "yes", "javascript", "result.approved === true")
            .default_flow("f3", "gw", "no")
            .build()
            .unwrap();

        assert!(process.sequence_flow("f2").unwrap().is_conditional());
        assert!(process.sequence_flow("f3").unwrap().is_default);
        assert_eq!(
            process.elements.gateways[0].default_flow.as_deref(),
            Some("f3")
        );
    }

    #[test]
    fn test_duplicate_id_rejected() {
        let err = ProcessBuilder::new("p", "Dup")
            .start_event("a", "Start")
            .user_task("a", "Task", None)
            .build()
            .unwrap_err();
        assert!(matches!(err, ProcessError::DuplicateElementId(id) if id == "a"));
    }

    #[test]
    fn test_unknown_flow_endpoint_rejected() {
        let err = ProcessBuilder::new("p", "Broken")
            .start_event("s", "Start")
            .connect("f1", "s", "ghost")
            .build()
            .unwrap_err();
        assert!(matches!(err, ProcessError::ElementNotFound(id) if id == "ghost"));
    }

    #[test]
    fn test_review_and_agent_apply_to_last_activity() {
        let process = ProcessBuilder::new("p", "Review")
            .service_task("a", "Fetch", None)
            .script_task("b", "Transform", "python", "x = 1")
            .with_agent(AgentAssignment::system("etl"))
            .with_review(ReviewType::Approval, AgentAssignment::human("Lead", "lead"))
            .build()
            .unwrap();

        let activities = process.activities();
        assert!(activities[0].agent.is_none());
        assert!(activities[1].agent.is_some());
        assert!(activities[1].review.as_ref().unwrap().required);
        assert!(activities[1].script.is_some());
    }

    #[test]
    fn test_review_without_activity_fails() {
        let err = ProcessBuilder::new("p", "Empty")
            .with_review(ReviewType::Validation, AgentAssignment::human("A", "b"))
            .build()
            .unwrap_err();
        assert!(matches!(err, ProcessError::Builder(_)));
    }
}
