//! Rules: Start Event, End Event, Boundary Event
//!
//! Start events only emit tokens, end events only consume them, and a
//! boundary event hangs off an activity and must lead somewhere.

use crate::{ValidationIssue, ValidationRule, ValidatorConfig};
use bpmn_graph::ProcessGraph;

pub struct StartEventRule;

impl ValidationRule for StartEventRule {
    fn id(&self) -> &'static str {
        "event.start"
    }

    fn description(&self) -> &'static str {
        "Start events have no incoming and at least one outgoing flow"
    }

    fn validate(&self, graph: &ProcessGraph<'_>, _config: &ValidatorConfig) -> Vec<ValidationIssue> {
        let starts = graph.start_events();
        let mut issues = Vec::new();

        if starts.is_empty() && !graph.is_empty() {
            issues.push(ValidationIssue::error(
                None,
                "Process must have at least one start event",
                self.id(),
            ));
        }

        for start in starts.into_iter().filter(|&i| graph.is_canonical(i)) {
            let id = graph.id(start);
            if graph.in_degree(start) > 0 {
                issues.push(ValidationIssue::error(
                    Some(id),
                    format!("Start event '{id}' must not have incoming flows"),
                    self.id(),
                ));
            }
            if graph.out_degree(start) == 0 {
                issues.push(ValidationIssue::error(
                    Some(id),
                    format!("Start event '{id}' has no outgoing flow"),
                    self.id(),
                ));
            }
        }
        issues
    }
}

pub struct EndEventRule;

impl ValidationRule for EndEventRule {
    fn id(&self) -> &'static str {
        "event.end"
    }

    fn description(&self) -> &'static str {
        "End events have at least one incoming and no outgoing flow"
    }

    fn validate(&self, graph: &ProcessGraph<'_>, config: &ValidatorConfig) -> Vec<ValidationIssue> {
        let ends = graph.end_events();
        let mut issues = Vec::new();

        if ends.is_empty() && !graph.is_empty() {
            let message = "Process must have at least one end event";
            issues.push(if config.require_end_event {
                ValidationIssue::error(None, message, self.id())
            } else {
                ValidationIssue::warning(None, message, self.id())
            });
        }

        for end in ends.into_iter().filter(|&i| graph.is_canonical(i)) {
            let id = graph.id(end);
            if graph.in_degree(end) == 0 {
                issues.push(ValidationIssue::error(
                    Some(id),
                    format!("End event '{id}' has no incoming flow"),
                    self.id(),
                ));
            }
            if graph.out_degree(end) > 0 {
                issues.push(ValidationIssue::error(
                    Some(id),
                    format!("End event '{id}' must not have outgoing flows"),
                    self.id(),
                ));
            }
        }
        issues
    }
}

pub struct BoundaryEventRule;

impl ValidationRule for BoundaryEventRule {
    fn id(&self) -> &'static str {
        "event.boundary"
    }

    fn description(&self) -> &'static str {
        "Boundary events are attached to an activity and have an outgoing flow"
    }

    fn validate(&self, graph: &ProcessGraph<'_>, _config: &ValidatorConfig) -> Vec<ValidationIssue> {
        let mut issues = Vec::new();
        for index in graph.indices() {
            let Some(event) = graph.element(index).as_event() else {
                continue;
            };
            if !graph.element(index).is_boundary() || !graph.is_canonical(index) {
                continue;
            }

            match event.attached_to.as_deref() {
                None | Some("") => issues.push(ValidationIssue::error(
                    Some(event.id.as_str()),
                    format!("Boundary event '{}' is not attached to an activity", event.id),
                    self.id(),
                )),
                Some(host) => {
                    let is_activity = graph
                        .index_of(host)
                        .is_some_and(|h| graph.element(h).as_activity().is_some());
                    if !is_activity {
                        issues.push(ValidationIssue::error(
                            Some(event.id.as_str()),
                            format!(
                                "Boundary event '{}' is attached to non-existent activity '{host}'",
                                event.id
                            ),
                            self.id(),
                        ));
                    }
                }
            }

            if graph.out_degree(index) == 0 {
                issues.push(ValidationIssue::error(
                    Some(event.id.as_str()),
                    format!("Boundary event '{}' has no outgoing flow", event.id),
                    self.id(),
                ));
            }
        }
        issues
    }
}
