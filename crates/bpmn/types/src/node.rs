//! Flow nodes: the shared view over events, activities and gateways
//!
//! Validator and analyzer treat every node the same way (an id, a kind,
//! some edges) but occasionally need the kind-specific fields. The
//! [`FlowElement`] sum type gives them both without type switches
//! scattered across the code.

use crate::{Activity, ActivityKind, Event, EventKind, Gateway, GatewayDirection, GatewayKind};
use std::fmt;

/// Borrowed view of a node in the flow graph
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum FlowElement<'a> {
    Event(&'a Event),
    Activity(&'a Activity),
    Gateway(&'a Gateway),
}

impl<'a> FlowElement<'a> {
    pub fn id(&self) -> &'a str {
        match self {
            Self::Event(e) => &e.id,
            Self::Activity(a) => &a.id,
            Self::Gateway(g) => &g.id,
        }
    }

    pub fn name(&self) -> &'a str {
        match self {
            Self::Event(e) => &e.name,
            Self::Activity(a) => &a.name,
            Self::Gateway(g) => &g.name,
        }
    }

    /// Name if set, id otherwise
    pub fn label(&self) -> &'a str {
        let name = self.name();
        if name.is_empty() {
            self.id()
        } else {
            name
        }
    }

    pub fn kind(&self) -> NodeKind {
        match self {
            Self::Event(e) => NodeKind::Event(e.kind),
            Self::Activity(a) => NodeKind::Activity(a.kind),
            Self::Gateway(g) => NodeKind::Gateway(g.kind),
        }
    }

    pub fn is_start(&self) -> bool {
        matches!(self, Self::Event(e) if e.kind == EventKind::StartEvent)
    }

    pub fn is_end(&self) -> bool {
        matches!(self, Self::Event(e) if e.kind == EventKind::EndEvent)
    }

    pub fn is_boundary(&self) -> bool {
        matches!(self, Self::Event(e) if e.kind == EventKind::BoundaryEvent)
    }

    pub fn as_event(&self) -> Option<&'a Event> {
        match self {
            Self::Event(e) => Some(e),
            _ => None,
        }
    }

    pub fn as_activity(&self) -> Option<&'a Activity> {
        match self {
            Self::Activity(a) => Some(a),
            _ => None,
        }
    }

    pub fn as_gateway(&self) -> Option<&'a Gateway> {
        match self {
            Self::Gateway(g) => Some(g),
            _ => None,
        }
    }

    pub fn gateway_kind(&self) -> Option<GatewayKind> {
        self.as_gateway().map(|g| g.kind)
    }

    /// Declared direction of a gateway; `None` for other nodes
    pub fn gateway_direction(&self) -> Option<GatewayDirection> {
        self.as_gateway().and_then(|g| g.gateway_direction)
    }
}

/// Type tag of a flow node
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum NodeKind {
    Event(EventKind),
    Activity(ActivityKind),
    Gateway(GatewayKind),
}

impl NodeKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Event(kind) => kind.as_str(),
            Self::Activity(kind) => kind.as_str(),
            Self::Gateway(kind) => kind.as_str(),
        }
    }
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Display for FlowElement<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} '{}'", self.kind(), self.id())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flow_element_accessors() {
        let start = Event::new("s", "Start", EventKind::StartEvent);
        let element = FlowElement::Event(&start);
        assert_eq!(element.id(), "s");
        assert!(element.is_start());
        assert!(!element.is_end());
        assert_eq!(element.kind(), NodeKind::Event(EventKind::StartEvent));
        assert!(element.as_gateway().is_none());

        let gateway = Gateway::new("g", "", GatewayKind::Parallel).converging();
        let element = FlowElement::Gateway(&gateway);
        assert_eq!(element.label(), "g");
        assert_eq!(element.gateway_kind(), Some(GatewayKind::Parallel));
        assert_eq!(
            element.gateway_direction(),
            Some(GatewayDirection::Converging)
        );
    }

    #[test]
    fn test_display() {
        let task = Activity::new("t1", "Review", ActivityKind::UserTask);
        assert_eq!(FlowElement::Activity(&task).to_string(), "userTask 't1'");
    }
}
