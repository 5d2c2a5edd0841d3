//! Loop detection
//!
//! Depth-first search with an explicit frame stack. A node is *visited*
//! once it has ever been entered and *on stack* while it is part of the
//! current descent; an edge into an on-stack node closes a loop. The two
//! markers are kept apart so that converging branches are not mistaken
//! for loops and deep processes cannot exhaust the call stack.

use bpmn_graph::{NodeIndex, ProcessGraph};
use bpmn_types::GatewayKind;
use serde::Serialize;
use std::collections::HashSet;

/// A cycle closed by one back edge
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Loop {
    /// Nodes on the cycle, starting at the entry
    pub elements: Vec<String>,
    /// Node the back edge returns to
    pub entry: String,
    /// Flow that closes the cycle
    pub back_edge: String,
    /// Some flow can leave the cycle by a decision
    pub has_exit: bool,
}

struct Frame<'a> {
    node: NodeIndex,
    edges: Vec<(&'a str, NodeIndex)>,
    next: usize,
}

impl<'a> Frame<'a> {
    fn enter(graph: &ProcessGraph<'a>, node: NodeIndex) -> Self {
        let edges = graph
            .outgoing_edges(node)
            .filter_map(|e| e.target.map(|t| (e.id(), t)))
            .collect();
        Self {
            node,
            edges,
            next: 0,
        }
    }
}

pub(crate) fn find_loops(graph: &ProcessGraph<'_>) -> Vec<Loop> {
    let mut visited = vec![false; graph.node_count()];
    let mut on_stack = vec![false; graph.node_count()];
    let mut loops = Vec::new();

    // Start events first so loop entries read naturally, then anything
    // the starts never reach
    let roots = graph.start_events().into_iter().chain(graph.indices());

    for root in roots {
        if visited[root.index()] {
            continue;
        }
        visited[root.index()] = true;
        on_stack[root.index()] = true;
        let mut stack = vec![Frame::enter(graph, root)];

        while let Some(frame) = stack.last_mut() {
            let Some(&(flow, target)) = frame.edges.get(frame.next) else {
                on_stack[frame.node.index()] = false;
                stack.pop();
                continue;
            };
            frame.next += 1;

            if on_stack[target.index()] {
                let position = stack.iter().position(|f| f.node == target).unwrap_or(0);
                let members: Vec<NodeIndex> = stack[position..].iter().map(|f| f.node).collect();
                loops.push(describe(graph, &members, flow));
            } else if !visited[target.index()] {
                visited[target.index()] = true;
                on_stack[target.index()] = true;
                stack.push(Frame::enter(graph, target));
            }
        }
    }

    tracing::debug!(loops = loops.len(), "Loop detection finished");
    loops
}

fn describe(graph: &ProcessGraph<'_>, members: &[NodeIndex], back_edge: &str) -> Loop {
    let inside: HashSet<NodeIndex> = members.iter().copied().collect();
    let has_exit = members.iter().any(|&node| {
        let decides = graph
            .element(node)
            .gateway_kind()
            .is_some_and(|kind| kind != GatewayKind::Parallel);
        graph.outgoing_edges(node).any(|edge| {
            let leaves = edge.target.is_some_and(|t| !inside.contains(&t));
            leaves && (decides || edge.flow.is_conditional())
        })
    });

    Loop {
        elements: members.iter().map(|&n| graph.id(n).to_string()).collect(),
        entry: graph.id(members[0]).to_string(),
        back_edge: back_edge.to_string(),
        has_exit,
    }
}
