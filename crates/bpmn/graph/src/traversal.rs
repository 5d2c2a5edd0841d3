//! Breadth-first reachability over the derived graph

use crate::{NodeIndex, ProcessGraph};
use std::collections::{BTreeSet, VecDeque};

/// Which way edges are followed
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Direction {
    /// Along `outgoing` flows
    Forward,
    /// Against the flow, along `incoming`
    Backward,
}

impl<'a> ProcessGraph<'a> {
    /// Successors or predecessors, depending on `direction`
    pub fn neighbors(&self, index: NodeIndex, direction: Direction) -> Vec<NodeIndex> {
        match direction {
            Direction::Forward => self.successors(index),
            Direction::Backward => self.predecessors(index),
        }
    }

    /// Every node reachable from `seeds` (seeds included)
    ///
    /// Nodes are marked before their neighbours are queued, so cycles
    /// terminate. The set iterates in arena order.
    pub fn reachable_from(
        &self,
        seeds: impl IntoIterator<Item = NodeIndex>,
        direction: Direction,
    ) -> BTreeSet<NodeIndex> {
        let mut visited = vec![false; self.node_count()];
        let mut queue = VecDeque::new();
        for seed in seeds {
            if !visited[seed.index()] {
                visited[seed.index()] = true;
                queue.push_back(seed);
            }
        }

        while let Some(current) = queue.pop_front() {
            for next in self.neighbors(current, direction) {
                if !visited[next.index()] {
                    visited[next.index()] = true;
                    queue.push_back(next);
                }
            }
        }

        visited
            .iter()
            .enumerate()
            .filter(|(_, seen)| **seen)
            .map(|(i, _)| NodeIndex::new(i))
            .collect()
    }

    /// Nodes reachable from `from` without passing through `blocked`
    pub fn reachable_avoiding(
        &self,
        from: NodeIndex,
        blocked: NodeIndex,
        direction: Direction,
    ) -> BTreeSet<NodeIndex> {
        if from == blocked {
            return BTreeSet::new();
        }
        let mut visited = vec![false; self.node_count()];
        visited[blocked.index()] = true;
        visited[from.index()] = true;
        let mut queue = VecDeque::from([from]);
        let mut reached = BTreeSet::from([from]);

        while let Some(current) = queue.pop_front() {
            for next in self.neighbors(current, direction) {
                if !visited[next.index()] {
                    visited[next.index()] = true;
                    reached.insert(next);
                    queue.push_back(next);
                }
            }
        }
        reached
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bpmn_types::{Activity, ActivityKind, Event, EventKind, Process, ProcessBuilder, SequenceFlow};
    use proptest::prelude::*;

    fn looped() -> Process {
        ProcessBuilder::new("p", "Loop")
            .start_event("s", "Start")
            .user_task("a", "A", None)
            .user_task("b", "B", None)
            .end_event("e", "End")
            .user_task("island", "Island", None)
            .connect("f1", "s", "a")
            .connect("f2", "a", "b")
            .connect("f3", "b", "a")
            .connect("f4", "b", "e")
            .build()
            .unwrap()
    }

    fn ids<'a>(graph: &ProcessGraph<'a>, set: &BTreeSet<NodeIndex>) -> Vec<&'a str> {
        set.iter().map(|&i| graph.id(i)).collect()
    }

    #[test]
    fn test_forward_reachability_terminates_on_cycle() {
        let process = looped();
        let graph = ProcessGraph::build(&process);
        let reached = graph.reachable_from(graph.start_events(), Direction::Forward);
        assert_eq!(ids(&graph, &reached), vec!["s", "e", "a", "b"]);
    }

    #[test]
    fn test_backward_reachability() {
        let process = looped();
        let graph = ProcessGraph::build(&process);
        let reached = graph.reachable_from(graph.end_events(), Direction::Backward);
        assert!(!reached.contains(&graph.index_of("island").unwrap()));
        assert!(reached.contains(&graph.index_of("s").unwrap()));
    }

    #[test]
    fn test_empty_seeds() {
        let process = looped();
        let graph = ProcessGraph::build(&process);
        assert!(graph
            .reachable_from(Vec::new(), Direction::Forward)
            .is_empty());
    }

    #[test]
    fn test_reachable_avoiding_blocked_node() {
        let process = looped();
        let graph = ProcessGraph::build(&process);
        let a = graph.index_of("a").unwrap();
        let b = graph.index_of("b").unwrap();
        let reached = graph.reachable_avoiding(a, b, Direction::Forward);
        assert_eq!(ids(&graph, &reached), vec!["a"]);
        assert!(graph.reachable_avoiding(a, a, Direction::Forward).is_empty());
    }

    proptest! {
        #[test]
        fn prop_forward_reachability_closed_under_outgoing(
            node_count in 1usize..12,
            flows in proptest::collection::vec((0usize..12, 0usize..12), 0..30),
        ) {
            let mut process = Process::new("p", "Random");
            process.elements.events.push(Event::new("n0", "", EventKind::StartEvent));
            for i in 1..node_count {
                process
                    .elements
                    .activities
                    .push(Activity::new(format!("n{i}"), "", ActivityKind::Task));
            }
            for (k, (s, t)) in flows.iter().enumerate() {
                process.elements.sequence_flows.push(SequenceFlow::new(
                    format!("f{k}"),
                    format!("n{}", s % node_count),
                    format!("n{}", t % node_count),
                ));
            }

            let graph = ProcessGraph::build(&process);
            let starts = graph.start_events();
            let reached = graph.reachable_from(starts.clone(), Direction::Forward);
            for start in &starts {
                prop_assert!(reached.contains(start));
            }
            for edge in graph.edges() {
                if let Some((s, t)) = edge.endpoints() {
                    if reached.contains(&s) {
                        prop_assert!(reached.contains(&t));
                    }
                }
            }
        }
    }
}
