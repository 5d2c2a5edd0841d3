//! Static deadlock heuristics
//!
//! These are structural checks, not a token simulation. A parallel join
//! is compared against the concurrent splits upstream of it; an
//! exclusive-style merge is checked for concurrent branches arriving
//! unsynchronized; loops found by [`crate::cycles`] without an exit are
//! reported as infinite loops.

use crate::Loop;
use bpmn_graph::{Direction, NodeIndex, ProcessGraph};
use bpmn_types::GatewayKind;
use serde::Serialize;
use std::collections::{BTreeSet, HashSet, VecDeque};
use std::fmt;

/// Kind of potential deadlock
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum DeadlockKind {
    /// A synchronizing join that can never receive all of its tokens
    IncompleteJoin,
    /// Concurrent branches meeting at a gateway that does not wait for
    /// them
    UnsynchronizedMerge,
    /// A cycle with no way out
    InfiniteLoop,
}

impl DeadlockKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::IncompleteJoin => "incomplete-join",
            Self::UnsynchronizedMerge => "unsynchronized-merge",
            Self::InfiniteLoop => "infinite-loop",
        }
    }
}

impl fmt::Display for DeadlockKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Deadlock {
    /// The join or merge gateway, or the loop entry for infinite loops
    pub gateway_id: String,
    pub kind: DeadlockKind,
    pub detail: String,
    /// Elements involved, starting with `gateway_id`
    pub elements: Vec<String>,
}

pub(crate) fn detect_deadlocks(graph: &ProcessGraph<'_>, loops: &[Loop]) -> Vec<Deadlock> {
    let mut deadlocks = Vec::new();

    for gateway in graph.gateways() {
        if !graph.is_canonical(gateway) || !graph.is_converging(gateway) {
            continue;
        }
        let Some(kind) = graph.element(gateway).gateway_kind() else {
            continue;
        };
        let found = match kind {
            GatewayKind::Parallel | GatewayKind::Inclusive => incomplete_join(graph, gateway, kind),
            GatewayKind::Exclusive | GatewayKind::Complex | GatewayKind::EventBased => {
                unsynchronized_merge(graph, gateway)
            }
        };
        deadlocks.extend(found);
    }

    for cycle in loops.iter().filter(|l| !l.has_exit) {
        deadlocks.push(Deadlock {
            gateway_id: cycle.entry.clone(),
            kind: DeadlockKind::InfiniteLoop,
            detail: format!(
                "Loop through {} closed by '{}' has no conditional exit",
                cycle.elements.join(" -> "),
                cycle.back_edge
            ),
            elements: cycle.elements.clone(),
        });
    }

    tracing::debug!(deadlocks = deadlocks.len(), "Deadlock detection finished");
    deadlocks
}

/// Diverging parallel/inclusive gateways upstream of `join`
fn upstream_splits(graph: &ProcessGraph<'_>, join: NodeIndex) -> Vec<NodeIndex> {
    graph
        .reachable_from([join], Direction::Backward)
        .into_iter()
        .filter(|&n| n != join && graph.is_diverging(n))
        .filter(|&n| {
            graph
                .element(n)
                .gateway_kind()
                .is_some_and(|k| k.is_concurrent())
        })
        .collect()
}

/// Outgoing branches of `split` from which `target` is reachable without
/// passing back through `split`, with every node those branches touch
fn branches_reaching(
    graph: &ProcessGraph<'_>,
    split: NodeIndex,
    target: NodeIndex,
) -> (usize, BTreeSet<NodeIndex>) {
    let mut count = 0;
    let mut touched = BTreeSet::new();
    for start in graph.successors(split) {
        let reached = graph.reachable_avoiding(start, split, Direction::Forward);
        if reached.contains(&target) {
            count += 1;
            touched.extend(reached);
        }
    }
    (count, touched)
}

fn incomplete_join(graph: &ProcessGraph<'_>, join: NodeIndex, kind: GatewayKind) -> Option<Deadlock> {
    let expected = graph.in_degree(join);
    if expected < 2 {
        // A declared parallel join with a single input has nothing to
        // synchronize and usually means a branch was never wired in
        if kind != GatewayKind::Parallel {
            return None;
        }
        let join_id = graph.id(join);
        return Some(Deadlock {
            gateway_id: join_id.to_string(),
            kind: DeadlockKind::IncompleteJoin,
            detail: format!(
                "{} is declared converging but has {expected} incoming flows",
                graph.element(join)
            ),
            elements: vec![join_id.to_string()],
        });
    }

    let mut splits = upstream_splits(graph, join);
    if kind == GatewayKind::Inclusive {
        // An inclusive join only waits like a parallel one behind a
        // parallel split
        splits.retain(|&s| graph.element(s).gateway_kind() == Some(GatewayKind::Parallel));
        if splits.is_empty() {
            return None;
        }
    }

    let join_id = graph.id(join);
    let element = graph.element(join);
    if splits.is_empty() {
        return Some(Deadlock {
            gateway_id: join_id.to_string(),
            kind: DeadlockKind::IncompleteJoin,
            detail: format!(
                "{element} waits for {expected} incoming flows but no concurrent split precedes it"
            ),
            elements: vec![join_id.to_string()],
        });
    }

    let sources: Vec<Option<NodeIndex>> = graph.incoming_edges(join).map(|e| e.source).collect();
    let mut closest = None;
    for &split in &splits {
        let (branches, touched) = branches_reaching(graph, split, join);
        let covers = sources
            .iter()
            .all(|s| s.is_some_and(|s| s == split || touched.contains(&s)));
        if branches == expected && covers {
            return None;
        }
        if closest.map_or(true, |(_, b)| branches > b) {
            closest = Some((split, branches));
        }
    }

    let (split, branches) = closest?;
    let split_id = graph.id(split);
    Some(Deadlock {
        gateway_id: join_id.to_string(),
        kind: DeadlockKind::IncompleteJoin,
        detail: format!(
            "{element} waits for {expected} incoming flows but split '{split_id}' \
             produces at most {branches} branches reaching it"
        ),
        elements: vec![join_id.to_string(), split_id.to_string()],
    })
}

fn is_barrier(graph: &ProcessGraph<'_>, index: NodeIndex) -> bool {
    graph.is_converging(index)
        && graph
            .element(index)
            .gateway_kind()
            .is_some_and(|k| k.is_concurrent())
}

/// Whether a token leaving `from` can reach `target` without crossing
/// `split` or a synchronizing join
fn reaches_unsynchronized(
    graph: &ProcessGraph<'_>,
    from: NodeIndex,
    split: NodeIndex,
    target: NodeIndex,
) -> bool {
    let mut seen = HashSet::from([split, from]);
    let mut queue = VecDeque::from([from]);
    while let Some(current) = queue.pop_front() {
        if current == target {
            return true;
        }
        if is_barrier(graph, current) {
            continue;
        }
        for next in graph.successors(current) {
            if seen.insert(next) {
                queue.push_back(next);
            }
        }
    }
    false
}

fn unsynchronized_merge(graph: &ProcessGraph<'_>, merge: NodeIndex) -> Option<Deadlock> {
    if graph.in_degree(merge) < 2 {
        return None;
    }

    // Walk back to the nearest splits, stopping at synchronizing joins
    let mut seen = HashSet::from([merge]);
    let mut queue: VecDeque<NodeIndex> = graph.predecessors(merge).into_iter().collect();
    let mut nearest = BTreeSet::new();
    while let Some(current) = queue.pop_front() {
        if !seen.insert(current) {
            continue;
        }
        if graph.is_diverging(current) {
            nearest.insert(current);
            continue;
        }
        if is_barrier(graph, current) {
            continue;
        }
        queue.extend(graph.predecessors(current));
    }

    let merge_id = graph.id(merge);
    for split in nearest {
        let concurrent = graph
            .element(split)
            .gateway_kind()
            .is_some_and(|k| k.is_concurrent());
        if !concurrent {
            continue;
        }
        let arriving = graph
            .successors(split)
            .into_iter()
            .filter(|&b| reaches_unsynchronized(graph, b, split, merge))
            .count();
        if arriving >= 2 {
            let element = graph.element(merge);
            let split_id = graph.id(split);
            return Some(Deadlock {
                gateway_id: merge_id.to_string(),
                kind: DeadlockKind::UnsynchronizedMerge,
                detail: format!(
                    "{element} receives {arriving} concurrent branches from split '{split_id}' \
                     without waiting for them"
                ),
                elements: vec![merge_id.to_string(), split_id.to_string()],
            });
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cycles::find_loops;
    use bpmn_types::{GatewayDirection, Process, ProcessBuilder};

    fn detect(process: &Process) -> Vec<Deadlock> {
        let graph = ProcessGraph::build(process);
        let loops = find_loops(&graph);
        detect_deadlocks(&graph, &loops)
    }

    /// `split` fans out to `branches` tasks that all meet at a parallel join
    /// declared to expect `expected` flows; the extra flows come from
    /// tasks the split does not feed
    fn fork_join(branches: usize, expected: usize) -> Process {
        let mut builder = ProcessBuilder::new("p", "Fork join")
            .start_event("s", "Start")
            .parallel_gateway("split", "Split", GatewayDirection::Diverging)
            .parallel_gateway("join", "Join", GatewayDirection::Converging)
            .end_event("e", "End")
            .connect("f0", "s", "split")
            .connect("fj", "join", "e");
        for i in 0..expected {
            builder = builder
                .service_task(format!("t{i}"), "Branch", None)
                .connect(format!("in{i}"), format!("t{i}"), "join");
            if i < branches {
                builder = builder.connect(format!("out{i}"), "split", format!("t{i}"));
            }
        }
        builder.build().unwrap()
    }

    #[test]
    fn test_matched_fork_join() {
        assert!(detect(&fork_join(3, 3)).is_empty());
    }

    #[test]
    fn test_join_expecting_more_than_split_produces() {
        let deadlocks = detect(&fork_join(2, 3));
        assert_eq!(deadlocks.len(), 1);
        assert_eq!(deadlocks[0].kind, DeadlockKind::IncompleteJoin);
        assert_eq!(deadlocks[0].gateway_id, "join");
        assert_eq!(deadlocks[0].elements, vec!["join", "split"]);
    }

    #[test]
    fn test_exclusive_choice_inside_parallel_branch() {
        // split -> a -> join, split -> x -> {c, d} -> join: the join
        // counts three flows but only two branches ever run
        let process = ProcessBuilder::new("p", "Choice inside fork")
            .start_event("s", "Start")
            .parallel_gateway("split", "Split", GatewayDirection::Diverging)
            .service_task("a", "A", None)
            .exclusive_gateway("x", "Choose")
            .service_task("c", "C", None)
            .service_task("d", "D", None)
            .parallel_gateway("join", "Join", GatewayDirection::Converging)
            .end_event("e", "End")
            .connect("f1", "s", "split")
            .connect("f2", "split", "a")
            .connect("f3", "split", "x")
            .connect_when("f4", "x", "c", "feel", "big")
            .connect_when("f5", "x", "d", "feel", "small")
            .connect("f6", "a", "join")
            .connect("f7", "c", "join")
            .connect("f8", "d", "join")
            .connect("f9", "join", "e")
            .build()
            .unwrap();
        let deadlocks = detect(&process);
        assert_eq!(deadlocks.len(), 1);
        assert_eq!(deadlocks[0].kind, DeadlockKind::IncompleteJoin);
        assert!(deadlocks[0].detail.contains("at most 2"));
    }

    #[test]
    fn test_join_without_any_split() {
        let process = ProcessBuilder::new("p", "Two starts")
            .start_event("s1", "Start 1")
            .start_event("s2", "Start 2")
            .parallel_gateway("join", "Join", GatewayDirection::Converging)
            .end_event("e", "End")
            .connect("f1", "s1", "join")
            .connect("f2", "s2", "join")
            .connect("f3", "join", "e")
            .build()
            .unwrap();
        let deadlocks = detect(&process);
        assert_eq!(deadlocks.len(), 1);
        assert!(deadlocks[0].detail.contains("no concurrent split"));
    }

    #[test]
    fn test_single_input_parallel_join() {
        let process = ProcessBuilder::new("p", "Half join")
            .start_event("s", "Start")
            .service_task("a", "A", None)
            .parallel_gateway("join", "Join", GatewayDirection::Converging)
            .inclusive_gateway("merge", "Merge", GatewayDirection::Converging)
            .end_event("e", "End")
            .connect("f1", "s", "a")
            .connect("f2", "a", "join")
            .connect("f3", "join", "merge")
            .connect("f4", "merge", "e")
            .build()
            .unwrap();
        let deadlocks = detect(&process);
        assert_eq!(deadlocks.len(), 1);
        assert_eq!(deadlocks[0].kind, DeadlockKind::IncompleteJoin);
        assert_eq!(deadlocks[0].gateway_id, "join");
        assert!(deadlocks[0].detail.contains("1 incoming flows"));
    }

    #[test]
    fn test_inclusive_join_without_parallel_split_is_ignored() {
        let process = ProcessBuilder::new("p", "Or join")
            .start_event("s", "Start")
            .exclusive_gateway("x", "Choose")
            .service_task("a", "A", None)
            .service_task("b", "B", None)
            .inclusive_gateway("join", "Join", GatewayDirection::Converging)
            .end_event("e", "End")
            .connect("f1", "s", "x")
            .connect_when("f2", "x", "a", "feel", "left")
            .connect_when("f3", "x", "b", "feel", "right")
            .connect("f4", "a", "join")
            .connect("f5", "b", "join")
            .connect("f6", "join", "e")
            .build()
            .unwrap();
        assert!(detect(&process).is_empty());
    }

    #[test]
    fn test_parallel_split_merged_exclusively() {
        let process = ProcessBuilder::new("p", "Mismatch")
            .start_event("s", "Start")
            .parallel_gateway("split", "Split", GatewayDirection::Diverging)
            .service_task("a", "A", None)
            .service_task("b", "B", None)
            .exclusive_gateway("merge", "Merge")
            .end_event("e", "End")
            .connect("f1", "s", "split")
            .connect("f2", "split", "a")
            .connect("f3", "split", "b")
            .connect("f4", "a", "merge")
            .connect("f5", "b", "merge")
            .connect("f6", "merge", "e")
            .build()
            .unwrap();
        let deadlocks = detect(&process);
        assert_eq!(deadlocks.len(), 1);
        assert_eq!(deadlocks[0].kind, DeadlockKind::UnsynchronizedMerge);
        assert_eq!(deadlocks[0].gateway_id, "merge");
        assert_eq!(deadlocks[0].elements, vec!["merge", "split"]);
    }

    #[test]
    fn test_synchronized_before_merge_is_clean() {
        // fork/join nested inside an exclusive choice, merged exclusively
        let process = ProcessBuilder::new("p", "Nested")
            .start_event("s", "Start")
            .exclusive_gateway("x", "Choose")
            .parallel_gateway("split", "Split", GatewayDirection::Diverging)
            .service_task("a", "A", None)
            .service_task("b", "B", None)
            .service_task("c", "C", None)
            .parallel_gateway("join", "Join", GatewayDirection::Converging)
            .exclusive_gateway("merge", "Merge")
            .end_event("e", "End")
            .connect("f1", "s", "x")
            .connect_when("f2", "x", "split", "feel", "both")
            .connect_when("f3", "x", "c", "feel", "one")
            .connect("f4", "split", "a")
            .connect("f5", "split", "b")
            .connect("f6", "a", "join")
            .connect("f7", "b", "join")
            .connect("f8", "join", "merge")
            .connect("f9", "c", "merge")
            .connect("f10", "merge", "e")
            .build()
            .unwrap();
        assert!(detect(&process).is_empty());
    }

    #[test]
    fn test_loop_without_exit_reported() {
        let process = ProcessBuilder::new("p", "Spin")
            .service_task("a", "A", None)
            .service_task("b", "B", None)
            .connect("f1", "a", "b")
            .connect("f2", "b", "a")
            .build()
            .unwrap();
        let deadlocks = detect(&process);
        assert_eq!(deadlocks.len(), 1);
        assert_eq!(deadlocks[0].kind, DeadlockKind::InfiniteLoop);
        assert_eq!(deadlocks[0].gateway_id, "a");
        assert_eq!(deadlocks[0].elements, vec!["a", "b"]);
    }
}
