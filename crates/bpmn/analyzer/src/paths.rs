//! Start-to-end path enumeration
//!
//! Simple paths only: a node already on the current path is never entered
//! again, so loops end the walk instead of unrolling. Enumeration stops
//! at `max_paths` paths, and no path is followed past `max_path_depth`
//! flows.
//!
//! Only nodes that can still reach an end event are entered, and the walk
//! as a whole may push at most `max_paths * max_path_depth` steps. Prefixes
//! that can never complete (an end reachable only through a node already
//! on the path) therefore cannot blow the walk up exponentially.

use crate::AnalyzerConfig;
use bpmn_graph::{Direction, NodeIndex, ProcessGraph};
use serde::Serialize;

#[derive(Clone, Debug, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PathAnalysis {
    /// Paths found, at most `max_paths`
    pub path_count: usize,
    /// Enumeration hit a configured bound, so counts are lower bounds
    pub capped: bool,
    /// First longest path, as node ids
    pub critical_path: Vec<String>,
    /// Flows on the critical path
    pub critical_path_length: usize,
    pub min_path_length: usize,
    pub average_path_length: f64,
}

/// Everything one enumeration pass learns
pub(crate) struct PathWalk {
    pub analysis: PathAnalysis,
    /// Widest diverging gateway on any enumerated path
    pub max_fan_out: usize,
}

struct Step {
    node: NodeIndex,
    successors: Vec<NodeIndex>,
    next: usize,
}

impl Step {
    fn enter(graph: &ProcessGraph<'_>, node: NodeIndex) -> Self {
        Self {
            node,
            successors: graph.successors(node),
            next: 0,
        }
    }
}

#[derive(Default)]
struct Tally {
    count: usize,
    total: usize,
    min: usize,
    critical: Vec<NodeIndex>,
    max_fan_out: usize,
}

impl Tally {
    fn record(&mut self, graph: &ProcessGraph<'_>, path: Vec<NodeIndex>) {
        let length = path.len() - 1;
        self.count += 1;
        self.total += length;
        self.min = if self.count == 1 { length } else { self.min.min(length) };

        let fan_out = path
            .iter()
            .filter(|&&n| graph.is_diverging(n))
            .map(|&n| graph.out_degree(n))
            .max()
            .unwrap_or(1);
        self.max_fan_out = self.max_fan_out.max(fan_out);

        if self.critical.is_empty() || length > self.critical.len() - 1 {
            self.critical = path;
        }
    }
}

pub(crate) fn analyze_paths(graph: &ProcessGraph<'_>, config: &AnalyzerConfig) -> PathWalk {
    let mut tally = Tally::default();
    let mut capped = false;

    let mut completes = vec![false; graph.node_count()];
    for node in graph.reachable_from(graph.end_events(), Direction::Backward) {
        completes[node.index()] = true;
    }
    let budget = config
        .max_paths
        .saturating_mul(config.max_path_depth)
        .max(1);
    let mut expansions = 0usize;

    'starts: for start in graph.start_events() {
        if !graph.is_canonical(start) || !completes[start.index()] {
            continue;
        }
        let mut on_path = vec![false; graph.node_count()];
        on_path[start.index()] = true;
        let mut stack = vec![Step::enter(graph, start)];

        while let Some(step) = stack.last_mut() {
            let Some(&next) = step.successors.get(step.next) else {
                on_path[step.node.index()] = false;
                stack.pop();
                continue;
            };
            step.next += 1;

            if on_path[next.index()] {
                continue;
            }
            if stack.len() > config.max_path_depth {
                capped = true;
                continue;
            }
            if graph.element(next).is_end() {
                if tally.count >= config.max_paths {
                    capped = true;
                    break 'starts;
                }
                let path = stack.iter().map(|s| s.node).chain([next]).collect();
                tally.record(graph, path);
                continue;
            }
            if !completes[next.index()] {
                continue;
            }
            if expansions >= budget {
                capped = true;
                break 'starts;
            }
            expansions += 1;
            on_path[next.index()] = true;
            stack.push(Step::enter(graph, next));
        }
    }

    if capped {
        tracing::warn!(
            paths = tally.count,
            expansions,
            max_paths = config.max_paths,
            max_path_depth = config.max_path_depth,
            "Path enumeration capped"
        );
    }

    let critical_path_length = tally.critical.len().saturating_sub(1);
    let average_path_length = if tally.count == 0 {
        0.0
    } else {
        tally.total as f64 / tally.count as f64
    };
    let analysis = PathAnalysis {
        path_count: tally.count,
        capped,
        critical_path: tally
            .critical
            .iter()
            .map(|&n| graph.id(n).to_string())
            .collect(),
        critical_path_length,
        min_path_length: tally.min,
        average_path_length,
    };
    tracing::debug!(
        paths = analysis.path_count,
        critical = analysis.critical_path_length,
        "Paths enumerated"
    );

    PathWalk {
        analysis,
        max_fan_out: tally.max_fan_out,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bpmn_types::{GatewayDirection, Process, ProcessBuilder};

    fn walk(process: &Process, config: &AnalyzerConfig) -> PathWalk {
        let graph = ProcessGraph::build(process);
        analyze_paths(&graph, config)
    }

    fn diamond() -> Process {
        ProcessBuilder::new("p", "Diamond")
            .start_event("s", "Start")
            .exclusive_gateway("x", "Choose")
            .service_task("short", "Short", None)
            .service_task("long1", "Long 1", None)
            .service_task("long2", "Long 2", None)
            .exclusive_gateway("m", "Merge")
            .end_event("e", "End")
            .connect("f1", "s", "x")
            .connect_when("f2", "x", "short", "feel", "quick")
            .connect_when("f3", "x", "long1", "feel", "thorough")
            .connect("f4", "long1", "long2")
            .connect("f5", "short", "m")
            .connect("f6", "long2", "m")
            .connect("f7", "m", "e")
            .build()
            .unwrap()
    }

    #[test]
    fn test_linear_path() {
        let process = ProcessBuilder::new("p", "Linear")
            .start_event("s", "Start")
            .service_task("t", "Task", None)
            .end_event("e", "End")
            .connect("f1", "s", "t")
            .connect("f2", "t", "e")
            .build()
            .unwrap();
        let result = walk(&process, &AnalyzerConfig::default());
        assert_eq!(result.analysis.path_count, 1);
        assert_eq!(result.analysis.critical_path, vec!["s", "t", "e"]);
        assert_eq!(result.analysis.critical_path_length, 2);
        assert_eq!(result.max_fan_out, 1);
        assert!(!result.analysis.capped);
    }

    #[test]
    fn test_critical_path_is_longest() {
        let result = walk(&diamond(), &AnalyzerConfig::default());
        let analysis = &result.analysis;
        assert_eq!(analysis.path_count, 2);
        assert_eq!(analysis.critical_path, vec!["s", "x", "long1", "long2", "m", "e"]);
        assert_eq!(analysis.critical_path_length, 5);
        assert_eq!(analysis.min_path_length, 4);
        assert_eq!(analysis.average_path_length, 4.5);
        assert_eq!(result.max_fan_out, 2);
    }

    #[test]
    fn test_path_count_cap() {
        let config = AnalyzerConfig::default().with_max_paths(1);
        let result = walk(&diamond(), &config);
        assert_eq!(result.analysis.path_count, 1);
        assert!(result.analysis.capped);
    }

    #[test]
    fn test_depth_cap() {
        let config = AnalyzerConfig::default().with_max_path_depth(4);
        let result = walk(&diamond(), &config);
        assert_eq!(result.analysis.path_count, 1);
        assert_eq!(result.analysis.critical_path_length, 4);
        assert!(result.analysis.capped);
    }

    #[test]
    fn test_loop_is_not_unrolled() {
        let process = ProcessBuilder::new("p", "Retry")
            .start_event("s", "Start")
            .service_task("work", "Work", None)
            .exclusive_gateway("ok", "Done?")
            .end_event("e", "End")
            .connect("f1", "s", "work")
            .connect("f2", "work", "ok")
            .connect_when("f3", "ok", "work", "feel", "retry")
            .connect("f4", "ok", "e")
            .build()
            .unwrap();
        let result = walk(&process, &AnalyzerConfig::default());
        assert_eq!(result.analysis.path_count, 1);
        assert!(!result.analysis.capped);
    }

    #[test]
    fn test_no_paths_without_end() {
        let process = ProcessBuilder::new("p", "Open")
            .start_event("s", "Start")
            .parallel_gateway("fork", "Fork", GatewayDirection::Diverging)
            .service_task("a", "A", None)
            .service_task("b", "B", None)
            .connect("f1", "s", "fork")
            .connect("f2", "fork", "a")
            .connect("f3", "fork", "b")
            .build()
            .unwrap();
        let result = walk(&process, &AnalyzerConfig::default());
        assert_eq!(result.analysis.path_count, 0);
        assert!(result.analysis.critical_path.is_empty());
        assert_eq!(result.analysis.critical_path_length, 0);
        assert_eq!(result.max_fan_out, 0);
    }

    /// Appends `n` exclusive diamonds after `from`; returns the last merge id
    fn diamonds(mut builder: ProcessBuilder, from: &str, n: usize) -> (ProcessBuilder, String) {
        let mut last = from.to_string();
        for i in 0..n {
            let merge = format!("d{i}");
            builder = builder
                .exclusive_gateway(format!("dx{i}"), "Split")
                .service_task(format!("da{i}"), "A", None)
                .service_task(format!("db{i}"), "B", None)
                .exclusive_gateway(merge.clone(), "Merge")
                .connect(format!("din{i}"), last.clone(), format!("dx{i}"))
                .connect(format!("dxa{i}"), format!("dx{i}"), format!("da{i}"))
                .connect(format!("dxb{i}"), format!("dx{i}"), format!("db{i}"))
                .connect(format!("dam{i}"), format!("da{i}"), merge.clone())
                .connect(format!("dbm{i}"), format!("db{i}"), merge.clone());
            last = merge;
        }
        (builder, last)
    }

    #[test]
    fn test_branches_without_end_are_pruned() {
        let builder = ProcessBuilder::new("p", "Dead branch")
            .start_event("s", "Start")
            .end_event("e", "End")
            .connect("direct", "s", "e");
        let (builder, _) = diamonds(builder, "s", 40);
        let process = builder.build().unwrap();

        let result = walk(&process, &AnalyzerConfig::default().with_max_paths(10));
        assert_eq!(result.analysis.path_count, 1);
        assert_eq!(result.analysis.critical_path, vec!["s", "e"]);
        assert!(!result.analysis.capped);
    }

    #[test]
    fn test_expansion_budget_caps_unfinishable_prefixes() {
        // every diamond node reaches the end only by going back through
        // the start, which is already on the path
        let builder = ProcessBuilder::new("p", "Loop back")
            .start_event("s", "Start")
            .end_event("e", "End")
            .connect("direct", "s", "e");
        let (builder, last) = diamonds(builder, "s", 30);
        let process = builder.connect("back", last, "s").build().unwrap();

        let result = walk(&process, &AnalyzerConfig::default().with_max_paths(10));
        assert_eq!(result.analysis.path_count, 1);
        assert!(result.analysis.capped);
    }

    #[test]
    fn test_many_paths_stay_bounded() {
        // ten diamonds in a row: 1024 paths
        let mut builder = ProcessBuilder::new("p", "Ladder").start_event("g0", "Start");
        for i in 0..10 {
            builder = builder
                .exclusive_gateway(format!("x{i}"), "Split")
                .service_task(format!("a{i}"), "A", None)
                .service_task(format!("b{i}"), "B", None)
                .exclusive_gateway(format!("g{}", i + 1), "Merge")
                .connect(format!("in{i}"), format!("g{i}"), format!("x{i}"))
                .connect(format!("xa{i}"), format!("x{i}"), format!("a{i}"))
                .connect(format!("xb{i}"), format!("x{i}"), format!("b{i}"))
                .connect(format!("am{i}"), format!("a{i}"), format!("g{}", i + 1))
                .connect(format!("bm{i}"), format!("b{i}"), format!("g{}", i + 1));
        }
        let process = builder
            .end_event("e", "End")
            .connect("out", "g10", "e")
            .build()
            .unwrap();

        let result = walk(&process, &AnalyzerConfig::default().with_max_paths(100));
        assert_eq!(result.analysis.path_count, 100);
        assert!(result.analysis.capped);

        let result = walk(&process, &AnalyzerConfig::default().with_max_paths(2000));
        assert_eq!(result.analysis.path_count, 1024);
        assert!(!result.analysis.capped);
    }
}
