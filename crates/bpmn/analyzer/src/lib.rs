//! BPMN Graph Analysis
//!
//! Static analysis of a [`bpmn_types::Process`] over its derived
//! [`bpmn_graph::ProcessGraph`]. Every phase is a pure function of the
//! graph, so two runs over the same document agree exactly.
//!
//! # Phases
//!
//! - **Reachability**: breadth-first from start events forward and from
//!   end events backward. Nodes missed by the first pass are
//!   *unreachable*, nodes missed by the second are *dead ends*.
//! - **Loops**: iterative depth-first search; each back edge closes a
//!   [`Loop`]. A loop nobody can leave by a decision is an infinite loop.
//! - **Deadlocks**: parallel joins checked against the concurrent splits
//!   upstream of them, and exclusive merges checked for unsynchronized
//!   concurrent branches. See [`DeadlockKind`].
//! - **Paths**: bounded enumeration of simple start-to-end paths and the
//!   critical (longest) one.
//! - **Metrics**: cyclomatic complexity, depth, width and connectivity.
//! - **Agent workload**: tasks grouped by assigned agent.
//!
//! The analyzer never fails. A process without start or end events
//! yields empty sets, zero metrics and an [`AnalysisFinding`] saying so.
//!
//! # Example
//!
//! ```rust
//! use bpmn_analyzer::analyze;
//! use bpmn_types::ProcessBuilder;
//!
//! let process = ProcessBuilder::new("p", "Linear")
//!     .start_event("start", "Start")
//!     .service_task("task", "Task", None)
//!     .end_event("end", "End")
//!     .connect("flow1", "start", "task")
//!     .connect("flow2", "task", "end")
//!     .build()
//!     .unwrap();
//!
//! let result = analyze(&process);
//! assert_eq!(result.paths.path_count, 1);
//! assert_eq!(result.metrics.depth, 2);
//! assert!(result.deadlocks.is_empty());
//! ```

#![deny(unsafe_code)]

mod analyzer;
mod config;
mod cycles;
mod deadlock;
mod metrics;
mod paths;
mod reachability;
mod result;
mod workload;

pub use analyzer::*;
pub use config::*;
pub use cycles::Loop;
pub use deadlock::{Deadlock, DeadlockKind};
pub use metrics::{ElementCount, ProcessMetrics};
pub use paths::PathAnalysis;
pub use reachability::ReachabilityAnalysis;
pub use result::*;
pub use workload::AgentWorkload;
