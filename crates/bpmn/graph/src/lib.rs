//! BPMN Connectivity
//!
//! Derives the flow graph of a [`bpmn_types::Process`]: which sequence
//! flows enter and leave every node. The process itself is never touched;
//! connectivity lives in a separate arena that borrows it.
//!
//! # Key Concepts
//!
//! - **ProcessGraph**: Arena of [`GraphNode`]s indexed by [`NodeIndex`]
//!   plus one [`Edge`] per sequence flow.
//! - **Dangling edge**: A flow whose source or target does not name a
//!   node. It stays in the edge list with an unresolved endpoint and is
//!   attached to no node; flagging it is the validator's job.
//! - **Idempotence**: [`ProcessGraph::connect`] clears every node's
//!   sequences before deriving them again, so re-running it never
//!   duplicates entries.
//!
//! # Example
//!
//! ```rust
//! use bpmn_graph::ProcessGraph;
//! use bpmn_types::ProcessBuilder;
//!
//! let process = ProcessBuilder::new("p", "Simple")
//!     .start_event("start", "Start")
//!     .end_event("end", "End")
//!     .connect("f1", "start", "end")
//!     .build()
//!     .unwrap();
//!
//! let graph = ProcessGraph::build(&process);
//! let start = graph.index_of("start").unwrap();
//! assert_eq!(graph.node(start).outgoing, vec!["f1"]);
//! ```

#![deny(unsafe_code)]

mod graph;
mod traversal;

pub use graph::*;
pub use traversal::*;
