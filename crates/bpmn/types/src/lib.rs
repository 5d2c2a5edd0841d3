//! BPMN Process Model
//!
//! Typed representation of a business-process definition: a directed
//! graph of events, activities and gateways connected by sequence flows,
//! plus the auxiliary data objects and agent assignments that hang off
//! activities.
//!
//! # Key Concepts
//!
//! - **Process**: The root entity. Immutable once loaded; a fresh one is
//!   built for every validation or analysis pass.
//! - **FlowElement**: A borrowed view over any node that participates in
//!   the flow graph (event, activity or gateway).
//! - **SequenceFlow**: A directed connection between two nodes, optionally
//!   guarded by a condition expression.
//! - **AgentAssignment**: Who performs an activity. Only consulted by
//!   workload analysis, never by flow analysis.
//!
//! The model never stores `incoming`/`outgoing` flow lists. Connectivity
//! is derived separately by the `bpmn-graph` crate so the loaded document
//! stays exactly as the author wrote it.
//!
//! # Example
//!
//! ```rust
//! use bpmn_types::ProcessBuilder;
//!
//! let process = ProcessBuilder::new("order", "Order Handling")
//!     .start_event("start", "Received")
//!     .user_task("review", "Review Order", None)
//!     .end_event("end", "Done")
//!     .connect("f1", "start", "review")
//!     .connect("f2", "review", "end")
//!     .build()
//!     .unwrap();
//!
//! assert_eq!(process.node_count(), 3);
//! assert!(process.element("review").is_some());
//! ```

#![deny(unsafe_code)]

mod agent;
mod builder;
mod document;
mod elements;
mod errors;
mod node;
mod process;

pub use agent::*;
pub use builder::*;
pub use document::*;
pub use elements::*;
pub use errors::*;
pub use node::*;
pub use process::*;
