//! BPMN Process Validation
//!
//! Rule-based structural and semantic checks over a
//! [`bpmn_types::Process`] and its derived connectivity.
//!
//! # Architecture
//!
//! 1. **ValidationRule** - Each rule implements this trait and inspects
//!    the [`bpmn_graph::ProcessGraph`].
//! 2. **Validator** - Builds the graph once, runs every rule and
//!    aggregates the findings. It never stops at the first failure.
//! 3. **ValidationResult** - Errors and warnings, plus a `valid` flag that
//!    is true exactly when there are no errors.
//!
//! Parse-level failures (unreadable file, no root `process` object) are
//! not findings: [`Validator::validate_document`] returns them as `Err`
//! before any rule runs.
//!
//! # Example
//!
//! ```rust
//! use bpmn_types::ProcessBuilder;
//! use bpmn_validator::Validator;
//!
//! let process = ProcessBuilder::new("p", "Broken")
//!     .start_event("start", "Start")
//!     .service_task("task", "Lonely", None)
//!     .end_event("end", "End")
//!     .connect("f1", "start", "end")
//!     .connect("f2", "task", "end")
//!     .build()
//!     .unwrap();
//!
//! let result = Validator::new().validate(&process);
//! assert!(!result.valid);
//! assert!(result.errors[0].message.contains("no incoming flow"));
//! ```

#![deny(unsafe_code)]

mod config;
mod issue;
mod rule;
pub mod rules;
mod validator;

pub use config::*;
pub use issue::*;
pub use rule::*;
pub use validator::*;
