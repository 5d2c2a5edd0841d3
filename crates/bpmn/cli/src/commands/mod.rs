//! Command implementations

pub mod analyze;
pub mod validate;

use crate::error::{CliError, CliResult};
use bpmn_types::ProcessDocument;

/// Load a document, naming the file in any failure
fn load(file: &str) -> CliResult<ProcessDocument> {
    ProcessDocument::from_path(file).map_err(|e| CliError::document(file, e))
}
