//! `bpmn analyze <file>`

use crate::config::CliConfig;
use crate::error::CliResult;
use crate::output::{self, OutputFormat};
use bpmn_analyzer::Analyzer;
use std::process::ExitCode;

/// Findings never change the exit code; only load failures do
pub fn execute(file: &str, format: OutputFormat, config: &CliConfig) -> CliResult<ExitCode> {
    let document = super::load(file)?;
    let result = Analyzer::new(config.analysis.clone()).analyze(&document.process);

    match format {
        OutputFormat::Json => output::print_json(&result.summary())?,
        OutputFormat::Text => print!("{}", output::render_analysis(&result)),
    }
    Ok(ExitCode::SUCCESS)
}
