//! `bpmn validate <file>`

use crate::config::CliConfig;
use crate::error::CliResult;
use crate::output::{self, OutputFormat};
use bpmn_validator::Validator;
use std::process::ExitCode;

/// Exit 0 when the process is valid, 1 when any error was found
pub fn execute(file: &str, format: OutputFormat, config: &CliConfig) -> CliResult<ExitCode> {
    let document = super::load(file)?;
    let result = Validator::with_config(config.validation.clone()).validate(&document.process);

    match format {
        OutputFormat::Json => output::print_json(&result)?,
        OutputFormat::Text => {
            let (headline, body) = output::render_validation(file, &result);
            if result.valid {
                output::print_success(&headline);
            } else {
                output::print_failure(&headline);
            }
            print!("{body}");
        }
    }

    Ok(if result.valid {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}
