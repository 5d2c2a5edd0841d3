//! BPMN CLI - validate and analyze process documents
//!
//! - `bpmn validate <file>` runs the rule set and exits 1 on any error
//! - `bpmn analyze <file>` prints reachability, deadlock, path and
//!   complexity results
//!
//! Documents are JSON or YAML, chosen by file extension.

use clap::{Parser, Subcommand};
use std::process::ExitCode;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod commands;
mod config;
mod error;
mod output;

use config::CliConfig;
use error::CliResult;
use output::OutputFormat;

#[derive(Parser)]
#[command(name = "bpmn")]
#[command(about = "Validate and analyze BPMN process documents", long_about = None)]
#[command(version)]
struct Cli {
    /// Configuration file path
    #[arg(short, long, env = "BPMN_CONFIG", global = true)]
    config: Option<String>,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Check a process document for structural and semantic errors
    Validate {
        /// Process document (.json, .yaml or .yml)
        file: String,

        /// Output format
        #[arg(short, long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
    },

    /// Report reachability, deadlocks, paths and metrics
    Analyze {
        /// Process document (.json, .yaml or .yml)
        file: String,

        /// Output format
        #[arg(short, long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let filter = if cli.verbose { "debug" } else { "warn" };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| filter.into()),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .without_time()
                .with_writer(std::io::stderr),
        )
        .init();

    match run(cli) {
        Ok(code) => code,
        Err(e) => {
            output::print_error(&e.to_string());
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> CliResult<ExitCode> {
    let config = CliConfig::load(cli.config.as_deref())?;

    match cli.command {
        Commands::Validate { file, format } => commands::validate::execute(&file, format, &config),
        Commands::Analyze { file, format } => commands::analyze::execute(&file, format, &config),
    }
}
