//! Output formatting utilities

use crate::error::CliResult;
use bpmn_analyzer::AnalysisResult;
use bpmn_validator::ValidationResult;
use colored::*;
use serde::Serialize;
use std::fmt::Write;

/// Output format for CLI commands
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// Plain text listing
    #[default]
    Text,
    /// Pretty-printed JSON
    Json,
}

pub fn print_json<T: Serialize>(data: &T) -> CliResult<()> {
    println!("{}", serde_json::to_string_pretty(data)?);
    Ok(())
}

pub fn print_success(message: &str) {
    println!("{} {}", "✓".green(), message);
}

pub fn print_failure(message: &str) {
    println!("{} {}", "✗".red(), message);
}

/// Print an error message
pub fn print_error(message: &str) {
    eprintln!("{} {}", "✗".red(), message);
}

fn plural(n: usize, word: &str) -> String {
    if n == 1 {
        format!("{n} {word}")
    } else {
        format!("{n} {word}s")
    }
}

/// One-line verdict followed by every finding
pub fn render_validation(file: &str, result: &ValidationResult) -> (String, String) {
    let headline = format!(
        "{file}: {} ({}, {})",
        if result.valid { "valid" } else { "invalid" },
        plural(result.error_count(), "error"),
        plural(result.warning_count(), "warning"),
    );
    let mut body = String::new();
    for issue in result.issues() {
        let _ = writeln!(body, "  {issue}");
    }
    (headline, body)
}

fn list(ids: &[String]) -> String {
    if ids.is_empty() {
        "-".to_string()
    } else {
        ids.join(", ")
    }
}

pub fn render_analysis(result: &AnalysisResult) -> String {
    let summary = result.summary();
    let mut out = String::new();

    let _ = writeln!(out, "Process: {}", result.process_id);
    let _ = writeln!(out, "  Reachable:     {}", list(&summary.reachable));
    let _ = writeln!(out, "  Unreachable:   {}", list(&summary.unreachable));
    let _ = writeln!(out, "  Dead ends:     {}", list(&summary.dead_ends));
    let _ = writeln!(
        out,
        "  Paths:         {}{} (critical path {} flows)",
        summary.path_count,
        if result.paths.capped { "+" } else { "" },
        summary.critical_path_length
    );
    let _ = writeln!(
        out,
        "  Complexity:    {}  depth {}  width {}  connectivity {:.2}",
        summary.complexity, summary.depth, summary.width, summary.connectivity
    );

    if !summary.deadlocks.is_empty() {
        let _ = writeln!(out, "Deadlocks:");
        for deadlock in &summary.deadlocks {
            let _ = writeln!(
                out,
                "  {} at '{}': {}",
                deadlock.kind, deadlock.gateway_id, deadlock.detail
            );
        }
    }
    if !summary.agent_workload.is_empty() {
        let _ = writeln!(out, "Agent workload:");
        for (agent, count) in &summary.agent_workload {
            let _ = writeln!(out, "  {agent}: {}", plural(*count, "task"));
        }
    }
    if !result.findings.is_empty() {
        let _ = writeln!(out, "Findings:");
        for finding in &result.findings {
            let _ = writeln!(out, "  {finding}");
        }
    }
    out
}
