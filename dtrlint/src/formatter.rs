//! Output formatters for detection reports

use anyhow::Result;
use colored::*;
use dtrcraft_core::{DetectionSummary, RecordReport, Severity};
use std::path::Path;

fn severity_badge(severity: Option<Severity>) -> ColoredString {
    match severity {
        Some(Severity::High) => "HIGH".red().bold(),
        Some(Severity::Medium) => "MED ".yellow().bold(),
        Some(Severity::Low) => "LOW ".blue().bold(),
        None => "OK  ".green().bold(),
    }
}

/// Print reports in human-readable format with colors, then the summary
pub fn print_human(file_path: &Path, reports: &[&RecordReport], summary: &DetectionSummary) {
    println!("{}", format!("Checking: {}", file_path.display()).bold());
    println!();

    if !summary.has_problems() {
        println!("{}", "✓ No DTR problems found!".green().bold());
    }

    for report in reports {
        println!("{} {}", severity_badge(report.severity), report.label());
        for problem in &report.problems {
            println!(
                "    [{}] {}",
                problem.rule_id.bright_black(),
                problem.message
            );
        }
    }

    if !reports.is_empty() {
        println!();
    }

    println!("{}", "Summary:".bold().underline());
    println!("  Records: {}", summary.total_records);
    println!("  Clean: {}", summary.clean_records.to_string().green());
    println!(
        "  With problems: {}",
        summary.problem_records.to_string().red()
    );

    if !summary.by_type.is_empty() {
        println!();
        println!("{}", "By problem type:".bold());
        for (problem_type, count) in &summary.by_type {
            println!("  {}: {}", problem_type.label(), count);
        }
    }
}

/// Print reports in JSON format
pub fn print_json(
    file_path: &Path,
    reports: &[&RecordReport],
    summary: &DetectionSummary,
) -> Result<()> {
    let output = serde_json::json!({
        "file": file_path.display().to_string(),
        "records": reports,
        "summary": summary,
    });

    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}
