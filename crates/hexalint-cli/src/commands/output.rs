//! Shared output formatting for evaluation reports.

use anyhow::Result;
use hexalint_core::Report;

use crate::OutputFormat;

/// Print an evaluation report in the specified format.
pub fn print(report: &Report, format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Text => print_text(report),
        OutputFormat::Json => return print_json(report),
        OutputFormat::Compact => print_compact(report),
    }
    Ok(())
}

fn print_text(report: &Report) {
    for violation in &report.violations {
        println!("rule: {}", violation.rule_description);
        println!("  class: {}", violation.offending_class);
        println!("  \x1b[31mviolation\x1b[0m: {}", violation.reason);
        println!();
    }

    let summary_color = if report.passed { "\x1b[32m" } else { "\x1b[31m" };
    println!(
        "{}Found {} violation(s) across {} rule(s)\x1b[0m",
        summary_color, report.violation_count, report.rule_count
    );

    if report.aborted {
        println!("\x1b[33mEvaluation was aborted before all rules were applied.\x1b[0m");
    }
}

fn print_json(report: &Report) -> Result<()> {
    let json = serde_json::to_string_pretty(report)?;
    println!("{json}");
    Ok(())
}

fn print_compact(report: &Report) {
    for violation in &report.violations {
        println!("{violation}");
    }
}
