//! Check command implementation.

use anyhow::{Context, Result};
use hexalint_core::{ClassDescriptor, CodebaseSnapshot, Evaluator};
use std::path::Path;

use crate::OutputFormat;

/// Runs the check command.
pub fn run(descriptors: &Path, format: OutputFormat, config_path: Option<&Path>) -> Result<()> {
    let rules = super::load_rules(config_path)?;

    let content = std::fs::read_to_string(descriptors)
        .with_context(|| format!("failed to read descriptors: {}", descriptors.display()))?;
    let classes: Vec<ClassDescriptor> = serde_json::from_str(&content)
        .with_context(|| format!("invalid descriptors: {}", descriptors.display()))?;
    let snapshot = CodebaseSnapshot::new(classes).context("invalid descriptors")?;

    tracing::info!(
        classes = snapshot.len(),
        rules = rules.len(),
        "evaluating {}",
        descriptors.display()
    );

    let report = Evaluator::new().evaluate(&rules, &snapshot);

    super::output::print(&report, format)?;

    if !report.passed {
        std::process::exit(1);
    }

    Ok(())
}
