//! List rules command implementation.

use anyhow::Result;
use hexalint_core::Polarity;
use std::path::Path;

/// Runs the list-rules command.
///
/// Prints every rule compiled from the configuration, in evaluation
/// order.
pub fn run(config_path: Option<&Path>) -> Result<()> {
    let rules = super::load_rules(config_path)?;

    println!("Compiled rules (in evaluation order):\n");
    println!("{:<8} Description", "Kind");
    println!("{}", "-".repeat(72));

    for rule in rules.rules() {
        let kind = match rule.polarity() {
            Polarity::Require => "require",
            Polarity::Forbid => "forbid",
        };
        println!("{:<8} {}", kind, rule.description());
    }

    println!("\n{} rule(s) total", rules.len());
    Ok(())
}
