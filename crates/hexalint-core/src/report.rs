//! Violations and the evaluation report.

use serde::{Deserialize, Serialize};

/// A recorded failure of one class against one rule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Violation {
    /// Description of the violated rule.
    pub rule_description: String,
    /// Qualified name of the offending class.
    pub offending_class: String,
    /// Why the class violates the rule.
    pub reason: String,
}

impl Violation {
    /// Creates a new violation.
    #[must_use]
    pub fn new(
        rule_description: impl Into<String>,
        offending_class: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        Self {
            rule_description: rule_description.into(),
            offending_class: offending_class.into(),
            reason: reason.into(),
        }
    }
}

impl std::fmt::Display for Violation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} [{}] {}",
            self.offending_class, self.rule_description, self.reason
        )
    }
}

/// Result of evaluating a rule set against one snapshot.
///
/// Built fresh per evaluation and never partially mutated afterwards.
/// Violations are ordered by rule declaration order, then offending
/// class, so identical inputs always serialize to identical bytes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Report {
    /// Whether the run passed (no violations and not aborted).
    pub passed: bool,
    /// Whether the run was cancelled before all rules were applied.
    /// An aborted report never passes.
    pub aborted: bool,
    /// Number of rules in the evaluated set.
    pub rule_count: usize,
    /// Number of violations found.
    pub violation_count: usize,
    /// All violations, deterministically ordered.
    pub violations: Vec<Violation>,
}

impl Report {
    /// Builds a report from ordered violations.
    #[must_use]
    pub fn new(violations: Vec<Violation>, rule_count: usize, aborted: bool) -> Self {
        Self {
            passed: violations.is_empty() && !aborted,
            aborted,
            rule_count,
            violation_count: violations.len(),
            violations,
        }
    }

    /// Formats the report for CI-gate failure output.
    ///
    /// One line per violation plus a summary, suitable for `panic!()`
    /// in a `cargo test` gate.
    #[must_use]
    pub fn format_gate_report(&self) -> String {
        use std::fmt::Write;

        let mut out = String::new();
        let _ = writeln!(
            out,
            "\n=== hexalint: {} violation(s) across {} rule(s) ===\n",
            self.violation_count, self.rule_count
        );

        for v in &self.violations {
            let _ = writeln!(out, "rule: {}", v.rule_description);
            let _ = writeln!(out, "  class: {}", v.offending_class);
            let _ = writeln!(out, "  reason: {}", v.reason);
            let _ = writeln!(out);
        }

        if self.aborted {
            let _ = writeln!(out, "Evaluation was aborted before all rules were applied.");
        }

        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_report_passes() {
        let report = Report::new(vec![], 5, false);
        assert!(report.passed);
        assert_eq!(report.rule_count, 5);
        assert_eq!(report.violation_count, 0);
    }

    #[test]
    fn report_with_violations_fails() {
        let report = Report::new(
            vec![Violation::new("r", "a.Class", "bad edge")],
            1,
            false,
        );
        assert!(!report.passed);
        assert_eq!(report.violation_count, 1);
    }

    #[test]
    fn aborted_report_never_passes() {
        let report = Report::new(vec![], 3, true);
        assert!(!report.passed);
        assert!(report.aborted);
    }

    #[test]
    fn gate_report_lists_each_violation() {
        let report = Report::new(
            vec![
                Violation::new("domain must not depend on infrastructure", "a.One", "x"),
                Violation::new("ports must be interfaces", "b.Two", "y"),
            ],
            2,
            false,
        );
        let text = report.format_gate_report();
        assert!(text.contains("2 violation(s)"));
        assert!(text.contains("a.One"));
        assert!(text.contains("ports must be interfaces"));
    }

    #[test]
    fn violation_display_is_one_line() {
        let v = Violation::new("rule", "a.Class", "reason");
        assert_eq!(format!("{v}"), "a.Class [rule] reason");
    }
}
