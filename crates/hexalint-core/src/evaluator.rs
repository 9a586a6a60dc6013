//! Evaluator: applies a rule set to a snapshot and produces a report.

use crate::descriptor::CodebaseSnapshot;
use crate::report::{Report, Violation};
use crate::rule::RuleSet;

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tracing::{debug, info};

/// Cooperative cancellation token for aborting a pathologically large
/// evaluation.
///
/// Cloned tokens share state. The evaluator checks the token between
/// rules; a cancelled run yields a partial report marked aborted.
#[derive(Debug, Clone, Default)]
pub struct CancelToken {
    cancelled: Arc<AtomicBool>,
}

impl CancelToken {
    /// Creates a fresh, uncancelled token.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Requests cancellation.
    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::Relaxed);
    }

    /// Whether cancellation has been requested.
    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::Relaxed)
    }
}

/// Runs rule sets against codebase snapshots.
///
/// Evaluation is a pure function of (rule set, snapshot): rules are
/// independent and read-only over the shared snapshot and its
/// precomputed indices, and results are sorted by rule declaration
/// order then offending class before the report is assembled, so the
/// output never depends on evaluation interleaving.
#[derive(Debug, Clone, Default)]
pub struct Evaluator {
    cancel: Option<CancelToken>,
}

impl Evaluator {
    /// Creates an evaluator without cancellation support.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Threads a cancellation token through evaluation.
    #[must_use]
    pub fn with_cancel_token(mut self, token: CancelToken) -> Self {
        self.cancel = Some(token);
        self
    }

    /// Evaluates every rule and assembles the report.
    #[must_use]
    pub fn evaluate(&self, rules: &RuleSet, snapshot: &CodebaseSnapshot) -> Report {
        info!(
            rules = rules.len(),
            classes = snapshot.len(),
            "starting evaluation"
        );

        let mut keyed: Vec<(usize, Violation)> = Vec::new();
        let mut aborted = false;

        for (index, rule) in rules.rules().iter().enumerate() {
            if self.cancel.as_ref().is_some_and(CancelToken::is_cancelled) {
                info!(applied = index, "evaluation cancelled, surfacing partial report");
                aborted = true;
                break;
            }

            let violations = rule.evaluate(snapshot);
            debug!(
                rule = rule.description(),
                violations = violations.len(),
                "rule evaluated"
            );
            keyed.extend(violations.into_iter().map(|v| (index, v)));
        }

        keyed.sort_by(|(ia, va), (ib, vb)| {
            ia.cmp(ib)
                .then_with(|| va.offending_class.cmp(&vb.offending_class))
        });

        let violations: Vec<Violation> = keyed.into_iter().map(|(_, v)| v).collect();
        info!(violations = violations.len(), aborted, "evaluation complete");

        Report::new(violations, rules.len(), aborted)
    }
}
