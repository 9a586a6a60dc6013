//! Rules bind a scope predicate to a requirement condition.

use crate::condition::Condition;
use crate::descriptor::CodebaseSnapshot;
use crate::predicate::Predicate;
use crate::report::Violation;

/// How a rule interprets its requirement.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Polarity {
    /// Scope-matching classes must satisfy the condition; each
    /// unsatisfied class is a violation.
    Require,
    /// Scope-matching classes must *not* satisfy the condition; a
    /// satisfied condition is the violation.
    Forbid,
}

/// A single conformance rule.
#[derive(Debug, Clone)]
pub struct Rule {
    description: String,
    scope: Predicate,
    requirement: Condition,
    polarity: Polarity,
}

impl Rule {
    /// Creates a rule with `Require` polarity.
    #[must_use]
    pub fn require(description: impl Into<String>, scope: Predicate, requirement: Condition) -> Self {
        Self {
            description: description.into(),
            scope,
            requirement,
            polarity: Polarity::Require,
        }
    }

    /// Creates a rule with `Forbid` polarity.
    #[must_use]
    pub fn forbid(description: impl Into<String>, scope: Predicate, requirement: Condition) -> Self {
        Self {
            description: description.into(),
            scope,
            requirement,
            polarity: Polarity::Forbid,
        }
    }

    /// Returns the rule description.
    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Returns the scope predicate.
    #[must_use]
    pub fn scope(&self) -> &Predicate {
        &self.scope
    }

    /// Returns the requirement condition.
    #[must_use]
    pub fn requirement(&self) -> &Condition {
        &self.requirement
    }

    /// Returns the polarity.
    #[must_use]
    pub fn polarity(&self) -> Polarity {
        self.polarity
    }

    /// Evaluates the rule against every descriptor in the snapshot.
    ///
    /// A scope that matches nothing contributes zero violations. All
    /// reasons for one class collapse into a single violation, so each
    /// (rule, class) pair appears at most once in the output.
    #[must_use]
    pub fn evaluate(&self, snapshot: &CodebaseSnapshot) -> Vec<Violation> {
        let mut violations = Vec::new();

        for class in snapshot.classes() {
            if !self.scope.matches(class) {
                continue;
            }
            let reasons = self.requirement.check(class, snapshot);
            match self.polarity {
                Polarity::Require => {
                    if !reasons.is_empty() {
                        violations.push(Violation::new(
                            &self.description,
                            &class.qualified_name,
                            reasons.join("; "),
                        ));
                    }
                }
                Polarity::Forbid => {
                    if reasons.is_empty() {
                        violations.push(Violation::new(
                            &self.description,
                            &class.qualified_name,
                            format!("class satisfies forbidden condition: {}", self.requirement),
                        ));
                    }
                }
            }
        }

        violations
    }
}

/// Errors in rule set construction.
#[derive(Debug, Clone, thiserror::Error)]
pub enum RuleSetError {
    /// A rule has an empty description.
    #[error("rule at position {index} has an empty description")]
    EmptyDescription {
        /// Zero-based position of the offending rule.
        index: usize,
    },

    /// Two rules share a description.
    #[error("duplicate rule description `{description}`")]
    DuplicateDescription {
        /// The duplicated description.
        description: String,
    },
}

/// The complete, ordered collection of rules for one evaluation run.
///
/// Construction is the fail-fast point for malformed rule definitions;
/// after it succeeds, evaluation cannot raise an unrecoverable fault.
#[derive(Debug, Clone)]
pub struct RuleSet {
    rules: Vec<Rule>,
}

impl RuleSet {
    /// Validates and builds a rule set.
    ///
    /// # Errors
    ///
    /// Returns [`RuleSetError`] if any rule has an empty description or
    /// two rules share one (violation output would be ambiguous).
    pub fn new(rules: Vec<Rule>) -> Result<Self, RuleSetError> {
        let mut seen = std::collections::HashSet::new();
        for (index, rule) in rules.iter().enumerate() {
            if rule.description.is_empty() {
                return Err(RuleSetError::EmptyDescription { index });
            }
            if !seen.insert(rule.description.as_str()) {
                return Err(RuleSetError::DuplicateDescription {
                    description: rule.description.clone(),
                });
            }
        }
        Ok(Self { rules })
    }

    /// The rules in declaration order.
    #[must_use]
    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    /// Number of rules.
    #[must_use]
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    /// Whether the rule set is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::descriptor::ClassDescriptor;
    use crate::pattern::PackagePattern;

    fn snapshot(classes: Vec<ClassDescriptor>) -> CodebaseSnapshot {
        CodebaseSnapshot::new(classes).unwrap()
    }

    fn in_pkg(pattern: &str) -> Predicate {
        Predicate::in_package(PackagePattern::new(pattern).unwrap())
    }

    #[test]
    fn require_rule_flags_unsatisfied_class() {
        let rule = Rule::require(
            "application services must be suffixed",
            in_pkg("..application.service.."),
            Condition::have_suffix_among(["Service", "UseCase"]),
        );
        let snap = snapshot(vec![ClassDescriptor::new(
            "com.acme.application.service.OrderHandler",
        )]);

        let violations = rule.evaluate(&snap);
        assert_eq!(violations.len(), 1);
        assert_eq!(
            violations[0].offending_class,
            "com.acme.application.service.OrderHandler"
        );
    }

    #[test]
    fn forbid_rule_flags_satisfied_condition() {
        let mut annotated = ClassDescriptor::new("com.acme.domain.model.Order");
        annotated
            .annotations
            .insert("org.springframework.stereotype.Component".to_string());
        let rule = Rule::forbid(
            "domain must stay framework-free",
            in_pkg("..domain.."),
            Condition::be_annotated_with_any(["org.springframework.stereotype.Component"]),
        );
        let snap = snapshot(vec![
            annotated,
            ClassDescriptor::new("com.acme.domain.model.Money"),
        ]);

        let violations = rule.evaluate(&snap);
        assert_eq!(violations.len(), 1);
        assert_eq!(violations[0].offending_class, "com.acme.domain.model.Order");
        assert!(violations[0].reason.contains("forbidden condition"));
    }

    #[test]
    fn vacuous_scope_contributes_nothing() {
        let rule = Rule::require(
            "nothing matches",
            in_pkg("..nowhere.."),
            Condition::be_interface(),
        );
        let snap = snapshot(vec![ClassDescriptor::new("com.acme.domain.model.Order")]);
        assert!(rule.evaluate(&snap).is_empty());
    }

    #[test]
    fn multiple_reasons_collapse_into_one_violation() {
        let mut d = ClassDescriptor::new("com.acme.domain.model.Wallet");
        for name in ["setOwner", "setBalance"] {
            d.methods.push(crate::descriptor::MethodDescriptor {
                name: name.to_string(),
                parameter_types: vec![],
                is_static: false,
            });
        }
        let rule = Rule::require(
            "domain models must not have setters",
            in_pkg("..domain.model.."),
            Condition::not_have_method_name_matching(
                crate::pattern::NamePattern::new("set.*").unwrap(),
            ),
        );
        let snap = snapshot(vec![d]);

        let violations = rule.evaluate(&snap);
        assert_eq!(violations.len(), 1);
        assert!(violations[0].reason.contains("setOwner"));
        assert!(violations[0].reason.contains("setBalance"));
    }

    #[test]
    fn rule_set_rejects_empty_description() {
        let result = RuleSet::new(vec![Rule::require(
            "",
            in_pkg(".."),
            Condition::be_interface(),
        )]);
        assert!(matches!(result, Err(RuleSetError::EmptyDescription { index: 0 })));
    }

    #[test]
    fn rule_set_rejects_duplicate_descriptions() {
        let make = || Rule::require("dup", in_pkg(".."), Condition::be_interface());
        let result = RuleSet::new(vec![make(), make()]);
        assert!(matches!(
            result,
            Err(RuleSetError::DuplicateDescription { .. })
        ));
    }

    #[test]
    fn rule_set_preserves_declaration_order() {
        let set = RuleSet::new(vec![
            Rule::require("first", in_pkg(".."), Condition::be_interface()),
            Rule::require("second", in_pkg(".."), Condition::be_interface()),
        ])
        .unwrap();
        assert_eq!(set.len(), 2);
        assert_eq!(set.rules()[0].description(), "first");
        assert_eq!(set.rules()[1].description(), "second");
    }
}
