//! Compiles naming-suffix rules.

use crate::config::{ConformanceConfig, NamingRule};
use hexalint_core::{Condition, Predicate, Rule};
use tracing::debug;

fn scope_of(rule: &NamingRule) -> Predicate {
    let mut scope = super::layers::in_any(&rule.patterns);
    if !rule.annotated_with.is_empty() {
        let any_annotation = rule
            .annotated_with
            .iter()
            .map(Predicate::annotated_with)
            .reduce(Predicate::or);
        if let Some(filter) = any_annotation {
            scope = scope.and(filter);
        }
    }
    if !rule.name_contains.is_empty() {
        let any_substring = rule
            .name_contains
            .iter()
            .map(Predicate::name_contains)
            .reduce(Predicate::or);
        if let Some(filter) = any_substring {
            scope = scope.and(filter);
        }
    }
    scope
}

fn condition_of(rule: &NamingRule) -> Condition {
    if rule.forbid {
        // Each suffix in the catalog is individually banned.
        let banned = rule
            .suffixes
            .iter()
            .map(Condition::not_have_suffix)
            .reduce(Condition::and);
        banned.unwrap_or_else(|| Condition::have_suffix_among(Vec::<String>::new()))
    } else {
        Condition::have_suffix_among(rule.suffixes.clone())
    }
}

/// Compiles all naming rules in declaration order.
pub fn compile(config: &ConformanceConfig) -> Vec<Rule> {
    let rules: Vec<Rule> = config
        .naming
        .iter()
        .map(|n| Rule::require(n.name.clone(), scope_of(n), condition_of(n)))
        .collect();
    debug!(count = rules.len(), "compiled naming rules");
    rules
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ConformanceConfig;
    use hexalint_core::{ClassDescriptor, CodebaseSnapshot};

    fn config(toml_str: &str) -> ConformanceConfig {
        ConformanceConfig::from_toml(toml_str).unwrap()
    }

    fn snapshot(names: &[&str]) -> CodebaseSnapshot {
        CodebaseSnapshot::new(names.iter().map(|n| ClassDescriptor::new(*n)).collect())
            .unwrap()
    }

    #[test]
    fn required_suffix_flags_mismatch() {
        let rules = compile(&config(
            r#"
[[naming]]
name = "application services must be suffixed"
packages = ["..application.service.."]
suffixes = ["ApplicationService", "Service", "UseCase"]
"#,
        ));
        let snap = snapshot(&[
            "com.acme.application.service.OrderHandler",
            "com.acme.application.service.OrderUseCase",
        ]);

        let violations = rules[0].evaluate(&snap);
        assert_eq!(violations.len(), 1);
        assert_eq!(
            violations[0].offending_class,
            "com.acme.application.service.OrderHandler"
        );
    }

    #[test]
    fn forbidden_suffixes_flag_each_banned_name() {
        let rules = compile(&config(
            r#"
[[naming]]
name = "domain models must not leak persistence names"
packages = ["..domain.model.."]
suffixes = ["Entity", "Dto"]
forbid = true
"#,
        ));
        let snap = snapshot(&[
            "com.acme.domain.model.OrderEntity",
            "com.acme.domain.model.Order",
        ]);

        let violations = rules[0].evaluate(&snap);
        assert_eq!(violations.len(), 1);
        assert_eq!(
            violations[0].offending_class,
            "com.acme.domain.model.OrderEntity"
        );
    }

    #[test]
    fn annotation_filter_narrows_scope() {
        let rules = compile(&config(
            r#"
[[naming]]
name = "repositories must be suffixed"
packages = ["..infrastructure.."]
suffixes = ["Repository"]
annotated_with = ["org.springframework.stereotype.Repository"]
"#,
        ));

        let mut annotated = ClassDescriptor::new("com.acme.infrastructure.persistence.OrderStore");
        annotated
            .annotations
            .insert("org.springframework.stereotype.Repository".to_string());
        let plain = ClassDescriptor::new("com.acme.infrastructure.persistence.OrderMapper");
        let snap = CodebaseSnapshot::new(vec![annotated, plain]).unwrap();

        let violations = rules[0].evaluate(&snap);
        assert_eq!(violations.len(), 1);
        assert_eq!(
            violations[0].offending_class,
            "com.acme.infrastructure.persistence.OrderStore"
        );
    }

    #[test]
    fn name_contains_filter_narrows_scope() {
        let rules = compile(&config(
            r#"
[[naming]]
name = "jpa classes must be suffixed"
packages = ["..infrastructure.."]
suffixes = ["JpaEntity"]
name_contains = ["Jpa"]
"#,
        ));
        let snap = snapshot(&[
            "com.acme.infrastructure.persistence.OrderJpaRecord",
            "com.acme.infrastructure.persistence.OrderMapper",
        ]);

        let violations = rules[0].evaluate(&snap);
        assert_eq!(violations.len(), 1);
        assert_eq!(
            violations[0].offending_class,
            "com.acme.infrastructure.persistence.OrderJpaRecord"
        );
    }
}
