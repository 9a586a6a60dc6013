//! Compiles required- and forbidden-annotation rules.

use crate::config::{AnnotationRule, ConformanceConfig};
use hexalint_core::{Condition, Predicate, Rule};
use tracing::debug;

fn scope_of(rule: &AnnotationRule) -> Predicate {
    let mut scope = super::layers::in_any(&rule.patterns);
    if !rule.with_suffix.is_empty() {
        let any_suffix = rule
            .with_suffix
            .iter()
            .map(|s| Predicate::has_suffix(s.clone()))
            .reduce(Predicate::or);
        if let Some(filter) = any_suffix {
            scope = scope.and(filter);
        }
    }
    scope
}

/// Compiles annotation rules: required ones first, then forbidden ones,
/// each in declaration order.
pub fn compile(config: &ConformanceConfig) -> Vec<Rule> {
    let mut rules: Vec<Rule> = config
        .require_annotation
        .iter()
        .map(|a| {
            Rule::require(
                a.name.clone(),
                scope_of(a),
                Condition::be_annotated_with_any(a.any_of.clone()),
            )
        })
        .collect();
    rules.extend(config.forbid_annotation.iter().map(|a| {
        Rule::forbid(
            a.name.clone(),
            scope_of(a),
            Condition::be_annotated_with_any(a.any_of.clone()),
        )
    }));
    debug!(count = rules.len(), "compiled annotation rules");
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

    fn annotated(name: &str, annotation: &str) -> ClassDescriptor {
        let mut d = ClassDescriptor::new(name);
        d.annotations.insert(annotation.to_string());
        d
    }

    #[test]
    fn required_annotation_flags_missing() {
        let rules = compile(&config(
            r#"
[[require-annotation]]
name = "controllers must be rest controllers"
packages = ["..infrastructure.adapter.."]
with_suffix = ["Controller"]
any_of = ["org.springframework.web.bind.annotation.RestController"]
"#,
        ));
        let snap = CodebaseSnapshot::new(vec![
            annotated(
                "com.acme.infrastructure.adapter.OrderController",
                "org.springframework.web.bind.annotation.RestController",
            ),
            ClassDescriptor::new("com.acme.infrastructure.adapter.PaymentController"),
            // Not suffixed, out of scope.
            ClassDescriptor::new("com.acme.infrastructure.adapter.OrderMapper"),
        ])
        .unwrap();

        let violations = rules[0].evaluate(&snap);
        assert_eq!(violations.len(), 1);
        assert_eq!(
            violations[0].offending_class,
            "com.acme.infrastructure.adapter.PaymentController"
        );
    }

    #[test]
    fn forbidden_annotation_flags_presence() {
        let rules = compile(&config(
            r#"
[[forbid-annotation]]
name = "domain must stay framework-free"
packages = ["..domain.."]
any_of = ["org.springframework.stereotype.Component", "org.springframework.stereotype.Service"]
"#,
        ));
        let snap = CodebaseSnapshot::new(vec![
            annotated(
                "com.acme.domain.model.Order",
                "org.springframework.stereotype.Component",
            ),
            ClassDescriptor::new("com.acme.domain.model.Money"),
        ])
        .unwrap();

        let violations = rules[0].evaluate(&snap);
        assert_eq!(violations.len(), 1);
        assert_eq!(violations[0].offending_class, "com.acme.domain.model.Order");
    }

    #[test]
    fn required_before_forbidden_in_output_order() {
        let rules = compile(&config(
            r#"
[[forbid-annotation]]
name = "forbidden"
packages = ["..domain.."]
any_of = ["x.Y"]

[[require-annotation]]
name = "required"
packages = ["..domain.."]
any_of = ["x.Z"]
"#,
        ));
        assert_eq!(rules[0].description(), "required");
        assert_eq!(rules[1].description(), "forbidden");
    }
}
