//! Compiles structural rules: interface-only packages, package
//! whitelists, field immutability, and method-name bans.

use crate::config::{AllowedPackagesRule, ConformanceConfig, ImmutabilityMode};
use hexalint_core::{Condition, Predicate, Rule};
use tracing::debug;

fn whitelist_scope(rule: &AllowedPackagesRule) -> Predicate {
    let mut scope = super::layers::in_any(&rule.patterns);
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

/// Compiles structural rules in declaration order: interface-only,
/// then package whitelists, then immutability, then method bans.
pub fn compile(config: &ConformanceConfig) -> Vec<Rule> {
    let mut rules: Vec<Rule> = config
        .interface_only
        .iter()
        .map(|i| {
            Rule::require(
                i.name.clone(),
                super::layers::in_any(&i.patterns),
                Condition::be_interface(),
            )
        })
        .collect();

    rules.extend(config.allowed_packages.iter().map(|a| {
        Rule::require(
            a.name.clone(),
            whitelist_scope(a),
            Condition::reside_in_any_package(a.allowed.clone()),
        )
    }));

    rules.extend(config.immutable.iter().map(|i| {
        let condition = match i.mode {
            ImmutabilityMode::Final => Condition::have_only_final_fields(),
            ImmutabilityMode::FinalOrStatic => Condition::have_only_final_or_static_fields(),
        };
        Rule::require(i.name.clone(), super::layers::in_any(&i.patterns), condition)
    }));

    rules.extend(config.no_method_matching.iter().map(|m| {
        Rule::require(
            m.name.clone(),
            super::layers::in_any(&m.patterns),
            Condition::not_have_method_name_matching(m.pattern.clone()),
        )
    }));

    debug!(count = rules.len(), "compiled structural rules");
    rules
}
