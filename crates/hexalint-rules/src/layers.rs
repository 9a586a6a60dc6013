//! Compiles layer definitions into dependency-direction rules.
//!
//! Layer order encodes centrality: lower order is more central. Four
//! rule families are derived from the validated layers, in this order:
//!
//! 1. Outward isolation, pairwise: for every inner/outer pair, the
//!    inner layer must not depend on the outer one.
//! 2. External allow-lists: a layer with `allowed_external` may only
//!    depend on itself, more central layers, and the listed prefixes.
//! 3. Directional access (only with `strict_layer_access`): a layer may
//!    only be referenced by layers at its own order or further out.
//! 4. Internal reachability: a layer's internal sub-packages may only
//!    be referenced from their `accessible_from` packages.

use crate::config::{ConformanceConfig, Layer};
use hexalint_core::{Condition, PackagePattern, Predicate, Rule};
use tracing::debug;

/// Builds a scope predicate matching any of the patterns.
pub(crate) fn in_any(patterns: &[PackagePattern]) -> Predicate {
    let mut parts = patterns
        .iter()
        .map(|p| Predicate::in_package(p.clone()))
        .collect::<Vec<_>>();
    if parts.len() == 1 {
        parts.remove(0)
    } else {
        Predicate::Or(parts)
    }
}

fn outward_isolation(layers: &[Layer]) -> Vec<Rule> {
    let mut rules = Vec::new();
    for inner in layers {
        for outer in layers {
            if inner.order >= outer.order {
                continue;
            }
            rules.push(Rule::require(
                format!("{} must not depend on {}", inner.name, outer.name),
                in_any(&inner.patterns),
                Condition::not_depend_on(in_any(&outer.patterns)),
            ));
        }
    }
    rules
}

fn external_allow_lists(layers: &[Layer]) -> Vec<Rule> {
    layers
        .iter()
        .filter(|layer| !layer.allowed_external.is_empty())
        .map(|layer| {
            // Self plus every layer at the same or a more central
            // order, plus the external prefixes.
            let mut allowed: Vec<PackagePattern> = layers
                .iter()
                .filter(|other| other.order <= layer.order)
                .flat_map(|other| other.patterns.iter().cloned())
                .collect();
            allowed.extend(layer.allowed_external.iter().cloned());
            Rule::require(
                format!("{} may only depend on permitted packages", layer.name),
                in_any(&layer.patterns),
                Condition::only_depend_on_packages(allowed),
            )
        })
        .collect()
}

fn directional_access(layers: &[Layer]) -> Vec<Rule> {
    layers
        .iter()
        .map(|layer| {
            let allowed: Vec<PackagePattern> = layers
                .iter()
                .filter(|other| other.order >= layer.order)
                .flat_map(|other| other.patterns.iter().cloned())
                .collect();
            Rule::require(
                format!("{} may only be accessed from outer layers", layer.name),
                in_any(&layer.patterns),
                Condition::only_be_referenced_by(allowed),
            )
        })
        .collect()
}

fn internal_reachability(layers: &[Layer]) -> Vec<Rule> {
    layers
        .iter()
        .filter_map(|layer| layer.internal.as_ref().map(|i| (layer, i)))
        .map(|(layer, internal)| {
            Rule::require(
                format!(
                    "{} internals may only be accessed from permitted packages",
                    layer.name
                ),
                in_any(&internal.patterns),
                Condition::only_be_referenced_by(internal.accessible_from.clone()),
            )
        })
        .collect()
}

/// Compiles all layer-derived rules in deterministic order.
pub fn compile(config: &ConformanceConfig) -> Vec<Rule> {
    let mut rules = outward_isolation(&config.layers);
    rules.extend(external_allow_lists(&config.layers));
    if config.strict_layer_access {
        rules.extend(directional_access(&config.layers));
    }
    rules.extend(internal_reachability(&config.layers));
    debug!(count = rules.len(), "compiled layer rules");
    rules
}
