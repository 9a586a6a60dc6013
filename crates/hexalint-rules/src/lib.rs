//! # hexalint-rules
//!
//! Declarative TOML configuration and rule compilers for the hexalint
//! engine. The configuration is deserialized into a DTO, validated
//! into a model with every error accumulated, and compiled into an
//! ordered [`RuleSet`] ready for evaluation.
//!
//! Rule families are compiled in a fixed order so reports stay stable
//! across runs: layer rules, naming rules, annotation rules, then
//! structural rules.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod annotations;
mod config;
mod config_dto;
mod layers;
mod naming;
mod structure;

pub use config::{
    AllowedPackagesRule, AnnotationRule, ConfigError, ConformanceConfig, ImmutabilityMode,
    ImmutableRule, InterfaceOnlyRule, InternalAccess, Layer, MethodBanRule, ModelError,
    NamingRule,
};
pub use config_dto::ConfigDto;

use hexalint_core::RuleSet;
use tracing::info;

/// Compiles a validated configuration into an ordered rule set.
///
/// # Errors
///
/// Returns [`ConfigError::RuleSet`] if the compiled rules collide on
/// descriptions, which can happen when two configured rules share a
/// name.
pub fn compile(config: &ConformanceConfig) -> Result<RuleSet, ConfigError> {
    let mut rules = layers::compile(config);
    rules.extend(naming::compile(config));
    rules.extend(annotations::compile(config));
    rules.extend(structure::compile(config));
    info!(rules = rules.len(), "compiled rule set");
    RuleSet::new(rules).map_err(ConfigError::from)
}

/// Parses, validates, and compiles a TOML configuration in one step.
///
/// # Errors
///
/// Returns [`ConfigError`] on parse, validation, or compilation
/// failure.
pub fn rule_set_from_toml(content: &str) -> Result<RuleSet, ConfigError> {
    let config = ConformanceConfig::from_toml(content)?;
    compile(&config)
}
