//! TOML deserialization types (DTO layer).
//!
//! These types exist solely for serde deserialization. They are
//! converted to the validated configuration model in [`crate::config`].

use serde::Deserialize;

/// Raw TOML representation of a conformance configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ConfigDto {
    /// Root package prefix joined onto relative package patterns.
    #[serde(default)]
    pub root_package: Option<String>,

    /// Whether to generate directional-access rules for every layer.
    #[serde(default)]
    pub strict_layer_access: bool,

    /// Ordered layer definitions.
    #[serde(default)]
    pub layers: Vec<LayerDto>,

    /// Naming-suffix rules.
    #[serde(default)]
    pub naming: Vec<NamingDto>,

    /// Required-annotation rules.
    #[serde(rename = "require-annotation", default)]
    pub require_annotation: Vec<AnnotationDto>,

    /// Forbidden-annotation rules.
    #[serde(rename = "forbid-annotation", default)]
    pub forbid_annotation: Vec<AnnotationDto>,

    /// Interface-only package rules.
    #[serde(rename = "interface-only", default)]
    pub interface_only: Vec<InterfaceOnlyDto>,

    /// Package-structure whitelist rules.
    #[serde(rename = "allowed-packages", default)]
    pub allowed_packages: Vec<AllowedPackagesDto>,

    /// Immutability rules.
    #[serde(default)]
    pub immutable: Vec<ImmutableDto>,

    /// Method-name ban rules.
    #[serde(rename = "no-method-matching", default)]
    pub no_method_matching: Vec<MethodBanDto>,
}

/// TOML representation of an architecture layer.
#[derive(Debug, Clone, Deserialize)]
pub struct LayerDto {
    /// Layer name (e.g. "domain").
    pub name: String,
    /// Package patterns belonging to this layer.
    pub packages: Vec<String>,
    /// Centrality order; lower means more central/inner.
    pub order: u32,
    /// Absolute package prefixes this layer may depend on outside the
    /// scanned codebase. When present, an allow-list rule is generated.
    #[serde(default)]
    pub allowed_external: Vec<String>,
    /// Implementation-detail sub-packages with restricted reachability.
    #[serde(default)]
    pub internal: Option<InternalDto>,
}

/// Restricted sub-packages of a layer (e.g. adapters).
#[derive(Debug, Clone, Deserialize)]
pub struct InternalDto {
    /// Package patterns of the internal sub-packages.
    pub packages: Vec<String>,
    /// Package patterns that may reference the internals.
    pub accessible_from: Vec<String>,
}

/// TOML representation of a naming-suffix rule.
#[derive(Debug, Clone, Deserialize)]
pub struct NamingDto {
    /// Rule description shown in violations.
    pub name: String,
    /// Package patterns selecting the scope.
    pub packages: Vec<String>,
    /// Suffix catalog.
    pub suffixes: Vec<String>,
    /// Optional scope filter: any of these annotations present.
    #[serde(default)]
    pub annotated_with: Vec<String>,
    /// Optional scope filter: simple name contains any of these.
    #[serde(default)]
    pub name_contains: Vec<String>,
    /// When true, the suffixes are forbidden rather than required.
    #[serde(default)]
    pub forbid: bool,
}

/// TOML representation of an annotation rule.
#[derive(Debug, Clone, Deserialize)]
pub struct AnnotationDto {
    /// Rule description shown in violations.
    pub name: String,
    /// Package patterns selecting the scope.
    pub packages: Vec<String>,
    /// Annotation catalog (any-of semantics).
    pub any_of: Vec<String>,
    /// Optional scope filter: simple name ends with any of these.
    #[serde(default)]
    pub with_suffix: Vec<String>,
}

/// TOML representation of an interface-only package rule.
#[derive(Debug, Clone, Deserialize)]
pub struct InterfaceOnlyDto {
    /// Rule description shown in violations.
    pub name: String,
    /// Package patterns selecting the scope.
    pub packages: Vec<String>,
}

/// TOML representation of a package-structure whitelist rule.
#[derive(Debug, Clone, Deserialize)]
pub struct AllowedPackagesDto {
    /// Rule description shown in violations.
    pub name: String,
    /// Package patterns selecting the scope.
    pub packages: Vec<String>,
    /// Packages the scoped classes must reside in.
    pub allowed: Vec<String>,
    /// Optional scope filter: simple name contains any of these.
    #[serde(default)]
    pub name_contains: Vec<String>,
    /// Optional scope filter: simple name ends with any of these.
    #[serde(default)]
    pub with_suffix: Vec<String>,
}

/// TOML representation of an immutability rule.
#[derive(Debug, Clone, Deserialize)]
pub struct ImmutableDto {
    /// Rule description shown in violations.
    pub name: String,
    /// Package patterns selecting the scope.
    pub packages: Vec<String>,
    /// `final-or-static` (classic, lax) or `final` (strict).
    #[serde(default = "default_immutable_mode")]
    pub mode: String,
}

/// TOML representation of a method-name ban.
#[derive(Debug, Clone, Deserialize)]
pub struct MethodBanDto {
    /// Rule description shown in violations.
    pub name: String,
    /// Package patterns selecting the scope.
    pub packages: Vec<String>,
    /// Anchored regex over method names.
    pub pattern: String,
}

fn default_immutable_mode() -> String {
    "final-or-static".to_string()
}
