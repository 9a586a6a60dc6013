//! Validated conformance configuration.
//!
//! The raw DTO ([`crate::config_dto`]) is converted here into a model
//! whose patterns are compiled and whose cross-references are checked.
//! All errors are accumulated and reported together, before any
//! evaluation runs.
//!
//! Package patterns in `packages`, `allowed`, and `accessible_from`
//! fields are joined onto `root_package` unless they already start
//! with `..`; patterns in `allowed_external` are taken as written.

use crate::config_dto::{ConfigDto, InternalDto};
use hexalint_core::{NamePattern, PackagePattern, PatternError};
use std::path::PathBuf;

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// IO error reading config file.
    #[error("failed to read config file {path}: {source}")]
    Io {
        /// Path that failed to read.
        path: PathBuf,
        /// Underlying IO error.
        source: std::io::Error,
    },

    /// Parse error in config file.
    #[error("failed to parse config: {message}")]
    Parse {
        /// Parse error message.
        message: String,
    },

    /// The configuration parsed but is semantically invalid.
    #[error("invalid configuration:\n{}", format_model_errors(.errors))]
    Invalid {
        /// All accumulated validation errors.
        errors: Vec<ModelError>,
    },

    /// The compiled rules failed rule-set validation.
    #[error("invalid rule set: {source}")]
    RuleSet {
        /// Underlying rule-set error.
        #[from]
        source: hexalint_core::RuleSetError,
    },
}

fn format_model_errors(errors: &[ModelError]) -> String {
    errors
        .iter()
        .map(|e| format!("  - {e}"))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Semantic errors in configuration content.
#[derive(Debug, Clone, thiserror::Error)]
pub enum ModelError {
    /// Two layers share a name.
    #[error("duplicate layer name `{name}`")]
    DuplicateLayerName {
        /// The duplicated name.
        name: String,
    },

    /// Two layers share an order value (ordering must be total).
    #[error("layers `{first}` and `{second}` share order {order}")]
    DuplicateLayerOrder {
        /// The shared order value.
        order: u32,
        /// First layer with this order.
        first: String,
        /// Second layer with this order.
        second: String,
    },

    /// A rule declares no package patterns.
    #[error("{context}: package list must not be empty")]
    EmptyPackageList {
        /// Which rule is affected.
        context: String,
    },

    /// A naming rule declares no suffixes.
    #[error("{context}: suffix catalog must not be empty")]
    EmptySuffixCatalog {
        /// Which rule is affected.
        context: String,
    },

    /// An annotation rule declares no annotation names.
    #[error("{context}: annotation catalog must not be empty")]
    EmptyAnnotationCatalog {
        /// Which rule is affected.
        context: String,
    },

    /// A pattern failed to compile.
    #[error("{context}: {source}")]
    Pattern {
        /// Which rule the pattern belongs to.
        context: String,
        /// Underlying pattern error.
        source: PatternError,
    },

    /// An immutability rule names an unknown mode.
    #[error("{context}: unknown immutability mode `{mode}` (expected `final` or `final-or-static`)")]
    UnknownImmutabilityMode {
        /// Which rule is affected.
        context: String,
        /// The unknown mode string.
        mode: String,
    },
}

/// A validated architecture layer.
#[derive(Debug, Clone)]
pub struct Layer {
    /// Layer name.
    pub name: String,
    /// Compiled package patterns.
    pub patterns: Vec<PackagePattern>,
    /// Centrality order; lower is more central.
    pub order: u32,
    /// External prefixes this layer may depend on.
    pub allowed_external: Vec<PackagePattern>,
    /// Restricted implementation-detail sub-packages.
    pub internal: Option<InternalAccess>,
}

/// Restricted reachability for a layer's internal sub-packages.
#[derive(Debug, Clone)]
pub struct InternalAccess {
    /// Patterns of the internal sub-packages.
    pub patterns: Vec<PackagePattern>,
    /// Patterns allowed to reference the internals.
    pub accessible_from: Vec<PackagePattern>,
}

/// A validated naming-suffix rule.
#[derive(Debug, Clone)]
pub struct NamingRule {
    /// Rule description.
    pub name: String,
    /// Scope patterns.
    pub patterns: Vec<PackagePattern>,
    /// Suffix catalog.
    pub suffixes: Vec<String>,
    /// Scope filter: any of these annotations present.
    pub annotated_with: Vec<String>,
    /// Scope filter: simple name contains any of these.
    pub name_contains: Vec<String>,
    /// Whether the suffixes are forbidden.
    pub forbid: bool,
}

/// A validated annotation rule.
#[derive(Debug, Clone)]
pub struct AnnotationRule {
    /// Rule description.
    pub name: String,
    /// Scope patterns.
    pub patterns: Vec<PackagePattern>,
    /// Annotation catalog.
    pub any_of: Vec<String>,
    /// Scope filter: simple name ends with any of these.
    pub with_suffix: Vec<String>,
}

/// A validated interface-only rule.
#[derive(Debug, Clone)]
pub struct InterfaceOnlyRule {
    /// Rule description.
    pub name: String,
    /// Scope patterns.
    pub patterns: Vec<PackagePattern>,
}

/// A validated package-structure whitelist rule.
#[derive(Debug, Clone)]
pub struct AllowedPackagesRule {
    /// Rule description.
    pub name: String,
    /// Scope patterns.
    pub patterns: Vec<PackagePattern>,
    /// Packages the scoped classes must reside in.
    pub allowed: Vec<PackagePattern>,
    /// Scope filter: simple name contains any of these.
    pub name_contains: Vec<String>,
    /// Scope filter: simple name ends with any of these.
    pub with_suffix: Vec<String>,
}

/// Field immutability strictness.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImmutabilityMode {
    /// Every field must be final.
    Final,
    /// Every field must be final or static. The classic lax rule: a
    /// mutable static field passes.
    FinalOrStatic,
}

/// A validated immutability rule.
#[derive(Debug, Clone)]
pub struct ImmutableRule {
    /// Rule description.
    pub name: String,
    /// Scope patterns.
    pub patterns: Vec<PackagePattern>,
    /// Strictness mode.
    pub mode: ImmutabilityMode,
}

/// A validated method-name ban.
#[derive(Debug, Clone)]
pub struct MethodBanRule {
    /// Rule description.
    pub name: String,
    /// Scope patterns.
    pub patterns: Vec<PackagePattern>,
    /// Forbidden method-name pattern.
    pub pattern: NamePattern,
}

/// The complete validated configuration consumed by the rule compilers.
#[derive(Debug, Clone)]
pub struct ConformanceConfig {
    /// Whether directional-access rules are generated per layer.
    pub strict_layer_access: bool,
    /// Layers sorted by ascending order.
    pub layers: Vec<Layer>,
    /// Naming rules in declaration order.
    pub naming: Vec<NamingRule>,
    /// Required-annotation rules.
    pub require_annotation: Vec<AnnotationRule>,
    /// Forbidden-annotation rules.
    pub forbid_annotation: Vec<AnnotationRule>,
    /// Interface-only rules.
    pub interface_only: Vec<InterfaceOnlyRule>,
    /// Package-structure whitelist rules.
    pub allowed_packages: Vec<AllowedPackagesRule>,
    /// Immutability rules.
    pub immutable: Vec<ImmutableRule>,
    /// Method-name bans.
    pub no_method_matching: Vec<MethodBanRule>,
}

impl ConformanceConfig {
    /// Loads and validates configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if the file cannot be read, parsed, or
    /// validated.
    pub fn from_file(path: &std::path::Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;
        Self::from_toml(&content)
    }

    /// Parses and validates configuration from a TOML string.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if the TOML is invalid or validation
    /// fails.
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        let dto: ConfigDto = toml::from_str(content).map_err(|e| ConfigError::Parse {
            message: e.to_string(),
        })?;
        Self::from_dto(dto)
    }

    /// Validates a raw DTO into the configuration model.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] with every accumulated
    /// [`ModelError`].
    pub fn from_dto(dto: ConfigDto) -> Result<Self, ConfigError> {
        let mut errors = Vec::new();
        let root = dto.root_package.unwrap_or_default();

        let mut layers = Vec::new();
        for layer in &dto.layers {
            let context = format!("layer `{}`", layer.name);
            let patterns = compile_scoped(&root, &layer.packages, &context, &mut errors);
            let allowed_external = compile_absolute(&layer.allowed_external, &context, &mut errors);
            let internal = layer
                .internal
                .as_ref()
                .and_then(|i| compile_internal(&root, i, &context, &mut errors));
            layers.push(Layer {
                name: layer.name.clone(),
                patterns,
                order: layer.order,
                allowed_external,
                internal,
            });
        }
        layers.sort_by_key(|l| l.order);

        for pair in layers.windows(2) {
            if pair[0].order == pair[1].order {
                errors.push(ModelError::DuplicateLayerOrder {
                    order: pair[0].order,
                    first: pair[0].name.clone(),
                    second: pair[1].name.clone(),
                });
            }
        }
        let mut names = std::collections::HashSet::new();
        for layer in &layers {
            if !names.insert(layer.name.as_str()) {
                errors.push(ModelError::DuplicateLayerName {
                    name: layer.name.clone(),
                });
            }
        }

        let naming = dto
            .naming
            .iter()
            .map(|n| {
                let context = format!("naming rule `{}`", n.name);
                if n.suffixes.is_empty() {
                    errors.push(ModelError::EmptySuffixCatalog {
                        context: context.clone(),
                    });
                }
                NamingRule {
                    name: n.name.clone(),
                    patterns: compile_scoped(&root, &n.packages, &context, &mut errors),
                    suffixes: n.suffixes.clone(),
                    annotated_with: n.annotated_with.clone(),
                    name_contains: n.name_contains.clone(),
                    forbid: n.forbid,
                }
            })
            .collect();

        let mut compile_annotations = |rules: &[crate::config_dto::AnnotationDto]| {
            rules
                .iter()
                .map(|a| {
                    let context = format!("annotation rule `{}`", a.name);
                    if a.any_of.is_empty() {
                        errors.push(ModelError::EmptyAnnotationCatalog {
                            context: context.clone(),
                        });
                    }
                    AnnotationRule {
                        name: a.name.clone(),
                        patterns: compile_scoped(&root, &a.packages, &context, &mut errors),
                        any_of: a.any_of.clone(),
                        with_suffix: a.with_suffix.clone(),
                    }
                })
                .collect::<Vec<_>>()
        };
        let require_annotation = compile_annotations(&dto.require_annotation);
        let forbid_annotation = compile_annotations(&dto.forbid_annotation);

        let interface_only = dto
            .interface_only
            .iter()
            .map(|i| {
                let context = format!("interface-only rule `{}`", i.name);
                InterfaceOnlyRule {
                    name: i.name.clone(),
                    patterns: compile_scoped(&root, &i.packages, &context, &mut errors),
                }
            })
            .collect();

        let allowed_packages = dto
            .allowed_packages
            .iter()
            .map(|a| {
                let context = format!("allowed-packages rule `{}`", a.name);
                let allowed_context = format!("allowed list of {context}");
                AllowedPackagesRule {
                    name: a.name.clone(),
                    patterns: compile_scoped(&root, &a.packages, &context, &mut errors),
                    allowed: compile_scoped(&root, &a.allowed, &allowed_context, &mut errors),
                    name_contains: a.name_contains.clone(),
                    with_suffix: a.with_suffix.clone(),
                }
            })
            .collect();

        let immutable = dto
            .immutable
            .iter()
            .map(|i| {
                let context = format!("immutable rule `{}`", i.name);
                let mode = match i.mode.as_str() {
                    "final" => ImmutabilityMode::Final,
                    "final-or-static" => ImmutabilityMode::FinalOrStatic,
                    other => {
                        errors.push(ModelError::UnknownImmutabilityMode {
                            context: context.clone(),
                            mode: other.to_string(),
                        });
                        ImmutabilityMode::FinalOrStatic
                    }
                };
                ImmutableRule {
                    name: i.name.clone(),
                    patterns: compile_scoped(&root, &i.packages, &context, &mut errors),
                    mode,
                }
            })
            .collect();

        let no_method_matching = dto
            .no_method_matching
            .iter()
            .filter_map(|m| {
                let context = format!("no-method-matching rule `{}`", m.name);
                let patterns = compile_scoped(&root, &m.packages, &context, &mut errors);
                match NamePattern::new(&m.pattern) {
                    Ok(pattern) => Some(MethodBanRule {
                        name: m.name.clone(),
                        patterns,
                        pattern,
                    }),
                    Err(source) => {
                        errors.push(ModelError::Pattern { context, source });
                        None
                    }
                }
            })
            .collect();

        if errors.is_empty() {
            Ok(Self {
                strict_layer_access: dto.strict_layer_access,
                layers,
                naming,
                require_annotation,
                forbid_annotation,
                interface_only,
                allowed_packages,
                immutable,
                no_method_matching,
            })
        } else {
            Err(ConfigError::Invalid { errors })
        }
    }
}

/// Joins a relative pattern onto the root package. Patterns starting
/// with `..` are taken as written.
fn resolve(root: &str, raw: &str) -> String {
    if root.is_empty() || raw.starts_with("..") {
        raw.to_string()
    } else {
        format!("{root}.{raw}")
    }
}

fn compile_scoped(
    root: &str,
    raw: &[String],
    context: &str,
    errors: &mut Vec<ModelError>,
) -> Vec<PackagePattern> {
    if raw.is_empty() {
        errors.push(ModelError::EmptyPackageList {
            context: context.to_string(),
        });
        return Vec::new();
    }
    raw.iter()
        .filter_map(|p| {
            PackagePattern::new(&resolve(root, p))
                .map_err(|source| {
                    errors.push(ModelError::Pattern {
                        context: context.to_string(),
                        source,
                    });
                })
                .ok()
        })
        .collect()
}

fn compile_absolute(
    raw: &[String],
    context: &str,
    errors: &mut Vec<ModelError>,
) -> Vec<PackagePattern> {
    raw.iter()
        .filter_map(|p| {
            PackagePattern::new(p)
                .map_err(|source| {
                    errors.push(ModelError::Pattern {
                        context: context.to_string(),
                        source,
                    });
                })
                .ok()
        })
        .collect()
}

fn compile_internal(
    root: &str,
    dto: &InternalDto,
    context: &str,
    errors: &mut Vec<ModelError>,
) -> Option<InternalAccess> {
    let patterns = compile_scoped(root, &dto.packages, context, errors);
    let accessible_from = compile_absolute(
        &dto.accessible_from
            .iter()
            .map(|p| resolve(root, p))
            .collect::<Vec<_>>(),
        context,
        errors,
    );
    if patterns.is_empty() || accessible_from.is_empty() {
        return None;
    }
    Some(InternalAccess {
        patterns,
        accessible_from,
    })
}
