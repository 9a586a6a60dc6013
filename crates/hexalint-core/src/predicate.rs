//! Composable boolean predicates selecting a subset of classes.
//!
//! A predicate is a pure function over a [`ClassDescriptor`], built as
//! an explicit expression tree and evaluated by recursive
//! interpretation. Combinators short-circuit left to right. Predicates
//! never fail: a descriptor with no fields or methods simply evaluates
//! under standard quantifier semantics (for-all over an empty
//! collection is true, there-exists is false).

use crate::descriptor::ClassDescriptor;
use crate::pattern::{NamePattern, PackagePattern};
use std::fmt;

/// A composable boolean filter over class descriptors.
#[derive(Debug, Clone, PartialEq)]
pub enum Predicate {
    /// Class resides in a package matching the pattern.
    InPackage(PackagePattern),
    /// Simple name ends with the suffix.
    HasSuffix(String),
    /// Simple name starts with the prefix.
    HasPrefix(String),
    /// Simple name contains the substring.
    NameContains(String),
    /// Class is annotated with the qualified annotation name.
    AnnotatedWith(String),
    /// Class is an interface.
    IsInterface,
    /// Class is abstract.
    IsAbstract,
    /// Every declared field is final or static (vacuously true with no
    /// fields).
    HasOnlyFinalOrStaticFields,
    /// Some declared method name matches the pattern (vacuously false
    /// with no methods).
    HasMethodMatching(NamePattern),
    /// All sub-predicates hold.
    And(Vec<Predicate>),
    /// At least one sub-predicate holds.
    Or(Vec<Predicate>),
    /// The sub-predicate does not hold.
    Not(Box<Predicate>),
}

impl Predicate {
    /// Predicate selecting classes in packages matching `pattern`.
    #[must_use]
    pub fn in_package(pattern: PackagePattern) -> Self {
        Self::InPackage(pattern)
    }

    /// Predicate selecting classes whose simple name ends with `suffix`.
    #[must_use]
    pub fn has_suffix(suffix: impl Into<String>) -> Self {
        Self::HasSuffix(suffix.into())
    }

    /// Predicate selecting classes whose simple name starts with
    /// `prefix`.
    #[must_use]
    pub fn has_prefix(prefix: impl Into<String>) -> Self {
        Self::HasPrefix(prefix.into())
    }

    /// Predicate selecting classes whose simple name contains `needle`.
    #[must_use]
    pub fn name_contains(needle: impl Into<String>) -> Self {
        Self::NameContains(needle.into())
    }

    /// Predicate selecting classes annotated with `annotation`.
    #[must_use]
    pub fn annotated_with(annotation: impl Into<String>) -> Self {
        Self::AnnotatedWith(annotation.into())
    }

    /// Predicate selecting interfaces.
    #[must_use]
    pub fn is_interface() -> Self {
        Self::IsInterface
    }

    /// Predicate selecting abstract classes.
    #[must_use]
    pub fn is_abstract() -> Self {
        Self::IsAbstract
    }

    /// Predicate selecting classes whose fields are all final or
    /// static.
    #[must_use]
    pub fn has_only_final_or_static_fields() -> Self {
        Self::HasOnlyFinalOrStaticFields
    }

    /// Predicate selecting classes declaring a method whose name
    /// matches `pattern`.
    #[must_use]
    pub fn has_method_matching(pattern: NamePattern) -> Self {
        Self::HasMethodMatching(pattern)
    }

    /// Conjunction. Flattens nested `And` nodes on the left.
    #[must_use]
    pub fn and(self, other: Predicate) -> Self {
        match self {
            Self::And(mut parts) => {
                parts.push(other);
                Self::And(parts)
            }
            first => Self::And(vec![first, other]),
        }
    }

    /// Disjunction. Flattens nested `Or` nodes on the left.
    #[must_use]
    pub fn or(self, other: Predicate) -> Self {
        match self {
            Self::Or(mut parts) => {
                parts.push(other);
                Self::Or(parts)
            }
            first => Self::Or(vec![first, other]),
        }
    }

    /// Negation.
    #[must_use]
    #[allow(clippy::should_implement_trait)]
    pub fn not(self) -> Self {
        Self::Not(Box::new(self))
    }

    /// Evaluates the predicate against a descriptor.
    #[must_use]
    pub fn matches(&self, class: &ClassDescriptor) -> bool {
        match self {
            Self::InPackage(pattern) => pattern.matches(class.package()),
            Self::HasSuffix(suffix) => class.simple_name().ends_with(suffix),
            Self::HasPrefix(prefix) => class.simple_name().starts_with(prefix),
            Self::NameContains(needle) => class.simple_name().contains(needle),
            Self::AnnotatedWith(annotation) => class.is_annotated_with(annotation),
            Self::IsInterface => class.is_interface,
            Self::IsAbstract => class.is_abstract,
            Self::HasOnlyFinalOrStaticFields => {
                class.fields.iter().all(|f| f.is_final || f.is_static)
            }
            Self::HasMethodMatching(pattern) => {
                class.methods.iter().any(|m| pattern.matches(&m.name))
            }
            Self::And(parts) => parts.iter().all(|p| p.matches(class)),
            Self::Or(parts) => parts.iter().any(|p| p.matches(class)),
            Self::Not(inner) => !inner.matches(class),
        }
    }
}

impl fmt::Display for Predicate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InPackage(pattern) => write!(f, "reside in package `{pattern}`"),
            Self::HasSuffix(suffix) => write!(f, "have a name ending with `{suffix}`"),
            Self::HasPrefix(prefix) => write!(f, "have a name starting with `{prefix}`"),
            Self::NameContains(needle) => write!(f, "have a name containing `{needle}`"),
            Self::AnnotatedWith(annotation) => write!(f, "be annotated with `{annotation}`"),
            Self::IsInterface => write!(f, "be an interface"),
            Self::IsAbstract => write!(f, "be abstract"),
            Self::HasOnlyFinalOrStaticFields => write!(f, "have only final or static fields"),
            Self::HasMethodMatching(pattern) => {
                write!(f, "declare a method matching `{pattern}`")
            }
            Self::And(parts) => write_joined(f, parts, " and "),
            Self::Or(parts) => write_joined(f, parts, " or "),
            Self::Not(inner) => write!(f, "not ({inner})"),
        }
    }
}

fn write_joined(f: &mut fmt::Formatter<'_>, parts: &[Predicate], sep: &str) -> fmt::Result {
    write!(f, "(")?;
    for (i, part) in parts.iter().enumerate() {
        if i > 0 {
            write!(f, "{sep}")?;
        }
        write!(f, "{part}")?;
    }
    write!(f, ")")
}
