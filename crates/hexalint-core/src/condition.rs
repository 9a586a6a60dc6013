//! Composable assertions checked against selected classes and the full
//! dependency graph.
//!
//! A condition, given a descriptor and the snapshot, returns zero or
//! more violation reasons; an empty list means the condition is
//! satisfied. Conditions over absent collections use standard
//! quantifier semantics and never fail with an error.

use crate::descriptor::{ClassDescriptor, CodebaseSnapshot};
use crate::pattern::{NamePattern, PackagePattern};
use crate::predicate::Predicate;
use std::fmt;

/// A composable assertion over a class and the dependency graph.
#[derive(Debug, Clone, PartialEq)]
pub enum Condition {
    /// Simple name must end with one of the suffixes.
    HaveSuffixAmong(Vec<String>),
    /// Simple name must not end with the suffix.
    NotHaveSuffix(String),
    /// Class must reside in a package matching one of the patterns.
    ResideInAnyPackage(Vec<PackagePattern>),
    /// Class must be an interface.
    BeInterface,
    /// Class must carry at least one of the annotations.
    ///
    /// Annotation names are opaque configured strings. A configured
    /// name that exists nowhere in the scanned snapshot never matches,
    /// so as the only disjunct this condition degrades to always-fail
    /// for matching classes; it does not raise an error.
    BeAnnotatedWithAny(Vec<String>),
    /// No dependency may match the predicate. A dependency name absent
    /// from the snapshot is judged on a minimal descriptor synthesized
    /// from its qualified name, so package and name predicates apply to
    /// unscanned targets too; fact-based predicates (annotations,
    /// fields, methods) evaluate under vacuous quantifier semantics
    /// there.
    NotDependOn(Box<Predicate>),
    /// Every dependency, external ones included, must live in a package
    /// matching one of the patterns.
    OnlyDependOnPackages(Vec<PackagePattern>),
    /// Every class referencing this one must live in a package matching
    /// one of the patterns. Requires the snapshot's reverse index.
    OnlyBeReferencedBy(Vec<PackagePattern>),
    /// Every declared field must be final.
    HaveOnlyFinalFields,
    /// Every declared field must be final or static. This is the
    /// literal laxity of the classic immutability rule: a mutable
    /// static field passes.
    HaveOnlyFinalOrStaticFields,
    /// No declared method name may match the pattern.
    NotHaveMethodNameMatching(NamePattern),
    /// Every sub-condition must be satisfied.
    AllOf(Vec<Condition>),
    /// At least one sub-condition must be satisfied. When every
    /// disjunct fails, the first disjunct's reasons are surfaced.
    AnyOf(Vec<Condition>),
}

impl Condition {
    /// Condition requiring a suffix from the catalog.
    #[must_use]
    pub fn have_suffix_among<I, S>(suffixes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::HaveSuffixAmong(suffixes.into_iter().map(Into::into).collect())
    }

    /// Condition forbidding a suffix.
    #[must_use]
    pub fn not_have_suffix(suffix: impl Into<String>) -> Self {
        Self::NotHaveSuffix(suffix.into())
    }

    /// Condition requiring the class to reside in one of the packages.
    #[must_use]
    pub fn reside_in_any_package(patterns: Vec<PackagePattern>) -> Self {
        Self::ResideInAnyPackage(patterns)
    }

    /// Condition requiring an interface.
    #[must_use]
    pub fn be_interface() -> Self {
        Self::BeInterface
    }

    /// Condition requiring at least one annotation from the catalog.
    #[must_use]
    pub fn be_annotated_with_any<I, S>(annotations: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::BeAnnotatedWithAny(annotations.into_iter().map(Into::into).collect())
    }

    /// Condition forbidding dependencies on classes matching the
    /// predicate.
    #[must_use]
    pub fn not_depend_on(predicate: Predicate) -> Self {
        Self::NotDependOn(Box::new(predicate))
    }

    /// Condition restricting dependencies to an allow-list of package
    /// patterns.
    #[must_use]
    pub fn only_depend_on_packages(patterns: Vec<PackagePattern>) -> Self {
        Self::OnlyDependOnPackages(patterns)
    }

    /// Condition restricting incoming references to an allow-list of
    /// package patterns.
    #[must_use]
    pub fn only_be_referenced_by(patterns: Vec<PackagePattern>) -> Self {
        Self::OnlyBeReferencedBy(patterns)
    }

    /// Condition requiring every field to be final.
    #[must_use]
    pub fn have_only_final_fields() -> Self {
        Self::HaveOnlyFinalFields
    }

    /// Condition requiring every field to be final or static.
    #[must_use]
    pub fn have_only_final_or_static_fields() -> Self {
        Self::HaveOnlyFinalOrStaticFields
    }

    /// Condition forbidding method names matching the pattern.
    #[must_use]
    pub fn not_have_method_name_matching(pattern: NamePattern) -> Self {
        Self::NotHaveMethodNameMatching(pattern)
    }

    /// Conjunction. Flattens nested `AllOf` nodes on the left.
    #[must_use]
    pub fn and(self, other: Condition) -> Self {
        match self {
            Self::AllOf(mut parts) => {
                parts.push(other);
                Self::AllOf(parts)
            }
            first => Self::AllOf(vec![first, other]),
        }
    }

    /// Disjunction. Flattens nested `AnyOf` nodes on the left.
    #[must_use]
    pub fn or(self, other: Condition) -> Self {
        match self {
            Self::AnyOf(mut parts) => {
                parts.push(other);
                Self::AnyOf(parts)
            }
            first => Self::AnyOf(vec![first, other]),
        }
    }

    /// Checks the condition, returning violation reasons (empty means
    /// satisfied).
    #[must_use]
    pub fn check(&self, class: &ClassDescriptor, snapshot: &CodebaseSnapshot) -> Vec<String> {
        match self {
            Self::HaveSuffixAmong(suffixes) => {
                let name = class.simple_name();
                if suffixes.iter().any(|s| name.ends_with(s.as_str())) {
                    vec![]
                } else {
                    vec![format!(
                        "name `{name}` does not end with any of [{}]",
                        join_quoted(suffixes)
                    )]
                }
            }
            Self::NotHaveSuffix(suffix) => {
                let name = class.simple_name();
                if name.ends_with(suffix.as_str()) {
                    vec![format!("name `{name}` ends with forbidden suffix `{suffix}`")]
                } else {
                    vec![]
                }
            }
            Self::ResideInAnyPackage(patterns) => {
                let package = class.package();
                if patterns.iter().any(|p| p.matches(package)) {
                    vec![]
                } else {
                    vec![format!(
                        "resides in package `{package}` which is not among [{}]",
                        join_patterns(patterns)
                    )]
                }
            }
            Self::BeInterface => {
                if class.is_interface {
                    vec![]
                } else {
                    vec!["class is not an interface".to_string()]
                }
            }
            Self::BeAnnotatedWithAny(annotations) => {
                if annotations.iter().any(|a| class.is_annotated_with(a)) {
                    vec![]
                } else {
                    vec![format!(
                        "class is not annotated with any of [{}]",
                        join_quoted(annotations)
                    )]
                }
            }
            Self::NotDependOn(predicate) => class
                .dependencies
                .iter()
                .filter(|dep| match snapshot.get(dep) {
                    Some(scanned) => predicate.matches(scanned),
                    None => predicate.matches(&ClassDescriptor::new(dep.as_str())),
                })
                .map(|dep| format!("depends on `{dep}` which matches: {predicate}"))
                .collect(),
            Self::OnlyDependOnPackages(patterns) => class
                .dependencies
                .iter()
                .filter(|dep| !patterns.iter().any(|p| p.matches_class(dep)))
                .map(|dep| format!("depends on `{dep}` outside the permitted packages"))
                .collect(),
            Self::OnlyBeReferencedBy(patterns) => snapshot
                .referencers_of(&class.qualified_name)
                .filter(|referrer| !patterns.iter().any(|p| p.matches(referrer.package())))
                .map(|referrer| {
                    format!(
                        "is referenced by `{}` outside the permitted packages",
                        referrer.qualified_name
                    )
                })
                .collect(),
            Self::HaveOnlyFinalFields => class
                .fields
                .iter()
                .filter(|f| !f.is_final)
                .map(|f| format!("field `{}` is not final", f.name))
                .collect(),
            Self::HaveOnlyFinalOrStaticFields => class
                .fields
                .iter()
                .filter(|f| !(f.is_final || f.is_static))
                .map(|f| format!("field `{}` is neither final nor static", f.name))
                .collect(),
            Self::NotHaveMethodNameMatching(pattern) => class
                .methods
                .iter()
                .filter(|m| pattern.matches(&m.name))
                .map(|m| format!("method `{}` matches forbidden pattern `{pattern}`", m.name))
                .collect(),
            Self::AllOf(parts) => parts
                .iter()
                .flat_map(|c| c.check(class, snapshot))
                .collect(),
            Self::AnyOf(parts) => {
                let mut first_failure: Option<Vec<String>> = None;
                for part in parts {
                    let reasons = part.check(class, snapshot);
                    if reasons.is_empty() {
                        return vec![];
                    }
                    first_failure.get_or_insert(reasons);
                }
                first_failure.unwrap_or_default()
            }
        }
    }
}

impl fmt::Display for Condition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::HaveSuffixAmong(suffixes) => {
                write!(f, "have a name ending with one of [{}]", join_quoted(suffixes))
            }
            Self::NotHaveSuffix(suffix) => {
                write!(f, "not have a name ending with `{suffix}`")
            }
            Self::ResideInAnyPackage(patterns) => {
                write!(f, "reside in one of the packages [{}]", join_patterns(patterns))
            }
            Self::BeInterface => write!(f, "be an interface"),
            Self::BeAnnotatedWithAny(annotations) => {
                write!(f, "be annotated with any of [{}]", join_quoted(annotations))
            }
            Self::NotDependOn(predicate) => {
                write!(f, "not depend on classes that {predicate}")
            }
            Self::OnlyDependOnPackages(patterns) => {
                write!(f, "only depend on packages [{}]", join_patterns(patterns))
            }
            Self::OnlyBeReferencedBy(patterns) => {
                write!(f, "only be referenced by packages [{}]", join_patterns(patterns))
            }
            Self::HaveOnlyFinalFields => write!(f, "have only final fields"),
            Self::HaveOnlyFinalOrStaticFields => {
                write!(f, "have only final or static fields")
            }
            Self::NotHaveMethodNameMatching(pattern) => {
                write!(f, "not declare a method matching `{pattern}`")
            }
            Self::AllOf(parts) => write_joined(f, parts, " and "),
            Self::AnyOf(parts) => write_joined(f, parts, " or "),
        }
    }
}

fn write_joined(f: &mut fmt::Formatter<'_>, parts: &[Condition], sep: &str) -> fmt::Result {
    write!(f, "(")?;
    for (i, part) in parts.iter().enumerate() {
        if i > 0 {
            write!(f, "{sep}")?;
        }
        write!(f, "{part}")?;
    }
    write!(f, ")")
}

fn join_quoted(items: &[String]) -> String {
    items
        .iter()
        .map(|s| format!("`{s}`"))
        .collect::<Vec<_>>()
        .join(", ")
}

fn join_patterns(patterns: &[PackagePattern]) -> String {
    patterns
        .iter()
        .map(|p| format!("`{p}`"))
        .collect::<Vec<_>>()
        .join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::descriptor::{FieldDescriptor, MethodDescriptor};

    fn class(name: &str) -> ClassDescriptor {
        ClassDescriptor::new(name)
    }

    fn class_with_deps(name: &str, deps: &[&str]) -> ClassDescriptor {
        let mut d = ClassDescriptor::new(name);
        d.dependencies = deps.iter().map(|s| (*s).to_string()).collect();
        d
    }

    fn empty_snapshot() -> CodebaseSnapshot {
        CodebaseSnapshot::new(vec![]).unwrap()
    }

    fn pkg(pattern: &str) -> PackagePattern {
        PackagePattern::new(pattern).unwrap()
    }

    #[test]
    fn suffix_among_passes_on_match() {
        let c = Condition::have_suffix_among(["Service", "UseCase"]);
        let d = class("com.acme.application.service.OrderUseCase");
        assert!(c.check(&d, &empty_snapshot()).is_empty());
    }

    #[test]
    fn suffix_among_reports_mismatch() {
        let c = Condition::have_suffix_among(["Service", "UseCase"]);
        let d = class("com.acme.application.service.OrderHandler");
        let reasons = c.check(&d, &empty_snapshot());
        assert_eq!(reasons.len(), 1);
        assert!(reasons[0].contains("OrderHandler"));
    }

    #[test]
    fn not_have_suffix_flags_forbidden_name() {
        let c = Condition::not_have_suffix("Entity");
        let d = class("com.acme.domain.model.OrderEntity");
        assert_eq!(c.check(&d, &empty_snapshot()).len(), 1);
        assert!(c
            .check(&class("com.acme.domain.model.Order"), &empty_snapshot())
            .is_empty());
    }

    #[test]
    fn be_interface_reports_concrete_class() {
        let c = Condition::be_interface();
        let mut iface = class("a.Port");
        iface.is_interface = true;
        assert!(c.check(&iface, &empty_snapshot()).is_empty());
        assert_eq!(c.check(&class("a.Impl"), &empty_snapshot()).len(), 1);
    }

    #[test]
    fn annotated_with_any_unknown_name_always_fails() {
        // A configured annotation that exists nowhere in the snapshot
        // never matches; the condition degrades, it does not error.
        let c = Condition::be_annotated_with_any(["com.ghost.Missing"]);
        let reasons = c.check(&class("a.Plain"), &empty_snapshot());
        assert_eq!(reasons.len(), 1);
    }

    #[test]
    fn not_depend_on_reports_matching_resolved_deps() {
        let snapshot = CodebaseSnapshot::new(vec![
            class_with_deps("com.acme.domain.model.Payment", &[
                "com.acme.infrastructure.adapter.PaymentController",
                "java.util.List",
            ]),
            class("com.acme.infrastructure.adapter.PaymentController"),
        ])
        .unwrap();

        let c = Condition::not_depend_on(Predicate::in_package(pkg("..infrastructure..")));
        let payment = snapshot.get("com.acme.domain.model.Payment").unwrap();
        let reasons = c.check(payment, &snapshot);
        assert_eq!(reasons.len(), 1);
        assert!(reasons[0].contains("PaymentController"));
    }

    #[test]
    fn not_depend_on_judges_unscanned_names_by_package() {
        let snapshot = CodebaseSnapshot::new(vec![class_with_deps(
            "com.acme.domain.model.Order",
            &["other.lib.domain.Helper", "java.util.List"],
        )])
        .unwrap();

        let c = Condition::not_depend_on(Predicate::in_package(pkg("..domain..")));
        let order = snapshot.get("com.acme.domain.model.Order").unwrap();
        let reasons = c.check(order, &snapshot);
        assert_eq!(reasons.len(), 1);
        assert!(reasons[0].contains("other.lib.domain.Helper"));
    }

    #[test]
    fn not_depend_on_fact_predicates_never_match_unscanned_names() {
        let snapshot = CodebaseSnapshot::new(vec![class_with_deps(
            "com.acme.domain.model.Order",
            &["org.springframework.stereotype.Component"],
        )])
        .unwrap();

        let c = Condition::not_depend_on(Predicate::annotated_with(
            "org.springframework.stereotype.Component",
        ));
        let order = snapshot.get("com.acme.domain.model.Order").unwrap();
        assert!(c.check(order, &snapshot).is_empty());
    }

    #[test]
    fn reside_in_any_package_passes_on_listed_package() {
        let c = Condition::reside_in_any_package(vec![
            pkg("..domain.."),
            pkg("..infrastructure.config.."),
        ]);
        let d = class("com.acme.domain.util.DateHelper");
        assert!(c.check(&d, &empty_snapshot()).is_empty());
    }

    #[test]
    fn reside_in_any_package_reports_stray_package() {
        let c = Condition::reside_in_any_package(vec![pkg("..domain..")]);
        let d = class("com.acme.misc.DateHelper");
        let reasons = c.check(&d, &empty_snapshot());
        assert_eq!(reasons.len(), 1);
        assert!(reasons[0].contains("com.acme.misc"));
    }

    #[test]
    fn only_depend_on_packages_judges_external_names() {
        let d = class_with_deps("com.acme.domain.model.Order", &[
            "com.acme.domain.model.Money",
            "java.util.List",
            "org.springframework.web.SomeHelper",
        ]);
        let c = Condition::only_depend_on_packages(vec![pkg("..domain.."), pkg("java..")]);
        let reasons = c.check(&d, &empty_snapshot());
        assert_eq!(reasons.len(), 1);
        assert!(reasons[0].contains("org.springframework.web.SomeHelper"));
    }

    #[test]
    fn only_be_referenced_by_uses_reverse_index() {
        let snapshot = CodebaseSnapshot::new(vec![
            class("com.acme.domain.model.Order"),
            class_with_deps(
                "com.acme.application.service.OrderService",
                &["com.acme.domain.model.Order"],
            ),
            class_with_deps(
                "com.acme.presentation.web.OrderPage",
                &["com.acme.domain.model.Order"],
            ),
        ])
        .unwrap();

        let c = Condition::only_be_referenced_by(vec![pkg("..domain.."), pkg("..application..")]);
        let order = snapshot.get("com.acme.domain.model.Order").unwrap();
        let reasons = c.check(order, &snapshot);
        assert_eq!(reasons.len(), 1);
        assert!(reasons[0].contains("OrderPage"));
    }

    #[test]
    fn final_fields_conditions_differ_on_static_mutable() {
        let mut d = class("a.Counter");
        d.fields.push(FieldDescriptor {
            name: "count".to_string(),
            declared_type: "int".to_string(),
            is_final: false,
            is_static: true,
            is_public: false,
        });

        // The lax rule accepts a mutable static field; the strict one
        // does not.
        assert!(Condition::have_only_final_or_static_fields()
            .check(&d, &empty_snapshot())
            .is_empty());
        assert_eq!(
            Condition::have_only_final_fields()
                .check(&d, &empty_snapshot())
                .len(),
            1
        );
    }

    #[test]
    fn fields_conditions_vacuously_pass_without_fields() {
        let d = class("a.Marker");
        assert!(Condition::have_only_final_fields()
            .check(&d, &empty_snapshot())
            .is_empty());
        assert!(Condition::have_only_final_or_static_fields()
            .check(&d, &empty_snapshot())
            .is_empty());
    }

    #[test]
    fn method_name_ban_reports_each_setter() {
        let mut d = class("a.MutableModel");
        for name in ["setName", "setTotal", "total"] {
            d.methods.push(MethodDescriptor {
                name: name.to_string(),
                parameter_types: vec![],
                is_static: false,
            });
        }
        let c = Condition::not_have_method_name_matching(NamePattern::new("set.*").unwrap());
        assert_eq!(c.check(&d, &empty_snapshot()).len(), 2);
    }

    #[test]
    fn any_of_passes_when_one_disjunct_holds() {
        let c = Condition::have_suffix_among(["Service"])
            .or(Condition::have_suffix_among(["UseCase"]));
        let d = class("a.OrderUseCase");
        assert!(c.check(&d, &empty_snapshot()).is_empty());
    }

    #[test]
    fn any_of_surfaces_first_disjunct_reasons_when_all_fail() {
        let c = Condition::have_suffix_among(["Service"])
            .or(Condition::have_suffix_among(["UseCase"]));
        let d = class("a.OrderHandler");
        let reasons = c.check(&d, &empty_snapshot());
        assert_eq!(reasons.len(), 1);
        assert!(reasons[0].contains("`Service`"));
        assert!(!reasons[0].contains("`UseCase`"));
    }

    #[test]
    fn all_of_concatenates_reasons() {
        let c = Condition::be_interface().and(Condition::have_suffix_among(["Port"]));
        let d = class("a.OrderAdapter");
        assert_eq!(c.check(&d, &empty_snapshot()).len(), 2);
    }

    #[test]
    fn or_flattens_left_nested_chains() {
        let c = Condition::be_interface()
            .or(Condition::have_only_final_fields())
            .or(Condition::have_only_final_or_static_fields());
        match c {
            Condition::AnyOf(parts) => assert_eq!(parts.len(), 3),
            other => panic!("expected flattened AnyOf, got {other:?}"),
        }
    }
}
