//! # hexalint-core
//!
//! Core engine for static architecture-conformance checking.
//!
//! The engine evaluates a [`RuleSet`] against an immutable
//! [`CodebaseSnapshot`] of class metadata supplied by an external front
//! end (source or bytecode scanner), producing a deterministic
//! [`Report`] of violations. It includes:
//!
//! - [`ClassDescriptor`] and [`CodebaseSnapshot`] — the metadata model
//! - [`Predicate`] — composable boolean filters selecting rule scope
//! - [`Condition`] — composable assertions over classes and the graph
//! - [`Rule`] / [`RuleSet`] — scope + requirement + polarity
//! - [`Evaluator`] — deterministic evaluation with optional
//!   cancellation
//!
//! ## Example
//!
//! ```
//! use hexalint_core::{
//!     ClassDescriptor, CodebaseSnapshot, Condition, Evaluator, PackagePattern, Predicate, Rule,
//!     RuleSet,
//! };
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let snapshot = CodebaseSnapshot::new(vec![ClassDescriptor::new(
//!     "com.acme.domain.model.Order",
//! )])?;
//! let rules = RuleSet::new(vec![Rule::require(
//!     "domain must not depend on infrastructure",
//!     Predicate::in_package(PackagePattern::new("..domain..")?),
//!     Condition::not_depend_on(Predicate::in_package(PackagePattern::new(
//!         "..infrastructure..",
//!     )?)),
//! )])?;
//!
//! let report = Evaluator::new().evaluate(&rules, &snapshot);
//! assert!(report.passed);
//! # Ok(())
//! # }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod condition;
mod descriptor;
mod evaluator;
mod pattern;
mod predicate;
mod report;
mod rule;

pub use condition::Condition;
pub use descriptor::{
    ClassDescriptor, CodebaseSnapshot, FieldDescriptor, MethodDescriptor, SnapshotError,
};
pub use evaluator::{CancelToken, Evaluator};
pub use pattern::{NamePattern, PackagePattern, PatternError};
pub use predicate::Predicate;
pub use report::{Report, Violation};
pub use rule::{Polarity, Rule, RuleSet, RuleSetError};
