//! # hexalint
//!
//! Architecture-conformance checker for layered codebases.
//!
//! This is the main facade crate that re-exports the engine and the
//! declarative rule compilers, plus a `cargo test` gate.
//!
//! ## Quick Start — `cargo test` Integration
//!
//! ```toml
//! [dev-dependencies]
//! hexalint = "0.2"
//! ```
//!
//! ```rust,ignore
//! // tests/architecture.rs
//! #[test]
//! fn architecture_conforms() {
//!     hexalint::run_gate(None, None);
//! }
//! ```
//!
//! This evaluates the rules in `hexalint.toml` against the class
//! descriptors exported to `hexalint-classes.json` and fails the test
//! with a formatted report on any violation.
//!
//! ## Programmatic Usage
//!
//! ```
//! use hexalint::{ClassDescriptor, CodebaseSnapshot, Evaluator};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let rules = hexalint::rules::rule_set_from_toml(
//!     r#"
//! [[layers]]
//! name = "domain"
//! packages = ["..domain.."]
//! order = 0
//!
//! [[layers]]
//! name = "infrastructure"
//! packages = ["..infrastructure.."]
//! order = 2
//! "#,
//! )?;
//!
//! let snapshot = CodebaseSnapshot::new(vec![ClassDescriptor::new(
//!     "com.acme.domain.model.Order",
//! )])?;
//! let report = Evaluator::new().evaluate(&rules, &snapshot);
//! assert!(report.passed);
//! # Ok(())
//! # }
//! ```

#![forbid(unsafe_code)]

// Re-export the engine types
pub use hexalint_core::*;

/// Declarative configuration and rule compilers.
pub mod rules {
    pub use hexalint_rules::*;
}

mod runner;

pub use runner::run_gate;
