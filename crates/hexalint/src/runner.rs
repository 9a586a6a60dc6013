//! Test-gate runner.
//!
//! Called from a `cargo test` integration test to fail the build on
//! architecture violations. Setup problems and violations both panic,
//! which is the only failure channel a test gate has.

use hexalint_core::{ClassDescriptor, CodebaseSnapshot, Evaluator};
use hexalint_rules::rule_set_from_toml;
use std::path::{Path, PathBuf};

/// Config file names to search for, in priority order.
const CONFIG_CANDIDATES: &[&str] = &["hexalint.toml", ".hexalint.toml"];

/// Descriptor file names to search for, in priority order.
const DESCRIPTOR_CANDIDATES: &[&str] = &["hexalint-classes.json", ".hexalint-classes.json"];

/// Runs the conformance gate as part of `cargo test`.
///
/// Reads the rule configuration and the class-descriptor export from
/// the project root and panics with a formatted report if any rule is
/// violated.
///
/// # Panics
///
/// Panics if the configuration or descriptor file cannot be read or
/// parsed, or if violations are found.
pub fn run_gate(config_path: Option<&str>, descriptors_path: Option<&str>) {
    let root = find_project_root();

    let config_content = read_candidate(&root, config_path, CONFIG_CANDIDATES, "config");
    let rules = rule_set_from_toml(&config_content)
        .unwrap_or_else(|e| panic!("hexalint: invalid configuration: {e}"));

    let descriptor_content =
        read_candidate(&root, descriptors_path, DESCRIPTOR_CANDIDATES, "descriptor");
    let snapshot = parse_snapshot(&descriptor_content);

    let report = Evaluator::new().evaluate(&rules, &snapshot);
    if !report.passed {
        panic!("{}", report.format_gate_report());
    }
}

/// Parses a snapshot from a JSON array of class descriptors.
fn parse_snapshot(content: &str) -> CodebaseSnapshot {
    let classes: Vec<ClassDescriptor> = serde_json::from_str(content)
        .unwrap_or_else(|e| panic!("hexalint: failed to parse class descriptors: {e}"));
    CodebaseSnapshot::new(classes)
        .unwrap_or_else(|e| panic!("hexalint: invalid class descriptors: {e}"))
}

/// Reads a file given explicitly, or the first existing candidate under
/// the root.
fn read_candidate(
    root: &Path,
    explicit_path: Option<&str>,
    candidates: &[&str],
    kind: &str,
) -> String {
    if let Some(path) = explicit_path {
        let full_path = if Path::new(path).is_absolute() {
            PathBuf::from(path)
        } else {
            root.join(path)
        };
        return std::fs::read_to_string(&full_path).unwrap_or_else(|e| {
            panic!(
                "hexalint: failed to read {kind} file from {}: {e}",
                full_path.display()
            );
        });
    }

    for candidate in candidates {
        let path = root.join(candidate);
        if path.exists() {
            return std::fs::read_to_string(&path).unwrap_or_else(|e| {
                panic!(
                    "hexalint: failed to read {kind} file from {}: {e}",
                    path.display()
                );
            });
        }
    }

    panic!(
        "hexalint: no {kind} file found under {} (looked for {})",
        root.display(),
        candidates.join(", ")
    );
}

/// Checks whether a `Cargo.toml` file defines a `[workspace]` section
/// by parsing as TOML, avoiding false positives from comments or strings.
fn has_workspace_section(cargo_toml: &Path) -> bool {
    let Ok(content) = std::fs::read_to_string(cargo_toml) else {
        return false;
    };
    let Ok(table) = content.parse::<toml::Table>() else {
        return false;
    };
    table.contains_key("workspace")
}

/// Finds the project root by looking for `Cargo.toml` from `CARGO_MANIFEST_DIR`.
fn find_project_root() -> PathBuf {
    // CARGO_MANIFEST_DIR points to the crate containing the test,
    // which may be a workspace member. Walk up to find workspace root.
    if let Ok(manifest_dir) = std::env::var("CARGO_MANIFEST_DIR") {
        let manifest_path = PathBuf::from(&manifest_dir);

        let mut candidate = manifest_path.as_path();
        loop {
            let cargo_toml = candidate.join("Cargo.toml");
            if cargo_toml.exists() && has_workspace_section(&cargo_toml) {
                return candidate.to_path_buf();
            }
            match candidate.parent() {
                Some(parent) => candidate = parent,
                None => break,
            }
        }

        // No workspace root found — use manifest dir itself
        return manifest_path;
    }

    std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."))
}
