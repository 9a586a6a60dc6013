//! CLI subcommands.

pub mod check;
pub mod init;
pub mod list_rules;
pub mod output;

use anyhow::{Context, Result};
use hexalint_core::RuleSet;
use std::path::Path;

/// Config file names to search for, in priority order.
const CONFIG_CANDIDATES: &[&str] = &["hexalint.toml", ".hexalint.toml"];

/// Loads and compiles the rule configuration.
///
/// An explicit path must exist; otherwise the candidates are searched
/// in the current directory.
pub fn load_rules(config_path: Option<&Path>) -> Result<RuleSet> {
    let path = match config_path {
        Some(p) => p.to_path_buf(),
        None => CONFIG_CANDIDATES
            .iter()
            .map(Path::new)
            .find(|p| p.exists())
            .with_context(|| {
                format!(
                    "no configuration found (looked for {})",
                    CONFIG_CANDIDATES.join(", ")
                )
            })?
            .to_path_buf(),
    };

    let content = std::fs::read_to_string(&path)
        .with_context(|| format!("failed to read config: {}", path.display()))?;
    hexalint_rules::rule_set_from_toml(&content)
        .with_context(|| format!("invalid config: {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn load_rules_from_explicit_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("rules.toml");
        std::fs::write(
            &path,
            r#"
[[layers]]
name = "domain"
packages = ["..domain.."]
order = 0

[[layers]]
name = "infrastructure"
packages = ["..infrastructure.."]
order = 2
"#,
        )
        .unwrap();

        let rules = load_rules(Some(&path)).unwrap();
        assert_eq!(rules.len(), 1);
    }

    #[test]
    fn load_rules_reports_invalid_config() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("rules.toml");
        std::fs::write(&path, "[[layers]]\nname = \"domain\"\n").unwrap();

        let err = load_rules(Some(&path)).unwrap_err();
        assert!(format!("{err:#}").contains("invalid config"));
    }

    #[test]
    fn load_rules_missing_explicit_path_fails() {
        let err = load_rules(Some(Path::new("/nonexistent/hexalint.toml"))).unwrap_err();
        assert!(format!("{err:#}").contains("failed to read config"));
    }
}
