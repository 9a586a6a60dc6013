//! Init command implementation.

use anyhow::{bail, Result};
use std::path::Path;

const DEFAULT_CONFIG: &str = r#"# hexalint configuration
# See https://github.com/example/hexalint for documentation

# Prefix joined onto relative package patterns below.
root_package = "com.example.app"

# Generate directional-access rules for every layer (off by default:
# the pairwise isolation rules below already cover outward edges).
# strict_layer_access = true

[[layers]]
name = "domain"
packages = ["domain.."]
order = 0
allowed_external = ["java..", "jakarta.validation..", "org.slf4j.."]

[[layers]]
name = "application"
packages = ["application.."]
order = 1

[[layers]]
name = "infrastructure"
packages = ["infrastructure.."]
order = 2

[[naming]]
name = "application services must be suffixed"
packages = ["application.service.."]
suffixes = ["ApplicationService", "Service", "UseCase"]

[[interface-only]]
name = "ports must be interfaces"
packages = ["application.port.."]

[[immutable]]
name = "domain models must be immutable"
packages = ["domain.model.."]
# mode = "final"  # strict: forbid mutable static fields too

[[no-method-matching]]
name = "domain models must not have setters"
packages = ["domain.model.."]
pattern = "set.*"
"#;

/// Runs the init command.
pub fn run(force: bool) -> Result<()> {
    let config_path = Path::new("hexalint.toml");

    if config_path.exists() && !force {
        bail!(
            "Configuration file already exists at {}. Use --force to overwrite.",
            config_path.display()
        );
    }

    std::fs::write(config_path, DEFAULT_CONFIG)?;

    println!("Created hexalint.toml");
    println!("\nNext steps:");
    println!("  1. Edit hexalint.toml to match your packages");
    println!("  2. Export class descriptors to hexalint-classes.json");
    println!("  3. Run: hexalint check");

    Ok(())
}
