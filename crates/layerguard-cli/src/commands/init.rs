//! Init command implementation.

use anyhow::{bail, Context, Result};
use std::path::Path;

const CONFIG_FILE: &str = "layerguard.toml";

const DEFAULT_CONFIG: &str = r#"# layerguard configuration

[analyzer]
# Source root, relative to the project directory
root = "src"

# Extra directory names to skip (node_modules, dist, build, ... are always skipped)
exclude = []

[output]
# Show info-level findings in text output
detailed = false
# "console" or "json"
format = "console"

# Every rule is enabled unless switched off here.
# Run `layerguard list-rules` for the full list.

# [rules.type-quality]
# enabled = false
"#;

/// Runs the init command in the current directory.
pub fn run(force: bool) -> Result<()> {
    write_config(Path::new("."), force)?;

    println!("Created {CONFIG_FILE}");
    println!("\nNext steps:");
    println!("  1. Point analyzer.root at your TypeScript sources");
    println!("  2. Run: layerguard check");

    Ok(())
}

fn write_config(dir: &Path, force: bool) -> Result<()> {
    let config_path = dir.join(CONFIG_FILE);

    if config_path.exists() && !force {
        bail!(
            "Configuration file already exists at {}. Use --force to overwrite.",
            config_path.display()
        );
    }

    std::fs::write(&config_path, DEFAULT_CONFIG)
        .with_context(|| format!("Failed to write {}", config_path.display()))
}
