//! Init command implementation.

use anyhow::{bail, Context, Result};
use std::path::Path;

/// File written by `restyle init`.
pub const CONFIG_FILE: &str = "restyle.toml";

const DEFAULT_CONFIG: &str = r#"# restyle configuration
# Run `restyle list-rules --options` for every rule and option.

[format]
indent = 4
# brace-style = "same-line"      # or "next-line"
# else-position = "same-line"    # or "next-line"
# semicolons = "inline"          # or "never"
# ranges = "spaced"              # or "no-space"
# import-grouping = "alpha"      # or "testable-last"
max-blank-lines = 1
trailing-commas = true
indent-case = false

[rules]
# Opt-in rules to run in addition to the defaults
enable = []
# Default rules to skip
disable = []

[engine]
# max_passes = 10
# timeout_ms = 10000
# parallelism = 4

[files]
# Glob patterns to exclude, relative to each searched directory
exclude = [
    "**/.build/**",
    "**/Pods/**",
]

# Respect .gitignore files
respect_gitignore = true
"#;

/// Runs the init command in the current directory.
pub fn run(force: bool) -> Result<()> {
    write_config(Path::new("."), force)?;

    println!("Created {CONFIG_FILE}");
    println!("\nNext steps:");
    println!("  1. Edit {CONFIG_FILE} to configure rules");
    println!("  2. Run: restyle lint");

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
