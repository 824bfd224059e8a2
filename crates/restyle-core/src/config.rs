//! Configuration file model (`restyle.toml`).

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::engine::EngineBuilder;
use crate::options::{FormatOptions, OptionsError};
use crate::rule::RuleRegistry;

/// Top-level configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Formatting options by their kebab-case key.
    #[serde(default)]
    pub format: BTreeMap<String, toml::Value>,

    /// Rule selection.
    #[serde(default)]
    pub rules: RulesConfig,

    /// Engine limits.
    #[serde(default)]
    pub engine: EngineConfig,

    /// File enumeration.
    #[serde(default)]
    pub files: FilesConfig,
}

impl Config {
    /// Creates a new default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;
        Self::parse(&content)
    }

    /// Parses configuration from a TOML string.
    ///
    /// # Errors
    ///
    /// Returns an error if the TOML is invalid.
    pub fn parse(content: &str) -> Result<Self, ConfigError> {
        toml::from_str(content).map_err(|e| ConfigError::Parse {
            message: e.to_string(),
        })
    }

    /// Builds [`FormatOptions`] from the `[format]` table.
    ///
    /// Values go through the same validation as directive options, so a
    /// bad value names its key.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Options`] for unknown keys or invalid values.
    pub fn format_options(&self) -> Result<FormatOptions, ConfigError> {
        let mut options = FormatOptions::default();
        for (key, value) in &self.format {
            let text = match value {
                toml::Value::String(s) => s.clone(),
                other => other.to_string(),
            };
            options.set(key, &text)?;
        }
        Ok(options)
    }

    /// Starts an engine builder carrying this configuration's rule
    /// selection and limits.
    #[must_use]
    pub fn engine<'r>(&self, registry: &'r RuleRegistry) -> EngineBuilder<'r> {
        let mut builder = EngineBuilder::new(registry)
            .enable(self.rules.enable.iter().cloned())
            .disable(self.rules.disable.iter().cloned());
        if let Some(passes) = self.engine.max_passes {
            builder = builder.max_passes(passes);
        }
        if let Some(ms) = self.engine.timeout_ms {
            builder = builder.timeout(Duration::from_millis(ms));
        }
        builder
    }
}

/// Rule selection on top of the default set.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RulesConfig {
    /// Rules to enable in addition to the defaults.
    #[serde(default)]
    pub enable: Vec<String>,

    /// Rules to disable.
    #[serde(default)]
    pub disable: Vec<String>,
}

/// Engine limits.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Pass ceiling per file.
    #[serde(default)]
    pub max_passes: Option<usize>,

    /// Wall-clock budget per file, in milliseconds.
    #[serde(default)]
    pub timeout_ms: Option<u64>,

    /// Maximum number of files formatted in parallel.
    #[serde(default)]
    pub parallelism: Option<usize>,
}

/// File enumeration settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilesConfig {
    /// Glob patterns to exclude.
    #[serde(default)]
    pub exclude: Vec<String>,

    /// Whether to respect .gitignore files.
    #[serde(default = "default_true")]
    pub respect_gitignore: bool,
}

impl Default for FilesConfig {
    fn default() -> Self {
        Self {
            exclude: vec!["**/.build/**".to_string(), "**/Pods/**".to_string()],
            respect_gitignore: true,
        }
    }
}

fn default_true() -> bool {
    true
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// IO error reading config file.
    #[error("Failed to read config file {path}: {source}")]
    Io {
        /// Path that failed to read.
        path: PathBuf,
        /// Underlying IO error.
        source: std::io::Error,
    },

    /// Parse error in config file.
    #[error("Failed to parse config: {message}")]
    Parse {
        /// Parse error message.
        message: String,
    },

    /// A `[format]` entry was rejected.
    #[error("Invalid [format] entry: {0}")]
    Options(#[from] OptionsError),
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::options::BraceStyle;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert!(config.files.respect_gitignore);
        assert!(config.format.is_empty());
        assert_eq!(config.format_options().unwrap(), FormatOptions::default());
    }

    #[test]
    fn test_parse_config() {
        let toml = r#"
[format]
indent = 2
brace-style = "next-line"
trailing-commas = false

[rules]
disable = ["semicolons"]

[engine]
max_passes = 4
timeout_ms = 500

[files]
exclude = ["**/Generated/**"]
"#;

        let config = Config::parse(toml).expect("Failed to parse");
        let options = config.format_options().unwrap();
        assert_eq!(options.indent, "  ");
        assert_eq!(options.brace_style, BraceStyle::NextLine);
        assert!(!options.trailing_commas);
        assert_eq!(config.rules.disable, ["semicolons"]);
        assert_eq!(config.engine.max_passes, Some(4));
        assert_eq!(config.files.exclude, ["**/Generated/**"]);
        assert!(config.files.respect_gitignore);
    }

    #[test]
    fn test_unknown_format_key() {
        let config = Config::parse("[format]\ntabs = true\n").unwrap();
        let err = config.format_options().unwrap_err();
        assert!(matches!(
            err,
            ConfigError::Options(OptionsError::UnknownOption { .. })
        ));
    }

    #[test]
    fn test_invalid_toml() {
        assert!(matches!(
            Config::parse("[format"),
            Err(ConfigError::Parse { .. })
        ));
    }

    #[test]
    fn test_from_missing_file() {
        let err = Config::from_file(Path::new("/nonexistent/restyle.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
    }
}
