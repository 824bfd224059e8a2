//! Configuration file lookup.
//!
//! First match wins:
//!
//! 1. `--config` flag (or `$RESTYLE_CONFIG`)
//! 2. `restyle.toml` or `.restyle.toml` in the project directory
//! 3. `config.toml` in the global directory (`$RESTYLE_CONFIG_DIR`, else `~/.restyle/`)
//! 4. built-in defaults

use std::path::{Path, PathBuf};

/// Where the configuration was found.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigSource {
    /// Given on the command line.
    Explicit(PathBuf),
    /// Found in the project directory.
    Project(PathBuf),
    /// Found in the global config directory.
    Global(PathBuf),
    /// Nothing found; defaults apply.
    Default,
}

impl ConfigSource {
    /// The config file, unless defaults apply.
    #[must_use]
    pub fn path(&self) -> Option<&Path> {
        match self {
            Self::Explicit(p) | Self::Project(p) | Self::Global(p) => Some(p),
            Self::Default => None,
        }
    }

    /// Whether the config came from the global directory.
    #[must_use]
    pub fn is_global(&self) -> bool {
        matches!(self, Self::Global(_))
    }
}

const PROJECT_CONFIG_NAMES: &[&str] = &["restyle.toml", ".restyle.toml"];

const GLOBAL_CONFIG_NAME: &str = "config.toml";

/// Environment variable overriding the global config directory.
pub const CONFIG_DIR_ENV: &str = "RESTYLE_CONFIG_DIR";

/// Finds the configuration for `project_dir`.
#[must_use]
pub fn resolve(project_dir: &Path, explicit: Option<&Path>) -> ConfigSource {
    find(project_dir, explicit, global_config_dir())
}

fn find(project_dir: &Path, explicit: Option<&Path>, global_dir: Option<PathBuf>) -> ConfigSource {
    if let Some(p) = explicit {
        return ConfigSource::Explicit(p.to_path_buf());
    }

    if let Some(candidate) = PROJECT_CONFIG_NAMES
        .iter()
        .map(|name| project_dir.join(name))
        .find(|candidate| candidate.is_file())
    {
        tracing::debug!("Found project config: {}", candidate.display());
        return ConfigSource::Project(candidate);
    }

    match global_dir.map(|dir| dir.join(GLOBAL_CONFIG_NAME)) {
        Some(candidate) if candidate.is_file() => {
            tracing::debug!("Found global config: {}", candidate.display());
            ConfigSource::Global(candidate)
        }
        _ => ConfigSource::Default,
    }
}

/// The global config directory: `$RESTYLE_CONFIG_DIR`, else `~/.restyle/`.
#[must_use]
pub fn global_config_dir() -> Option<PathBuf> {
    if let Some(dir) = std::env::var_os(CONFIG_DIR_ENV) {
        return Some(PathBuf::from(dir));
    }
    home::home_dir().map(|h| h.join(".restyle"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn explicit_wins_and_is_not_checked() {
        let project = TempDir::new().unwrap();
        fs::write(project.path().join("restyle.toml"), "").unwrap();

        let explicit = Path::new("/nonexistent/custom.toml");
        assert_eq!(
            find(project.path(), Some(explicit), None),
            ConfigSource::Explicit(explicit.to_path_buf())
        );
    }

    #[test]
    fn plain_name_preferred_over_dot_name() {
        let project = TempDir::new().unwrap();
        fs::write(project.path().join(".restyle.toml"), "").unwrap();
        assert_eq!(
            find(project.path(), None, None),
            ConfigSource::Project(project.path().join(".restyle.toml"))
        );

        fs::write(project.path().join("restyle.toml"), "").unwrap();
        assert_eq!(
            find(project.path(), None, None),
            ConfigSource::Project(project.path().join("restyle.toml"))
        );
    }

    #[test]
    fn global_used_only_without_project_config() {
        let project = TempDir::new().unwrap();
        let global = TempDir::new().unwrap();
        fs::write(global.path().join("config.toml"), "").unwrap();

        let found = find(project.path(), None, Some(global.path().to_path_buf()));
        assert_eq!(found, ConfigSource::Global(global.path().join("config.toml")));
        assert!(found.is_global());

        fs::write(project.path().join("restyle.toml"), "").unwrap();
        let found = find(project.path(), None, Some(global.path().to_path_buf()));
        assert!(matches!(found, ConfigSource::Project(_)));
    }

    #[test]
    fn defaults_when_nothing_found() {
        let project = TempDir::new().unwrap();
        let global = TempDir::new().unwrap();
        assert_eq!(
            find(project.path(), None, Some(global.path().to_path_buf())),
            ConfigSource::Default
        );
        assert!(ConfigSource::Default.path().is_none());
    }

    #[test]
    fn directory_named_like_config_is_ignored() {
        let project = TempDir::new().unwrap();
        fs::create_dir(project.path().join("restyle.toml")).unwrap();
        assert_eq!(find(project.path(), None, None), ConfigSource::Default);
    }
}
