//! Shared setup for `format` and `lint`: configuration, engine and files.

use anyhow::{Context, Result};
use restyle::{Config, Engine, FormatOptions, SourceFile};
use std::path::{Path, PathBuf};
use tracing::{info, warn};

use crate::config_resolver::{self, ConfigSource};
use crate::Selection;

/// Everything a run needs.
pub struct Session {
    /// Options from `[format]` plus command-line overrides.
    pub options: FormatOptions,
    /// Engine with the resolved rule selection.
    pub engine: Engine<'static>,
    /// Files to process, read into memory.
    pub files: Vec<SourceFile>,
    /// Discovered files that could not be read; each counts as an error.
    pub unreadable: Vec<Unreadable>,
    /// Worker threads, if capped.
    pub parallelism: Option<usize>,
}

/// A discovered file that could not be read.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Unreadable {
    /// Path as discovered.
    pub path: PathBuf,
    /// Why reading failed.
    pub message: String,
}

/// Resolves configuration, builds the engine and reads the files.
///
/// A file that cannot be read is logged and recorded in
/// [`Session::unreadable`]; the remaining files are still processed.
pub fn prepare(selection: &Selection, explicit: Option<&Path>) -> Result<Session> {
    let source = config_resolver::resolve(project_dir(&selection.paths), explicit);
    let config = load_config(&source)?;

    let mut options = config
        .format_options()
        .context("Invalid [format] configuration")?;
    if selection.fragment {
        options.fragment = true;
    }

    let registry = restyle::default_registry()?;
    let mut builder = config.engine(registry);
    if let Some(rules) = &selection.rules {
        builder = builder.only(split_names(rules));
    }
    if let Some(rules) = &selection.enable {
        builder = builder.enable(split_names(rules));
    }
    if let Some(rules) = &selection.disable {
        builder = builder.disable(split_names(rules));
    }
    let engine = builder.build().context("Invalid rule selection")?;

    let mut exclude = config.files.exclude.clone();
    exclude.extend(selection.exclude.iter().cloned());
    let paths = super::files::discover(&selection.paths, &exclude, config.files.respect_gitignore)?;
    let mut files = Vec::with_capacity(paths.len());
    let mut unreadable = Vec::new();
    for path in paths {
        match std::fs::read_to_string(&path) {
            Ok(text) => files.push(SourceFile::new(path, text)),
            Err(e) => {
                warn!("Failed to read {}: {e}", path.display());
                unreadable.push(Unreadable {
                    path,
                    message: e.to_string(),
                });
            }
        }
    }

    info!(
        "Processing {} file(s) with {} rule(s)",
        files.len(),
        engine.rules().count()
    );
    if files.is_empty() && unreadable.is_empty() {
        warn!("No .swift files found");
    }

    Ok(Session {
        options,
        engine,
        files,
        unreadable,
        parallelism: selection.jobs.or(config.engine.parallelism),
    })
}

fn load_config(source: &ConfigSource) -> Result<Config> {
    match source {
        ConfigSource::Default => Ok(Config::default()),
        other => {
            let p = other.path().context("resolved config has no path")?;
            if source.is_global() {
                info!("Using global config: {}", p.display());
            }
            Config::from_file(p).with_context(|| format!("Failed to load config: {}", p.display()))
        }
    }
}

/// Directory searched for a project config: the first path when it is a
/// directory, otherwise the current directory.
fn project_dir(paths: &[PathBuf]) -> &Path {
    paths
        .first()
        .filter(|p| p.is_dir())
        .map_or(Path::new("."), PathBuf::as_path)
}

fn split_names(list: &str) -> Vec<String> {
    list.split(',')
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn selection(root: &Path) -> Selection {
        Selection {
            paths: vec![root.to_path_buf()],
            ..Selection::default()
        }
    }

    #[test]
    fn split_names_trims_and_drops_empty() {
        assert_eq!(
            split_names(" indent, semicolons,,"),
            vec!["indent".to_string(), "semicolons".to_string()]
        );
    }

    #[test]
    fn project_config_drives_options_and_rules() {
        let tmp = TempDir::new().unwrap();
        fs::write(
            tmp.path().join("restyle.toml"),
            "[format]\nindent = 2\n\n[rules]\nenable = [\"redundantInternal\"]\n\n[engine]\nparallelism = 3\n",
        )
        .unwrap();
        fs::write(tmp.path().join("a.swift"), "let a = 1\n").unwrap();

        let session = prepare(&selection(tmp.path()), None).unwrap();
        assert_eq!(session.options.indent, "  ");
        assert!(session.engine.is_selected("redundantInternal"));
        assert_eq!(session.parallelism, Some(3));
        assert_eq!(session.files.len(), 1);
        assert_eq!(session.files[0].text, "let a = 1\n");
    }

    #[test]
    fn command_line_selection_overrides_config() {
        let tmp = TempDir::new().unwrap();
        let mut selection = selection(tmp.path());
        selection.rules = Some("indent,semicolons".to_string());
        selection.disable = Some("semicolons".to_string());
        selection.fragment = true;
        selection.jobs = Some(1);

        let session = prepare(&selection, None).unwrap();
        assert!(session.engine.is_selected("indent"));
        assert!(!session.engine.is_selected("semicolons"));
        assert!(!session.engine.is_selected("braces"));
        assert!(session.options.fragment);
        assert_eq!(session.parallelism, Some(1));
    }

    #[test]
    fn unknown_rule_is_rejected() {
        let tmp = TempDir::new().unwrap();
        let mut selection = selection(tmp.path());
        selection.disable = Some("noSuchRule".to_string());
        let err = prepare(&selection, None).err().unwrap();
        assert!(err.to_string().contains("Invalid rule selection"));
    }

    #[test]
    fn unreadable_file_does_not_stop_the_others() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join("bad.swift"), [0xff, 0xfe, 0xfd]).unwrap();
        fs::write(tmp.path().join("good.swift"), "let a = 1\n").unwrap();

        let session = prepare(&selection(tmp.path()), None).unwrap();
        assert_eq!(session.files.len(), 1);
        assert!(session.files[0].path.ends_with("good.swift"));
        assert_eq!(session.unreadable.len(), 1);
        assert!(session.unreadable[0].path.ends_with("bad.swift"));
        assert!(!session.unreadable[0].message.is_empty());
    }

    #[test]
    fn bad_format_value_is_rejected() {
        let tmp = TempDir::new().unwrap();
        let config = tmp.path().join("custom.toml");
        fs::write(&config, "[format]\nsemicolons = \"sometimes\"\n").unwrap();
        let err = prepare(&selection(tmp.path()), Some(config.as_path())).err().unwrap();
        assert!(err.to_string().contains("Invalid [format] configuration"));
    }
}
