//! Source file discovery.

use anyhow::{Context, Result};
use ignore::overrides::OverrideBuilder;
use ignore::WalkBuilder;
use std::path::{Path, PathBuf};

/// Extension of the files restyle rewrites.
pub const SOURCE_EXTENSION: &str = "swift";

/// Collects the source files under `paths`.
///
/// Directories are walked honouring `.gitignore` when asked; files given
/// directly are always kept. `exclude` globs are matched relative to each
/// walked directory. The result is sorted and free of duplicates.
pub fn discover(paths: &[PathBuf], exclude: &[String], respect_gitignore: bool) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    for root in paths {
        if root.is_file() {
            files.push(root.clone());
            continue;
        }
        if !root.is_dir() {
            anyhow::bail!("No such file or directory: {}", root.display());
        }
        walk(root, exclude, respect_gitignore, &mut files)?;
    }
    files.sort();
    files.dedup();
    Ok(files)
}

fn walk(root: &Path, exclude: &[String], respect_gitignore: bool, files: &mut Vec<PathBuf>) -> Result<()> {
    let mut overrides = OverrideBuilder::new(root);
    for pattern in exclude {
        overrides
            .add(&format!("!{pattern}"))
            .with_context(|| format!("Invalid exclude pattern: {pattern}"))?;
    }
    let overrides = overrides.build().context("Invalid exclude patterns")?;

    let mut builder = WalkBuilder::new(root);
    builder
        .hidden(false)
        .git_ignore(respect_gitignore)
        .overrides(overrides);

    for entry in builder.build() {
        let entry = entry?;
        let path = entry.path();
        if path.is_file() && path.extension().is_some_and(|e| e == SOURCE_EXTENSION) {
            files.push(path.to_path_buf());
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn tree() -> TempDir {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join("a.swift"), "").unwrap();
        fs::write(tmp.path().join("notes.txt"), "").unwrap();
        fs::create_dir_all(tmp.path().join("Sources/App")).unwrap();
        fs::write(tmp.path().join("Sources/App/b.swift"), "").unwrap();
        fs::create_dir_all(tmp.path().join("Pods/Lib")).unwrap();
        fs::write(tmp.path().join("Pods/Lib/c.swift"), "").unwrap();
        tmp
    }

    #[test]
    fn finds_swift_files_only() {
        let tmp = tree();
        let files = discover(&[tmp.path().to_path_buf()], &[], true).unwrap();
        assert_eq!(
            files,
            vec![
                tmp.path().join("Pods/Lib/c.swift"),
                tmp.path().join("Sources/App/b.swift"),
                tmp.path().join("a.swift"),
            ]
        );
    }

    #[test]
    fn exclude_patterns_skip_directories() {
        let tmp = tree();
        let files = discover(
            &[tmp.path().to_path_buf()],
            &["**/Pods/**".to_string()],
            true,
        )
        .unwrap();
        assert_eq!(
            files,
            vec![
                tmp.path().join("Sources/App/b.swift"),
                tmp.path().join("a.swift"),
            ]
        );
    }

    #[test]
    fn explicit_files_are_kept() {
        let tmp = tree();
        let notes = tmp.path().join("notes.txt");
        let files = discover(&[notes.clone(), notes.clone()], &[], true).unwrap();
        assert_eq!(files, vec![notes]);
    }

    #[test]
    fn missing_path_is_an_error() {
        let tmp = TempDir::new().unwrap();
        let err = discover(&[tmp.path().join("nope")], &[], true).unwrap_err();
        assert!(err.to_string().contains("No such file or directory"));
    }
}
