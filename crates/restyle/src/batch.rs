//! Parallel processing of many files.
//!
//! Each file gets its own token stream, so files are formatted on a rayon
//! pool with no shared mutable state. A failure is reported for its file
//! only; the other files carry on.

use std::path::PathBuf;
use std::time::Instant;

use rayon::prelude::*;
use restyle_core::{Engine, FormatError, FormatOptions, Mode, Outcome};
use tracing::{info, warn};

/// A file to process: its path and current contents.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceFile {
    /// Where the text came from.
    pub path: PathBuf,
    /// File contents.
    pub text: String,
}

impl SourceFile {
    /// Creates a source file.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>, text: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            text: text.into(),
        }
    }
}

/// The outcome for one file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileReport {
    /// Path of the processed file.
    pub path: PathBuf,
    /// Formatted text and changes, or why the file was skipped.
    pub result: Result<Outcome, FormatError>,
}

impl FileReport {
    /// Whether the file processed cleanly and its text changed.
    ///
    /// Only such files should be written back.
    #[must_use]
    pub fn needs_write(&self, original: &str) -> bool {
        self.result
            .as_ref()
            .is_ok_and(|outcome| outcome.output != original)
    }

    /// Whether the file processed cleanly and lint found nothing.
    #[must_use]
    pub fn is_clean(&self) -> bool {
        self.result
            .as_ref()
            .is_ok_and(|outcome| outcome.changes.is_empty())
    }
}

/// Runs one engine over many files in parallel.
pub struct Batch<'e, 'r> {
    engine: &'e Engine<'r>,
    options: &'e FormatOptions,
    parallelism: Option<usize>,
}

impl<'e, 'r> Batch<'e, 'r> {
    /// Creates a batch using the global rayon pool.
    #[must_use]
    pub fn new(engine: &'e Engine<'r>, options: &'e FormatOptions) -> Self {
        Self {
            engine,
            options,
            parallelism: None,
        }
    }

    /// Caps the number of worker threads. `None` or `0` uses the global pool.
    #[must_use]
    pub fn parallelism(mut self, threads: Option<usize>) -> Self {
        self.parallelism = threads.filter(|&n| n > 0);
        self
    }

    /// Formats every file. Reports come back in input order.
    #[must_use]
    pub fn format(&self, files: &[SourceFile]) -> Vec<FileReport> {
        self.run(files, Mode::Format)
    }

    /// Lints every file. Reports come back in input order.
    #[must_use]
    pub fn lint(&self, files: &[SourceFile]) -> Vec<FileReport> {
        self.run(files, Mode::Lint)
    }

    fn run(&self, files: &[SourceFile], mode: Mode) -> Vec<FileReport> {
        let started = Instant::now();
        let work = || {
            files
                .par_iter()
                .map(|file| self.process(file, mode))
                .collect::<Vec<_>>()
        };
        let reports = match self.parallelism {
            Some(threads) => match rayon::ThreadPoolBuilder::new().num_threads(threads).build() {
                Ok(pool) => pool.install(work),
                Err(e) => {
                    warn!("Could not build a pool of {threads} threads, using the global pool: {e}");
                    work()
                }
            },
            None => work(),
        };
        let failed = reports.iter().filter(|r| r.result.is_err()).count();
        info!(
            files = files.len(),
            failed,
            "Processed files in {:?}",
            started.elapsed()
        );
        reports
    }

    fn process(&self, file: &SourceFile, mode: Mode) -> FileReport {
        let result = self.engine.process(&file.text, self.options, mode);
        match &result {
            Ok(outcome) => info!(
                path = %file.path.display(),
                passes = outcome.passes,
                changes = outcome.changes.len(),
                "Processed file"
            ),
            Err(e) => warn!(path = %file.path.display(), "Failed to process file: {e}"),
        }
        FileReport {
            path: file.path.clone(),
            result,
        }
    }
}

/// Formats `files` in parallel on the global pool.
#[must_use]
pub fn format_files(
    engine: &Engine<'_>,
    options: &FormatOptions,
    files: &[SourceFile],
) -> Vec<FileReport> {
    Batch::new(engine, options).format(files)
}

/// Lints `files` in parallel on the global pool.
#[must_use]
pub fn lint_files(
    engine: &Engine<'_>,
    options: &FormatOptions,
    files: &[SourceFile],
) -> Vec<FileReport> {
    Batch::new(engine, options).lint(files)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::default_engine;

    fn files() -> Vec<SourceFile> {
        vec![
            SourceFile::new("a.swift", "let a = 1;\n"),
            SourceFile::new("b.swift", "func foo() {"),
            SourceFile::new("c.swift", "let c = 3\n"),
        ]
    }

    #[test]
    fn failures_stay_with_their_file() {
        let engine = default_engine().unwrap();
        let options = FormatOptions::default();
        let files = files();
        let reports = format_files(&engine, &options, &files);

        assert_eq!(reports.len(), 3);
        assert_eq!(reports[0].path, PathBuf::from("a.swift"));
        assert_eq!(reports[0].result.as_ref().unwrap().output, "let a = 1\n");
        assert!(reports[0].needs_write(&files[0].text));
        assert!(matches!(reports[1].result, Err(FormatError::Syntax(_))));
        assert!(!reports[1].needs_write(&files[1].text));
        assert!(!reports[2].needs_write(&files[2].text));
    }

    #[test]
    fn lint_reports_changes_per_file() {
        let engine = default_engine().unwrap();
        let options = FormatOptions::default();
        let files = files();
        let reports = Batch::new(&engine, &options)
            .parallelism(Some(2))
            .lint(&files);

        assert!(!reports[0].is_clean());
        assert!(!reports[1].is_clean());
        assert!(reports[2].is_clean());
        let changes = &reports[0].result.as_ref().unwrap().changes;
        assert_eq!(changes[0].line, 1);
        assert_eq!(changes[0].rule, "semicolons");
    }
}
