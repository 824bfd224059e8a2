//! Shared output formatting for file reports.

use anyhow::Result;
use miette::{NamedSource, Report};
use restyle::{Change, FileReport, FormatError, SourceFile};
use serde::Serialize;
use std::path::Path;

use super::session::Unreadable;
use crate::OutputFormat;

/// Totals over a set of reports.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Summary {
    /// Files processed.
    pub files_checked: usize,
    /// Files with at least one change.
    pub files_changed: usize,
    /// Changes over all files.
    pub changes: usize,
    /// Files that failed to process.
    pub errors: usize,
}

impl Summary {
    /// Tallies `reports`.
    #[must_use]
    pub fn of(reports: &[FileReport]) -> Self {
        let mut summary = Self {
            files_checked: reports.len(),
            ..Self::default()
        };
        for report in reports {
            match &report.result {
                Ok(outcome) if !outcome.changes.is_empty() => {
                    summary.files_changed += 1;
                    summary.changes += outcome.changes.len();
                }
                Ok(_) => {}
                Err(_) => summary.errors += 1,
            }
        }
        summary
    }

    /// Counts files that could not be read as checked and failed.
    #[must_use]
    pub fn with_unreadable(mut self, unreadable: &[Unreadable]) -> Self {
        self.files_checked += unreadable.len();
        self.errors += unreadable.len();
        self
    }
}

#[derive(Serialize)]
struct JsonFile<'a> {
    path: &'a Path,
    #[serde(skip_serializing_if = "no_changes")]
    changes: &'a [Change],
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

fn no_changes(changes: &&[Change]) -> bool {
    changes.is_empty()
}

#[derive(Serialize)]
struct JsonReport<'a> {
    files: Vec<JsonFile<'a>>,
    summary: Summary,
}

/// Prints every change and error in `reports` in the given format.
///
/// `files` must be the inputs the reports were produced from, in order.
pub fn print(
    files: &[SourceFile],
    reports: &[FileReport],
    unreadable: &[Unreadable],
    format: OutputFormat,
) -> Result<()> {
    match format {
        OutputFormat::Text => print_text(files, reports, unreadable),
        OutputFormat::Json => return print_json(reports, unreadable),
        OutputFormat::Compact => print_compact(reports, unreadable),
    }
    Ok(())
}

/// Prints only the failures: unreadable files and failed reports.
pub fn print_errors(files: &[SourceFile], reports: &[FileReport], unreadable: &[Unreadable]) {
    print_unreadable(unreadable);
    for (file, report) in files.iter().zip(reports) {
        if let Err(error) = &report.result {
            print_error(file, error);
        }
    }
}

fn print_error(file: &SourceFile, error: &FormatError) {
    let report = Report::new(error.clone()).with_source_code(NamedSource::new(
        file.path.display().to_string(),
        file.text.clone(),
    ));
    eprintln!("{report:?}");
}

fn print_unreadable(unreadable: &[Unreadable]) {
    for file in unreadable {
        eprintln!("\x1b[31merror\x1b[0m: failed to read {}: {}", file.path.display(), file.message);
    }
}

fn print_text(files: &[SourceFile], reports: &[FileReport], unreadable: &[Unreadable]) {
    print_unreadable(unreadable);
    for (file, report) in files.iter().zip(reports) {
        match &report.result {
            Ok(outcome) => {
                for change in &outcome.changes {
                    println!(
                        "\x1b[33m{}\x1b[0m at {}:{}",
                        change.rule,
                        report.path.display(),
                        change.line
                    );
                    println!("  = help: {}", change.message);
                    println!();
                }
            }
            Err(error) => print_error(file, error),
        }
    }

    let summary = Summary::of(reports).with_unreadable(unreadable);
    let color = if summary.errors > 0 {
        "\x1b[31m"
    } else if summary.changes > 0 {
        "\x1b[33m"
    } else {
        "\x1b[32m"
    };
    println!(
        "{}Found {} change(s) in {} file(s), {} error(s), {} file(s) checked\x1b[0m",
        color, summary.changes, summary.files_changed, summary.errors, summary.files_checked
    );
}

fn print_json(reports: &[FileReport], unreadable: &[Unreadable]) -> Result<()> {
    let json = serde_json::to_string_pretty(&json_report(reports, unreadable))?;
    println!("{json}");
    Ok(())
}

fn json_report<'a>(reports: &'a [FileReport], unreadable: &'a [Unreadable]) -> JsonReport<'a> {
    let failed_reads = unreadable.iter().map(|file| JsonFile {
        path: &file.path,
        changes: &[],
        error: Some(format!("failed to read: {}", file.message)),
    });
    let checked = reports
        .iter()
        .filter(|report| !report.is_clean())
        .map(|report| match &report.result {
            Ok(outcome) => JsonFile {
                path: &report.path,
                changes: &outcome.changes,
                error: None,
            },
            Err(error) => JsonFile {
                path: &report.path,
                changes: &[],
                error: Some(error.to_string()),
            },
        });
    let files = failed_reads.chain(checked).collect();
    JsonReport {
        files,
        summary: Summary::of(reports).with_unreadable(unreadable),
    }
}

fn print_compact(reports: &[FileReport], unreadable: &[Unreadable]) {
    for file in unreadable {
        println!("{}: error: failed to read: {}", file.path.display(), file.message);
    }
    for report in reports {
        match &report.result {
            Ok(outcome) => {
                for change in &outcome.changes {
                    println!(
                        "{}:{}: [{}] {}",
                        report.path.display(),
                        change.line,
                        change.rule,
                        change.message
                    );
                }
            }
            Err(error) => println!("{}: error: {error}", report.path.display()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use restyle::Outcome;
    use std::path::PathBuf;

    fn reports() -> Vec<FileReport> {
        vec![
            FileReport {
                path: PathBuf::from("a.swift"),
                result: Ok(Outcome {
                    output: "let a = 1\n".to_string(),
                    changes: vec![Change {
                        line: 1,
                        rule: "semicolons".to_string(),
                        message: "Remove semicolons.".to_string(),
                    }],
                    passes: 2,
                }),
            },
            FileReport {
                path: PathBuf::from("b.swift"),
                result: Err(FormatError::Cancelled),
            },
            FileReport {
                path: PathBuf::from("c.swift"),
                result: Ok(Outcome {
                    output: "let c = 3\n".to_string(),
                    changes: Vec::new(),
                    passes: 1,
                }),
            },
        ]
    }

    #[test]
    fn summary_counts_changes_and_errors() {
        assert_eq!(
            Summary::of(&reports()),
            Summary {
                files_checked: 3,
                files_changed: 1,
                changes: 1,
                errors: 1,
            }
        );
    }

    #[test]
    fn json_lists_only_files_needing_attention() {
        let reports = reports();
        let value = serde_json::to_value(json_report(&reports, &[])).unwrap();
        let files = value["files"].as_array().unwrap();
        assert_eq!(files.len(), 2);
        assert_eq!(files[0]["path"], "a.swift");
        assert_eq!(files[0]["changes"][0]["rule"], "semicolons");
        assert!(files[0].get("error").is_none());
        assert_eq!(files[1]["path"], "b.swift");
        assert_eq!(files[1]["error"], "formatting was cancelled");
        assert_eq!(value["summary"]["files_checked"], 3);
    }

    #[test]
    fn unreadable_files_are_listed_and_counted_as_errors() {
        let reports = reports();
        let unreadable = [Unreadable {
            path: PathBuf::from("d.swift"),
            message: "stream did not contain valid UTF-8".to_string(),
        }];
        let value = serde_json::to_value(json_report(&reports, &unreadable)).unwrap();
        let files = value["files"].as_array().unwrap();
        assert_eq!(files.len(), 3);
        assert_eq!(files[0]["path"], "d.swift");
        assert_eq!(
            files[0]["error"],
            "failed to read: stream did not contain valid UTF-8"
        );
        assert_eq!(value["summary"]["files_checked"], 4);
        assert_eq!(value["summary"]["errors"], 2);
    }
}
