//! Format command implementation.

use anyhow::{Context, Result};
use restyle::Batch;
use std::path::Path;
use tracing::info;

use super::output;
use super::session;
use crate::{OutputFormat, Selection};

/// Runs the format command.
///
/// Files are rewritten only when they processed cleanly and their text
/// changed. With `check`, nothing is written and every file that would
/// change is reported. Files that could not be read count as errors.
/// Returns whether the run was clean.
pub fn run(
    selection: &Selection,
    check: bool,
    format: OutputFormat,
    config: Option<&Path>,
) -> Result<bool> {
    let session = session::prepare(selection, config)?;
    let reports = Batch::new(&session.engine, &session.options)
        .parallelism(session.parallelism)
        .format(&session.files);

    if check {
        output::print(&session.files, &reports, &session.unreadable, format)?;
        let clean = session.unreadable.is_empty()
            && session
                .files
                .iter()
                .zip(&reports)
                .all(|(file, report)| report.result.is_ok() && !report.needs_write(&file.text));
        return Ok(clean);
    }

    output::print_errors(&session.files, &reports, &session.unreadable);
    let mut written = 0;
    for (file, report) in session.files.iter().zip(&reports) {
        let Ok(outcome) = &report.result else {
            continue;
        };
        if report.needs_write(&file.text) {
            std::fs::write(&file.path, &outcome.output)
                .with_context(|| format!("Failed to write {}", file.path.display()))?;
            info!("Formatted {}", file.path.display());
            written += 1;
        }
    }

    let failed = reports.iter().filter(|r| r.result.is_err()).count() + session.unreadable.len();
    println!(
        "Formatted {written} of {} file(s), {failed} error(s)",
        session.files.len() + session.unreadable.len()
    );
    Ok(failed == 0)
}
