//! Lint command implementation.

use anyhow::Result;
use restyle::{Batch, FileReport};
use std::path::Path;

use super::output;
use super::session;
use crate::{OutputFormat, Selection};

/// Runs the lint command. Returns `false` when any file would change,
/// failed to process or could not be read.
pub fn run(selection: &Selection, format: OutputFormat, config: Option<&Path>) -> Result<bool> {
    let session = session::prepare(selection, config)?;
    let reports = Batch::new(&session.engine, &session.options)
        .parallelism(session.parallelism)
        .lint(&session.files);

    output::print(&session.files, &reports, &session.unreadable, format)?;

    Ok(session.unreadable.is_empty() && reports.iter().all(FileReport::is_clean))
}
