//! Rule sorting import statements.
//!
//! Imports are sorted within runs of consecutive import lines. A blank
//! line, a comment line or any other statement ends a run, so hand-made
//! groupings survive. Runs inside `#if` blocks are sorted on their own.

use std::ops::Range;

use restyle_core::{
    source_text, Declaration, DeclarationKind, FormatOptions, ImportGrouping, Rule, RuleError,
    Token, TokenStream,
};
use tracing::debug;

/// Rule name for sortImports.
pub const NAME: &str = "sortImports";

/// Sorts import runs alphabetically.
#[derive(Debug, Clone, Copy, Default)]
pub struct SortImports;

impl Rule for SortImports {
    fn name(&self) -> &'static str {
        NAME
    }

    fn help(&self) -> &'static str {
        "Sort import statements alphabetically."
    }

    fn options(&self) -> &'static [&'static str] {
        &["import-grouping"]
    }

    fn examples(&self) -> Option<&'static str> {
        Some("- import Foo\n- import Bar\n+ import Bar\n+ import Foo")
    }

    fn apply(&self, stream: &mut TokenStream, options: &FormatOptions) -> Result<(), RuleError> {
        let declarations = stream.declarations();
        let mut edits = Vec::new();
        collect_edits(stream, &declarations, options.import_grouping, &mut edits);
        edits.sort_by_key(|(range, _)| range.start);
        for (range, tokens) in edits.into_iter().rev() {
            stream.replace_tokens(range, tokens);
        }
        Ok(())
    }
}

struct ImportLine {
    range: Range<usize>,
    key: (u8, String, String),
}

fn collect_edits(
    stream: &TokenStream,
    declarations: &[Declaration],
    grouping: ImportGrouping,
    edits: &mut Vec<(Range<usize>, Vec<Token>)>,
) {
    let mut run: Vec<ImportLine> = Vec::new();
    for declaration in declarations {
        if declaration.kind == DeclarationKind::Conditional {
            collect_edits(stream, &declaration.children, grouping, edits);
        }
        let line = import_line(stream, declaration, grouping);
        let continues = line.is_some()
            && declaration.range.start == stream.start_of_line(declaration.start_index());
        if !continues {
            sort_run(stream, std::mem::take(&mut run), edits);
        }
        run.extend(line);
    }
    sort_run(stream, run, edits);
}

/// The import at `declaration` as a sortable line, or `None` when it is not
/// an import on a line of its own.
fn import_line(
    stream: &TokenStream,
    declaration: &Declaration,
    grouping: ImportGrouping,
) -> Option<ImportLine> {
    if declaration.kind != DeclarationKind::Import {
        return None;
    }
    let start = stream.start_of_line(declaration.start_index());
    let last = stream.end_of_statement(declaration.keyword_index);
    let end = stream.end_of_line(last);
    if stream.tokens()[start..end].iter().any(Token::is_linebreak) {
        return None;
    }
    let testable = grouping == ImportGrouping::TestableLast
        && declaration.modifier("@testable").is_some();
    let name = declaration.name.clone().unwrap_or_default();
    Some(ImportLine {
        key: (
            u8::from(testable),
            name.to_lowercase(),
            source_text(&stream.tokens()[start..end]),
        ),
        range: start..end,
    })
}

fn sort_run(
    stream: &TokenStream,
    run: Vec<ImportLine>,
    edits: &mut Vec<(Range<usize>, Vec<Token>)>,
) {
    if run.len() < 2 {
        return;
    }
    // Sorting around a disabled line would move it.
    if let Some(line) = run.iter().find(|line| !stream.is_enabled(line.range.start)) {
        debug!(
            line = stream.original_line(line.range.start),
            "Leaving import run with disabled lines unsorted"
        );
        return;
    }
    let mut sorted: Vec<&ImportLine> = run.iter().collect();
    sorted.sort_by(|a, b| a.key.cmp(&b.key));
    for (slot, line) in run.iter().zip(sorted) {
        if slot.range != line.range {
            edits.push((slot.range.clone(), stream.tokens()[line.range.clone()].to_vec()));
        }
    }
}
