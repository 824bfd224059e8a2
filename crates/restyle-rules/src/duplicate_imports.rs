//! Rule removing import statements that repeat an earlier one.
//!
//! Only top-level imports are compared. Imports inside `#if` blocks are
//! left alone, since the same module may legitimately appear in several
//! branches.

use std::collections::HashSet;

use restyle_core::{source_text, DeclarationKind, FormatOptions, Rule, RuleError, TokenStream};

/// Rule name for duplicateImports.
pub const NAME: &str = "duplicateImports";

/// Removes duplicate imports.
#[derive(Debug, Clone, Copy, Default)]
pub struct DuplicateImports;

impl Rule for DuplicateImports {
    fn name(&self) -> &'static str {
        NAME
    }

    fn help(&self) -> &'static str {
        "Remove duplicate import statements."
    }

    fn examples(&self) -> Option<&'static str> {
        Some("  import Foo\n  import Bar\n- import Foo")
    }

    fn apply(&self, stream: &mut TokenStream, _: &FormatOptions) -> Result<(), RuleError> {
        let mut seen = HashSet::new();
        let mut duplicates = Vec::new();
        for declaration in stream.declarations() {
            if declaration.kind != DeclarationKind::Import {
                continue;
            }
            let start = declaration.start_index();
            let last = stream.end_of_statement(declaration.keyword_index);
            let key = source_text(&stream.tokens()[start..=last]);
            if !seen.insert(key) {
                let line_end = stream.end_of_line(last);
                let end = (line_end + 1).min(stream.len());
                duplicates.push(stream.start_of_line(start)..end);
            }
        }
        for range in duplicates.into_iter().rev() {
            stream.remove_tokens(range);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{assert_format, assert_unchanged};

    #[test]
    fn removes_repeated_import() {
        assert_format(
            NAME,
            "import Foo\nimport Bar\nimport Foo\n",
            "import Foo\nimport Bar\n",
        );
    }

    #[test]
    fn keeps_distinct_imports() {
        assert_unchanged(NAME, "import Foo\n@testable import Foo\nimport Foo.Bar\n");
    }

    #[test]
    fn ignores_conditional_blocks() {
        assert_unchanged(
            NAME,
            "import Foo\n#if DEBUG\nimport Foo\n#endif\n",
        );
    }
}
