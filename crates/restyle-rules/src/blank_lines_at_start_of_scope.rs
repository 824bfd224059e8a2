//! Rule removing blank lines directly after an opening brace.

use restyle_core::{FormatOptions, Rule, RuleError, Significance, TokenStream};

use crate::helpers::{blank_lines_after, in_literal};

/// Rule name for blankLinesAtStartOfScope.
pub const NAME: &str = "blankLinesAtStartOfScope";

/// Removes leading blank lines inside scopes.
#[derive(Debug, Clone, Copy, Default)]
pub struct BlankLinesAtStartOfScope;

impl Rule for BlankLinesAtStartOfScope {
    fn name(&self) -> &'static str {
        NAME
    }

    fn help(&self) -> &'static str {
        "Remove leading blank line at the start of a scope."
    }

    fn examples(&self) -> Option<&'static str> {
        Some("  func foo() {\n-\n      // foo\n  }")
    }

    fn apply(&self, stream: &mut TokenStream, _: &FormatOptions) -> Result<(), RuleError> {
        stream.for_each(
            |t| t.is_start("{") || t.is_start("(") || t.is_start("["),
            |stream, i, _| {
                if in_literal(stream, i) {
                    return Ok(());
                }
                let Some(linebreak) = stream
                    .index_of(Significance::NonSpace, i)
                    .filter(|&n| stream.tokens()[n].is_linebreak())
                else {
                    return Ok(());
                };
                if let Some(&last) = blank_lines_after(stream, linebreak).last() {
                    stream.remove_tokens(linebreak + 1..last + 1);
                }
                Ok(())
            },
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{assert_format, assert_unchanged};

    #[test]
    fn removes_blank_lines_after_brace() {
        assert_format(
            NAME,
            "func foo() {\n\n\n    bar()\n}\n",
            "func foo() {\n    bar()\n}\n",
        );
        assert_format(NAME, "foo(\n  \n    a\n)\n", "foo(\n    a\n)\n");
    }

    #[test]
    fn leaves_blank_lines_in_the_middle() {
        assert_unchanged(NAME, "func foo() {\n    a()\n\n    b()\n}\n");
    }
}
