//! Rule limiting runs of blank lines to `max-blank-lines`.

use restyle_core::{FormatOptions, Rule, RuleError, Token, TokenStream};

use crate::helpers::{blank_lines_after, in_literal};

/// Rule name for consecutiveBlankLines.
pub const NAME: &str = "consecutiveBlankLines";

/// Collapses runs of blank lines.
#[derive(Debug, Clone, Copy, Default)]
pub struct ConsecutiveBlankLines;

impl Rule for ConsecutiveBlankLines {
    fn name(&self) -> &'static str {
        NAME
    }

    fn help(&self) -> &'static str {
        "Replace consecutive blank lines with a single blank line."
    }

    fn options(&self) -> &'static [&'static str] {
        &["max-blank-lines"]
    }

    fn examples(&self) -> Option<&'static str> {
        Some("  func foo() {\n      let x = \"bar\"\n-\n\n      print(x)\n  }")
    }

    fn apply(&self, stream: &mut TokenStream, options: &FormatOptions) -> Result<(), RuleError> {
        let max = options.max_blank_lines;
        stream.for_each(Token::is_linebreak, |stream, i, _| {
            let blank = blank_lines_after(stream, i);
            if blank.len() <= max || in_literal(stream, i) {
                return Ok(());
            }
            let keep_until = match max {
                0 => i,
                n => blank[n - 1],
            };
            if let Some(&last) = blank.last() {
                stream.remove_tokens(keep_until + 1..last + 1);
            }
            Ok(())
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{assert_format, assert_format_with, assert_unchanged};

    #[test]
    fn collapses_blank_line_runs() {
        assert_format(NAME, "a()\n\n\n\nb()\n", "a()\n\nb()\n");
        assert_format(NAME, "a()\n\n  \n\t\nb()\n", "a()\n\nb()\n");
    }

    #[test]
    fn honours_max_blank_lines() {
        let options = FormatOptions {
            max_blank_lines: 2,
            ..FormatOptions::default()
        };
        assert_format_with(NAME, "a()\n\n\n\n\nb()\n", "a()\n\n\nb()\n", &options);
        let none = FormatOptions {
            max_blank_lines: 0,
            ..FormatOptions::default()
        };
        assert_format_with(NAME, "a()\n\nb()\n", "a()\nb()\n", &none);
    }

    #[test]
    fn leaves_multiline_strings() {
        assert_unchanged(NAME, "let s = \"\"\"\n    a\n\n\n    b\n    \"\"\"\n");
    }
}
