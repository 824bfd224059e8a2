//! Rule removing whitespace at the end of lines.
//!
//! Whitespace-only lines are emptied too unless `truncate-blank-lines` is
//! off. Space inside string literals and block comments is content.

use restyle_core::{FormatOptions, Rule, RuleError, Token, TokenStream};

use crate::helpers::in_literal;

/// Rule name for trailingSpace.
pub const NAME: &str = "trailingSpace";

/// Strips trailing whitespace.
#[derive(Debug, Clone, Copy, Default)]
pub struct TrailingSpace;

impl Rule for TrailingSpace {
    fn name(&self) -> &'static str {
        NAME
    }

    fn help(&self) -> &'static str {
        "Remove trailing space at end of a line."
    }

    fn options(&self) -> &'static [&'static str] {
        &["truncate-blank-lines"]
    }

    fn examples(&self) -> Option<&'static str> {
        Some("- let foo: Foo␣\n+ let foo: Foo\n- ␣␣␣␣\n+\n- func bar() {␣␣\n+ func bar() {")
    }

    fn apply(&self, stream: &mut TokenStream, options: &FormatOptions) -> Result<(), RuleError> {
        stream.for_each(Token::is_space, |stream, i, _| {
            let at_line_end = stream.get(i + 1).map_or(true, Token::is_linebreak);
            if !at_line_end || in_literal(stream, i) {
                return Ok(());
            }
            let blank_line = i == 0 || stream.tokens()[i - 1].is_linebreak();
            if blank_line && !options.truncate_blank_lines {
                return Ok(());
            }
            stream.remove_token(i);
            Ok(())
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{assert_format, assert_format_with, assert_unchanged};

    #[test]
    fn strips_trailing_space() {
        assert_format(NAME, "let a = 1  \nfoo() \t\n", "let a = 1\nfoo()\n");
        assert_format(NAME, "let a = 1 ", "let a = 1");
    }

    #[test]
    fn truncates_blank_lines_by_default() {
        assert_format(NAME, "a()\n    \nb()\n", "a()\n\nb()\n");
    }

    #[test]
    fn keeps_blank_line_indent_when_not_truncating() {
        let options = FormatOptions {
            truncate_blank_lines: false,
            ..FormatOptions::default()
        };
        assert_format_with(NAME, "a()  \n    \nb()\n", "a()\n    \nb()\n", &options);
    }

    #[test]
    fn keeps_space_in_multiline_strings() {
        assert_unchanged(NAME, "let s = \"\"\"\n    a  \n    \"\"\"\n");
    }
}
