//! Rule collapsing runs of spaces between tokens to a single space.

use restyle_core::{FormatOptions, Rule, RuleError, Token, TokenStream};

use crate::helpers::in_literal;

/// Rule name for consecutiveSpaces.
pub const NAME: &str = "consecutiveSpaces";

/// Replaces multiple spaces with one.
#[derive(Debug, Clone, Copy, Default)]
pub struct ConsecutiveSpaces;

impl Rule for ConsecutiveSpaces {
    fn name(&self) -> &'static str {
        NAME
    }

    fn help(&self) -> &'static str {
        "Replace consecutive spaces with a single space."
    }

    fn examples(&self) -> Option<&'static str> {
        Some("- let     foo = 5\n+ let foo = 5")
    }

    fn apply(&self, stream: &mut TokenStream, _: &FormatOptions) -> Result<(), RuleError> {
        stream.for_each(
            |t| t.is_space() && t.text() != " ",
            |stream, i, _| {
                // Indentation, trailing space and alignment before a comment
                // belong to other rules or to the author.
                let starts_line = i == 0 || stream.tokens()[i - 1].is_linebreak();
                let ends_line = stream
                    .get(i + 1)
                    .map_or(true, |t| t.is_linebreak() || t.is_comment());
                if starts_line || ends_line || in_literal(stream, i) {
                    return Ok(());
                }
                stream.replace_token(i, Token::space(" "));
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
    fn collapses_runs() {
        assert_format(NAME, "let     foo  =  5\n", "let foo = 5\n");
    }

    #[test]
    fn leaves_indentation_and_comment_alignment() {
        assert_unchanged(NAME, "    let a = 1    // one\n");
    }

    #[test]
    fn leaves_string_and_comment_contents() {
        assert_unchanged(NAME, "let s = \"a    b\"\n/*  x   y  */\n");
        assert_unchanged(NAME, "let s = \"\"\"\n    a\n    \"\"\"\n");
    }
}
