//! Rule removing semicolons.
//!
//! Semicolons that end a line or precede a closing brace are always
//! removed. Semicolons separating two statements on one line are kept with
//! `semicolons = inline` and replaced by a linebreak with `never`.
//! Semicolons inside parentheses (`for (;;)`) are left alone.

use restyle_core::{
    FormatOptions, Rule, RuleError, SemicolonMode, Significance, Token, TokenStream,
};

use crate::helpers::line_break_with_indent;

/// Rule name for semicolons.
pub const NAME: &str = "semicolons";

/// Removes semicolons.
#[derive(Debug, Clone, Copy, Default)]
pub struct Semicolons;

impl Rule for Semicolons {
    fn name(&self) -> &'static str {
        NAME
    }

    fn help(&self) -> &'static str {
        "Remove semicolons."
    }

    fn options(&self) -> &'static [&'static str] {
        &["semicolons"]
    }

    fn shared_options(&self) -> &'static [&'static str] {
        &["linebreak"]
    }

    fn examples(&self) -> Option<&'static str> {
        Some("- let foo = 5;\n+ let foo = 5")
    }

    fn apply(&self, stream: &mut TokenStream, options: &FormatOptions) -> Result<(), RuleError> {
        stream.for_each(
            |t| t.is_delimiter(";"),
            |stream, i, _| {
                if stream
                    .enclosing_scope(i)
                    .is_some_and(|s| !stream.tokens()[s].is_start("{"))
                {
                    return Ok(());
                }
                let ends_statement = match stream.next_token(Significance::NonSpaceOrComment, i) {
                    None => true,
                    Some(next) => next.is_linebreak() || next.is_end("}"),
                };
                if ends_statement {
                    stream.remove_token(i);
                    return Ok(());
                }
                let starts_line = stream
                    .last_token(Significance::NonSpaceOrComment, i)
                    .map_or(true, Token::is_linebreak);
                if starts_line {
                    stream.remove_token(i);
                } else if options.semicolons == SemicolonMode::Never {
                    let end = if stream.get(i + 1).is_some_and(Token::is_space) {
                        i + 2
                    } else {
                        i + 1
                    };
                    let indent = stream.indent_for_line(i).to_string();
                    let tokens = line_break_with_indent(stream, end, &options.linebreak, &indent);
                    stream.replace_tokens(i..end, tokens);
                }
                Ok(())
            },
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{assert_format, assert_format_with, assert_unchanged};

    #[test]
    fn removes_trailing_semicolons() {
        assert_format(NAME, "let a = 1;\nlet b = 2;\n", "let a = 1\nlet b = 2\n");
        assert_format(NAME, "foo(); // call\n", "foo() // call\n");
    }

    #[test]
    fn removes_semicolon_before_closing_brace() {
        assert_format(NAME, "if x { a(); }\n", "if x { a() }\n");
    }

    #[test]
    fn keeps_inline_separators_by_default() {
        assert_unchanged(NAME, "let a = 1; let b = 2\n");
    }

    #[test]
    fn splits_inline_statements_in_never_mode() {
        let options = FormatOptions {
            semicolons: SemicolonMode::Never,
            ..FormatOptions::default()
        };
        assert_format_with(
            NAME,
            "    let a = 1; let b = 2\n",
            "    let a = 1\n    let b = 2\n",
            &options,
        );
    }

    #[test]
    fn leaves_semicolons_in_parens() {
        assert_unchanged(NAME, "for (;;) {}\n");
    }
}
