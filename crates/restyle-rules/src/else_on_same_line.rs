//! Rule placing `else` and `catch` relative to the preceding `}`.

use restyle_core::{
    ElsePosition, FormatOptions, Rule, RuleError, Significance, Token, TokenStream,
};

use crate::helpers::{is_line_gap, line_break_with_indent};

/// Rule name for elseOnSameLine.
pub const NAME: &str = "elseOnSameLine";

/// Places `else` and `catch` on the line of the closing brace, or on the
/// next line when `else-position = next-line`.
#[derive(Debug, Clone, Copy, Default)]
pub struct ElseOnSameLine;

impl Rule for ElseOnSameLine {
    fn name(&self) -> &'static str {
        NAME
    }

    fn help(&self) -> &'static str {
        "Place else and catch after the closing brace of the previous block."
    }

    fn options(&self) -> &'static [&'static str] {
        &["else-position"]
    }

    fn shared_options(&self) -> &'static [&'static str] {
        &["linebreak"]
    }

    fn examples(&self) -> Option<&'static str> {
        Some("  if x {\n      a()\n- }\n- else {\n+ } else {\n      b()\n  }")
    }

    fn apply(&self, stream: &mut TokenStream, options: &FormatOptions) -> Result<(), RuleError> {
        stream.for_each(
            |t| t.is_keyword("else") || t.is_keyword("catch"),
            |stream, i, _| {
                let Some(prev) = stream.last_index_of(Significance::NonSpaceOrLinebreak, i) else {
                    return Ok(());
                };
                if !stream.tokens()[prev].is_end("}") {
                    return Ok(());
                }
                let gap = &stream.tokens()[prev + 1..i];
                match options.else_position {
                    ElsePosition::SameLine => {
                        if is_line_gap(gap) {
                            stream.replace_tokens(prev + 1..i, vec![Token::space(" ")]);
                        }
                    }
                    ElsePosition::NextLine => {
                        if gap.iter().all(Token::is_space) {
                            let indent = stream.indent_for_line(prev).to_string();
                            let tokens =
                                line_break_with_indent(stream, i, &options.linebreak, &indent);
                            stream.replace_tokens(prev + 1..i, tokens);
                        }
                    }
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
    fn joins_else_with_closing_brace() {
        assert_format(
            NAME,
            "if x {\n    a()\n}\nelse {\n    b()\n}\n",
            "if x {\n    a()\n} else {\n    b()\n}\n",
        );
    }

    #[test]
    fn joins_catch() {
        assert_format(
            NAME,
            "do {\n    try a()\n}\n  catch {\n    b()\n}\n",
            "do {\n    try a()\n} catch {\n    b()\n}\n",
        );
    }

    #[test]
    fn leaves_guard_else_alone() {
        assert_unchanged(NAME, "guard let x = y\nelse {\n    return\n}\n");
    }

    #[test]
    fn keeps_comment_between_brace_and_else() {
        assert_unchanged(NAME, "if x {\n    a()\n}\n// otherwise\nelse {\n    b()\n}\n");
    }

    #[test]
    fn moves_else_down_in_next_line_style() {
        let options = FormatOptions {
            else_position: ElsePosition::NextLine,
            ..FormatOptions::default()
        };
        assert_format_with(
            NAME,
            "    if x {\n        a()\n    } else {\n        b()\n    }\n",
            "    if x {\n        a()\n    }\n    else {\n        b()\n    }\n",
            &options,
        );
    }
}
