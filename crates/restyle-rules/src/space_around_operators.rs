//! Rule for spacing around infix operators.
//!
//! Infix operators get one space on each side, except member access (`.`)
//! which gets none. Range operators (`...`, `..<`) follow `ranges`. A side
//! next to a linebreak or a comment is left alone.

use restyle_core::{
    FormatOptions, OperatorKind, RangeSpacing, Rule, RuleError, Token, TokenStream,
};

/// Rule name for spaceAroundOperators.
pub const NAME: &str = "spaceAroundOperators";

const RANGE_OPERATORS: &[&str] = &["...", "..<"];

/// Adds or removes spaces around infix operators.
#[derive(Debug, Clone, Copy, Default)]
pub struct SpaceAroundOperators;

impl Rule for SpaceAroundOperators {
    fn name(&self) -> &'static str {
        NAME
    }

    fn help(&self) -> &'static str {
        "Add or remove space around operators or delimiters."
    }

    fn options(&self) -> &'static [&'static str] {
        &["ranges"]
    }

    fn examples(&self) -> Option<&'static str> {
        Some("- foo . bar()\n+ foo.bar()\n\n- a+b*c\n+ a + b * c")
    }

    fn apply(&self, stream: &mut TokenStream, options: &FormatOptions) -> Result<(), RuleError> {
        stream.for_each(
            |t| matches!(t, Token::Operator(_, OperatorKind::Infix)),
            |stream, i, token| {
                let op = token.text();
                let spaced = if op == "." {
                    false
                } else if RANGE_OPERATORS.contains(&op) {
                    options.ranges == RangeSpacing::Spaced
                } else {
                    true
                };
                // Right side first so `i` stays valid for the left side.
                set_space(stream, i + 1, i + 1, spaced);
                if let Some(before) = i.checked_sub(1) {
                    set_space(stream, before, i, spaced);
                }
                Ok(())
            },
        )
    }
}

/// Makes the gap at `at` (the token just before or after the operator)
/// one space or nothing. `insert_at` is where a missing space goes.
fn set_space(stream: &mut TokenStream, at: usize, insert_at: usize, spaced: bool) {
    let Some(token) = stream.get(at) else {
        return;
    };
    if token.is_space() {
        let beyond = if at < insert_at { at.checked_sub(1) } else { Some(at + 1) };
        let at_line_edge = beyond.map_or(true, |b| {
            stream
                .get(b)
                .map_or(true, |t| t.is_linebreak() || t.is_comment())
        });
        if at_line_edge {
            return;
        }
        if !spaced {
            stream.remove_token(at);
        } else if token.text() != " " {
            stream.replace_token(at, Token::space(" "));
        }
    } else if spaced && !token.is_linebreak() && !token.is_comment() {
        stream.insert_token(insert_at, Token::space(" "));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{assert_format, assert_format_with, assert_unchanged};

    #[test]
    fn spaces_infix_operators() {
        assert_format(NAME, "let x = a+b*c\n", "let x = a + b * c\n");
        assert_format(NAME, "func f()->Int {}\n", "func f() -> Int {}\n");
        assert_format(NAME, "if a<b, c>d {}\n", "if a < b, c > d {}\n");
    }

    #[test]
    fn leaves_prefix_and_postfix_operators() {
        assert_unchanged(NAME, "let x = -a\nlet y = b!\nlet z = c?.d\n");
    }

    #[test]
    fn leaves_member_access_and_line_edges() {
        assert_unchanged(NAME, "foo.bar()\n");
        assert_unchanged(NAME, "let x = a +\n    b\n");
        assert_unchanged(NAME, "let x = a\n    + b\n");
    }

    #[test]
    fn range_operators_follow_ranges_option() {
        assert_format(NAME, "for i in 0..<n {}\n", "for i in 0 ..< n {}\n");
        let options = FormatOptions {
            ranges: RangeSpacing::NoSpace,
            ..FormatOptions::default()
        };
        assert_format_with(NAME, "let r = a ... b\n", "let r = a...b\n", &options);
    }
}
