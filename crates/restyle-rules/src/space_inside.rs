//! Rules for spacing just inside paired delimiters.
//!
//! Parens and brackets hug their contents: `( a )` becomes `(a)`. Braces
//! get one space on each side: `{a}` becomes `{ a }`, while `{}` stays
//! empty. Space before a comment or a linebreak, and indentation before a
//! closing delimiter, are left alone.

use restyle_core::{FormatOptions, Rule, RuleError, Token, TokenStream};

/// Removes space inside parentheses.
#[derive(Debug, Clone, Copy, Default)]
pub struct SpaceInsideParens;

/// Removes space inside square brackets.
#[derive(Debug, Clone, Copy, Default)]
pub struct SpaceInsideBrackets;

/// Adds space inside braces.
#[derive(Debug, Clone, Copy, Default)]
pub struct SpaceInsideBraces;

impl Rule for SpaceInsideParens {
    fn name(&self) -> &'static str {
        "spaceInsideParens"
    }

    fn help(&self) -> &'static str {
        "Remove space inside parentheses."
    }

    fn examples(&self) -> Option<&'static str> {
        Some("- ( a, b)\n+ (a, b)")
    }

    fn apply(&self, stream: &mut TokenStream, _: &FormatOptions) -> Result<(), RuleError> {
        remove_space_inside(stream, "(", ")")
    }
}

impl Rule for SpaceInsideBrackets {
    fn name(&self) -> &'static str {
        "spaceInsideBrackets"
    }

    fn help(&self) -> &'static str {
        "Remove space inside square brackets."
    }

    fn examples(&self) -> Option<&'static str> {
        Some("- [ 1, 2, 3 ]\n+ [1, 2, 3]")
    }

    fn apply(&self, stream: &mut TokenStream, _: &FormatOptions) -> Result<(), RuleError> {
        remove_space_inside(stream, "[", "]")
    }
}

fn is_line_edge(token: Option<&Token>) -> bool {
    token.map_or(true, |t| t.is_linebreak() || t.is_comment())
}

fn remove_space_inside(stream: &mut TokenStream, open: &str, close: &str) -> Result<(), RuleError> {
    stream.for_each(
        |t| t.is_start(open) || t.is_end(close),
        |stream, i, token| {
            if token.is_start(open) {
                if stream.get(i + 1).is_some_and(Token::is_space)
                    && !is_line_edge(stream.get(i + 2))
                {
                    stream.remove_token(i + 1);
                }
            } else if let Some(before) = i.checked_sub(1) {
                let indentation = before.checked_sub(1).map_or(true, |b| {
                    is_line_edge(stream.get(b))
                });
                if stream.tokens()[before].is_space() && !indentation {
                    stream.remove_token(before);
                }
            }
            Ok(())
        },
    )
}

impl Rule for SpaceInsideBraces {
    fn name(&self) -> &'static str {
        "spaceInsideBraces"
    }

    fn help(&self) -> &'static str {
        "Add space inside curly braces."
    }

    fn examples(&self) -> Option<&'static str> {
        Some("- foo.filter {return true}\n+ foo.filter { return true }")
    }

    fn apply(&self, stream: &mut TokenStream, _: &FormatOptions) -> Result<(), RuleError> {
        stream.for_each(
            |t| t.is_start("{") || t.is_end("}"),
            |stream, i, token| {
                if token.is_start("{") {
                    if stream
                        .get(i + 1)
                        .is_some_and(|t| !t.is_space_or_linebreak() && !t.is_end("}"))
                    {
                        stream.insert_token(i + 1, Token::space(" "));
                    }
                } else if let Some(before) = i.checked_sub(1) {
                    let prev = &stream.tokens()[before];
                    if !prev.is_space_or_linebreak() && !prev.is_start("{") {
                        stream.insert_token(i, Token::space(" "));
                    }
                }
                Ok(())
            },
        )
    }
}

#[cfg(test)]
mod tests {
    use crate::test_support::{assert_format, assert_unchanged};

    #[test]
    fn removes_space_inside_parens() {
        assert_format("spaceInsideParens", "foo( a, b )\n", "foo(a, b)\n");
        assert_unchanged("spaceInsideParens", "foo( // note\n    a\n)\n");
        assert_unchanged("spaceInsideParens", "foo(\n    a\n    )\n");
    }

    #[test]
    fn removes_space_inside_brackets() {
        assert_format("spaceInsideBrackets", "let a = [ 1, 2 ]\n", "let a = [1, 2]\n");
        assert_unchanged("spaceInsideBrackets", "let a = []\n");
    }

    #[test]
    fn adds_space_inside_braces() {
        assert_format(
            "spaceInsideBraces",
            "foo.filter {$0 > 1}\n",
            "foo.filter { $0 > 1 }\n",
        );
        assert_unchanged("spaceInsideBraces", "func foo() {}\n");
        assert_unchanged("spaceInsideBraces", "if x {\n    y()\n}\n");
    }
}
