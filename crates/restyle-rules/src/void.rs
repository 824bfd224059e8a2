//! Rule normalizing the spelling of the empty tuple type.
//!
//! With `use-void` (the default) a `()` return type becomes `Void`; without
//! it `Void` return types become `()`. A parameter list of `(Void)` in a
//! function type is always written `()`.

use restyle_core::{FormatOptions, Rule, RuleError, Significance, Token, TokenStream};

/// Rule name for void.
pub const NAME: &str = "void";

/// Normalizes `Void` and `()` in type positions.
#[derive(Debug, Clone, Copy, Default)]
pub struct Void;

impl Rule for Void {
    fn name(&self) -> &'static str {
        NAME
    }

    fn help(&self) -> &'static str {
        "Use Void for type declarations and () for values."
    }

    fn options(&self) -> &'static [&'static str] {
        &["use-void"]
    }

    fn examples(&self) -> Option<&'static str> {
        Some("- let action: () -> ()\n+ let action: () -> Void")
    }

    fn apply(&self, stream: &mut TokenStream, options: &FormatOptions) -> Result<(), RuleError> {
        stream.for_each(
            |t| t.is_start("(") || t.is_identifier("Void"),
            |stream, i, token| {
                let follows_arrow = stream
                    .last_token(Significance::NonSpaceOrCommentOrLinebreak, i)
                    .is_some_and(|t| t.is_operator("->"));

                if token.is_start("(") {
                    let is_empty = stream.get(i + 1).is_some_and(|t| t.is_end(")"));
                    if is_empty && follows_arrow && options.use_void {
                        stream.replace_tokens(i..i + 2, vec![Token::identifier("Void")]);
                    } else if is_void_parameter_list(stream, i) {
                        stream.remove_token(i + 1);
                    }
                } else if follows_arrow && !options.use_void && stream.is_range_enabled(i..i + 1) {
                    stream.replace_token(i, Token::end(")"));
                    stream.insert_token(i, Token::start("("));
                }
                Ok(())
            },
        )
    }
}

/// `(Void) ->`: a function type taking no parameters.
fn is_void_parameter_list(stream: &TokenStream, open: usize) -> bool {
    stream.get(open + 1).is_some_and(|t| t.is_identifier("Void"))
        && stream.get(open + 2).is_some_and(|t| t.is_end(")"))
        && stream
            .next_token(Significance::NonSpaceOrCommentOrLinebreak, open + 2)
            .is_some_and(|t| t.is_operator("->"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{assert_format, assert_format_with, assert_unchanged};

    #[test]
    fn empty_return_type_becomes_void() {
        assert_format(NAME, "let f: () -> ()\n", "let f: () -> Void\n");
        assert_format(
            NAME,
            "func foo() -> () {}\n",
            "func foo() -> Void {}\n",
        );
    }

    #[test]
    fn void_parameter_list_becomes_empty() {
        assert_format(NAME, "let f: (Void) -> Void\n", "let f: () -> Void\n");
    }

    #[test]
    fn values_are_left_alone() {
        assert_unchanged(NAME, "let x = ()\nfoo()\n");
    }

    #[test]
    fn void_becomes_parens_without_use_void() {
        let options = FormatOptions {
            use_void: false,
            ..FormatOptions::default()
        };
        assert_format_with(NAME, "let f: () -> Void\n", "let f: () -> ()\n", &options);
    }
}
