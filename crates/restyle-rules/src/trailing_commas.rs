//! Rules for the comma after the last element of a multi-line collection
//! literal.
//!
//! Only literals whose closing `]` starts its own line are considered;
//! subscripts (`foo[\n  0\n]`) never take a trailing comma.

use restyle_core::{FormatOptions, Rule, RuleError, Significance, Token, TokenStream};

/// Rule name for trailingCommas.
pub const NAME: &str = "trailingCommas";

/// Rule name for noTrailingCommas.
pub const NO_TRAILING_NAME: &str = "noTrailingCommas";

/// Adds (or with `trailing-commas = false` removes) trailing commas.
#[derive(Debug, Clone, Copy, Default)]
pub struct TrailingCommas;

/// Always removes trailing commas.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoTrailingCommas;

impl Rule for TrailingCommas {
    fn name(&self) -> &'static str {
        NAME
    }

    fn help(&self) -> &'static str {
        "Add or remove trailing comma from the last item in a collection literal."
    }

    fn options(&self) -> &'static [&'static str] {
        &["trailing-commas"]
    }

    fn examples(&self) -> Option<&'static str> {
        Some("  let array = [\n      foo,\n      bar,\n-     baz\n+     baz,\n  ]")
    }

    fn apply(&self, stream: &mut TokenStream, options: &FormatOptions) -> Result<(), RuleError> {
        set_trailing_commas(stream, options.trailing_commas)
    }
}

impl Rule for NoTrailingCommas {
    fn name(&self) -> &'static str {
        NO_TRAILING_NAME
    }

    fn help(&self) -> &'static str {
        "Remove trailing comma from the last item in a collection literal."
    }

    fn examples(&self) -> Option<&'static str> {
        Some("  let array = [\n      foo,\n-     bar,\n+     bar\n  ]")
    }

    fn enabled_by_default(&self) -> bool {
        false
    }

    fn conflicts_with(&self) -> &'static [&'static str] {
        &[NAME]
    }

    fn apply(&self, stream: &mut TokenStream, _: &FormatOptions) -> Result<(), RuleError> {
        set_trailing_commas(stream, false)
    }
}

fn set_trailing_commas(stream: &mut TokenStream, wanted: bool) -> Result<(), RuleError> {
    stream.for_each(
        |t| t.is_end("]"),
        |stream, i, _| {
            let Some(open) = stream.start_of_scope(i) else {
                return Err(stream.fail(i, "unbalanced bracket"));
            };
            if !stream.is_first_on_line(i) || is_subscript(stream, open) {
                return Ok(());
            }
            let Some(last) = stream.last_index_of(Significance::NonSpaceOrCommentOrLinebreak, i)
            else {
                return Ok(());
            };
            // `[\n]` and `[:]` are empty.
            if last == open || (last == open + 1 && stream.tokens()[last].is_delimiter(":")) {
                return Ok(());
            }
            let has_comma = stream.tokens()[last].is_delimiter(",");
            if wanted && !has_comma {
                stream.insert_token(last + 1, Token::delimiter(","));
            } else if !wanted && has_comma {
                stream.remove_token(last);
            }
            Ok(())
        },
    )
}

/// Whether the `[` at `open` subscripts the expression before it.
fn is_subscript(stream: &TokenStream, open: usize) -> bool {
    open.checked_sub(1)
        .and_then(|prev| stream.get(prev))
        .is_some_and(Token::is_operand_end)
}
