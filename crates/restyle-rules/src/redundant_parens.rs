//! Rule removing parentheses around control-flow conditions.

use restyle_core::{FormatOptions, Rule, RuleError, Significance, Token, TokenStream};

/// Rule name for redundantParens.
pub const NAME: &str = "redundantParens";

/// Keywords whose condition does not need parentheses.
const CONDITION_KEYWORDS: &[&str] = &["if", "while", "switch", "guard"];

/// Removes redundant parentheses around conditions.
#[derive(Debug, Clone, Copy, Default)]
pub struct RedundantParens;

impl Rule for RedundantParens {
    fn name(&self) -> &'static str {
        NAME
    }

    fn help(&self) -> &'static str {
        "Remove redundant parentheses."
    }

    fn examples(&self) -> Option<&'static str> {
        Some("- if (foo == true) {}\n+ if foo == true {}")
    }

    fn apply(&self, stream: &mut TokenStream, _: &FormatOptions) -> Result<(), RuleError> {
        stream.for_each(
            |t| t.is_start("("),
            |stream, i, _| {
                let Some(keyword) = stream.last_index_of(Significance::NonSpace, i) else {
                    return Ok(());
                };
                let keyword_token = &stream.tokens()[keyword];
                if !CONDITION_KEYWORDS.iter().any(|k| keyword_token.is_keyword(k)) {
                    return Ok(());
                }
                let Some(close) = stream.end_of_scope(i) else {
                    return Err(stream.fail(i, "unbalanced parenthesis"));
                };
                if !wraps_whole_condition(stream, keyword, i, close)
                    || !stream.is_range_enabled(i..close + 1)
                {
                    return Ok(());
                }

                if stream.get(close + 1).is_some_and(|t| t.is_start("{")) {
                    stream.replace_token(close, Token::space(" "));
                } else {
                    stream.remove_token(close);
                }
                if stream.get(i - 1).is_some_and(Token::is_space) {
                    stream.remove_token(i);
                } else {
                    stream.replace_token(i, Token::space(" "));
                }
                Ok(())
            },
        )
    }
}

/// Whether the parens at `open..=close` hold the entire condition of the
/// statement introduced at `keyword`, and nothing that would change meaning
/// without them.
fn wraps_whole_condition(stream: &TokenStream, keyword: usize, open: usize, close: usize) -> bool {
    let Some(next) = stream.next_token(Significance::NonSpace, close) else {
        return false;
    };
    let is_guard = stream.tokens()[keyword].is_keyword("guard");
    let ends_condition = if is_guard {
        next.is_keyword("else")
    } else {
        next.is_start("{")
    };
    if !ends_condition || close == open + 1 {
        return false;
    }
    let inner = &stream.tokens()[open + 1..close];
    let mut depth = 0usize;
    for token in inner {
        match token {
            Token::StartOfScope(s) if s == "{" => return false,
            Token::StartOfScope(s) if s != "//" => depth += 1,
            Token::EndOfScope(_) => depth = depth.saturating_sub(1),
            Token::Delimiter(d) if d == "," && depth == 0 => return false,
            Token::Linebreak(..) => return false,
            Token::Keyword(k) if depth == 0 && (k == "let" || k == "var" || k == "case") => {
                return false
            }
            _ => {}
        }
    }
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{assert_format, assert_unchanged};

    #[test]
    fn removes_parens_around_if_condition() {
        assert_format(NAME, "if (x == 1) {\n}\n", "if x == 1 {\n}\n");
        assert_format(NAME, "while (running) { tick() }\n", "while running { tick() }\n");
    }

    #[test]
    fn handles_missing_spaces() {
        assert_format(NAME, "if(x){\n}\n", "if x {\n}\n");
    }

    #[test]
    fn removes_parens_around_guard_condition() {
        assert_format(NAME, "guard (x > 0) else { return }\n", "guard x > 0 else { return }\n");
    }

    #[test]
    fn keeps_tuples_and_partial_conditions() {
        assert_unchanged(NAME, "switch (a, b) {\n}\n");
        assert_unchanged(NAME, "if (a || b) && c {\n}\n");
        assert_unchanged(NAME, "if (foo { $0 }) {\n}\n");
    }

    #[test]
    fn keeps_both_parens_when_one_is_disabled() {
        assert_unchanged(
            NAME,
            "if (x ==\n// restyle:disable:next redundantParens\n1) {\n}\n",
        );
    }
}
