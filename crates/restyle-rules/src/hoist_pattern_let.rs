//! Rule moving `let`/`var` bindings in or out of case patterns.
//!
//! With `hoist-pattern-let` (the default) bindings that appear on every
//! element of a pattern are hoisted in front of it:
//!
//! ```text
//! case .foo(let bar, let baz)  =>  case let .foo(bar, baz)
//! ```
//!
//! Without it, a hoisted binding is pushed back into each element. Patterns
//! whose elements are not all plain bindings are left as written.

use std::ops::Range;

use restyle_core::{FormatOptions, Rule, RuleError, Significance, Token, TokenStream};

/// Rule name for hoistPatternLet.
pub const NAME: &str = "hoistPatternLet";

/// Hoists or unhoists pattern bindings.
#[derive(Debug, Clone, Copy, Default)]
pub struct HoistPatternLet;

impl Rule for HoistPatternLet {
    fn name(&self) -> &'static str {
        NAME
    }

    fn help(&self) -> &'static str {
        "Reposition let or var bindings within pattern."
    }

    fn options(&self) -> &'static [&'static str] {
        &["hoist-pattern-let"]
    }

    fn examples(&self) -> Option<&'static str> {
        Some("- if case .foo(let bar, let baz) = quux {}\n+ if case let .foo(bar, baz) = quux {}")
    }

    fn apply(&self, stream: &mut TokenStream, options: &FormatOptions) -> Result<(), RuleError> {
        stream.for_each(
            |t| t.is_keyword("case"),
            |stream, i, _| {
                let Some(start) = stream.index_of(Significance::NonSpaceOrCommentOrLinebreak, i)
                else {
                    return Ok(());
                };
                if options.hoist_pattern_let {
                    hoist(stream, start)
                } else {
                    unhoist(stream, start)
                }
            },
        )
    }
}

fn binding_word(token: &Token) -> Option<&'static str> {
    if token.is_keyword("let") {
        Some("let")
    } else if token.is_keyword("var") {
        Some("var")
    } else {
        None
    }
}

/// `.foo(`, `Foo.bar(` or `(`: index of the paren opening the pattern that
/// starts at `start`.
fn pattern_open(stream: &TokenStream, start: usize) -> Option<usize> {
    let mut i = start;
    loop {
        match stream.get(i)? {
            Token::StartOfScope(s) if s == "(" => return Some(i),
            Token::Operator(op, _) if op == "." => {}
            Token::Identifier(_) => {}
            _ => return None,
        }
        i += 1;
    }
}

/// Top-level comma-separated elements between `open` and its closing paren.
fn elements(stream: &TokenStream, open: usize) -> Result<Vec<Range<usize>>, RuleError> {
    let close = stream
        .end_of_scope(open)
        .ok_or_else(|| stream.fail(open, "unbalanced pattern parenthesis"))?;
    let mut ranges = Vec::new();
    let mut start = open + 1;
    let mut i = open + 1;
    while i < close {
        let token = &stream.tokens()[i];
        if token.is_start_of_scope() && !token.is_start("//") {
            i = stream.end_of_scope(i).unwrap_or(close);
        } else if token.is_delimiter(",") {
            ranges.push(start..i);
            start = i + 1;
        }
        i += 1;
    }
    ranges.push(start..close);
    Ok(ranges)
}

fn first_significant(stream: &TokenStream, range: &Range<usize>) -> Option<usize> {
    range
        .clone()
        .find(|&i| !stream.tokens()[i].is_space_or_comment_or_linebreak())
}

fn hoist(stream: &mut TokenStream, start: usize) -> Result<(), RuleError> {
    let Some(open) = pattern_open(stream, start) else {
        return Ok(());
    };
    let elements = elements(stream, open)?;
    let close = elements.last().map_or(open, |e| e.end);
    if !stream.is_range_enabled(start..close + 1) {
        return Ok(());
    }
    let mut word = None;
    let mut bindings = Vec::with_capacity(elements.len());
    for element in &elements {
        let Some(first) = first_significant(stream, element) else {
            return Ok(());
        };
        let Some(this) = binding_word(&stream.tokens()[first]) else {
            return Ok(());
        };
        if word.is_some_and(|w| w != this) {
            return Ok(());
        }
        let nested = (first + 1..element.end).any(|j| binding_word(&stream.tokens()[j]).is_some());
        if nested {
            return Ok(());
        }
        word = Some(this);
        bindings.push(first);
    }
    let Some(word) = word else {
        return Ok(());
    };

    for &binding in bindings.iter().rev() {
        let end = if stream.get(binding + 1).is_some_and(Token::is_space) {
            binding + 2
        } else {
            binding + 1
        };
        stream.remove_tokens(binding..end);
    }
    stream.insert_tokens(start, vec![Token::keyword(word), Token::space(" ")]);
    Ok(())
}

fn unhoist(stream: &mut TokenStream, start: usize) -> Result<(), RuleError> {
    let Some(word) = stream.get(start).and_then(binding_word) else {
        return Ok(());
    };
    let Some(pattern) = stream.index_of(Significance::NonSpaceOrCommentOrLinebreak, start) else {
        return Ok(());
    };
    let Some(open) = pattern_open(stream, pattern) else {
        return Ok(());
    };
    let elements = elements(stream, open)?;
    let close = elements.last().map_or(open, |e| e.end);
    if !stream.is_range_enabled(start..close + 1) {
        return Ok(());
    }
    let mut names = Vec::new();
    for element in elements {
        let significant: Vec<usize> = element
            .filter(|&j| !stream.tokens()[j].is_space_or_comment_or_linebreak())
            .collect();
        match significant.as_slice() {
            [name] if matches!(stream.tokens()[*name], Token::Identifier(_)) => names.push(*name),
            _ => return Ok(()),
        }
    }

    for &name in names.iter().rev() {
        stream.insert_tokens(name, vec![Token::keyword(word), Token::space(" ")]);
    }
    stream.remove_tokens(start..pattern);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{assert_format, assert_format_with, assert_unchanged};

    fn unhoisting() -> FormatOptions {
        FormatOptions {
            hoist_pattern_let: false,
            ..FormatOptions::default()
        }
    }

    #[test]
    fn hoists_bindings_out_of_enum_pattern() {
        assert_format(
            NAME,
            "if case .foo(let bar, let baz) = quux {}\n",
            "if case let .foo(bar, baz) = quux {}\n",
        );
    }

    #[test]
    fn hoists_in_switch_cases() {
        assert_format(
            NAME,
            "switch x {\ncase .a(var b, var c):\n    break\ndefault:\n    break\n}\n",
            "switch x {\ncase var .a(b, c):\n    break\ndefault:\n    break\n}\n",
        );
    }

    #[test]
    fn leaves_mixed_patterns() {
        assert_unchanged(NAME, "if case .foo(let bar, 5) = quux {}\n");
        assert_unchanged(NAME, "if case .foo(let bar, var baz) = quux {}\n");
    }

    #[test]
    fn unhoists_when_disabled() {
        assert_format_with(
            NAME,
            "if case let .foo(bar, baz) = quux {}\n",
            "if case .foo(let bar, let baz) = quux {}\n",
            &unhoisting(),
        );
    }

    #[test]
    fn pattern_crossing_a_disabled_line_is_left_whole() {
        assert_unchanged(
            NAME,
            "switch x {\ncase .a(let b,\n// restyle:disable:next hoistPatternLet\nlet c):\n    break\ndefault:\n    break\n}\n",
        );
        assert_format_with(
            NAME,
            "switch x {\ncase let .a(b,\n// restyle:disable:next hoistPatternLet\nc):\n    break\ndefault:\n    break\n}\n",
            "switch x {\ncase let .a(b,\n// restyle:disable:next hoistPatternLet\nc):\n    break\ndefault:\n    break\n}\n",
            &unhoisting(),
        );
    }

    #[test]
    fn example_matches_behavior() {
        let example = HoistPatternLet.examples().unwrap();
        let before = example.lines().find_map(|l| l.strip_prefix("- ")).unwrap();
        let after = example.lines().find_map(|l| l.strip_prefix("+ ")).unwrap();
        assert_format(NAME, &format!("{before}\n"), &format!("{after}\n"));
    }

    #[test]
    fn unhoisting_skips_nested_patterns() {
        assert_format_with(
            NAME,
            "if case let .foo(.bar(x)) = quux {}\n",
            "if case let .foo(.bar(x)) = quux {}\n",
            &unhoisting(),
        );
    }
}
