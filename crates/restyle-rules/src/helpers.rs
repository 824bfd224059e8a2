//! Token queries shared by several rules.

use restyle_core::{Token, TokenStream};

/// Whether `index` lies inside a string literal or a block comment, at any
/// depth. Whitespace there is content and must not be touched.
pub(crate) fn in_literal(stream: &TokenStream, index: usize) -> bool {
    let mut at = index;
    while let Some(scope) = stream.enclosing_scope(at) {
        let token = &stream.tokens()[scope];
        if token.is_string_delimiter() || token.is_start("/*") {
            return true;
        }
        at = scope;
    }
    false
}

/// Linebreaks ending the blank lines that directly follow the linebreak at
/// `linebreak`, in order.
pub(crate) fn blank_lines_after(stream: &TokenStream, linebreak: usize) -> Vec<usize> {
    let mut ends = Vec::new();
    let mut i = linebreak + 1;
    loop {
        let j = if stream.get(i).is_some_and(Token::is_space) {
            i + 1
        } else {
            i
        };
        match stream.get(j) {
            Some(token) if token.is_linebreak() => {
                ends.push(j);
                i = j + 1;
            }
            _ => return ends,
        }
    }
}

/// Whether every token in `tokens` is a space or a linebreak, with at least
/// one linebreak among them.
pub(crate) fn is_line_gap(tokens: &[Token]) -> bool {
    tokens.iter().all(Token::is_space_or_linebreak) && tokens.iter().any(Token::is_linebreak)
}

/// `[linebreak, indent]` tokens to break a line before `index`, or just the
/// linebreak when `indent` is empty.
pub(crate) fn line_break_with_indent(
    stream: &TokenStream,
    index: usize,
    linebreak: &str,
    indent: &str,
) -> Vec<Token> {
    let mut tokens = vec![stream.linebreak(index, linebreak)];
    if !indent.is_empty() {
        tokens.push(Token::space(indent));
    }
    tokens
}
