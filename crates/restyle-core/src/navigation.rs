//! Read-only queries over token sequences.
//!
//! The free functions work on plain slices so the declaration parser can
//! use them on a snapshot; [`TokenStream`] exposes the same queries as
//! methods.

use crate::stream::TokenStream;
use crate::token::{OperatorKind, Token};

/// Which tokens a search skips over.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Significance {
    /// Skip spaces.
    NonSpace,
    /// Skip spaces and comments.
    NonSpaceOrComment,
    /// Skip spaces and linebreaks.
    NonSpaceOrLinebreak,
    /// Skip spaces, comments and linebreaks.
    NonSpaceOrCommentOrLinebreak,
}

impl Significance {
    fn skips(self, token: &Token) -> bool {
        match self {
            Self::NonSpace => token.is_space(),
            Self::NonSpaceOrComment => token.is_space_or_comment(),
            Self::NonSpaceOrLinebreak => token.is_space_or_linebreak(),
            Self::NonSpaceOrCommentOrLinebreak => token.is_space_or_comment_or_linebreak(),
        }
    }
}

/// Keywords that start a statement whose `{` is never a closure.
const BLOCK_KEYWORDS: &[&str] = &[
    "if", "guard", "while", "for", "switch", "func", "init", "deinit", "subscript", "class",
    "struct", "enum", "extension", "protocol", "do", "repeat", "else", "catch", "defer",
];

/// Contextual words that introduce accessor or type bodies.
const BLOCK_IDENTIFIERS: &[&str] = &["get", "set", "willSet", "didSet", "actor"];

pub(crate) fn index_of(tokens: &[Token], significance: Significance, after: usize) -> Option<usize> {
    (after + 1..tokens.len()).find(|&i| !significance.skips(&tokens[i]))
}

pub(crate) fn last_index_of(
    tokens: &[Token],
    significance: Significance,
    before: usize,
) -> Option<usize> {
    (0..before.min(tokens.len()))
        .rev()
        .find(|&i| !significance.skips(&tokens[i]))
}

/// Index of the token closing the scope opened at `start`.
///
/// For `//` this is the linebreak ending the comment.
pub(crate) fn end_of_scope(tokens: &[Token], start: usize) -> Option<usize> {
    let open = tokens.get(start)?;
    if !open.is_start_of_scope() {
        return None;
    }
    if open.is_start("//") {
        return (start + 1..tokens.len()).find(|&i| tokens[i].is_linebreak());
    }
    let mut depth = 0usize;
    for (i, token) in tokens.iter().enumerate().skip(start + 1) {
        match token {
            Token::StartOfScope(s) if s != "//" => depth += 1,
            Token::EndOfScope(_) if depth == 0 => {
                return token.closes(open).then_some(i);
            }
            Token::EndOfScope(_) => depth -= 1,
            _ => {}
        }
    }
    None
}

/// Index of the token opening the scope closed at `end`.
pub(crate) fn start_of_scope(tokens: &[Token], end: usize) -> Option<usize> {
    let close = tokens.get(end)?;
    if !close.is_end_of_scope() {
        return None;
    }
    let mut depth = 0usize;
    for i in (0..end).rev() {
        match &tokens[i] {
            Token::EndOfScope(_) => depth += 1,
            Token::StartOfScope(s) if s == "//" => {}
            Token::StartOfScope(_) if depth == 0 => {
                return close.closes(&tokens[i]).then_some(i);
            }
            Token::StartOfScope(_) => depth -= 1,
            _ => {}
        }
    }
    None
}

/// Index of the innermost scope opener containing `index`.
pub(crate) fn enclosing_scope(tokens: &[Token], index: usize) -> Option<usize> {
    let mut depth = 0usize;
    let mut crossed_linebreak = false;
    for i in (0..index.min(tokens.len())).rev() {
        match &tokens[i] {
            Token::Linebreak(..) => crossed_linebreak = true,
            Token::EndOfScope(_) => depth += 1,
            Token::StartOfScope(s) if s == "//" => {
                if !crossed_linebreak && depth == 0 {
                    return Some(i);
                }
            }
            Token::StartOfScope(_) if depth == 0 => return Some(i),
            Token::StartOfScope(_) => depth -= 1,
            _ => {}
        }
    }
    None
}

pub(crate) fn start_of_line(tokens: &[Token], index: usize) -> usize {
    (0..index.min(tokens.len()))
        .rev()
        .find(|&i| tokens[i].is_linebreak())
        .map_or(0, |i| i + 1)
}

pub(crate) fn end_of_line(tokens: &[Token], index: usize) -> usize {
    (index..tokens.len())
        .find(|&i| tokens[i].is_linebreak())
        .unwrap_or(tokens.len())
}

/// Whether the statement continues past the linebreak at `linebreak`.
fn continues_after(tokens: &[Token], linebreak: usize) -> bool {
    let before = last_index_of(tokens, Significance::NonSpaceOrCommentOrLinebreak, linebreak);
    let after = index_of(tokens, Significance::NonSpaceOrCommentOrLinebreak, linebreak);
    let ends_open = before.is_some_and(|i| match &tokens[i] {
        Token::Operator(_, OperatorKind::Infix | OperatorKind::Prefix) => true,
        Token::Delimiter(d) => d == ",",
        Token::Keyword(k) => {
            k.starts_with('@')
                || matches!(
                    k.as_str(),
                    "public" | "private" | "fileprivate" | "internal" | "static" | "return"
                )
        }
        _ => false,
    });
    let starts_continuation = after.is_some_and(|i| match &tokens[i] {
        Token::Operator(_, OperatorKind::Infix | OperatorKind::Postfix) => true,
        Token::Operator(op, _) => op == "->",
        Token::StartOfScope(s) => s == "{",
        Token::Keyword(k) => matches!(k.as_str(), "else" | "catch" | "where"),
        _ => false,
    });
    ends_open || starts_continuation
}

/// Index of the last significant token of the statement containing
/// `index`, skipping over any scopes it opens.
pub(crate) fn end_of_statement(tokens: &[Token], index: usize) -> usize {
    let mut last = index.min(tokens.len().saturating_sub(1));
    let mut i = index;
    while i < tokens.len() {
        match &tokens[i] {
            Token::StartOfScope(s) if s == "//" => {
                i = end_of_line(tokens, i);
                continue;
            }
            Token::StartOfScope(s) if s == "/*" => {
                i = end_of_scope(tokens, i).map_or(tokens.len(), |end| end + 1);
                continue;
            }
            Token::StartOfScope(_) => match end_of_scope(tokens, i) {
                Some(end) => {
                    last = end;
                    i = end + 1;
                    continue;
                }
                None => return tokens.len().saturating_sub(1),
            },
            Token::EndOfScope(_) => return last,
            Token::Delimiter(d) if d == ";" => return last,
            Token::Linebreak(..) if !continues_after(tokens, i) => return last,
            token if !token.is_space_or_comment_or_linebreak() => last = i,
            _ => {}
        }
        i += 1;
    }
    last
}

fn is_closure_brace(tokens: &[Token], index: usize) -> bool {
    if !tokens.get(index).is_some_and(|t| t.is_start("{")) {
        return false;
    }
    let Some(prev) = last_index_of(tokens, Significance::NonSpaceOrCommentOrLinebreak, index)
    else {
        return false;
    };
    match &tokens[prev] {
        Token::Operator(..) | Token::Delimiter(_) => return true,
        Token::StartOfScope(s) if s == "(" || s == "[" => return true,
        Token::StartOfScope(_) => return false,
        Token::Keyword(k) if matches!(k.as_str(), "return" | "throw" | "in" | "try" | "await") => {
            return true
        }
        _ => {}
    }

    // Walk back through the statement looking for what introduced the brace.
    let mut saw_assignment = false;
    let mut i = prev;
    loop {
        match &tokens[i] {
            Token::EndOfScope(_) => match start_of_scope(tokens, i) {
                Some(start) => i = start,
                None => return true,
            },
            Token::StartOfScope(_) => return true,
            Token::Delimiter(d) if d == ";" => return true,
            Token::Operator(op, _) if op == "=" => saw_assignment = true,
            Token::Keyword(k) if BLOCK_KEYWORDS.contains(&k.as_str()) => return false,
            // `var x: T {` is a computed property; `let x = f {` may still
            // turn out to be an `if let` condition further back.
            Token::Keyword(k) if (k == "var" || k == "let") && !saw_assignment => return false,
            Token::Identifier(name) if BLOCK_IDENTIFIERS.contains(&name.as_str()) => return false,
            Token::Linebreak(..) if !continues_after(tokens, i) => return true,
            _ => {}
        }
        match i.checked_sub(1) {
            Some(p) => i = p,
            None => return true,
        }
    }
}

fn is_conditional_statement(tokens: &[Token], index: usize) -> bool {
    let mut i = index;
    loop {
        match &tokens[i] {
            Token::EndOfScope(_) if i != index => match start_of_scope(tokens, i) {
                Some(start) => i = start,
                None => return false,
            },
            Token::StartOfScope(s) if i != index && (s == "{" || s == "#if") => return false,
            Token::EndOfScope(s) if s == "}" => return false,
            Token::Delimiter(d) if d == ";" => return false,
            Token::Keyword(k) if matches!(k.as_str(), "if" | "guard" | "while") => return true,
            Token::Linebreak(..) if !continues_after(tokens, i) => return false,
            _ => {}
        }
        match i.checked_sub(1) {
            Some(p) => i = p,
            None => return false,
        }
    }
}

/// Line, column and byte offset of the start of `tokens[index]`.
pub(crate) fn location(tokens: &[Token], index: usize) -> (usize, usize, usize) {
    let mut line = 1;
    let mut column = 1;
    let mut offset = 0;
    for token in &tokens[..index.min(tokens.len())] {
        offset += token.text().len();
        if token.is_linebreak() {
            line += 1;
            column = 1;
        } else {
            column += token.text().chars().count();
        }
    }
    (line, column, offset)
}

/// Line number in the unmodified input of the line holding `tokens[index]`.
pub(crate) fn original_line(tokens: &[Token], index: usize) -> usize {
    if let Some(Token::Linebreak(_, line)) = tokens.get(index) {
        return line.saturating_sub(1).max(1);
    }
    tokens[..index.min(tokens.len())]
        .iter()
        .rev()
        .find_map(|t| match t {
            Token::Linebreak(_, line) => Some(*line),
            _ => None,
        })
        .unwrap_or(1)
}

impl TokenStream {
    /// Index of the first token after `after` not skipped by `significance`.
    #[must_use]
    pub fn index_of(&self, significance: Significance, after: usize) -> Option<usize> {
        index_of(self.tokens(), significance, after)
    }

    /// Index of the last token before `before` not skipped by `significance`.
    #[must_use]
    pub fn last_index_of(&self, significance: Significance, before: usize) -> Option<usize> {
        last_index_of(self.tokens(), significance, before)
    }

    /// Index of the first token after `after` matching `predicate`.
    pub fn index_where(&self, after: usize, predicate: impl Fn(&Token) -> bool) -> Option<usize> {
        (after + 1..self.len()).find(|&i| predicate(&self.tokens()[i]))
    }

    /// Index of the last token before `before` matching `predicate`.
    pub fn last_index_where(
        &self,
        before: usize,
        predicate: impl Fn(&Token) -> bool,
    ) -> Option<usize> {
        (0..before.min(self.len()))
            .rev()
            .find(|&i| predicate(&self.tokens()[i]))
    }

    /// Next token after `after` not skipped by `significance`.
    #[must_use]
    pub fn next_token(&self, significance: Significance, after: usize) -> Option<&Token> {
        self.index_of(significance, after).and_then(|i| self.get(i))
    }

    /// Last token before `before` not skipped by `significance`.
    #[must_use]
    pub fn last_token(&self, significance: Significance, before: usize) -> Option<&Token> {
        self.last_index_of(significance, before)
            .and_then(|i| self.get(i))
    }

    /// Index of the token closing the scope opened at `start`.
    #[must_use]
    pub fn end_of_scope(&self, start: usize) -> Option<usize> {
        end_of_scope(self.tokens(), start)
    }

    /// Index of the token opening the scope closed at `end`.
    #[must_use]
    pub fn start_of_scope(&self, end: usize) -> Option<usize> {
        start_of_scope(self.tokens(), end)
    }

    /// Index of the innermost scope opener containing `index`.
    #[must_use]
    pub fn enclosing_scope(&self, index: usize) -> Option<usize> {
        enclosing_scope(self.tokens(), index)
    }

    /// Index of the first token on the line holding `index`.
    #[must_use]
    pub fn start_of_line(&self, index: usize) -> usize {
        start_of_line(self.tokens(), index)
    }

    /// Index of the linebreak ending the line holding `index`, or the
    /// stream length on the last line.
    #[must_use]
    pub fn end_of_line(&self, index: usize) -> usize {
        end_of_line(self.tokens(), index)
    }

    /// Leading whitespace of the line holding `index`.
    #[must_use]
    pub fn indent_for_line(&self, index: usize) -> &str {
        match self.get(self.start_of_line(index)) {
            Some(Token::Space(indent)) => indent,
            _ => "",
        }
    }

    /// Whether `index` is the first non-space token of its line.
    #[must_use]
    pub fn is_first_on_line(&self, index: usize) -> bool {
        self.last_index_of(Significance::NonSpace, index)
            .map_or(true, |i| self.tokens()[i].is_linebreak())
    }

    /// Whether the `<` at `index` opens a generic parameter list.
    #[must_use]
    pub fn is_generic_opener(&self, index: usize) -> bool {
        self.get(index).is_some_and(|t| t.is_start("<"))
    }

    /// Whether the `{` at `index` opens a closure rather than a
    /// declaration or control-flow body.
    #[must_use]
    pub fn is_closure_brace(&self, index: usize) -> bool {
        is_closure_brace(self.tokens(), index)
    }

    /// Whether `index` lies in the condition of an `if`, `guard` or
    /// `while` statement.
    #[must_use]
    pub fn is_conditional_statement(&self, index: usize) -> bool {
        index < self.len() && is_conditional_statement(self.tokens(), index)
    }

    /// Index of the last significant token of the statement containing
    /// `index`.
    #[must_use]
    pub fn end_of_statement(&self, index: usize) -> usize {
        end_of_statement(self.tokens(), index)
    }

    /// 1-based line and column of `index` in the current text.
    #[must_use]
    pub fn position(&self, index: usize) -> (usize, usize) {
        let (line, column, _) = location(self.tokens(), index);
        (line, column)
    }

    pub(crate) fn location(&self, index: usize) -> (usize, usize, usize) {
        location(self.tokens(), index)
    }

    /// Line of the unmodified input that `index` came from.
    #[must_use]
    pub fn original_line(&self, index: usize) -> usize {
        original_line(self.tokens(), index)
    }

    /// A linebreak token to insert at `index`, carrying the original line
    /// of the tokens that will follow it.
    #[must_use]
    pub fn linebreak(&self, index: usize, text: &str) -> Token {
        Token::Linebreak(text.to_string(), self.original_line(index))
    }
}
