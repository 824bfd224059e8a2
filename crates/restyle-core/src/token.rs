//! Token types produced by the lexer and manipulated by rules.

use std::fmt;

/// Reserved words of the language.
///
/// Contextual words (`get`, `set`, `open`, `final`, `actor`, ...) are lexed
/// as identifiers and recognised by position where it matters.
pub const KEYWORDS: &[&str] = &[
    "associatedtype",
    "class",
    "deinit",
    "enum",
    "extension",
    "fileprivate",
    "func",
    "import",
    "init",
    "inout",
    "internal",
    "let",
    "operator",
    "private",
    "precedencegroup",
    "protocol",
    "public",
    "rethrows",
    "static",
    "struct",
    "subscript",
    "typealias",
    "var",
    "break",
    "case",
    "catch",
    "continue",
    "default",
    "defer",
    "do",
    "else",
    "fallthrough",
    "for",
    "guard",
    "if",
    "in",
    "repeat",
    "return",
    "throw",
    "switch",
    "where",
    "while",
    "as",
    "Any",
    "await",
    "false",
    "is",
    "nil",
    "self",
    "Self",
    "super",
    "throws",
    "true",
    "try",
];

/// Returns true if `word` is a reserved word.
#[must_use]
pub fn is_keyword(word: &str) -> bool {
    KEYWORDS.contains(&word)
}

/// Structure of a numeric literal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NumberKind {
    /// Decimal integer, e.g. `1_000`.
    Integer,
    /// Decimal with fraction and/or exponent, e.g. `1.5e-3`.
    Decimal,
    /// `0b` prefixed.
    Binary,
    /// `0o` prefixed.
    Octal,
    /// `0x` prefixed, optionally with a `p` exponent.
    Hex,
}

/// Fixity of an operator, resolved from the whitespace around it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OperatorKind {
    /// Binary operator (`a + b`, `a.b`).
    Infix,
    /// Prefix operator (`-a`, `.member`).
    Prefix,
    /// Postfix operator (`a!`, `a?`).
    Postfix,
    /// Stand-alone operator with no operands (`(+)`).
    None,
}

/// A lexical token: its kind plus the exact source text it covers.
///
/// Tokens carry no absolute position; positions are derived by scanning the
/// stream. The only provenance kept is the original line number on
/// linebreaks, which lint mode uses to report lines of the unmodified input.
#[derive(Debug, Clone)]
pub enum Token {
    /// Numeric literal.
    Number(String, NumberKind),
    /// Line terminator and the original line number of the line it starts.
    Linebreak(String, usize),
    /// Opening scope: `(`, `[`, `{`, `<`, string delimiters, `/*`, `//`, `#if`.
    StartOfScope(String),
    /// Closing scope: `)`, `]`, `}`, `>`, string delimiters, `*/`, `#endif`.
    EndOfScope(String),
    /// `,`, `;` or `:`.
    Delimiter(String),
    /// Operator with resolved fixity.
    Operator(String, OperatorKind),
    /// Literal text inside a string.
    StringBody(String),
    /// Reserved word, `@attribute` or `#keyword`.
    Keyword(String),
    /// Identifier, including backtick-escaped names and `$0`.
    Identifier(String),
    /// Horizontal whitespace.
    Space(String),
    /// Text of a comment.
    CommentBody(String),
    /// Text of a comment that carries an engine directive.
    FormatDirective(String),
    /// `#else` or `#elseif`.
    CompilerDirective(String),
    /// Unrecognised input.
    Error(String),
}

impl Token {
    /// Creates a space token.
    #[must_use]
    pub fn space(text: impl Into<String>) -> Self {
        Self::Space(text.into())
    }

    /// Creates a keyword token.
    #[must_use]
    pub fn keyword(text: impl Into<String>) -> Self {
        Self::Keyword(text.into())
    }

    /// Creates an identifier token.
    #[must_use]
    pub fn identifier(text: impl Into<String>) -> Self {
        Self::Identifier(text.into())
    }

    /// Creates a delimiter token.
    #[must_use]
    pub fn delimiter(text: impl Into<String>) -> Self {
        Self::Delimiter(text.into())
    }

    /// Creates an opening scope token.
    #[must_use]
    pub fn start(text: impl Into<String>) -> Self {
        Self::StartOfScope(text.into())
    }

    /// Creates a closing scope token.
    #[must_use]
    pub fn end(text: impl Into<String>) -> Self {
        Self::EndOfScope(text.into())
    }

    /// Creates an operator token.
    #[must_use]
    pub fn operator(text: impl Into<String>, kind: OperatorKind) -> Self {
        Self::Operator(text.into(), kind)
    }

    /// Exact source text of the token.
    #[must_use]
    pub fn text(&self) -> &str {
        match self {
            Self::Number(s, _)
            | Self::Linebreak(s, _)
            | Self::StartOfScope(s)
            | Self::EndOfScope(s)
            | Self::Delimiter(s)
            | Self::Operator(s, _)
            | Self::StringBody(s)
            | Self::Keyword(s)
            | Self::Identifier(s)
            | Self::Space(s)
            | Self::CommentBody(s)
            | Self::FormatDirective(s)
            | Self::CompilerDirective(s)
            | Self::Error(s) => s,
        }
    }

    /// Whether this is horizontal whitespace.
    #[must_use]
    pub fn is_space(&self) -> bool {
        matches!(self, Self::Space(_))
    }

    /// Whether this is a line terminator.
    #[must_use]
    pub fn is_linebreak(&self) -> bool {
        matches!(self, Self::Linebreak(..))
    }

    /// Whether this is whitespace of any kind.
    #[must_use]
    pub fn is_space_or_linebreak(&self) -> bool {
        self.is_space() || self.is_linebreak()
    }

    /// Whether this token belongs to a comment (delimiters included).
    #[must_use]
    pub fn is_comment(&self) -> bool {
        match self {
            Self::CommentBody(_) | Self::FormatDirective(_) => true,
            Self::StartOfScope(s) => s == "//" || s == "/*",
            Self::EndOfScope(s) => s == "*/",
            _ => false,
        }
    }

    /// Whether this is a space or part of a comment.
    #[must_use]
    pub fn is_space_or_comment(&self) -> bool {
        self.is_space() || self.is_comment()
    }

    /// Whether this is a space, a linebreak or part of a comment.
    #[must_use]
    pub fn is_space_or_comment_or_linebreak(&self) -> bool {
        self.is_space_or_linebreak() || self.is_comment()
    }

    /// Whether this opens a scope.
    #[must_use]
    pub fn is_start_of_scope(&self) -> bool {
        matches!(self, Self::StartOfScope(_))
    }

    /// Whether this closes a scope.
    #[must_use]
    pub fn is_end_of_scope(&self) -> bool {
        matches!(self, Self::EndOfScope(_))
    }

    /// Whether this is the opening scope `text`.
    #[must_use]
    pub fn is_start(&self, text: &str) -> bool {
        matches!(self, Self::StartOfScope(s) if s == text)
    }

    /// Whether this is the closing scope `text`.
    #[must_use]
    pub fn is_end(&self, text: &str) -> bool {
        matches!(self, Self::EndOfScope(s) if s == text)
    }

    /// Whether this is the keyword `text`.
    #[must_use]
    pub fn is_keyword(&self, text: &str) -> bool {
        matches!(self, Self::Keyword(s) if s == text)
    }

    /// Whether this is the identifier `text`.
    #[must_use]
    pub fn is_identifier(&self, text: &str) -> bool {
        matches!(self, Self::Identifier(s) if s == text)
    }

    /// Whether this is the operator `text`, regardless of fixity.
    #[must_use]
    pub fn is_operator(&self, text: &str) -> bool {
        matches!(self, Self::Operator(s, _) if s == text)
    }

    /// Whether this is the delimiter `text`.
    #[must_use]
    pub fn is_delimiter(&self, text: &str) -> bool {
        matches!(self, Self::Delimiter(s) if s == text)
    }

    /// Whether this is an attribute such as `@objc`.
    #[must_use]
    pub fn is_attribute(&self) -> bool {
        matches!(self, Self::Keyword(s) if s.starts_with('@'))
    }

    /// Whether this opens or closes a string literal.
    #[must_use]
    pub fn is_string_delimiter(&self) -> bool {
        match self {
            Self::StartOfScope(s) => s.ends_with('"'),
            Self::EndOfScope(s) => s.starts_with('"'),
            _ => false,
        }
    }

    /// Whether this opens or closes a multi-line string literal.
    #[must_use]
    pub fn is_multiline_string_delimiter(&self) -> bool {
        match self {
            Self::StartOfScope(s) => s.ends_with("\"\"\""),
            Self::EndOfScope(s) => s.starts_with("\"\"\""),
            _ => false,
        }
    }

    /// Whether this token can end an expression operand.
    ///
    /// Used to decide whether a following `.` is member access and whether
    /// a following `?`/`!` is postfix.
    #[must_use]
    pub fn is_operand_end(&self) -> bool {
        match self {
            Self::Identifier(_) | Self::Number(..) => true,
            Self::Keyword(s) => matches!(
                s.as_str(),
                "self" | "Self" | "super" | "true" | "false" | "nil" | "init" | "Any"
            ),
            Self::EndOfScope(s) => s != "*/" && s != "#endif",
            Self::Operator(_, OperatorKind::Postfix) => true,
            _ => false,
        }
    }

    /// Text of the closing token that matches this opening scope.
    ///
    /// Returns `None` for `//`, which is closed by the next linebreak, and
    /// for tokens that do not open a scope.
    #[must_use]
    pub fn closing_text(&self) -> Option<String> {
        let Self::StartOfScope(open) = self else {
            return None;
        };
        let close = match open.as_str() {
            "(" => ")".to_string(),
            "[" => "]".to_string(),
            "{" => "}".to_string(),
            "<" => ">".to_string(),
            "/*" => "*/".to_string(),
            "#if" => "#endif".to_string(),
            "//" => return None,
            other if other.ends_with('"') => {
                let hashes = other.chars().take_while(|c| *c == '#').count();
                let quotes = &other[hashes..];
                format!("{quotes}{}", "#".repeat(hashes))
            }
            _ => return None,
        };
        Some(close)
    }

    /// Whether `self` closes the scope opened by `open`.
    #[must_use]
    pub fn closes(&self, open: &Token) -> bool {
        if open.is_start("//") {
            return self.is_linebreak();
        }
        match (self, open.closing_text()) {
            (Self::EndOfScope(close), Some(expected)) => *close == expected,
            _ => false,
        }
    }
}

impl PartialEq for Token {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            // Original line numbers are provenance, not content.
            (Self::Linebreak(a, _), Self::Linebreak(b, _)) => a == b,
            (Self::Number(a, ak), Self::Number(b, bk)) => a == b && ak == bk,
            (Self::Operator(a, ak), Self::Operator(b, bk)) => a == b && ak == bk,
            (Self::StartOfScope(a), Self::StartOfScope(b))
            | (Self::EndOfScope(a), Self::EndOfScope(b))
            | (Self::Delimiter(a), Self::Delimiter(b))
            | (Self::StringBody(a), Self::StringBody(b))
            | (Self::Keyword(a), Self::Keyword(b))
            | (Self::Identifier(a), Self::Identifier(b))
            | (Self::Space(a), Self::Space(b))
            | (Self::CommentBody(a), Self::CommentBody(b))
            | (Self::FormatDirective(a), Self::FormatDirective(b))
            | (Self::CompilerDirective(a), Self::CompilerDirective(b))
            | (Self::Error(a), Self::Error(b)) => a == b,
            _ => false,
        }
    }
}

impl Eq for Token {}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.text())
    }
}

/// Concatenates the text of `tokens`.
#[must_use]
pub fn source_text(tokens: &[Token]) -> String {
    let mut output = String::with_capacity(tokens.len() * 4);
    for token in tokens {
        output.push_str(token.text());
    }
    output
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn linebreak_equality_ignores_original_line() {
        assert_eq!(
            Token::Linebreak("\n".into(), 3),
            Token::Linebreak("\n".into(), 9)
        );
        assert_ne!(
            Token::Linebreak("\n".into(), 3),
            Token::Linebreak("\r\n".into(), 3)
        );
    }

    #[test]
    fn closing_text_for_raw_strings() {
        assert_eq!(
            Token::start("##\"").closing_text().as_deref(),
            Some("\"##")
        );
        assert_eq!(
            Token::start("#\"\"\"").closing_text().as_deref(),
            Some("\"\"\"#")
        );
        assert_eq!(Token::start("\"").closing_text().as_deref(), Some("\""));
        assert!(Token::start("//").closing_text().is_none());
    }

    #[test]
    fn comment_classification() {
        assert!(Token::start("//").is_comment());
        assert!(Token::end("*/").is_comment());
        assert!(Token::CommentBody("foo".into()).is_comment());
        assert!(!Token::start("(").is_comment());
    }

    #[test]
    fn closes_matches_pairs() {
        assert!(Token::end(")").closes(&Token::start("(")));
        assert!(!Token::end("]").closes(&Token::start("(")));
        assert!(Token::Linebreak("\n".into(), 2).closes(&Token::start("//")));
        assert!(Token::end("#endif").closes(&Token::start("#if")));
    }
}
