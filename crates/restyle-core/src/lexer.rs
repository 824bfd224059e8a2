//! Single-pass lexer turning source text into a lossless token sequence.
//!
//! Every input character ends up in exactly one token, so concatenating the
//! token texts reproduces the input byte for byte. A scope stack resolves
//! the context-sensitive cases: `<` as generic opener or operator, string
//! interpolation, nested block comments and `#if` blocks.

use crate::directive;
use crate::error::SyntaxError;
use crate::token::{is_keyword, NumberKind, OperatorKind, Token};

/// Maximum number of characters scanned ahead to decide whether `<` opens
/// a generic parameter list.
const GENERIC_LOOKAHEAD: usize = 512;

/// Options controlling how strict the lexer is.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LexOptions {
    /// Accept input whose scopes, strings or comments are still open at the
    /// end (a snippet rather than a whole file).
    pub fragment: bool,
    /// Tokenize version-control conflict markers instead of rejecting them.
    pub ignore_conflict_markers: bool,
}

impl LexOptions {
    /// Options for a snippet of source.
    #[must_use]
    pub fn fragment() -> Self {
        Self {
            fragment: true,
            ..Self::default()
        }
    }
}

/// Tokenizes `source`, failing on the first syntax error.
///
/// # Errors
///
/// Returns a positioned [`SyntaxError`] for unexpected characters, unmatched
/// closing scopes, conflict markers (unless ignored) and, outside fragment
/// mode, scopes left open at the end of input.
pub fn tokenize(source: &str, options: LexOptions) -> Result<Vec<Token>, SyntaxError> {
    let (tokens, mut errors) = Lexer::new(source, options).run();
    if errors.is_empty() {
        Ok(tokens)
    } else {
        Err(errors.swap_remove(0))
    }
}

/// Tokenizes `source` without failing.
///
/// Problems surface as [`Token::Error`] tokens where there is offending
/// text; open scopes at the end are simply left open. The result is still
/// lossless, which makes this suitable for editors and highlighting.
#[must_use]
pub fn tokenize_lossy(source: &str) -> Vec<Token> {
    let options = LexOptions {
        fragment: true,
        ignore_conflict_markers: true,
    };
    Lexer::new(source, options).run().0
}

#[derive(Debug, Clone, Copy)]
struct Pos {
    offset: usize,
    line: usize,
    column: usize,
}

#[derive(Debug, Clone)]
enum Scope {
    Bracket { close: char },
    Generic { index: usize },
    Interpolation,
    String { hashes: usize, multiline: bool },
    Conditional,
}

struct Lexer {
    chars: Vec<char>,
    index: usize,
    pos: Pos,
    options: LexOptions,
    tokens: Vec<Token>,
    scopes: Vec<Scope>,
    errors: Vec<SyntaxError>,
}

impl Lexer {
    fn new(source: &str, options: LexOptions) -> Self {
        Self {
            chars: source.chars().collect(),
            index: 0,
            pos: Pos {
                offset: 0,
                line: 1,
                column: 1,
            },
            options,
            tokens: Vec::new(),
            scopes: Vec::new(),
            errors: Vec::new(),
        }
    }

    fn run(mut self) -> (Vec<Token>, Vec<SyntaxError>) {
        self.check_conflict_marker();
        while let Some(c) = self.peek(0) {
            if matches!(self.scopes.last(), Some(Scope::String { .. })) {
                self.scan_string_body();
                continue;
            }
            match c {
                '\n' | '\r' => {
                    self.scan_linebreak();
                    self.check_conflict_marker();
                }
                '/' if self.peek(1) == Some('/') => self.scan_line_comment(),
                '/' if self.peek(1) == Some('*') => self.scan_block_comment(),
                '"' => self.open_string(0),
                '#' => self.scan_hash(),
                '@' => self.scan_attribute(),
                '`' => self.scan_escaped_identifier(),
                '(' | '[' | '{' => {
                    self.bump();
                    let close = match c {
                        '(' => ')',
                        '[' => ']',
                        _ => '}',
                    };
                    self.scopes.push(Scope::Bracket { close });
                    self.tokens.push(Token::StartOfScope(c.to_string()));
                }
                ')' | ']' | '}' => self.close_bracket(c),
                ',' | ';' | ':' => {
                    self.bump();
                    self.tokens.push(Token::Delimiter(c.to_string()));
                }
                '\\' => {
                    self.bump();
                    self.tokens
                        .push(Token::Operator("\\".into(), OperatorKind::Prefix));
                }
                c if is_horizontal_space(c) => self.scan_space(),
                c if c.is_ascii_digit() => self.scan_number(),
                c if is_identifier_head(c) => self.scan_identifier(),
                c if is_operator_char(c) => self.scan_operator(),
                c => {
                    let at = self.pos;
                    self.bump();
                    self.tokens.push(Token::Error(c.to_string()));
                    self.error_at(at, format!("Unexpected character `{c}`"));
                }
            }
        }
        self.finish()
    }

    fn finish(mut self) -> (Vec<Token>, Vec<SyntaxError>) {
        while let Some(scope) = self.scopes.pop() {
            let message = match scope {
                Scope::Generic { index } => {
                    self.demote_generic(index);
                    continue;
                }
                Scope::Bracket { close } => format!("Missing `{close}`"),
                Scope::Interpolation => "Unterminated string interpolation".to_string(),
                Scope::String { .. } => "Unterminated string literal".to_string(),
                Scope::Conditional => "Missing `#endif`".to_string(),
            };
            if !self.options.fragment {
                self.error_at(self.pos, message);
                break;
            }
        }
        resolve_operator_kinds(&mut self.tokens);
        (self.tokens, self.errors)
    }

    // --- cursor -----------------------------------------------------------

    fn peek(&self, n: usize) -> Option<char> {
        self.chars.get(self.index + n).copied()
    }

    fn bump(&mut self) -> Option<char> {
        let c = self.peek(0)?;
        self.index += 1;
        self.pos.offset += c.len_utf8();
        match c {
            '\n' => {
                self.pos.line += 1;
                self.pos.column = 1;
            }
            '\r' if self.peek(0) != Some('\n') => {
                self.pos.line += 1;
                self.pos.column = 1;
            }
            '\r' => {}
            _ => self.pos.column += 1,
        }
        Some(c)
    }

    fn starts_with(&self, text: &str) -> bool {
        text.chars()
            .enumerate()
            .all(|(i, c)| self.peek(i) == Some(c))
    }

    fn take_while(&mut self, predicate: impl Fn(char) -> bool) -> String {
        let mut text = String::new();
        while let Some(c) = self.peek(0) {
            if !predicate(c) {
                break;
            }
            text.push(c);
            self.bump();
        }
        text
    }

    fn error_at(&mut self, at: Pos, message: impl Into<String>) {
        self.errors
            .push(SyntaxError::new(message, at.line, at.column, at.offset));
    }

    // --- whitespace ---------------------------------------------------------

    fn scan_space(&mut self) {
        let text = self.take_while(is_horizontal_space);
        self.tokens.push(Token::Space(text));
    }

    fn scan_linebreak(&mut self) {
        let text = if self.starts_with("\r\n") {
            "\r\n"
        } else if self.peek(0) == Some('\r') {
            "\r"
        } else {
            "\n"
        };
        for _ in 0..text.len() {
            self.bump();
        }
        self.tokens
            .push(Token::Linebreak(text.to_string(), self.pos.line));
    }

    fn check_conflict_marker(&mut self) {
        if self.options.ignore_conflict_markers {
            return;
        }
        for marker in ["<<<<<<<", "=======", ">>>>>>>"] {
            if self.starts_with(marker) {
                let after = self.peek(marker.len());
                if after.map_or(true, |c| c == ' ' || c == '\n' || c == '\r') {
                    self.error_at(self.pos, "Found conflict marker");
                    return;
                }
            }
        }
    }

    // --- comments -----------------------------------------------------------

    fn scan_line_comment(&mut self) {
        self.bump();
        self.bump();
        self.tokens.push(Token::StartOfScope("//".into()));
        let rest = self.take_while(|c| c != '\n' && c != '\r');
        self.push_comment_text(&rest, true);
    }

    fn scan_block_comment(&mut self) {
        let start = self.pos;
        self.bump();
        self.bump();
        self.tokens.push(Token::StartOfScope("/*".into()));
        let mut depth = 1;
        let mut body = String::new();
        loop {
            if self.peek(0).is_none() {
                self.push_comment_text(&body, false);
                if !self.options.fragment {
                    self.error_at(start, "Unterminated comment");
                }
                return;
            }
            if self.starts_with("*/") {
                self.push_comment_text(&body, false);
                body.clear();
                self.bump();
                self.bump();
                self.tokens.push(Token::EndOfScope("*/".into()));
                depth -= 1;
                if depth == 0 {
                    return;
                }
            } else if self.starts_with("/*") {
                self.push_comment_text(&body, false);
                body.clear();
                self.bump();
                self.bump();
                self.tokens.push(Token::StartOfScope("/*".into()));
                depth += 1;
            } else if matches!(self.peek(0), Some('\n' | '\r')) {
                self.push_comment_text(&body, true);
                body.clear();
                self.scan_linebreak();
                let indent = self.take_while(is_horizontal_space);
                if !indent.is_empty() {
                    self.tokens.push(Token::Space(indent));
                }
            } else if let Some(c) = self.bump() {
                body.push(c);
            }
        }
    }

    /// Pushes comment text, splitting off surrounding whitespace.
    ///
    /// Leading whitespace is split only for line comments; trailing
    /// whitespace only when the text runs to the end of a line.
    fn push_comment_text(&mut self, text: &str, at_line_end: bool) {
        if text.is_empty() {
            return;
        }
        let mut body = text;
        let is_line_comment = self.tokens.last().is_some_and(|t| t.is_start("//"));
        if is_line_comment {
            let trimmed = body.trim_start_matches(is_horizontal_space);
            let leading = &body[..body.len() - trimmed.len()];
            if !leading.is_empty() {
                self.tokens.push(Token::Space(leading.to_string()));
            }
            body = trimmed;
        }
        let mut trailing = "";
        if at_line_end {
            let trimmed = body.trim_end_matches(is_horizontal_space);
            trailing = &body[trimmed.len()..];
            body = trimmed;
        }
        if !body.is_empty() {
            if directive::looks_like_directive(body) {
                self.tokens.push(Token::FormatDirective(body.to_string()));
            } else {
                self.tokens.push(Token::CommentBody(body.to_string()));
            }
        }
        if !trailing.is_empty() {
            self.tokens.push(Token::Space(trailing.to_string()));
        }
    }

    // --- strings ------------------------------------------------------------

    fn open_string(&mut self, hashes: usize) {
        let multiline = self.starts_with("\"\"\"");
        let quotes = if multiline { 3 } else { 1 };
        for _ in 0..quotes {
            self.bump();
        }
        let text = format!("{}{}", "#".repeat(hashes), "\"".repeat(quotes));
        self.tokens.push(Token::StartOfScope(text));
        self.scopes.push(Scope::String { hashes, multiline });
    }

    fn scan_string_body(&mut self) {
        let Some(Scope::String { hashes, multiline }) = self.scopes.last().cloned() else {
            return;
        };
        let hash_text = "#".repeat(hashes);
        let closing = if multiline {
            format!("\"\"\"{hash_text}")
        } else {
            format!("\"{hash_text}")
        };
        let escape = format!("\\{hash_text}");
        let mut body = String::new();
        while let Some(c) = self.peek(0) {
            if self.starts_with(&closing) {
                self.flush_string_body(&mut body);
                for _ in 0..closing.chars().count() {
                    self.bump();
                }
                self.scopes.pop();
                self.tokens.push(Token::EndOfScope(closing));
                return;
            }
            if self.starts_with(&escape) {
                let escape_len = escape.chars().count();
                if self.peek(escape_len) == Some('(') {
                    body.push_str(&escape);
                    for _ in 0..escape_len {
                        self.bump();
                    }
                    self.flush_string_body(&mut body);
                    self.bump();
                    self.tokens.push(Token::StartOfScope("(".into()));
                    self.scopes.push(Scope::Interpolation);
                    return;
                }
                for _ in 0..escape_len {
                    if let Some(c) = self.bump() {
                        body.push(c);
                    }
                }
                if let Some(escaped) = self.peek(0) {
                    if escaped != '\n' && escaped != '\r' {
                        body.push(escaped);
                        self.bump();
                    }
                }
                continue;
            }
            if c == '\n' || c == '\r' {
                self.flush_string_body(&mut body);
                if !multiline {
                    // Single-line literal broken by a newline: close it here
                    // so lexing can carry on in lossy mode.
                    self.error_at(self.pos, "Unterminated string literal");
                    self.scopes.pop();
                    return;
                }
                self.scan_linebreak();
                let indent = self.take_while(is_horizontal_space);
                if !indent.is_empty() {
                    self.tokens.push(Token::Space(indent));
                }
                continue;
            }
            body.push(c);
            self.bump();
        }
        self.flush_string_body(&mut body);
        // End of input inside the literal; `finish` reports the open scope.
    }

    fn flush_string_body(&mut self, body: &mut String) {
        if !body.is_empty() {
            self.tokens.push(Token::StringBody(std::mem::take(body)));
        }
    }

    // --- scopes -------------------------------------------------------------

    fn close_bracket(&mut self, c: char) {
        let at = self.pos;
        loop {
            match self.scopes.last() {
                Some(Scope::Generic { index }) => {
                    let index = *index;
                    self.scopes.pop();
                    self.demote_generic(index);
                }
                Some(Scope::Bracket { close }) if *close == c => {
                    self.scopes.pop();
                    break;
                }
                Some(Scope::Interpolation) if c == ')' => {
                    self.scopes.pop();
                    break;
                }
                _ => {
                    self.bump();
                    self.tokens.push(Token::Error(c.to_string()));
                    self.error_at(at, format!("Unexpected `{c}`"));
                    return;
                }
            }
        }
        self.bump();
        self.tokens.push(Token::EndOfScope(c.to_string()));
    }

    fn demote_generic(&mut self, index: usize) {
        if let Some(token) = self.tokens.get_mut(index) {
            *token = Token::Operator("<".into(), OperatorKind::None);
        }
    }

    fn scan_hash(&mut self) {
        let at = self.pos;
        let hashes = self.chars[self.index..]
            .iter()
            .take_while(|c| **c == '#')
            .count();
        if self.peek(hashes) == Some('"') {
            for _ in 0..hashes {
                self.bump();
            }
            self.open_string(hashes);
            return;
        }
        if hashes == 1 && self.peek(1).is_some_and(is_identifier_head) {
            self.bump();
            let word = self.take_while(is_identifier_char);
            match word.as_str() {
                "if" => {
                    self.scopes.push(Scope::Conditional);
                    self.tokens.push(Token::StartOfScope("#if".into()));
                }
                "endif" => self.close_conditional(at),
                "else" | "elseif" => self
                    .tokens
                    .push(Token::CompilerDirective(format!("#{word}"))),
                _ => self.tokens.push(Token::Keyword(format!("#{word}"))),
            }
            return;
        }
        self.bump();
        self.tokens.push(Token::Error("#".into()));
        self.error_at(at, "Unexpected character `#`");
    }

    fn close_conditional(&mut self, at: Pos) {
        while let Some(Scope::Generic { index }) = self.scopes.last() {
            let index = *index;
            self.scopes.pop();
            self.demote_generic(index);
        }
        if matches!(self.scopes.last(), Some(Scope::Conditional)) {
            self.scopes.pop();
            self.tokens.push(Token::EndOfScope("#endif".into()));
        } else {
            self.tokens.push(Token::Error("#endif".into()));
            self.error_at(at, "Unexpected `#endif`");
        }
    }

    // --- words --------------------------------------------------------------

    fn scan_attribute(&mut self) {
        let at = self.pos;
        self.bump();
        let word = self.take_while(is_identifier_char);
        if word.is_empty() {
            self.tokens.push(Token::Error("@".into()));
            self.error_at(at, "Unexpected character `@`");
        } else {
            self.tokens.push(Token::Keyword(format!("@{word}")));
        }
    }

    fn scan_escaped_identifier(&mut self) {
        let at = self.pos;
        let word_len = self.chars[self.index + 1..]
            .iter()
            .take_while(|c| is_identifier_char(**c))
            .count();
        if word_len > 0 && self.peek(word_len + 1) == Some('`') {
            let mut text = String::new();
            for _ in 0..word_len + 2 {
                if let Some(c) = self.bump() {
                    text.push(c);
                }
            }
            self.tokens.push(Token::Identifier(text));
        } else {
            self.bump();
            self.tokens.push(Token::Error("`".into()));
            self.error_at(at, "Unterminated escaped identifier");
        }
    }

    fn scan_identifier(&mut self) {
        let word = self.take_while(is_identifier_char);
        let after_member_dot = self
            .tokens
            .last()
            .is_some_and(|t| t.is_operator("."));
        if is_keyword(&word) && !(after_member_dot && word != "init" && word != "self") {
            self.tokens.push(Token::Keyword(word));
        } else {
            self.tokens.push(Token::Identifier(word));
        }
    }

    fn scan_number(&mut self) {
        let mut text = String::new();
        let radix_prefix = match (self.peek(0), self.peek(1)) {
            (Some('0'), Some('x')) => Some(NumberKind::Hex),
            (Some('0'), Some('b')) => Some(NumberKind::Binary),
            (Some('0'), Some('o')) => Some(NumberKind::Octal),
            _ => None,
        };
        let kind = if let Some(kind) = radix_prefix {
            for _ in 0..2 {
                if let Some(c) = self.bump() {
                    text.push(c);
                }
            }
            let digit = move |c: char| match kind {
                NumberKind::Binary => matches!(c, '0' | '1' | '_'),
                NumberKind::Octal => matches!(c, '0'..='7' | '_'),
                _ => c.is_ascii_hexdigit() || c == '_',
            };
            text.push_str(&self.take_while(digit));
            if kind == NumberKind::Hex {
                if self.peek(0) == Some('.') && self.peek(1).is_some_and(|c| c.is_ascii_hexdigit())
                {
                    text.push('.');
                    self.bump();
                    text.push_str(&self.take_while(digit));
                }
                self.scan_exponent(&mut text, ['p', 'P']);
            }
            kind
        } else {
            let mut kind = NumberKind::Integer;
            text.push_str(&self.take_while(|c| c.is_ascii_digit() || c == '_'));
            if self.peek(0) == Some('.') && self.peek(1).is_some_and(|c| c.is_ascii_digit()) {
                text.push('.');
                self.bump();
                text.push_str(&self.take_while(|c| c.is_ascii_digit() || c == '_'));
                kind = NumberKind::Decimal;
            }
            if self.scan_exponent(&mut text, ['e', 'E']) {
                kind = NumberKind::Decimal;
            }
            kind
        };
        self.tokens.push(Token::Number(text, kind));
    }

    fn scan_exponent(&mut self, text: &mut String, markers: [char; 2]) -> bool {
        let Some(marker) = self.peek(0).filter(|c| markers.contains(c)) else {
            return false;
        };
        let sign = self.peek(1).filter(|c| *c == '+' || *c == '-');
        let digit_at = if sign.is_some() { 2 } else { 1 };
        if !self.peek(digit_at).is_some_and(|c| c.is_ascii_digit()) {
            return false;
        }
        text.push(marker);
        self.bump();
        if let Some(sign) = sign {
            text.push(sign);
            self.bump();
        }
        text.push_str(&self.take_while(|c| c.is_ascii_digit() || c == '_'));
        true
    }

    // --- operators ----------------------------------------------------------

    fn scan_operator(&mut self) {
        if self.peek(0) == Some('>') && matches!(self.scopes.last(), Some(Scope::Generic { .. }))
        {
            self.bump();
            self.scopes.pop();
            self.tokens.push(Token::EndOfScope(">".into()));
            return;
        }

        let starts_with_dot = self.peek(0) == Some('.');
        let mut len = 0;
        while let Some(c) = self.peek(len) {
            let allowed = if starts_with_dot {
                c == '.' || is_operator_char(c)
            } else {
                c != '.' && is_operator_char(c)
            };
            let starts_comment =
                c == '/' && matches!(self.peek(len + 1), Some('/' | '*')) && len > 0;
            if !allowed || starts_comment {
                break;
            }
            len += 1;
        }
        let run: String = self.chars[self.index..self.index + len].iter().collect();

        let attached = self.tokens.last().is_some_and(Token::is_operand_end);
        let len = if attached
            && len > 1
            && ((run.starts_with('?') && run != "??") || (run.starts_with('!') && !run.starts_with("!=")))
        {
            1
        } else {
            len
        };

        if run == "<" && self.opens_generic() {
            let index = self.tokens.len();
            self.bump();
            self.scopes.push(Scope::Generic { index });
            self.tokens.push(Token::StartOfScope("<".into()));
            return;
        }

        let mut text = String::new();
        for _ in 0..len {
            if let Some(c) = self.bump() {
                text.push(c);
            }
        }
        self.tokens.push(Token::Operator(text, OperatorKind::None));
    }

    /// Decides whether the `<` at the cursor opens a generic parameter list
    /// by looking for a balanced `>` over type-like characters only. A `>`
    /// running straight into a name or number reads as a comparison.
    fn opens_generic(&self) -> bool {
        let follows_name = matches!(
            self.tokens.last(),
            Some(Token::Identifier(_))
        ) || self
            .tokens
            .last()
            .is_some_and(|t| t.is_keyword("init") || t.is_keyword("Self"));
        if !follows_name {
            return false;
        }
        let mut depth = 1;
        let mut i = self.index + 1;
        let limit = i + GENERIC_LOOKAHEAD;
        while i < self.chars.len() && i < limit {
            let c = self.chars[i];
            let next = self.chars.get(i + 1).copied();
            match c {
                '<' => depth += 1,
                '>' => {
                    depth -= 1;
                    if depth == 0 {
                        return !next.is_some_and(is_identifier_char);
                    }
                }
                '-' if next == Some('>') => i += 1,
                '&' if next != Some('&') => {}
                c if is_identifier_char(c)
                    || matches!(
                        c,
                        ' ' | '\t' | ',' | '.' | ':' | '[' | ']' | '(' | ')' | '?' | '!' | '@' | '`' | '$'
                    ) => {}
                _ => return false,
            }
            i += 1;
        }
        false
    }
}

/// Assigns a fixity to every operator from the tokens around it.
fn resolve_operator_kinds(tokens: &mut [Token]) {
    for i in 0..tokens.len() {
        let Token::Operator(text, OperatorKind::None) = &tokens[i] else {
            continue;
        };
        let kind = operator_kind(tokens, i, text);
        if let Token::Operator(_, k) = &mut tokens[i] {
            *k = kind;
        }
    }
}

fn operator_kind(tokens: &[Token], i: usize, text: &str) -> OperatorKind {
    let prev = i.checked_sub(1).map(|p| &tokens[p]);
    let next = tokens.get(i + 1);
    let space_before = prev.map_or(true, |t| {
        t.is_space_or_linebreak()
            || t.is_comment()
            || matches!(t, Token::StartOfScope(_) | Token::Delimiter(_))
            || matches!(t, Token::Operator(_, OperatorKind::Prefix | OperatorKind::Infix))
    });
    let space_after = next.map_or(true, |t| {
        t.is_space_or_linebreak()
            || t.is_comment()
            || matches!(t, Token::EndOfScope(_) | Token::Delimiter(_))
    });

    match text {
        "." => {
            let previous = tokens[..i]
                .iter()
                .rev()
                .find(|t| !t.is_space_or_comment_or_linebreak());
            return if previous.is_some_and(Token::is_operand_end) {
                OperatorKind::Infix
            } else {
                OperatorKind::Prefix
            };
        }
        "->" | "=" => return OperatorKind::Infix,
        "?" | "!" => {
            let after_keyword = prev.is_some_and(|t| t.is_keyword("try") || t.is_keyword("as"));
            if after_keyword || prev.is_some_and(Token::is_operand_end) {
                return OperatorKind::Postfix;
            }
        }
        _ => {}
    }

    let significant_prev = tokens[..i].iter().rev().find(|t| !t.is_space());
    let significant_next = tokens[i + 1..].iter().find(|t| !t.is_space());
    let stands_alone = significant_prev
        .is_some_and(|t| t.is_start("(") || t.is_delimiter(","))
        && significant_next.is_some_and(|t| t.is_end(")") || t.is_delimiter(","));
    if stands_alone {
        return OperatorKind::None;
    }

    match (space_before, space_after) {
        (true, false) => OperatorKind::Prefix,
        (false, true) => OperatorKind::Postfix,
        _ => OperatorKind::Infix,
    }
}

fn is_horizontal_space(c: char) -> bool {
    c.is_whitespace() && c != '\n' && c != '\r'
}

fn is_identifier_head(c: char) -> bool {
    c.is_alphabetic() || c == '_' || c == '$'
}

fn is_identifier_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_' || c == '$'
}

fn is_operator_char(c: char) -> bool {
    matches!(
        c,
        '/' | '=' | '-' | '+' | '!' | '*' | '%' | '<' | '>' | '&' | '|' | '^' | '~' | '?' | '.'
    )
}
