//! Rule indenting code by scope depth.
//!
//! The rule makes one pass over the lines of the file, keeping a stack of
//! open scopes. Each line gets the indentation of the innermost scope it
//! starts in:
//!
//! - a scope opened on a line indents the following lines by one `indent`
//!   unit relative to that line, however many scopes the line opens;
//! - a line starting with a closing token takes the indentation of the
//!   line that opened the scope;
//! - `case` and `default` lines sit at the `switch` level, or one unit in
//!   with `indent-case`, and case bodies one unit further;
//! - a line that starts with an infix operator, or follows a line ending
//!   in one, is a continuation and is indented one extra unit;
//! - `#if` blocks do not indent their contents, and `#else`/`#endif` line
//!   up with their `#if`.
//!
//! Lines inside multi-line string literals and block comments are copied
//! through untouched.

use restyle_core::{FormatOptions, OperatorKind, Rule, RuleError, Token, TokenStream};

/// Rule name for indent.
pub const NAME: &str = "indent";

/// Indents lines by scope depth.
#[derive(Debug, Clone, Copy, Default)]
pub struct Indent;

impl Rule for Indent {
    fn name(&self) -> &'static str {
        NAME
    }

    fn help(&self) -> &'static str {
        "Indent code in accordance with the scope level."
    }

    fn options(&self) -> &'static [&'static str] {
        &["indent", "indent-case"]
    }

    fn shared_options(&self) -> &'static [&'static str] {
        &["truncate-blank-lines"]
    }

    fn examples(&self) -> Option<&'static str> {
        Some("  if x {\n-     // foo\n  } else {\n-     // bar\n-       }\n+     // foo\n+ } else {\n+     // bar\n+ }")
    }

    fn apply(&self, stream: &mut TokenStream, options: &FormatOptions) -> Result<(), RuleError> {
        let edits = Indenter::new(stream, options).run();
        for (start, indent) in edits.into_iter().rev() {
            let has_indent = stream.get(start).is_some_and(Token::is_space);
            match (has_indent, indent.is_empty()) {
                (true, true) => stream.remove_token(start),
                (true, false) => stream.replace_token(start, Token::space(indent)),
                (false, false) => stream.insert_token(start, Token::space(indent)),
                (false, true) => {}
            }
        }
        Ok(())
    }
}

/// An open scope.
struct Frame {
    opener: String,
    /// Indentation of lines inside the scope.
    inner: String,
    /// Indentation of a line starting with the closing token.
    close: String,
    /// Indentation of `case` lines when this is a `switch` body.
    case_indent: Option<String>,
    /// Lines starting inside are left as written.
    verbatim: bool,
}

struct Indenter<'a> {
    stream: &'a TokenStream,
    options: &'a FormatOptions,
    frames: Vec<Frame>,
    last_significant: Option<usize>,
    edits: Vec<(usize, String)>,
}

impl<'a> Indenter<'a> {
    fn new(stream: &'a TokenStream, options: &'a FormatOptions) -> Self {
        Self {
            stream,
            options,
            frames: Vec::new(),
            last_significant: None,
            edits: Vec::new(),
        }
    }

    /// Returns `(line start, wanted indent)` for every line whose
    /// indentation changes, in order.
    fn run(mut self) -> Vec<(usize, String)> {
        let tokens = self.stream.tokens();
        let mut start = 0;
        while start < tokens.len() {
            let end = self.stream.end_of_line(start);
            self.line(start, end);
            start = end + 1;
        }
        self.edits
    }

    fn line(&mut self, start: usize, end: usize) {
        let tokens = self.stream.tokens();
        let current = match tokens.get(start) {
            Some(Token::Space(s)) => s.clone(),
            _ => String::new(),
        };
        let first = if current.is_empty() { start } else { start + 1 };
        let verbatim = self.frames.iter().any(|f| f.verbatim);

        let (base, indent) = if verbatim {
            (current.clone(), current.clone())
        } else if first >= end {
            // Blank line.
            if self.options.truncate_blank_lines && !current.is_empty() {
                self.edits.push((start, String::new()));
            }
            return;
        } else {
            let base = self.base_indent(first);
            let indent = if self.is_continuation(first) {
                format!("{base}{}", self.options.indent)
            } else {
                base.clone()
            };
            (base, indent)
        };
        if indent != current {
            self.edits.push((start, indent.clone()));
        }

        for i in first..end {
            let token = &tokens[i];
            match token {
                Token::StartOfScope(s) if s == "//" => {}
                Token::StartOfScope(s) => {
                    let frame = self.open(i, s, &base, &indent);
                    self.frames.push(frame);
                }
                Token::EndOfScope(_) => {
                    self.frames.pop();
                }
                _ => {}
            }
            if !token.is_space_or_comment_or_linebreak() {
                self.last_significant = Some(i);
            }
        }
    }

    /// Indentation of the line starting with `first`, before continuation.
    fn base_indent(&self, first: usize) -> String {
        let token = &self.stream.tokens()[first];
        let top = self.frames.last();
        if token.is_end_of_scope() {
            return top.map(|f| f.close.clone()).unwrap_or_default();
        }
        if matches!(token, Token::CompilerDirective(_)) {
            return self
                .frames
                .iter()
                .rev()
                .find(|f| f.opener == "#if")
                .map(|f| f.close.clone())
                .unwrap_or_default();
        }
        if let Some(case_indent) = top.and_then(|f| f.case_indent.as_ref()) {
            if self.starts_case(first) {
                return case_indent.clone();
            }
        }
        top.map(|f| f.inner.clone()).unwrap_or_default()
    }

    /// Whether the line starting at `first` is a `case` label, or a comment
    /// directly above one.
    fn starts_case(&self, first: usize) -> bool {
        let tokens = self.stream.tokens();
        let mut i = first;
        while let Some(token) = tokens.get(i) {
            if token.is_keyword("case") || token.is_keyword("default") {
                return true;
            }
            if token.is_attribute() && token.text() == "@unknown" {
                return true;
            }
            if !token.is_space_or_comment_or_linebreak() {
                return false;
            }
            i += 1;
        }
        false
    }

    fn is_continuation(&self, first: usize) -> bool {
        let token = &self.stream.tokens()[first];
        if token.is_end_of_scope() || self.starts_case(first) {
            return false;
        }
        let is_infix = |t: &Token| matches!(t, Token::Operator(_, OperatorKind::Infix));
        is_infix(token)
            || self
                .last_significant
                .is_some_and(|i| is_infix(&self.stream.tokens()[i]))
    }

    fn open(&self, index: usize, opener: &str, base: &str, indent: &str) -> Frame {
        let unit = self.options.indent.as_str();
        let token = &self.stream.tokens()[index];
        let flat = |verbatim| Frame {
            opener: opener.to_string(),
            inner: indent.to_string(),
            close: indent.to_string(),
            case_indent: None,
            verbatim,
        };
        if token.is_string_delimiter() || opener == "/*" {
            return flat(true);
        }
        if opener == "#if" {
            return flat(false);
        }
        if opener == "{" {
            // Statement bodies ignore the continuation indent of the line
            // holding their brace; closures do not.
            let at = if self.stream.is_closure_brace(index) {
                indent
            } else {
                base
            };
            if is_switch_brace(self.stream, index) {
                let case_indent = if self.options.indent_case {
                    format!("{at}{unit}")
                } else {
                    at.to_string()
                };
                return Frame {
                    opener: opener.to_string(),
                    inner: format!("{case_indent}{unit}"),
                    close: at.to_string(),
                    case_indent: Some(case_indent),
                    verbatim: false,
                };
            }
            return Frame {
                opener: opener.to_string(),
                inner: format!("{at}{unit}"),
                close: at.to_string(),
                case_indent: None,
                verbatim: false,
            };
        }
        Frame {
            opener: opener.to_string(),
            inner: format!("{indent}{unit}"),
            close: indent.to_string(),
            case_indent: None,
            verbatim: false,
        }
    }
}

/// Whether the `{` at `brace` opens the body of a `switch`.
fn is_switch_brace(stream: &TokenStream, brace: usize) -> bool {
    let tokens = stream.tokens();
    let mut i = brace;
    while let Some(prev) = i.checked_sub(1) {
        match &tokens[prev] {
            Token::Keyword(k) if k == "switch" => return true,
            Token::EndOfScope(_) => match stream.start_of_scope(prev) {
                Some(open) => {
                    i = open;
                    continue;
                }
                None => return false,
            },
            Token::StartOfScope(_) | Token::Linebreak(..) | Token::Delimiter(_) => return false,
            _ => {}
        }
        i = prev;
    }
    false
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{assert_format, assert_format_with, assert_unchanged};

    #[test]
    fn indents_nested_scopes() {
        assert_format(
            NAME,
            "func foo() {\nif x {\nbar()\n}\n}\n",
            "func foo() {\n    if x {\n        bar()\n    }\n}\n",
        );
    }

    #[test]
    fn outdents_overindented_lines() {
        assert_format(
            NAME,
            "struct A {\n        let b = 1\n      }\n",
            "struct A {\n    let b = 1\n}\n",
        );
    }

    #[test]
    fn counts_one_level_per_line() {
        assert_unchanged(NAME, "foo(bar {\n    baz()\n})\n");
    }

    #[test]
    fn indents_switch_cases() {
        let input = "switch x {\n    case 1:\n  a()\ndefault:\n        b()\n}\n";
        assert_format(
            NAME,
            input,
            "switch x {\ncase 1:\n    a()\ndefault:\n    b()\n}\n",
        );
        let options = FormatOptions {
            indent_case: true,
            ..FormatOptions::default()
        };
        assert_format_with(
            NAME,
            input,
            "switch x {\n    case 1:\n        a()\n    default:\n        b()\n}\n",
            &options,
        );
    }

    #[test]
    fn indents_continuation_lines() {
        assert_format(
            NAME,
            "let x = a +\nb\nlet y = c\n.d()\n",
            "let x = a +\n    b\nlet y = c\n    .d()\n",
        );
    }

    #[test]
    fn statement_body_ignores_condition_continuation() {
        assert_unchanged(NAME, "if a &&\n    b {\n    c()\n}\n");
    }

    #[test]
    fn conditional_compilation_does_not_indent() {
        assert_format(
            NAME,
            "struct A {\n#if DEBUG\n  let a = 1\n    #else\nlet a = 2\n#endif\n}\n",
            "struct A {\n    #if DEBUG\n    let a = 1\n    #else\n    let a = 2\n    #endif\n}\n",
        );
    }

    #[test]
    fn leaves_multiline_strings_alone() {
        assert_unchanged(
            NAME,
            "func f() {\n    let s = \"\"\"\n  raw\n      text\n  \"\"\"\n}\n",
        );
    }

    #[test]
    fn truncates_blank_lines() {
        assert_format(
            NAME,
            "func f() {\n    a()\n    \n    b()\n}\n",
            "func f() {\n    a()\n\n    b()\n}\n",
        );
        let keep = FormatOptions {
            truncate_blank_lines: false,
            ..FormatOptions::default()
        };
        assert_format_with(
            NAME,
            "func f() {\n    a()\n    \n    b()\n}\n",
            "func f() {\n    a()\n    \n    b()\n}\n",
            &keep,
        );
    }

    #[test]
    fn uses_configured_unit() {
        let tabs = FormatOptions {
            indent: "\t".to_string(),
            ..FormatOptions::default()
        };
        assert_format_with(NAME, "if x {\n    y()\n}\n", "if x {\n\ty()\n}\n", &tabs);
    }
}
