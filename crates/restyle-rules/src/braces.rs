//! Rule placing the opening brace of blocks.
//!
//! With `brace-style = same-line` (the default) an opening brace that sits
//! alone on the line after its statement is pulled up:
//!
//! ```text
//! func foo()          func foo() {
//! {              =>       bar()
//!     bar()           }
//! }
//! ```
//!
//! With `next-line` the brace of every multi-line block moves down onto its
//! own line at the statement's indentation. Closure braces are never moved.

use restyle_core::{
    BraceStyle, FormatOptions, Rule, RuleError, Significance, Token, TokenStream,
};

use crate::helpers::{is_line_gap, line_break_with_indent};

/// Rule name for braces.
pub const NAME: &str = "braces";

/// Places opening braces according to `brace-style`.
#[derive(Debug, Clone, Copy, Default)]
pub struct Braces;

impl Rule for Braces {
    fn name(&self) -> &'static str {
        NAME
    }

    fn help(&self) -> &'static str {
        "Wrap braces in accordance with selected style."
    }

    fn options(&self) -> &'static [&'static str] {
        &["brace-style"]
    }

    fn shared_options(&self) -> &'static [&'static str] {
        &["linebreak"]
    }

    fn examples(&self) -> Option<&'static str> {
        Some("- func foo()\n- {\n+ func foo() {\n      bar()\n  }")
    }

    fn apply(&self, stream: &mut TokenStream, options: &FormatOptions) -> Result<(), RuleError> {
        stream.for_each(
            |t| t.is_start("{"),
            |stream, i, _| {
                let Some(prev) = stream.last_index_of(Significance::NonSpaceOrLinebreak, i) else {
                    return Ok(());
                };
                if stream.tokens()[prev].is_comment()
                    || stream.tokens()[prev].is_start_of_scope()
                    || stream.is_closure_brace(i)
                {
                    return Ok(());
                }
                let gap = &stream.tokens()[prev + 1..i];
                match options.brace_style {
                    BraceStyle::SameLine => {
                        if is_line_gap(gap) {
                            stream.replace_tokens(prev + 1..i, vec![Token::space(" ")]);
                        }
                    }
                    BraceStyle::NextLine => {
                        let multiline = stream
                            .end_of_scope(i)
                            .is_some_and(|end| stream.position(end).0 > stream.position(i).0);
                        if multiline && !gap.iter().any(Token::is_linebreak) {
                            let indent = stream.indent_for_line(prev).to_string();
                            let tokens =
                                line_break_with_indent(stream, i, &options.linebreak, &indent);
                            stream.replace_tokens(prev + 1..i, tokens);
                        }
                    }
                }
                Ok(())
            },
        )
    }
}
