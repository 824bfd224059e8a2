//! Rule removing blank lines directly before a closing brace.

use restyle_core::{FormatOptions, Rule, RuleError, TokenStream};

use crate::helpers::in_literal;

/// Rule name for blankLinesAtEndOfScope.
pub const NAME: &str = "blankLinesAtEndOfScope";

/// Removes trailing blank lines inside scopes.
#[derive(Debug, Clone, Copy, Default)]
pub struct BlankLinesAtEndOfScope;

impl Rule for BlankLinesAtEndOfScope {
    fn name(&self) -> &'static str {
        NAME
    }

    fn help(&self) -> &'static str {
        "Remove trailing blank line at the end of a scope."
    }

    fn examples(&self) -> Option<&'static str> {
        Some("  func foo() {\n      // foo\n-\n  }")
    }

    fn apply(&self, stream: &mut TokenStream, _: &FormatOptions) -> Result<(), RuleError> {
        stream.for_each(
            |t| t.is_end("}") || t.is_end(")") || t.is_end("]"),
            |stream, i, _| {
                if in_literal(stream, i) {
                    return Ok(());
                }
                let line_start = stream.start_of_line(i);
                if (line_start..i).any(|j| !stream.tokens()[j].is_space()) {
                    return Ok(());
                }
                // Walk back over whole blank lines.
                let mut first_blank = line_start;
                loop {
                    let Some(linebreak) = first_blank.checked_sub(1) else {
                        break;
                    };
                    let previous_start = stream.start_of_line(linebreak);
                    let blank = (previous_start..linebreak).all(|j| stream.tokens()[j].is_space());
                    if !blank {
                        break;
                    }
                    first_blank = previous_start;
                }
                if first_blank < line_start {
                    stream.remove_tokens(first_blank..line_start);
                }
                Ok(())
            },
        )
    }
}
