//! Rule ensuring a file ends with exactly one linebreak.

use restyle_core::{FormatOptions, Rule, RuleError, TokenStream};

/// Rule name for linebreakAtEndOfFile.
pub const NAME: &str = "linebreakAtEndOfFile";

/// Adds a missing final linebreak and drops trailing blank lines.
#[derive(Debug, Clone, Copy, Default)]
pub struct LinebreakAtEndOfFile;

impl Rule for LinebreakAtEndOfFile {
    fn name(&self) -> &'static str {
        NAME
    }

    fn help(&self) -> &'static str {
        "Add empty blank line at end of file."
    }

    fn options(&self) -> &'static [&'static str] {
        &["linebreak"]
    }

    fn apply(&self, stream: &mut TokenStream, options: &FormatOptions) -> Result<(), RuleError> {
        // A fragment is usually spliced into other text.
        if options.fragment {
            return Ok(());
        }
        let Some(last) = stream
            .tokens()
            .iter()
            .rposition(|t| !t.is_space_or_linebreak())
        else {
            return Ok(());
        };
        let tail = last + 1..stream.len();
        let linebreak = stream.tokens()[tail.clone()]
            .iter()
            .find(|t| t.is_linebreak())
            .cloned()
            .unwrap_or_else(|| stream.linebreak(tail.start, &options.linebreak));
        stream.replace_tokens(tail, vec![linebreak]);
        Ok(())
    }
}
