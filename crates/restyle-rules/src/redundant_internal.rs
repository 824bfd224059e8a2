//! Rule removing the `internal` access modifier, which is the default.

use restyle_core::{walk, FormatOptions, Rule, RuleError, Token, TokenStream};

/// Rule name for redundantInternal.
pub const NAME: &str = "redundantInternal";

/// Removes explicit `internal`.
#[derive(Debug, Clone, Copy, Default)]
pub struct RedundantInternal;

impl Rule for RedundantInternal {
    fn name(&self) -> &'static str {
        NAME
    }

    fn help(&self) -> &'static str {
        "Remove redundant internal access control."
    }

    fn examples(&self) -> Option<&'static str> {
        Some("- internal class Foo {\n+ class Foo {")
    }

    fn enabled_by_default(&self) -> bool {
        false
    }

    fn apply(&self, stream: &mut TokenStream, _: &FormatOptions) -> Result<(), RuleError> {
        let ranges: Vec<_> = walk(&stream.declarations())
            .filter_map(|d| d.modifier("internal"))
            .map(|m| {
                let end = if stream.get(m.range.end).is_some_and(Token::is_space) {
                    m.range.end + 1
                } else {
                    m.range.end
                };
                m.range.start..end
            })
            .collect();
        for range in ranges.into_iter().rev() {
            stream.remove_tokens(range);
        }
        Ok(())
    }
}
