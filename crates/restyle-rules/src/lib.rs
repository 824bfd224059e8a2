//! # restyle-rules
//!
//! Built-in formatting rules for restyle.
//!
//! Rules run in the order [`all_rules`] returns them. The order matters:
//! rules that move tokens between lines (`braces`, `elseOnSameLine`,
//! `semicolons`) run before the spacing rules, and `indent` runs after
//! everything that can create or join lines.
//!
//! ## Available Rules
//!
//! | Name | Default | Description |
//! |------|---------|-------------|
//! | `specifiers` | no (deprecated) | Alias of `modifierOrder` |
//! | `modifierOrder` | yes | Sorts declaration modifiers |
//! | `redundantInternal` | no | Removes the `internal` modifier |
//! | `duplicateImports` | yes | Removes repeated imports |
//! | `sortImports` | yes | Sorts contiguous import lines |
//! | `hoistPatternLet` | yes | Moves `let`/`var` in or out of case patterns |
//! | `redundantParens` | yes | Removes parens around conditions |
//! | `void` | yes | `Void` for return types, `()` for values |
//! | `semicolons` | yes | Removes semicolons |
//! | `braces` | yes | Opening brace placement |
//! | `elseOnSameLine` | yes | `else`/`catch` placement |
//! | `spaceInsideParens` | yes | No spaces just inside `()` |
//! | `spaceInsideBrackets` | yes | No spaces just inside `[]` |
//! | `spaceInsideBraces` | yes | One space just inside `{}` |
//! | `spaceAroundOperators` | yes | Spaces around infix operators |
//! | `consecutiveSpaces` | yes | Collapses runs of spaces |
//! | `trailingCommas` | yes | Trailing comma in multi-line collections |
//! | `noTrailingCommas` | no | Removes trailing commas |
//! | `blankLinesAtStartOfScope` | yes | No blank lines after `{` |
//! | `blankLinesAtEndOfScope` | yes | No blank lines before `}` |
//! | `consecutiveBlankLines` | yes | Limits runs of blank lines |
//! | `indent` | yes | Indents by scope depth |
//! | `trailingSpace` | yes | Strips whitespace at line ends |
//! | `linebreakAtEndOfFile` | yes | Exactly one linebreak at the end |
//!
//! ## Usage
//!
//! ```ignore
//! use restyle_core::{Engine, FormatOptions};
//!
//! let registry = restyle_rules::registry()?;
//! let engine = Engine::builder(&registry).disable(["semicolons"]).build()?;
//! let output = engine.format(source, &FormatOptions::default())?;
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod blank_lines_at_end_of_scope;
mod blank_lines_at_start_of_scope;
mod braces;
mod consecutive_blank_lines;
mod consecutive_spaces;
mod duplicate_imports;
mod else_on_same_line;
mod helpers;
mod hoist_pattern_let;
mod indent;
mod linebreak_at_end_of_file;
mod modifier_order;
mod presets;
mod redundant_internal;
mod redundant_parens;
mod semicolons;
mod sort_imports;
mod space_around_operators;
mod space_inside;
mod trailing_commas;
mod trailing_space;
mod void;

pub use blank_lines_at_end_of_scope::BlankLinesAtEndOfScope;
pub use blank_lines_at_start_of_scope::BlankLinesAtStartOfScope;
pub use braces::Braces;
pub use consecutive_blank_lines::ConsecutiveBlankLines;
pub use consecutive_spaces::ConsecutiveSpaces;
pub use duplicate_imports::DuplicateImports;
pub use else_on_same_line::ElseOnSameLine;
pub use hoist_pattern_let::HoistPatternLet;
pub use indent::Indent;
pub use linebreak_at_end_of_file::LinebreakAtEndOfFile;
pub use modifier_order::{ModifierOrder, Specifiers};
pub use presets::{all_rules, default_rules, registry, Preset};
pub use redundant_internal::RedundantInternal;
pub use redundant_parens::RedundantParens;
pub use semicolons::Semicolons;
pub use sort_imports::SortImports;
pub use space_around_operators::SpaceAroundOperators;
pub use space_inside::{SpaceInsideBraces, SpaceInsideBrackets, SpaceInsideParens};
pub use trailing_commas::{NoTrailingCommas, TrailingCommas};
pub use trailing_space::TrailingSpace;
pub use void::Void;

/// Re-export core types for convenience.
pub use restyle_core::{FormatOptions, Rule, RuleRegistry};
