//! Formatting options and the static schema describing them.
//!
//! [`FormatOptions`] is a flat record; every field has a default. Options
//! are set by key through [`FormatOptions::set`], which is the single
//! validation path shared by config files, the command line and
//! `options` directives.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Where opening braces go.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum BraceStyle {
    /// `func foo() {`
    #[default]
    SameLine,
    /// Opening brace on its own line.
    NextLine,
}

/// Where `else`, `catch` and friends go relative to the closing brace.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ElsePosition {
    /// `} else {`
    #[default]
    SameLine,
    /// `}` then `else {` on the next line.
    NextLine,
}

/// How semicolons are treated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SemicolonMode {
    /// Keep semicolons separating statements on one line.
    #[default]
    Inline,
    /// Split such statements onto separate lines.
    Never,
}

/// Spacing around range operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RangeSpacing {
    /// `a ... b`
    #[default]
    Spaced,
    /// `a...b`
    NoSpace,
}

/// How import statements are grouped when sorted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ImportGrouping {
    /// Alphabetical.
    #[default]
    Alpha,
    /// Alphabetical, `@testable` imports last.
    TestableLast,
}

/// The full set of formatting options.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct FormatOptions {
    /// One level of indentation.
    pub indent: String,
    /// Line terminator used for inserted linebreaks.
    pub linebreak: String,
    /// Opening brace placement.
    pub brace_style: BraceStyle,
    /// `else` placement.
    pub else_position: ElsePosition,
    /// Hoist `let`/`var` out of patterns (`case let .foo(a, b)`).
    pub hoist_pattern_let: bool,
    /// Maximum consecutive blank lines.
    pub max_blank_lines: usize,
    /// Trailing comma after the last element of multi-line collections.
    pub trailing_commas: bool,
    /// Semicolon handling.
    pub semicolons: SemicolonMode,
    /// Range operator spacing.
    pub ranges: RangeSpacing,
    /// Indent `case` inside `switch`.
    pub indent_case: bool,
    /// Strip whitespace from blank lines.
    pub truncate_blank_lines: bool,
    /// Write `Void` rather than `()` for the empty type.
    pub use_void: bool,
    /// Import sorting mode.
    pub import_grouping: ImportGrouping,
    /// Input is a snippet that may be structurally incomplete.
    pub fragment: bool,
    /// Tokenize conflict markers instead of rejecting them.
    pub ignore_conflict_markers: bool,
}

impl Default for FormatOptions {
    fn default() -> Self {
        Self {
            indent: "    ".to_string(),
            linebreak: "\n".to_string(),
            brace_style: BraceStyle::SameLine,
            else_position: ElsePosition::SameLine,
            hoist_pattern_let: true,
            max_blank_lines: 1,
            trailing_commas: true,
            semicolons: SemicolonMode::Inline,
            ranges: RangeSpacing::Spaced,
            indent_case: false,
            truncate_blank_lines: true,
            use_void: true,
            import_grouping: ImportGrouping::Alpha,
            fragment: false,
            ignore_conflict_markers: false,
        }
    }
}

/// Errors interpreting options or rule selections.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum OptionsError {
    /// No option has this key.
    #[error("unknown option '{key}'")]
    UnknownOption {
        /// The key as given.
        key: String,
    },

    /// The value does not parse for this option.
    #[error("invalid value '{value}' for option '{key}' (expected {expected})")]
    InvalidValue {
        /// Option key.
        key: String,
        /// Value as given.
        value: String,
        /// Description of accepted values.
        expected: String,
    },

    /// The option affects lexing and cannot be changed from inside a file.
    #[error("option '{key}' cannot be set by a directive")]
    NotAllowedInDirective {
        /// Option key.
        key: String,
    },

    /// No rule has this name.
    #[error("unknown rule '{name}'")]
    UnknownRule {
        /// Rule name as given.
        name: String,
    },

    /// A directive names a rule that does not exist.
    #[error("unknown rule '{name}' in directive on line {line}")]
    UnknownDirectiveRule {
        /// Rule name as given.
        name: String,
        /// Line of the directive comment.
        line: usize,
    },

    /// Two mutually exclusive rules were both requested explicitly.
    #[error("rules '{first}' and '{second}' conflict; disable one of them")]
    ConflictingRules {
        /// First rule.
        first: String,
        /// Second rule.
        second: String,
    },
}

/// Value type of an option.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OptionKind {
    /// `true` / `false`.
    Bool,
    /// Non-negative integer.
    Int,
    /// Free text with option-specific parsing.
    Text,
    /// One of a fixed set of values.
    Choice(&'static [&'static str]),
}

type Apply = fn(&mut FormatOptions, &str, &str) -> Result<(), OptionsError>;

/// Schema entry for one option.
#[derive(Debug, Clone, Copy)]
pub struct OptionDescriptor {
    /// Key used in config files, on the command line and in directives.
    pub key: &'static str,
    /// Value type.
    pub kind: OptionKind,
    /// Default value, as text.
    pub default: &'static str,
    /// One-line description.
    pub help: &'static str,
    /// Rules reading this option; empty for options consumed by the engine.
    pub rules: &'static [&'static str],
    /// Whether an `options` directive may change it.
    pub directive_allowed: bool,
    apply: Apply,
}

impl OptionDescriptor {
    /// Parses `value` and stores it into `options`.
    ///
    /// # Errors
    ///
    /// Returns [`OptionsError::InvalidValue`] if `value` does not parse.
    pub fn apply(&self, options: &mut FormatOptions, value: &str) -> Result<(), OptionsError> {
        (self.apply)(options, self.key, value)
    }
}

/// Every option, in documentation order.
pub static OPTION_SCHEMA: &[OptionDescriptor] = &[
    OptionDescriptor {
        key: "indent",
        kind: OptionKind::Text,
        default: "4",
        help: "Number of spaces to indent, or \"tab\"",
        rules: &["indent"],
        directive_allowed: true,
        apply: |o, key, value| {
            o.indent = parse_indent(key, value)?;
            Ok(())
        },
    },
    OptionDescriptor {
        key: "linebreak",
        kind: OptionKind::Choice(&["lf", "crlf", "cr"]),
        default: "lf",
        help: "Line terminator for inserted linebreaks",
        rules: &["braces", "elseOnSameLine", "linebreakAtEndOfFile", "semicolons"],
        directive_allowed: true,
        apply: |o, key, value| {
            o.linebreak = match value {
                "lf" => "\n",
                "crlf" => "\r\n",
                "cr" => "\r",
                _ => return Err(invalid(key, value, "lf, crlf or cr")),
            }
            .to_string();
            Ok(())
        },
    },
    OptionDescriptor {
        key: "brace-style",
        kind: OptionKind::Choice(&["same-line", "next-line"]),
        default: "same-line",
        help: "Placement of opening braces",
        rules: &["braces"],
        directive_allowed: true,
        apply: |o, key, value| {
            o.brace_style = parse_choice(key, value)?;
            Ok(())
        },
    },
    OptionDescriptor {
        key: "else-position",
        kind: OptionKind::Choice(&["same-line", "next-line"]),
        default: "same-line",
        help: "Placement of else, catch and while after a closing brace",
        rules: &["elseOnSameLine"],
        directive_allowed: true,
        apply: |o, key, value| {
            o.else_position = parse_choice(key, value)?;
            Ok(())
        },
    },
    OptionDescriptor {
        key: "hoist-pattern-let",
        kind: OptionKind::Bool,
        default: "true",
        help: "Hoist let/var out of patterns instead of binding each element",
        rules: &["hoistPatternLet"],
        directive_allowed: true,
        apply: |o, key, value| {
            o.hoist_pattern_let = parse_bool(key, value)?;
            Ok(())
        },
    },
    OptionDescriptor {
        key: "max-blank-lines",
        kind: OptionKind::Int,
        default: "1",
        help: "Maximum number of consecutive blank lines",
        rules: &["consecutiveBlankLines"],
        directive_allowed: true,
        apply: |o, key, value| {
            o.max_blank_lines = value
                .parse()
                .map_err(|_| invalid(key, value, "a non-negative integer"))?;
            Ok(())
        },
    },
    OptionDescriptor {
        key: "trailing-commas",
        kind: OptionKind::Bool,
        default: "true",
        help: "Add (true) or remove (false) trailing commas in multi-line collections",
        rules: &["trailingCommas"],
        directive_allowed: true,
        apply: |o, key, value| {
            o.trailing_commas = parse_bool(key, value)?;
            Ok(())
        },
    },
    OptionDescriptor {
        key: "semicolons",
        kind: OptionKind::Choice(&["inline", "never"]),
        default: "inline",
        help: "Keep semicolons between statements on one line, or split them",
        rules: &["semicolons"],
        directive_allowed: true,
        apply: |o, key, value| {
            o.semicolons = parse_choice(key, value)?;
            Ok(())
        },
    },
    OptionDescriptor {
        key: "ranges",
        kind: OptionKind::Choice(&["spaced", "no-space"]),
        default: "spaced",
        help: "Spacing around range operators",
        rules: &["spaceAroundOperators"],
        directive_allowed: true,
        apply: |o, key, value| {
            o.ranges = parse_choice(key, value)?;
            Ok(())
        },
    },
    OptionDescriptor {
        key: "indent-case",
        kind: OptionKind::Bool,
        default: "false",
        help: "Indent case statements inside switch",
        rules: &["indent"],
        directive_allowed: true,
        apply: |o, key, value| {
            o.indent_case = parse_bool(key, value)?;
            Ok(())
        },
    },
    OptionDescriptor {
        key: "truncate-blank-lines",
        kind: OptionKind::Bool,
        default: "true",
        help: "Remove whitespace from otherwise blank lines",
        rules: &["indent", "trailingSpace"],
        directive_allowed: true,
        apply: |o, key, value| {
            o.truncate_blank_lines = parse_bool(key, value)?;
            Ok(())
        },
    },
    OptionDescriptor {
        key: "use-void",
        kind: OptionKind::Bool,
        default: "true",
        help: "Write Void (true) or () (false) for the empty type",
        rules: &["void"],
        directive_allowed: true,
        apply: |o, key, value| {
            o.use_void = parse_bool(key, value)?;
            Ok(())
        },
    },
    OptionDescriptor {
        key: "import-grouping",
        kind: OptionKind::Choice(&["alpha", "testable-last"]),
        default: "alpha",
        help: "Ordering of sorted imports",
        rules: &["sortImports"],
        directive_allowed: true,
        apply: |o, key, value| {
            o.import_grouping = parse_choice(key, value)?;
            Ok(())
        },
    },
    OptionDescriptor {
        key: "fragment",
        kind: OptionKind::Bool,
        default: "false",
        help: "Accept structurally incomplete input",
        rules: &[],
        directive_allowed: false,
        apply: |o, key, value| {
            o.fragment = parse_bool(key, value)?;
            Ok(())
        },
    },
    OptionDescriptor {
        key: "ignore-conflict-markers",
        kind: OptionKind::Bool,
        default: "false",
        help: "Format files containing version-control conflict markers",
        rules: &[],
        directive_allowed: false,
        apply: |o, key, value| {
            o.ignore_conflict_markers = parse_bool(key, value)?;
            Ok(())
        },
    },
];

/// Looks up the schema entry for `key`.
#[must_use]
pub fn descriptor(key: &str) -> Option<&'static OptionDescriptor> {
    OPTION_SCHEMA.iter().find(|d| d.key == key)
}

impl FormatOptions {
    /// Sets the option `key` from its textual `value`.
    ///
    /// # Errors
    ///
    /// Returns [`OptionsError::UnknownOption`] for unknown keys and
    /// [`OptionsError::InvalidValue`] for values that do not parse.
    pub fn set(&mut self, key: &str, value: &str) -> Result<(), OptionsError> {
        let descriptor = descriptor(key).ok_or_else(|| OptionsError::UnknownOption {
            key: key.to_string(),
        })?;
        descriptor.apply(self, value)
    }

    /// Options with the given overrides applied in order.
    ///
    /// # Errors
    ///
    /// Fails on the first override that [`FormatOptions::set`] rejects.
    pub fn with_overrides<'a>(
        &self,
        overrides: impl IntoIterator<Item = (&'a str, &'a str)>,
    ) -> Result<Self, OptionsError> {
        let mut options = self.clone();
        for (key, value) in overrides {
            options.set(key, value)?;
        }
        Ok(options)
    }
}

fn invalid(key: &str, value: &str, expected: &str) -> OptionsError {
    OptionsError::InvalidValue {
        key: key.to_string(),
        value: value.to_string(),
        expected: expected.to_string(),
    }
}

fn parse_bool(key: &str, value: &str) -> Result<bool, OptionsError> {
    match value {
        "true" => Ok(true),
        "false" => Ok(false),
        _ => Err(invalid(key, value, "true or false")),
    }
}

fn parse_choice<T: serde::de::DeserializeOwned>(key: &str, value: &str) -> Result<T, OptionsError> {
    let expected = descriptor(key)
        .and_then(|d| match d.kind {
            OptionKind::Choice(values) => Some(values.join(", ")),
            _ => None,
        })
        .unwrap_or_default();
    T::deserialize(serde::de::value::StrDeserializer::<serde::de::value::Error>::new(value))
        .map_err(|_| invalid(key, value, &format!("one of {expected}")))
}

fn parse_indent(key: &str, value: &str) -> Result<String, OptionsError> {
    if value == "tab" || value == "tabs" || value == "\t" {
        return Ok("\t".to_string());
    }
    if !value.is_empty() && value.chars().all(|c| c == ' ') {
        return Ok(value.to_string());
    }
    match value.parse::<usize>() {
        Ok(width) if width > 0 => Ok(" ".repeat(width)),
        _ => Err(invalid(key, value, "a positive number of spaces or \"tab\"")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn defaults_match_schema() {
        let mut options = FormatOptions::default();
        for descriptor in OPTION_SCHEMA {
            descriptor.apply(&mut options, descriptor.default).unwrap();
        }
        assert_eq!(options, FormatOptions::default());
    }

    #[test]
    fn keys_are_unique() {
        let keys: HashSet<_> = OPTION_SCHEMA.iter().map(|d| d.key).collect();
        assert_eq!(keys.len(), OPTION_SCHEMA.len());
    }

    #[test]
    fn set_parses_each_kind() {
        let mut options = FormatOptions::default();
        options.set("indent", "2").unwrap();
        options.set("brace-style", "next-line").unwrap();
        options.set("max-blank-lines", "3").unwrap();
        options.set("hoist-pattern-let", "false").unwrap();
        options.set("linebreak", "crlf").unwrap();
        assert_eq!(options.indent, "  ");
        assert_eq!(options.brace_style, BraceStyle::NextLine);
        assert_eq!(options.max_blank_lines, 3);
        assert!(!options.hoist_pattern_let);
        assert_eq!(options.linebreak, "\r\n");

        options.set("indent", "tab").unwrap();
        assert_eq!(options.indent, "\t");
    }

    #[test]
    fn set_rejects_bad_input() {
        let mut options = FormatOptions::default();
        assert_eq!(
            options.set("nope", "1"),
            Err(OptionsError::UnknownOption { key: "nope".into() })
        );
        let err = options.set("brace-style", "sideways").unwrap_err();
        assert!(err.to_string().contains("same-line, next-line"), "{err}");
        assert!(options.set("max-blank-lines", "-1").is_err());
        assert!(options.set("indent", "0").is_err());
    }

    #[test]
    fn lexing_options_are_not_directive_settable() {
        assert!(!descriptor("fragment").unwrap().directive_allowed);
        assert!(!descriptor("ignore-conflict-markers").unwrap().directive_allowed);
        assert!(descriptor("max-blank-lines").unwrap().directive_allowed);
    }

    #[test]
    fn deserializes_kebab_case() {
        let options: FormatOptions =
            toml::from_str("brace-style = \"next-line\"\nmax-blank-lines = 2").unwrap();
        assert_eq!(options.brace_style, BraceStyle::NextLine);
        assert_eq!(options.max_blank_lines, 2);
        assert_eq!(options.indent, "    ");
    }
}
