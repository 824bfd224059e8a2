//! # restyle
//!
//! Token-based style rewriting for Swift source.
//!
//! This is the facade crate: it re-exports the core engine and the built-in
//! rules, and adds convenience entry points over the default rule set plus
//! parallel batch processing.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use restyle::FormatOptions;
//!
//! let output = restyle::format("let a = 1;", &FormatOptions::default())?;
//! assert_eq!(output, "let a = 1\n");
//! ```
//!
//! ## Choosing Rules
//!
//! ```rust,ignore
//! use restyle::{default_registry, Engine, FormatOptions};
//!
//! let engine = Engine::builder(default_registry()?)
//!     .enable(["redundantInternal"])
//!     .disable(["semicolons"])
//!     .build()?;
//! let changes = engine.lint(source, &FormatOptions::default())?;
//! ```
//!
//! ## Directives
//!
//! Rules can be switched off for part of a file with comments:
//!
//! ```swift
//! // restyle:disable indent
//! let matrix = [
//!   1, 0,
//!   0, 1,
//! ]
//! // restyle:enable indent
//! ```

#![forbid(unsafe_code)]

use std::sync::OnceLock;

use thiserror::Error;

// Re-export core types and traits
pub use restyle_core::*;

/// Built-in rules and presets.
pub mod rules {
    pub use restyle_rules::*;
}

mod batch;

pub use batch::{format_files, lint_files, Batch, FileReport, SourceFile};

/// Errors from the convenience entry points.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// The built-in rule set is inconsistent.
    #[error("invalid rule registry: {0}")]
    Registry(#[from] RegistryError),

    /// The rule selection could not be resolved.
    #[error(transparent)]
    Options(#[from] OptionsError),

    /// Formatting failed.
    #[error(transparent)]
    Format(#[from] FormatError),
}

static REGISTRY: OnceLock<Result<RuleRegistry, RegistryError>> = OnceLock::new();

/// The registry of every built-in rule, built on first use.
///
/// # Errors
///
/// Returns [`Error::Registry`] if the built-in rules are inconsistent.
pub fn default_registry() -> Result<&'static RuleRegistry, Error> {
    REGISTRY
        .get_or_init(restyle_rules::registry)
        .as_ref()
        .map_err(|e| Error::Registry(e.clone()))
}

/// An engine running the default rule set.
///
/// # Errors
///
/// Returns [`Error::Registry`] if the built-in rules are inconsistent.
pub fn default_engine() -> Result<Engine<'static>, Error> {
    Ok(Engine::builder(default_registry()?).build()?)
}

/// Formats `source` with the default rule set.
///
/// # Errors
///
/// Returns [`Error::Format`] when the file cannot be formatted; the input
/// is never partially rewritten.
pub fn format(source: &str, options: &FormatOptions) -> Result<String, Error> {
    Ok(default_engine()?.format(source, options)?)
}

/// Lists what the default rule set would change in `source`.
///
/// # Errors
///
/// Same as [`format`].
pub fn lint(source: &str, options: &FormatOptions) -> Result<Vec<Change>, Error> {
    Ok(default_engine()?.lint(source, options)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_registry_is_shared() {
        let a = default_registry().unwrap();
        let b = default_registry().unwrap();
        assert!(std::ptr::eq(a, b));
    }

    #[test]
    fn default_engine_skips_opt_in_rules() {
        let engine = default_engine().unwrap();
        assert!(engine.is_selected("indent"));
        assert!(!engine.is_selected("redundantInternal"));
        assert!(!engine.is_selected("specifiers"));
    }

    #[test]
    fn format_reports_syntax_errors() {
        let err = format("func foo() {", &FormatOptions::default()).unwrap_err();
        assert!(matches!(err, Error::Format(FormatError::Syntax(_))));
    }
}
