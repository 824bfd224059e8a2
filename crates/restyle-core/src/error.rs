//! Error taxonomy for formatting a single file.
//!
//! Every error here is file-scoped: a batch of files keeps going after one
//! file fails, and a failed file is never written back.

use miette::{Diagnostic, SourceSpan};
use std::time::Duration;
use thiserror::Error;

use crate::options::OptionsError;

/// Input could not be tokenized.
#[derive(Debug, Clone, PartialEq, Eq, Error, Diagnostic)]
#[error("{message} at {line}:{column}")]
#[diagnostic(code(restyle::syntax))]
pub struct SyntaxError {
    /// What went wrong.
    pub message: String,
    /// Line number (1-indexed).
    pub line: usize,
    /// Column number (1-indexed).
    pub column: usize,
    /// Byte span of the offending input.
    #[label("here")]
    pub span: SourceSpan,
}

impl SyntaxError {
    /// Creates a syntax error at the given position.
    #[must_use]
    pub fn new(message: impl Into<String>, line: usize, column: usize, offset: usize) -> Self {
        Self {
            message: message.into(),
            line,
            column,
            span: SourceSpan::from((offset, 0)),
        }
    }
}

/// A rule met a structural precondition it could not satisfy.
#[derive(Debug, Clone, PartialEq, Eq, Error, Diagnostic)]
#[error("rule '{rule}' failed at {line}:{column}: {message}")]
#[diagnostic(code(restyle::rule))]
pub struct RuleError {
    /// Name of the failing rule (empty when raised outside a rule).
    pub rule: String,
    /// What went wrong.
    pub message: String,
    /// Line number (1-indexed) in the stream being formatted.
    pub line: usize,
    /// Column number (1-indexed).
    pub column: usize,
    /// Byte span in the stream being formatted.
    #[label("{message}")]
    pub span: SourceSpan,
}

/// The pass loop stopped before reaching a clean pass.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConvergenceError {
    /// Every allowed pass still changed the stream.
    #[error("formatting did not converge after {passes} passes")]
    PassLimit {
        /// Number of passes run.
        passes: usize,
    },
    /// The wall-clock budget ran out.
    #[error("formatting timed out after {elapsed:?} ({passes} passes completed)")]
    Timeout {
        /// Time spent before giving up.
        elapsed: Duration,
        /// Number of passes completed.
        passes: usize,
    },
}

/// A stored handle or declaration outlived a mutation of its stream.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("stale reference: taken at generation {taken}, stream is at generation {current}")]
pub struct StaleHandle {
    /// Generation the reference was taken at.
    pub taken: u64,
    /// Current generation of the stream.
    pub current: u64,
}

/// Any failure to format one file.
#[derive(Debug, Clone, PartialEq, Eq, Error, Diagnostic)]
pub enum FormatError {
    /// Tokenization failed; no rule ran.
    #[error(transparent)]
    #[diagnostic(transparent)]
    Syntax(#[from] SyntaxError),

    /// An option or rule selection could not be interpreted.
    #[error(transparent)]
    Options(#[from] OptionsError),

    /// A rule aborted; all mutations of this invocation were discarded.
    #[error(transparent)]
    #[diagnostic(transparent)]
    Rule(#[from] RuleError),

    /// No clean pass was reached; the input is left unmodified.
    #[error(transparent)]
    Convergence(#[from] ConvergenceError),

    /// Processing was cancelled between passes.
    #[error("formatting was cancelled")]
    Cancelled,
}

impl FormatError {
    /// Line and column of the error, when it has a position.
    #[must_use]
    pub fn position(&self) -> Option<(usize, usize)> {
        match self {
            Self::Syntax(e) => Some((e.line, e.column)),
            Self::Rule(e) => Some((e.line, e.column)),
            Self::Options(_) | Self::Convergence(_) | Self::Cancelled => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn syntax_error_display_includes_position() {
        let err = SyntaxError::new("Unterminated string literal", 3, 7, 20);
        assert_eq!(err.to_string(), "Unterminated string literal at 3:7");
    }

    #[test]
    fn format_error_position() {
        let err = FormatError::from(SyntaxError::new("Missing `}`", 1, 13, 12));
        assert_eq!(err.position(), Some((1, 13)));
        assert_eq!(FormatError::Cancelled.position(), None);
    }
}
