//! # restyle-core
//!
//! Core of the restyle Swift formatter: a lossless lexer, a mutable token
//! stream with scope-aware navigation, a light declaration parser, and the
//! engine that runs rules over a stream until it stops changing.
//!
//! - [`tokenize`] turns source text into [`Token`]s whose concatenation is
//!   the input, byte for byte
//! - [`TokenStream`] is what rules mutate and navigate
//! - [`Rule`] is the trait every formatting rule implements
//! - [`Engine`] selects rules from a [`RuleRegistry`] and applies them
//!
//! ## Example
//!
//! ```ignore
//! use restyle_core::{Engine, FormatOptions};
//!
//! let engine = Engine::builder(&registry)
//!     .disable(["semicolons"])
//!     .max_passes(5)
//!     .build()?;
//!
//! let output = engine.format("let x = 1;\n", &FormatOptions::default())?;
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod config;
mod declaration;
mod directive;
mod engine;
mod error;
mod lexer;
mod navigation;
mod options;
mod rule;
mod stream;
mod token;

pub use config::{Config, ConfigError, EngineConfig, FilesConfig, RulesConfig};
pub use declaration::{
    parse_declarations, walk, Declaration, DeclarationKind, Modifier, TypeKind, Visibility,
};
pub use directive::{Directive, DirectiveKind, ALL_RULES, PREFIX as DIRECTIVE_PREFIX};
pub use engine::{
    Change, Engine, EngineBuilder, Mode, Outcome, DEFAULT_MAX_PASSES, DEFAULT_TIMEOUT,
};
pub use error::{ConvergenceError, FormatError, RuleError, StaleHandle, SyntaxError};
pub use lexer::{tokenize, tokenize_lossy, LexOptions};
pub use navigation::Significance;
pub use options::{
    descriptor, BraceStyle, ElsePosition, FormatOptions, ImportGrouping, OptionDescriptor,
    OptionKind, OptionsError, RangeSpacing, SemicolonMode, OPTION_SCHEMA,
};
pub use rule::{RegistryError, Rule, RuleBox, RuleRegistry};
pub use stream::{Handle, TokenStream};
pub use token::{is_keyword, source_text, NumberKind, OperatorKind, Token};

/// Parses directive comment bodies.
pub mod directives {
    pub use crate::directive::{looks_like_directive, parse};
}
