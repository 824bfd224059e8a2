//! Rule selection and the convergence loop.
//!
//! Use [`Engine::builder()`] to select rules from a [`RuleRegistry`]. An
//! engine only borrows the registry and holds no per-file state, so one
//! engine can format any number of files concurrently.

use std::collections::HashSet;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

use serde::Serialize;
use tracing::{debug, warn};

use crate::declaration::{walk, DeclarationKind};
use crate::directive::{self, Directive, DirectiveKind, ALL_RULES};
use crate::error::{ConvergenceError, FormatError};
use crate::lexer::{tokenize, LexOptions};
use crate::navigation::Significance;
use crate::options::{descriptor, FormatOptions, OptionsError};
use crate::rule::{Rule, RuleRegistry};
use crate::stream::TokenStream;
use crate::token::Token;

/// Default ceiling on passes per file.
pub const DEFAULT_MAX_PASSES: usize = 10;

/// Default wall-clock budget per file.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Whether mutations are kept.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// Mutate the stream and keep the result.
    Format,
    /// Work on a copy and only report what would change.
    Lint,
}

/// A location where a rule would change the input.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Change {
    /// Line in the original input (1-indexed).
    pub line: usize,
    /// Rule that made the change.
    pub rule: String,
    /// Description of the change.
    pub message: String,
}

/// Result of processing one source text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Outcome {
    /// Formatted text.
    pub output: String,
    /// Changes made, ordered by line then rule order.
    pub changes: Vec<Change>,
    /// Passes run, including the final clean one.
    pub passes: usize,
}

/// Builder for configuring an [`Engine`].
pub struct EngineBuilder<'r> {
    registry: &'r RuleRegistry,
    enable: Vec<String>,
    disable: Vec<String>,
    only: Option<Vec<String>>,
    max_passes: usize,
    timeout: Duration,
    cancellation: Option<Arc<AtomicBool>>,
}

impl<'r> EngineBuilder<'r> {
    /// Creates a builder selecting the default rules of `registry`.
    #[must_use]
    pub fn new(registry: &'r RuleRegistry) -> Self {
        Self {
            registry,
            enable: Vec::new(),
            disable: Vec::new(),
            only: None,
            max_passes: DEFAULT_MAX_PASSES,
            timeout: DEFAULT_TIMEOUT,
            cancellation: None,
        }
    }

    /// Enables rules in addition to the defaults.
    #[must_use]
    pub fn enable<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.enable.extend(names.into_iter().map(Into::into));
        self
    }

    /// Disables rules.
    #[must_use]
    pub fn disable<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.disable.extend(names.into_iter().map(Into::into));
        self
    }

    /// Runs only the named rules instead of the defaults.
    #[must_use]
    pub fn only<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.only = Some(names.into_iter().map(Into::into).collect());
        self
    }

    /// Sets the pass ceiling (default: 10).
    #[must_use]
    pub fn max_passes(mut self, passes: usize) -> Self {
        self.max_passes = passes.max(1);
        self
    }

    /// Sets the wall-clock budget per file (default: 10 seconds).
    #[must_use]
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Sets a flag that cancels processing at the next pass boundary.
    #[must_use]
    pub fn cancellation(mut self, flag: Arc<AtomicBool>) -> Self {
        self.cancellation = Some(flag);
        self
    }

    /// Resolves the rule selection and builds the engine.
    ///
    /// # Errors
    ///
    /// Returns [`OptionsError::UnknownRule`] for names not in the registry
    /// and [`OptionsError::ConflictingRules`] when two conflicting rules
    /// are both requested explicitly.
    pub fn build(self) -> Result<Engine<'r>, OptionsError> {
        let registry = self.registry;
        let requested = self
            .enable
            .iter()
            .chain(&self.disable)
            .chain(self.only.iter().flatten());
        for name in requested {
            if registry.get(name).is_none() {
                return Err(OptionsError::UnknownRule { name: name.clone() });
            }
        }

        let explicit: HashSet<&str> = self
            .enable
            .iter()
            .chain(self.only.iter().flatten())
            .map(String::as_str)
            .collect();
        let mut selected: Vec<bool> = registry
            .rules()
            .iter()
            .map(|rule| match &self.only {
                Some(only) => only.iter().any(|n| n == rule.name()),
                None => rule.enabled_by_default() || explicit.contains(rule.name()),
            })
            .collect();
        for (i, rule) in registry.rules().iter().enumerate() {
            if self.disable.iter().any(|n| n == rule.name()) {
                selected[i] = false;
            }
            if selected[i] && explicit.contains(rule.name()) {
                if let Some(message) = rule.deprecation() {
                    warn!(rule = rule.name(), "deprecated rule enabled: {message}");
                }
            }
        }

        let rules = registry.rules();
        for a in 0..rules.len() {
            for b in a + 1..rules.len() {
                let (name_a, name_b) = (rules[a].name(), rules[b].name());
                if !(selected[a] && selected[b]) || !registry.conflicts(name_a, name_b) {
                    continue;
                }
                match (explicit.contains(name_a), explicit.contains(name_b)) {
                    (true, true) => {
                        return Err(OptionsError::ConflictingRules {
                            first: name_a.to_string(),
                            second: name_b.to_string(),
                        })
                    }
                    (true, false) => selected[b] = false,
                    (false, true) => selected[a] = false,
                    (false, false) if !rules[b].enabled_by_default() => selected[b] = false,
                    (false, false) if !rules[a].enabled_by_default() => selected[a] = false,
                    (false, false) => {
                        return Err(OptionsError::ConflictingRules {
                            first: name_a.to_string(),
                            second: name_b.to_string(),
                        })
                    }
                }
                debug!(kept_a = selected[a], kept_b = selected[b], "resolved conflict between {name_a} and {name_b}");
            }
        }

        let selected = (0..rules.len()).filter(|&i| selected[i]).collect();
        Ok(Engine {
            registry,
            selected,
            max_passes: self.max_passes,
            timeout: self.timeout,
            cancellation: self.cancellation,
        })
    }
}

/// Applies the selected rules of a registry until the text stops changing.
pub struct Engine<'r> {
    registry: &'r RuleRegistry,
    selected: Vec<usize>,
    max_passes: usize,
    timeout: Duration,
    cancellation: Option<Arc<AtomicBool>>,
}

impl<'r> Engine<'r> {
    /// Creates a new builder over `registry`.
    #[must_use]
    pub fn builder(registry: &'r RuleRegistry) -> EngineBuilder<'r> {
        EngineBuilder::new(registry)
    }

    /// Selected rules, in execution order.
    pub fn rules(&self) -> impl Iterator<Item = &dyn Rule> + '_ {
        self.selected
            .iter()
            .map(|&i| &*self.registry.rules()[i])
    }

    /// Whether the rule named `name` is selected.
    #[must_use]
    pub fn is_selected(&self, name: &str) -> bool {
        self.rules().any(|r| r.name() == name)
    }

    /// Formats `source`.
    ///
    /// # Errors
    ///
    /// Returns a [`FormatError`] on syntax errors, bad options or
    /// directives, rule failures, non-convergence and cancellation.
    pub fn format(&self, source: &str, options: &FormatOptions) -> Result<String, FormatError> {
        self.process(source, options, Mode::Format)
            .map(|outcome| outcome.output)
    }

    /// Reports what formatting `source` would change, without changing it.
    ///
    /// # Errors
    ///
    /// Same as [`Engine::format`].
    pub fn lint(&self, source: &str, options: &FormatOptions) -> Result<Vec<Change>, FormatError> {
        self.process(source, options, Mode::Lint)
            .map(|outcome| outcome.changes)
    }

    /// Tokenizes and processes `source`, returning both text and changes.
    ///
    /// In lint mode the output is the unmodified input.
    ///
    /// # Errors
    ///
    /// Same as [`Engine::format`].
    pub fn process(
        &self,
        source: &str,
        options: &FormatOptions,
        mode: Mode,
    ) -> Result<Outcome, FormatError> {
        let lex_options = LexOptions {
            fragment: options.fragment,
            ignore_conflict_markers: options.ignore_conflict_markers,
        };
        let mut stream = TokenStream::new(tokenize(source, lex_options)?);
        let (changes, passes) = self.apply(&mut stream, options, mode)?;
        Ok(Outcome {
            output: stream.text(),
            changes,
            passes,
        })
    }

    /// Runs the convergence loop over `stream`.
    ///
    /// All work happens on a copy. In format mode the copy replaces
    /// `stream` once a clean pass is reached; on any error `stream` is left
    /// untouched. Returns the changes and the number of passes run.
    ///
    /// # Errors
    ///
    /// Same as [`Engine::format`].
    pub fn apply(
        &self,
        stream: &mut TokenStream,
        options: &FormatOptions,
        mode: Mode,
    ) -> Result<(Vec<Change>, usize), FormatError> {
        self.validate_directives(stream)?;
        let options = self.file_options(stream, options)?;

        let mut working = stream.clone();
        working.set_tracking(true);
        let initial = working.fingerprint();
        let started = Instant::now();
        let mut passes = 0;
        loop {
            if self.is_cancelled() {
                return Err(FormatError::Cancelled);
            }
            let before = working.fingerprint();
            for rule in self.rules() {
                let disabled = self.disabled_ranges(&working, rule.name());
                let generation = working.generation();
                working.begin_rule(rule.name(), disabled);
                let result = rule.apply(&mut working, &options);
                working.end_rule();
                result?;
                if working.generation() != generation {
                    debug!(
                        rule = rule.name(),
                        pass = passes + 1,
                        mutations = working.generation() - generation,
                        "rule changed stream"
                    );
                }
            }
            passes += 1;
            if working.fingerprint() == before {
                break;
            }
            if passes >= self.max_passes {
                return Err(ConvergenceError::PassLimit { passes }.into());
            }
            let elapsed = started.elapsed();
            if elapsed >= self.timeout {
                return Err(ConvergenceError::Timeout { elapsed, passes }.into());
            }
        }
        debug!(passes, "converged");

        let changes = if working.fingerprint() == initial {
            Vec::new()
        } else {
            self.changes(&mut working)
        };
        if mode == Mode::Format {
            working.set_tracking(false);
            *stream = working;
        }
        Ok((changes, passes))
    }

    fn is_cancelled(&self) -> bool {
        self.cancellation
            .as_ref()
            .is_some_and(|flag| flag.load(Ordering::Relaxed))
    }

    fn changes(&self, stream: &mut TokenStream) -> Vec<Change> {
        let mut seen = HashSet::new();
        let mut changes: Vec<(usize, usize, &dyn Rule)> = stream
            .take_mutations()
            .into_iter()
            .filter(|m| seen.insert((m.line, m.rule)))
            .filter_map(|m| {
                let position = self.registry.position(m.rule)?;
                Some((m.line, position, self.registry.get(m.rule)?))
            })
            .collect();
        changes.sort_by_key(|&(line, position, _)| (line, position));
        changes
            .into_iter()
            .map(|(line, _, rule)| Change {
                line,
                rule: rule.name().to_string(),
                message: rule.help().to_string(),
            })
            .collect()
    }

    fn validate_directives(&self, stream: &TokenStream) -> Result<(), OptionsError> {
        for (i, token) in stream.tokens().iter().enumerate() {
            let Token::FormatDirective(body) = token else {
                continue;
            };
            let Some(directive) = directive::parse(body) else {
                continue;
            };
            if !directive.prefixed && !names_are_known(self.registry, &directive) {
                debug!(line = stream.position(i).0, "ignoring comment {body:?}: names no known rule");
                continue;
            }
            if let Some(name) = directive
                .rules()
                .iter()
                .find(|n| *n != ALL_RULES && self.registry.get(n).is_none())
            {
                return Err(OptionsError::UnknownDirectiveRule {
                    name: name.clone(),
                    line: stream.position(i).0,
                });
            }
        }
        Ok(())
    }

    /// Applies `options` directives on top of `base`.
    fn file_options(
        &self,
        stream: &TokenStream,
        base: &FormatOptions,
    ) -> Result<FormatOptions, OptionsError> {
        let mut options = base.clone();
        for (_, directive) in directives(self.registry, stream) {
            let DirectiveKind::Options(pairs) = &directive.kind else {
                continue;
            };
            for (key, value) in pairs {
                let descriptor = descriptor(key)
                    .ok_or_else(|| OptionsError::UnknownOption { key: key.clone() })?;
                if !descriptor.directive_allowed {
                    return Err(OptionsError::NotAllowedInDirective { key: key.clone() });
                }
                descriptor.apply(&mut options, value)?;
            }
        }
        Ok(options)
    }

    /// Inclusive token ranges in which `rule` is disabled by directives.
    fn disabled_ranges(&self, stream: &TokenStream, rule: &str) -> Vec<(usize, usize)> {
        let mut ranges = Vec::new();
        let mut open = None;
        for (i, directive) in directives(self.registry, stream) {
            if !directive.mentions(rule) {
                continue;
            }
            match directive.kind {
                DirectiveKind::Disable(_) => {
                    open.get_or_insert(i);
                }
                DirectiveKind::Enable(_) => {
                    if let Some(start) = open.take() {
                        ranges.push((start, i));
                    }
                }
                DirectiveKind::DisableNext(_) => ranges.push((i, end_of_next_construct(stream, i))),
                DirectiveKind::Options(_) => {}
            }
        }
        if let Some(start) = open {
            ranges.push((start, stream.len().saturating_sub(1)));
        }
        ranges
    }
}

/// Directives in `stream` with their token index. Unprefixed directives
/// mentioning unknown names are ordinary comments and are skipped.
fn directives<'a>(
    registry: &'a RuleRegistry,
    stream: &'a TokenStream,
) -> impl Iterator<Item = (usize, Directive)> + 'a {
    stream
        .tokens()
        .iter()
        .enumerate()
        .filter_map(|(i, token)| match token {
            Token::FormatDirective(body) => directive::parse(body).map(|d| (i, d)),
            _ => None,
        })
        .filter(move |(_, d)| d.prefixed || names_are_known(registry, d))
}

fn names_are_known(registry: &RuleRegistry, directive: &Directive) -> bool {
    match &directive.kind {
        DirectiveKind::Options(pairs) => pairs.iter().all(|(key, _)| descriptor(key).is_some()),
        _ => directive
            .rules()
            .iter()
            .all(|name| name == ALL_RULES || registry.get(name).is_some()),
    }
}

/// Last token of the construct following the directive at `index`: the
/// next declaration when one starts there, otherwise the next statement.
fn end_of_next_construct(stream: &TokenStream, index: usize) -> usize {
    let Some(next) = stream.index_of(Significance::NonSpaceOrCommentOrLinebreak, index) else {
        return index;
    };
    let declarations = stream.declarations();
    let end = walk(&declarations)
        .find(|d| d.kind != DeclarationKind::Statement && d.start_index() == next)
        .map_or_else(
            || stream.end_of_statement(next),
            |d| d.range.end.saturating_sub(1),
        );
    end
}
