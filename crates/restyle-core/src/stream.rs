//! The mutable token sequence rules operate on.
//!
//! Indices into a [`TokenStream`] are only meaningful until the next
//! mutation. Code that needs to hold on to a position across mutations
//! takes a [`Handle`], which carries the generation it was taken at and
//! refuses to resolve once the stream has changed.
//!
//! Enumeration through [`TokenStream::for_each`] is safe under mutation:
//! every live enumeration cursor is adjusted when tokens are inserted,
//! removed or replaced, so no untouched token is skipped and no removed
//! token is visited.

use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};
use std::ops::Range;

use tracing::trace;

use crate::declaration::{parse_declarations, Declaration};
use crate::error::{RuleError, StaleHandle};
use crate::token::{source_text, Token};

/// A generation-tagged reference to a token position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Handle {
    index: usize,
    generation: u64,
}

impl Handle {
    /// Generation the handle was taken at.
    #[must_use]
    pub fn generation(&self) -> u64 {
        self.generation
    }
}

/// A recorded mutation, reported in lint mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Mutation {
    pub line: usize,
    pub rule: &'static str,
}

/// Mutable, index-addressed sequence of tokens for one file.
#[derive(Debug, Clone, Default)]
pub struct TokenStream {
    tokens: Vec<Token>,
    generation: u64,
    /// Next index to visit, one entry per live enumeration.
    cursors: Vec<usize>,
    /// Inclusive token ranges in which the active rule may not mutate.
    disabled: Vec<(usize, usize)>,
    rule: Option<&'static str>,
    tracking: bool,
    mutations: Vec<Mutation>,
}

impl TokenStream {
    /// Creates a stream over lexer output.
    #[must_use]
    pub fn new(tokens: Vec<Token>) -> Self {
        Self {
            tokens,
            ..Self::default()
        }
    }

    /// All tokens, in order.
    #[must_use]
    pub fn tokens(&self) -> &[Token] {
        &self.tokens
    }

    /// Number of tokens.
    #[must_use]
    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    /// Whether the stream has no tokens.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    /// Token at `index`, if in bounds.
    #[must_use]
    pub fn get(&self, index: usize) -> Option<&Token> {
        self.tokens.get(index)
    }

    /// Mutation counter; bumped by every effective mutation.
    #[must_use]
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Reconstructs the source text.
    #[must_use]
    pub fn text(&self) -> String {
        source_text(&self.tokens)
    }

    /// Content fingerprint of the stream text.
    #[must_use]
    pub fn fingerprint(&self) -> u64 {
        let mut hasher = DefaultHasher::new();
        for token in &self.tokens {
            token.text().hash(&mut hasher);
        }
        self.tokens.len().hash(&mut hasher);
        hasher.finish()
    }

    // --- handles ----------------------------------------------------------

    /// Takes a handle to `index` at the current generation.
    #[must_use]
    pub fn handle(&self, index: usize) -> Handle {
        Handle {
            index,
            generation: self.generation,
        }
    }

    /// Resolves a handle back to an index.
    ///
    /// # Errors
    ///
    /// Returns [`StaleHandle`] if the stream was mutated since the handle
    /// was taken.
    pub fn resolve(&self, handle: Handle) -> Result<usize, StaleHandle> {
        if handle.generation == self.generation {
            Ok(handle.index)
        } else {
            Err(StaleHandle {
                taken: handle.generation,
                current: self.generation,
            })
        }
    }

    /// Parses the declaration structure of the current tokens.
    ///
    /// The result describes this generation only; check it with
    /// [`TokenStream::ensure_fresh`] before use after any mutation.
    #[must_use]
    pub fn declarations(&self) -> Vec<Declaration> {
        parse_declarations(&self.tokens, self.generation)
    }

    /// Fails if `declaration` was parsed before the latest mutation.
    ///
    /// # Errors
    ///
    /// Returns [`StaleHandle`] when the generations differ.
    pub fn ensure_fresh(&self, declaration: &Declaration) -> Result<(), StaleHandle> {
        if declaration.generation == self.generation {
            Ok(())
        } else {
            Err(StaleHandle {
                taken: declaration.generation,
                current: self.generation,
            })
        }
    }

    // --- mutation ---------------------------------------------------------

    /// Replaces the token at `index`.
    pub fn replace_token(&mut self, index: usize, token: Token) {
        self.replace_tokens(index..index + 1, vec![token]);
    }

    /// Replaces the tokens in `range` with `tokens`.
    pub fn replace_tokens(&mut self, range: Range<usize>, tokens: Vec<Token>) {
        let range = self.clamp(range);
        if self.tokens[range.clone()] == tokens[..] || self.is_blocked(&range) {
            return;
        }
        let (start, removed, inserted) = (range.start, range.len(), tokens.len());
        self.record(start);
        self.tokens.splice(range, tokens);
        for next in &mut self.cursors {
            if start + removed <= *next {
                *next = *next + inserted - removed;
            } else if start < *next {
                *next = start + inserted;
            }
        }
        self.shift_disabled(start, removed, inserted);
        self.bump();
    }

    /// Inserts `token` before `index`.
    pub fn insert_token(&mut self, index: usize, token: Token) {
        self.insert_tokens(index, vec![token]);
    }

    /// Inserts `tokens` before `index`.
    pub fn insert_tokens(&mut self, index: usize, tokens: Vec<Token>) {
        let index = index.min(self.tokens.len());
        let blocked = self.disabled.iter().any(|&(s, e)| s < index && index <= e);
        if tokens.is_empty() || blocked {
            return;
        }
        let inserted = tokens.len();
        self.record(index.min(self.tokens.len().saturating_sub(1)));
        self.tokens.splice(index..index, tokens);
        for next in &mut self.cursors {
            if index < *next {
                *next += inserted;
            }
        }
        self.shift_disabled(index, 0, inserted);
        self.bump();
    }

    /// Removes the token at `index`.
    pub fn remove_token(&mut self, index: usize) {
        self.remove_tokens(index..index + 1);
    }

    /// Removes the tokens in `range`.
    pub fn remove_tokens(&mut self, range: Range<usize>) {
        let range = self.clamp(range);
        if range.is_empty() || self.is_blocked(&range) {
            return;
        }
        let (start, removed) = (range.start, range.len());
        self.record(start);
        self.tokens.drain(range);
        for next in &mut self.cursors {
            if start + removed <= *next {
                *next -= removed;
            } else if start < *next {
                *next = start;
            }
        }
        self.shift_disabled(start, removed, 0);
        self.bump();
    }

    fn clamp(&self, range: Range<usize>) -> Range<usize> {
        let end = range.end.min(self.tokens.len());
        range.start.min(end)..end
    }

    fn is_blocked(&self, range: &Range<usize>) -> bool {
        self.disabled
            .iter()
            .any(|&(s, e)| range.start <= e && range.end > s)
    }

    fn shift_disabled(&mut self, at: usize, removed: usize, inserted: usize) {
        for (s, e) in &mut self.disabled {
            if at + removed <= *s {
                *s = *s + inserted - removed;
                *e = *e + inserted - removed;
            } else if at <= *e {
                *e = *e + inserted - removed;
            }
        }
    }

    fn record(&mut self, index: usize) {
        if let (true, Some(rule)) = (self.tracking, self.rule) {
            let line = self.original_line(index);
            trace!(rule, line, "recorded change");
            self.mutations.push(Mutation { line, rule });
        }
    }

    fn bump(&mut self) {
        self.generation += 1;
    }

    // --- enumeration ------------------------------------------------------

    /// Visits every token matching `matching`, in order, passing its
    /// current index and a copy of the token.
    ///
    /// The callback may mutate the stream anywhere; enumeration continues
    /// with the first token after the current one that was not visited yet.
    /// Inserted tokens are visited only when inserted after the current
    /// token. Enumerations may nest.
    ///
    /// # Errors
    ///
    /// Stops at and returns the first error raised by `f`.
    pub fn for_each<M, F, E>(&mut self, matching: M, mut f: F) -> Result<(), E>
    where
        M: Fn(&Token) -> bool,
        F: FnMut(&mut Self, usize, Token) -> Result<(), E>,
    {
        let depth = self.cursors.len();
        self.cursors.push(0);
        let mut result = Ok(());
        loop {
            let index = self.cursors[depth];
            let Some(token) = self.tokens.get(index) else {
                break;
            };
            self.cursors[depth] = index + 1;
            if matching(token) {
                let token = token.clone();
                if let Err(e) = f(self, index, token) {
                    result = Err(e);
                    break;
                }
            }
        }
        self.cursors.truncate(depth);
        result
    }

    // --- rule context -----------------------------------------------------

    /// Builds a positioned error for the active rule.
    #[must_use]
    pub fn fail(&self, index: usize, message: impl Into<String>) -> RuleError {
        let (line, column, offset) = self.location(index);
        RuleError {
            rule: self.rule.unwrap_or_default().to_string(),
            message: message.into(),
            line,
            column,
            span: (offset, self.get(index).map_or(0, |t| t.text().len())).into(),
        }
    }

    /// Whether the active rule may mutate the token at `index`.
    #[must_use]
    pub fn is_enabled(&self, index: usize) -> bool {
        !self.disabled.iter().any(|&(s, e)| s <= index && index <= e)
    }

    /// Whether the active rule may mutate every token in `range`.
    ///
    /// An empty range asks whether an insertion at its start is allowed.
    /// Rules that make several edits check their whole span with this
    /// first, since each single edit inside a disabled region is dropped.
    #[must_use]
    pub fn is_range_enabled(&self, range: Range<usize>) -> bool {
        !self.is_blocked(&self.clamp(range))
    }

    /// Name of the rule currently applied, if any.
    #[must_use]
    pub fn current_rule(&self) -> Option<&'static str> {
        self.rule
    }

    pub(crate) fn begin_rule(&mut self, rule: &'static str, disabled: Vec<(usize, usize)>) {
        self.rule = Some(rule);
        self.disabled = disabled;
    }

    pub(crate) fn end_rule(&mut self) {
        self.rule = None;
        self.disabled.clear();
    }

    pub(crate) fn set_tracking(&mut self, tracking: bool) {
        self.tracking = tracking;
    }

    pub(crate) fn take_mutations(&mut self) -> Vec<Mutation> {
        std::mem::take(&mut self.mutations)
    }

    #[cfg(test)]
    pub(crate) fn disabled_ranges(&self) -> &[(usize, usize)] {
        &self.disabled
    }
}
