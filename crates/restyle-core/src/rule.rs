//! Rule trait and the registry holding the declared rule order.

use std::collections::HashSet;

use thiserror::Error;

use crate::error::RuleError;
use crate::options::FormatOptions;
use crate::stream::TokenStream;

/// A named transformation of a token stream.
///
/// Rules are stateless: everything they need comes from the stream and the
/// options, and nothing is remembered between files.
///
/// # Example
///
/// ```
/// use restyle_core::{FormatOptions, Rule, RuleError, Token, TokenStream};
///
/// pub struct NoTabs;
///
/// impl Rule for NoTabs {
///     fn name(&self) -> &'static str { "noTabs" }
///     fn help(&self) -> &'static str { "Replace tabs in spacing with one space." }
///
///     fn apply(&self, stream: &mut TokenStream, _: &FormatOptions) -> Result<(), RuleError> {
///         stream.for_each(|t| t.is_space() && t.text().contains('\t'), |stream, i, _| {
///             stream.replace_token(i, Token::space(" "));
///             Ok(())
///         })
///     }
/// }
/// ```
pub trait Rule: Send + Sync {
    /// Returns the camelCase name of this rule (e.g. "braces").
    fn name(&self) -> &'static str;

    /// Returns a one-line description, also used as the lint message.
    fn help(&self) -> &'static str;

    /// Option keys this rule reads and owns.
    fn options(&self) -> &'static [&'static str] {
        &[]
    }

    /// Option keys this rule reads but other rules own.
    fn shared_options(&self) -> &'static [&'static str] {
        &[]
    }

    /// Deprecation message, when this rule is kept for compatibility only.
    fn deprecation(&self) -> Option<&'static str> {
        None
    }

    /// Before/after example shown by `list-rules`.
    fn examples(&self) -> Option<&'static str> {
        None
    }

    /// Whether this rule runs when no explicit selection names it.
    fn enabled_by_default(&self) -> bool {
        self.deprecation().is_none()
    }

    /// Rules that must not run in the same invocation as this one.
    fn conflicts_with(&self) -> &'static [&'static str] {
        &[]
    }

    /// Applies the rule to `stream`.
    ///
    /// # Errors
    ///
    /// Returns a [`RuleError`] (usually built with [`TokenStream::fail`])
    /// when a structural assumption does not hold.
    fn apply(&self, stream: &mut TokenStream, options: &FormatOptions) -> Result<(), RuleError>;
}

/// Type alias for boxed Rule trait objects.
pub type RuleBox = Box<dyn Rule>;

/// Errors building a registry.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistryError {
    /// Two rules share a name.
    #[error("duplicate rule name '{name}'")]
    DuplicateName {
        /// The repeated name.
        name: String,
    },

    /// A rule declares a conflict with a rule that is not registered.
    #[error("rule '{rule}' conflicts with unknown rule '{other}'")]
    UnknownConflict {
        /// Declaring rule.
        rule: String,
        /// Unknown name.
        other: String,
    },
}

/// An immutable, ordered set of rules.
///
/// The order rules were given in is the order they run in.
pub struct RuleRegistry {
    rules: Vec<RuleBox>,
}

impl RuleRegistry {
    /// Builds a registry, validating names and declared conflicts.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError`] for duplicate names or conflicts with
    /// unregistered rules.
    pub fn new(rules: Vec<RuleBox>) -> Result<Self, RegistryError> {
        let mut names = HashSet::new();
        for rule in &rules {
            if !names.insert(rule.name()) {
                return Err(RegistryError::DuplicateName {
                    name: rule.name().to_string(),
                });
            }
        }
        for rule in &rules {
            if let Some(other) = rule.conflicts_with().iter().find(|c| !names.contains(*c)) {
                return Err(RegistryError::UnknownConflict {
                    rule: rule.name().to_string(),
                    other: (*other).to_string(),
                });
            }
        }
        Ok(Self { rules })
    }

    /// Rules in execution order.
    #[must_use]
    pub fn rules(&self) -> &[RuleBox] {
        &self.rules
    }

    /// Looks up a rule by name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&dyn Rule> {
        self.rules
            .iter()
            .find(|r| r.name() == name)
            .map(|r| &**r)
    }

    /// Position of a rule in the execution order.
    #[must_use]
    pub fn position(&self, name: &str) -> Option<usize> {
        self.rules.iter().position(|r| r.name() == name)
    }

    /// Whether `a` and `b` conflict, as declared by either side.
    #[must_use]
    pub fn conflicts(&self, a: &str, b: &str) -> bool {
        let declares = |x: &str, y: &str| self.get(x).is_some_and(|r| r.conflicts_with().contains(&y));
        declares(a, b) || declares(b, a)
    }

    /// Names of all rules, in order.
    pub fn names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.rules.iter().map(|r| r.name())
    }
}

impl std::fmt::Debug for RuleRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list().entries(self.names()).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Named(&'static str, &'static [&'static str]);

    impl Rule for Named {
        fn name(&self) -> &'static str {
            self.0
        }
        fn help(&self) -> &'static str {
            "test rule"
        }
        fn conflicts_with(&self) -> &'static [&'static str] {
            self.1
        }
        fn apply(&self, _: &mut TokenStream, _: &FormatOptions) -> Result<(), RuleError> {
            Ok(())
        }
    }

    #[test]
    fn keeps_declared_order() {
        let registry = RuleRegistry::new(vec![
            Box::new(Named("b", &[])),
            Box::new(Named("a", &[])),
        ])
        .unwrap();
        assert_eq!(registry.names().collect::<Vec<_>>(), ["b", "a"]);
        assert_eq!(registry.position("a"), Some(1));
    }

    #[test]
    fn rejects_duplicates() {
        let err = RuleRegistry::new(vec![Box::new(Named("a", &[])), Box::new(Named("a", &[]))])
            .unwrap_err();
        assert_eq!(err, RegistryError::DuplicateName { name: "a".into() });
    }

    #[test]
    fn conflicts_are_symmetric_and_validated() {
        let registry = RuleRegistry::new(vec![
            Box::new(Named("a", &["b"])),
            Box::new(Named("b", &[])),
        ])
        .unwrap();
        assert!(registry.conflicts("b", "a"));

        let err = RuleRegistry::new(vec![Box::new(Named("a", &["zzz"]))]).unwrap_err();
        assert!(matches!(err, RegistryError::UnknownConflict { .. }));
    }

    #[test]
    fn deprecated_rules_are_opt_in() {
        struct Old;
        impl Rule for Old {
            fn name(&self) -> &'static str {
                "old"
            }
            fn help(&self) -> &'static str {
                ""
            }
            fn deprecation(&self) -> Option<&'static str> {
                Some("use new instead")
            }
            fn apply(&self, _: &mut TokenStream, _: &FormatOptions) -> Result<(), RuleError> {
                Ok(())
            }
        }
        assert!(!Old.enabled_by_default());
    }
}
