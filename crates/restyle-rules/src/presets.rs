//! Rule presets and the declared execution order.

use restyle_core::{RegistryError, RuleBox, RuleRegistry};
use tracing::debug;

use crate::{
    BlankLinesAtEndOfScope, BlankLinesAtStartOfScope, Braces, ConsecutiveBlankLines,
    ConsecutiveSpaces, DuplicateImports, ElseOnSameLine, HoistPatternLet, Indent,
    LinebreakAtEndOfFile, ModifierOrder, NoTrailingCommas, RedundantInternal, RedundantParens,
    Semicolons, SortImports, SpaceAroundOperators, SpaceInsideBraces, SpaceInsideBrackets,
    SpaceInsideParens, Specifiers, TrailingCommas, TrailingSpace, Void,
};

/// Preset rule sets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Preset {
    /// Rules enabled by default.
    Default,
    /// Every rule, opt-in and deprecated ones included.
    All,
}

impl Preset {
    /// Returns the rules for this preset.
    #[must_use]
    pub fn rules(self) -> Vec<RuleBox> {
        match self {
            Self::Default => default_rules(),
            Self::All => all_rules(),
        }
    }
}

/// Returns every built-in rule in execution order.
#[must_use]
pub fn all_rules() -> Vec<RuleBox> {
    vec![
        Box::new(Specifiers),
        Box::new(ModifierOrder),
        Box::new(RedundantInternal),
        Box::new(DuplicateImports),
        Box::new(SortImports),
        Box::new(HoistPatternLet),
        Box::new(RedundantParens),
        Box::new(Void),
        Box::new(Semicolons),
        Box::new(Braces),
        Box::new(ElseOnSameLine),
        Box::new(SpaceInsideParens),
        Box::new(SpaceInsideBrackets),
        Box::new(SpaceInsideBraces),
        Box::new(SpaceAroundOperators),
        Box::new(ConsecutiveSpaces),
        Box::new(TrailingCommas),
        Box::new(NoTrailingCommas),
        Box::new(BlankLinesAtStartOfScope),
        Box::new(BlankLinesAtEndOfScope),
        Box::new(ConsecutiveBlankLines),
        Box::new(Indent),
        Box::new(TrailingSpace),
        Box::new(LinebreakAtEndOfFile),
    ]
}

/// Returns the rules enabled by default, in execution order.
#[must_use]
pub fn default_rules() -> Vec<RuleBox> {
    all_rules()
        .into_iter()
        .filter(|rule| rule.enabled_by_default())
        .collect()
}

/// Builds the registry of every built-in rule.
///
/// # Errors
///
/// Returns [`RegistryError`] if two rules share a name or a rule declares a
/// conflict with an unknown rule.
pub fn registry() -> Result<RuleRegistry, RegistryError> {
    let rules = all_rules();
    debug!("Registering {} built-in rules", rules.len());
    RuleRegistry::new(rules)
}

#[cfg(test)]
mod tests {
    use super::*;
    use restyle_core::OPTION_SCHEMA;
    use std::collections::BTreeSet;

    #[test]
    fn registry_is_valid() {
        let registry = registry().unwrap();
        assert_eq!(registry.rules().len(), all_rules().len());
    }

    #[test]
    fn names_are_camel_case() {
        for rule in all_rules() {
            let name = rule.name();
            assert!(name.chars().next().is_some_and(|c| c.is_ascii_lowercase()), "{name}");
            assert!(name.chars().all(|c| c.is_ascii_alphanumeric()), "{name}");
            assert!(!rule.help().is_empty(), "{name} has no help text");
        }
    }

    #[test]
    fn opt_in_rules_are_not_defaults() {
        let defaults: Vec<_> = default_rules().iter().map(|r| r.name()).collect();
        assert!(!defaults.contains(&"specifiers"));
        assert!(!defaults.contains(&"redundantInternal"));
        assert!(!defaults.contains(&"noTrailingCommas"));
        assert!(defaults.contains(&"indent"));
        assert_eq!(Preset::All.rules().len(), all_rules().len());
    }

    #[test]
    fn braces_run_before_indent() {
        let registry = registry().unwrap();
        let braces = registry.position("braces").unwrap();
        let indent = registry.position("indent").unwrap();
        assert!(braces < indent);
        assert_eq!(registry.position("linebreakAtEndOfFile"), Some(registry.rules().len() - 1));
    }

    /// Every option key lists exactly the rules that declare reading it.
    #[test]
    fn option_schema_matches_rule_declarations() {
        let rules = all_rules();
        for descriptor in OPTION_SCHEMA {
            let declared: BTreeSet<&str> = rules
                .iter()
                .filter(|r| {
                    r.options().contains(&descriptor.key)
                        || r.shared_options().contains(&descriptor.key)
                })
                .map(|r| r.name())
                .collect();
            let listed: BTreeSet<&str> = descriptor.rules.iter().copied().collect();
            assert_eq!(declared, listed, "option '{}'", descriptor.key);
        }
        for rule in &rules {
            for key in rule.options().iter().chain(rule.shared_options()) {
                assert!(
                    OPTION_SCHEMA.iter().any(|d| d.key == *key),
                    "{} reads unknown option '{key}'",
                    rule.name()
                );
            }
        }
    }

    /// Each option is owned by at most one rule; the rest share it.
    #[test]
    fn options_have_single_owner() {
        let rules = all_rules();
        for descriptor in OPTION_SCHEMA {
            let owners = rules
                .iter()
                .filter(|r| r.options().contains(&descriptor.key))
                .count();
            assert!(owners <= 1, "option '{}' has {owners} owners", descriptor.key);
        }
    }
}
