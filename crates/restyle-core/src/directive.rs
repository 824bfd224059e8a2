//! In-source directives carried by comments.
//!
//! ```text
//! // restyle:disable braces, indent
//! // restyle:enable braces
//! // restyle:disable:next trailingCommas
//! // restyle:options --max-blank-lines 2
//! ```
//!
//! The `restyle:` prefix is optional. Unprefixed directives only take
//! effect when every name they mention is known, so prose such as
//! `// disable the cache` stays an ordinary comment.

/// Prefix marking a comment as explicitly addressed to this tool.
pub const PREFIX: &str = "restyle:";

/// Name that stands for every rule in enable/disable directives.
pub const ALL_RULES: &str = "all";

/// What a directive asks for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DirectiveKind {
    /// Disable rules until a matching `enable` or end of file.
    Disable(Vec<String>),
    /// Re-enable rules.
    Enable(Vec<String>),
    /// Disable rules for the next construct only.
    DisableNext(Vec<String>),
    /// Override option values for this file.
    Options(Vec<(String, String)>),
}

/// A parsed directive comment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Directive {
    /// The instruction.
    pub kind: DirectiveKind,
    /// Whether the comment used the `restyle:` prefix.
    pub prefixed: bool,
}

impl Directive {
    /// Rule names mentioned by an enable/disable directive.
    #[must_use]
    pub fn rules(&self) -> &[String] {
        match &self.kind {
            DirectiveKind::Disable(rules)
            | DirectiveKind::Enable(rules)
            | DirectiveKind::DisableNext(rules) => rules,
            DirectiveKind::Options(_) => &[],
        }
    }

    /// Whether this directive names `rule`, directly or through `all`.
    #[must_use]
    pub fn mentions(&self, rule: &str) -> bool {
        self.rules().iter().any(|r| r == rule || r == ALL_RULES)
    }
}

/// Parses the body of a comment as a directive.
///
/// Returns `None` when the text is not shaped like a directive.
#[must_use]
pub fn parse(body: &str) -> Option<Directive> {
    let mut text = body.trim();
    let prefixed = if let Some(rest) = text.strip_prefix(PREFIX) {
        text = rest;
        true
    } else {
        false
    };
    let (command, rest) = match text.find(char::is_whitespace) {
        Some(at) => (&text[..at], text[at..].trim()),
        None => (text, ""),
    };
    let kind = match command {
        "disable" => DirectiveKind::Disable(rule_list(rest)?),
        "enable" => DirectiveKind::Enable(rule_list(rest)?),
        "disable:next" => DirectiveKind::DisableNext(rule_list(rest)?),
        "options" => DirectiveKind::Options(option_pairs(rest)?),
        _ => return None,
    };
    Some(Directive { kind, prefixed })
}

/// Whether a comment body is shaped like a directive.
#[must_use]
pub fn looks_like_directive(body: &str) -> bool {
    parse(body).is_some()
}

fn rule_list(text: &str) -> Option<Vec<String>> {
    let names: Vec<String> = text
        .split(|c: char| c == ',' || c.is_whitespace())
        .filter(|name| !name.is_empty())
        .map(str::to_string)
        .collect();
    let valid = !names.is_empty()
        && names
            .iter()
            .all(|name| name.chars().all(|c| c.is_alphanumeric() || c == '_'));
    valid.then_some(names)
}

fn option_pairs(text: &str) -> Option<Vec<(String, String)>> {
    let words: Vec<&str> = text.split_whitespace().collect();
    if words.is_empty() || words.len() % 2 != 0 {
        return None;
    }
    Some(
        words
            .chunks(2)
            .map(|pair| {
                let key = pair[0].trim_start_matches("--");
                (key.to_string(), pair[1].to_string())
            })
            .collect(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_prefixed_disable_list() {
        let directive = parse(" restyle:disable braces, indent ").unwrap();
        assert!(directive.prefixed);
        assert_eq!(
            directive.kind,
            DirectiveKind::Disable(vec!["braces".into(), "indent".into()])
        );
    }

    #[test]
    fn parses_bare_disable_next() {
        let directive = parse("disable:next trailingCommas").unwrap();
        assert!(!directive.prefixed);
        assert!(directive.mentions("trailingCommas"));
        assert!(!directive.mentions("indent"));
    }

    #[test]
    fn all_mentions_every_rule() {
        let directive = parse("restyle:enable all").unwrap();
        assert!(directive.mentions("anything"));
    }

    #[test]
    fn parses_option_pairs() {
        let directive = parse("restyle:options --max-blank-lines 2 indent-case true").unwrap();
        assert_eq!(
            directive.kind,
            DirectiveKind::Options(vec![
                ("max-blank-lines".into(), "2".into()),
                ("indent-case".into(), "true".into()),
            ])
        );
    }

    #[test]
    fn rejects_text_that_is_not_a_directive() {
        assert!(parse("just a comment").is_none());
        assert!(parse("disable").is_none());
        assert!(parse("options --indent").is_none());
        assert!(parse("disable it, please!").is_none());
    }
}
