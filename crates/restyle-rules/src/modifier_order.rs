//! Rules sorting declaration modifiers into a canonical order.
//!
//! `specifiers` is the old name of `modifierOrder`, kept so existing
//! configuration and directives keep working.

use restyle_core::{
    walk, Declaration, FormatOptions, Modifier, Rule, RuleError, Token, TokenStream,
};

/// Rule name for modifierOrder.
pub const NAME: &str = "modifierOrder";

/// Rule name for the deprecated alias.
pub const DEPRECATED_NAME: &str = "specifiers";

/// Canonical order. Access levels share a rank, as do setter access levels.
const ORDER: &[&[&str]] = &[
    &["override"],
    &["private", "fileprivate", "internal", "package", "public", "open"],
    &[
        "private(set)",
        "fileprivate(set)",
        "internal(set)",
        "package(set)",
        "public(set)",
    ],
    &["final", "dynamic"],
    &["optional", "required"],
    &["convenience"],
    &["static", "class"],
    &["lazy"],
    &["weak", "unowned", "unowned(safe)", "unowned(unsafe)"],
    &["mutating", "nonmutating"],
    &["prefix", "infix", "postfix"],
    &["nonisolated"],
    &["indirect"],
];

fn rank(name: &str) -> usize {
    ORDER
        .iter()
        .position(|group| group.contains(&name))
        .unwrap_or(ORDER.len())
}

/// Sorts modifiers such as `public`, `static` and `override`.
#[derive(Debug, Clone, Copy, Default)]
pub struct ModifierOrder;

impl Rule for ModifierOrder {
    fn name(&self) -> &'static str {
        NAME
    }

    fn help(&self) -> &'static str {
        "Use consistent ordering for member modifiers."
    }

    fn examples(&self) -> Option<&'static str> {
        Some("- lazy public weak private(set) var foo: UIView?\n+ public private(set) lazy weak var foo: UIView?\n\n- final override func foo()\n+ override final func foo()")
    }

    fn apply(&self, stream: &mut TokenStream, _: &FormatOptions) -> Result<(), RuleError> {
        // Reordering keeps the token count of each run, so edits collected
        // from one parse stay valid when applied back to front.
        let edits: Vec<_> = {
            let declarations = stream.declarations();
            walk(&declarations)
                .filter_map(|d| sorted_run(stream, d))
                .collect()
        };
        for (range, tokens) in edits.into_iter().rev() {
            stream.replace_tokens(range, tokens);
        }
        Ok(())
    }
}

/// The replacement for the run of non-attribute modifiers of `declaration`,
/// when that run is out of order and laid out on one line.
fn sorted_run(
    stream: &TokenStream,
    declaration: &Declaration,
) -> Option<(std::ops::Range<usize>, Vec<Token>)> {
    let modifiers: Vec<&Modifier> = declaration
        .modifiers
        .iter()
        .filter(|m| !m.is_attribute())
        .collect();
    if modifiers.len() < 2 {
        return None;
    }
    let contiguous = modifiers.windows(2).all(|pair| {
        pair[1].range.start == pair[0].range.end + 1
            && stream
                .get(pair[0].range.end)
                .is_some_and(|t| t.is_space() && !t.text().contains('\t'))
    });
    if !contiguous || modifiers.windows(2).all(|p| rank(&p[0].name) <= rank(&p[1].name)) {
        return None;
    }

    let mut sorted = modifiers.clone();
    sorted.sort_by_key(|m| rank(&m.name));
    let mut tokens = Vec::new();
    for (n, modifier) in sorted.iter().enumerate() {
        if n > 0 {
            tokens.push(Token::space(" "));
        }
        tokens.extend_from_slice(&stream.tokens()[modifier.range.clone()]);
    }
    let first = modifiers.first()?.range.start;
    let last = modifiers.last()?.range.end;
    Some((first..last, tokens))
}

/// Deprecated alias of [`ModifierOrder`].
#[derive(Debug, Clone, Copy, Default)]
pub struct Specifiers;

impl Rule for Specifiers {
    fn name(&self) -> &'static str {
        DEPRECATED_NAME
    }

    fn help(&self) -> &'static str {
        "Use consistent ordering for member modifiers."
    }

    fn deprecation(&self) -> Option<&'static str> {
        Some("Use modifierOrder instead.")
    }

    fn apply(&self, stream: &mut TokenStream, options: &FormatOptions) -> Result<(), RuleError> {
        ModifierOrder.apply(stream, options)
    }
}
