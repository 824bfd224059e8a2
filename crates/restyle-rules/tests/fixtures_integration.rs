//! Integration test: the default rule set end-to-end on fixture files.
//!
//! Each directory under `tests/fixtures/` holds an `input.swift` and the
//! `expected.swift` the default rules must produce from it.

use restyle_core::{Engine, FormatOptions};
use restyle_rules::registry;
use std::path::PathBuf;

fn fixture(name: &str, file: &str) -> String {
    let path = PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests/fixtures")
        .join(name)
        .join(file);
    std::fs::read_to_string(&path).unwrap_or_else(|e| panic!("{}: {e}", path.display()))
}

#[test]
fn default_rules_produce_expected_output() {
    let registry = registry().expect("built-in registry should be valid");
    let engine = Engine::builder(&registry).build().expect("engine should build");
    let options = FormatOptions::default();

    let input = fixture("default_rules", "input.swift");
    let expected = fixture("default_rules", "expected.swift");

    let output = engine.format(&input, &options).expect("fixture should format");
    assert_eq!(output, expected);
    assert!(engine.lint(&expected, &options).unwrap().is_empty());
}

#[test]
fn lint_names_every_rule_that_applies() {
    let registry = registry().unwrap();
    let engine = Engine::builder(&registry).build().unwrap();
    let input = fixture("default_rules", "input.swift");

    let changes = engine.lint(&input, &FormatOptions::default()).unwrap();
    let mut rules: Vec<&str> = changes.iter().map(|c| c.rule.as_str()).collect();
    rules.sort_unstable();
    rules.dedup();

    assert_eq!(
        rules,
        vec![
            "braces",
            "consecutiveBlankLines",
            "consecutiveSpaces",
            "duplicateImports",
            "redundantParens",
            "semicolons",
            "sortImports",
            "spaceInsideBrackets",
            "spaceInsideParens",
            "trailingSpace",
        ]
    );
}

#[test]
fn lint_leaves_input_untouched_and_matches_format() {
    let registry = registry().unwrap();
    let engine = Engine::builder(&registry).build().unwrap();
    let options = FormatOptions::default();
    let input = fixture("default_rules", "input.swift");

    let linted = engine
        .process(&input, &options, restyle_core::Mode::Lint)
        .unwrap();
    let formatted = engine
        .process(&input, &options, restyle_core::Mode::Format)
        .unwrap();
    assert_eq!(linted.changes, formatted.changes);
}
