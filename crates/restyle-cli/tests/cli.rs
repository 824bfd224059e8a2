//! Integration test: the `restyle` binary end-to-end on a temporary tree.

use std::fs;
use std::path::Path;
use std::process::{Command, Output};
use tempfile::TempDir;

fn restyle(dir: &Path, args: &[&str]) -> Output {
    let global = dir.join(".no-global-config");
    Command::new(env!("CARGO_BIN_EXE_restyle"))
        .args(args)
        .current_dir(dir)
        .env("RESTYLE_CONFIG_DIR", global)
        .env_remove("RESTYLE_CONFIG")
        .env_remove("RUST_LOG")
        .output()
        .expect("restyle binary should run")
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

fn project(files: &[(&str, &str)]) -> TempDir {
    let tmp = TempDir::new().expect("temp dir");
    for (name, text) in files {
        let path = tmp.path().join(name);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).expect("create dirs");
        }
        fs::write(path, text).expect("write fixture");
    }
    tmp
}

// ── lint ──

#[test]
fn lint_reports_changes_and_fails() {
    let tmp = project(&[("a.swift", "let a = 1;\n"), ("b.swift", "let b = 2\n")]);
    let output = restyle(tmp.path(), &["lint", "--format", "compact"]);

    assert!(!output.status.success());
    let text = stdout(&output);
    assert!(text.contains("a.swift:1: [semicolons]"), "unexpected output: {text}");
    assert!(!text.contains("b.swift"), "unexpected output: {text}");
}

#[test]
fn lint_passes_on_formatted_tree() {
    let tmp = project(&[("Sources/a.swift", "let a = 1\n")]);
    let output = restyle(tmp.path(), &["lint"]);
    assert!(output.status.success(), "{}", stdout(&output));
}

#[test]
fn lint_json_is_machine_readable() {
    let tmp = project(&[("a.swift", "let a = 1;\n")]);
    let output = restyle(tmp.path(), &["lint", "--format", "json"]);
    let value: serde_json::Value =
        serde_json::from_slice(&output.stdout).expect("lint should print JSON");
    assert_eq!(value["summary"]["changes"], 1);
    assert_eq!(value["files"][0]["changes"][0]["line"], 1);
}

// ── format ──

#[test]
fn format_rewrites_changed_files_only() {
    let tmp = project(&[("a.swift", "func foo()\n{\nbar();\n}"), ("b.swift", "let b = 2\n")]);
    let output = restyle(tmp.path(), &["format"]);

    assert!(output.status.success(), "{}", stdout(&output));
    assert_eq!(
        fs::read_to_string(tmp.path().join("a.swift")).unwrap(),
        "func foo() {\n    bar()\n}\n"
    );
    assert_eq!(fs::read_to_string(tmp.path().join("b.swift")).unwrap(), "let b = 2\n");
    assert!(stdout(&output).contains("Formatted 1 of 2 file(s)"));
}

#[test]
fn format_check_does_not_write() {
    let tmp = project(&[("a.swift", "let a = 1;\n")]);
    let output = restyle(tmp.path(), &["format", "--check"]);

    assert!(!output.status.success());
    assert_eq!(fs::read_to_string(tmp.path().join("a.swift")).unwrap(), "let a = 1;\n");
}

#[test]
fn format_leaves_broken_files_untouched() {
    let tmp = project(&[("bad.swift", "func foo() {"), ("good.swift", "let a = 1;\n")]);
    let output = restyle(tmp.path(), &["format"]);

    assert!(!output.status.success());
    assert_eq!(fs::read_to_string(tmp.path().join("bad.swift")).unwrap(), "func foo() {");
    assert_eq!(fs::read_to_string(tmp.path().join("good.swift")).unwrap(), "let a = 1\n");
}

#[test]
fn unreadable_file_is_reported_and_others_still_formatted() {
    let tmp = project(&[("good.swift", "let a = 1;\n")]);
    fs::write(tmp.path().join("bad.swift"), [0xff, 0xfe, 0xfd]).unwrap();
    let output = restyle(tmp.path(), &["format"]);

    assert!(!output.status.success());
    assert_eq!(fs::read_to_string(tmp.path().join("good.swift")).unwrap(), "let a = 1\n");
    assert_eq!(fs::read(tmp.path().join("bad.swift")).unwrap(), [0xff, 0xfe, 0xfd]);
    assert!(stdout(&output).contains("Formatted 1 of 2 file(s), 1 error(s)"));
    assert!(String::from_utf8_lossy(&output.stderr).contains("bad.swift"));
}

#[test]
fn format_respects_rule_selection_and_exclusions() {
    let tmp = project(&[
        ("a.swift", "let a = 1;\nif (a) {\n}\n"),
        ("Generated/b.swift", "let b = 2;\n"),
    ]);
    let output = restyle(
        tmp.path(),
        &["format", "--rules", "semicolons", "--exclude", "**/Generated/**"],
    );

    assert!(output.status.success(), "{}", stdout(&output));
    assert_eq!(
        fs::read_to_string(tmp.path().join("a.swift")).unwrap(),
        "let a = 1\nif (a) {\n}\n"
    );
    assert_eq!(
        fs::read_to_string(tmp.path().join("Generated/b.swift")).unwrap(),
        "let b = 2;\n"
    );
}

#[test]
fn project_config_is_picked_up() {
    let tmp = project(&[
        ("restyle.toml", "[format]\nindent = 2\n"),
        ("a.swift", "if x {\ny()\n}\n"),
    ]);
    let output = restyle(tmp.path(), &["format"]);

    assert!(output.status.success(), "{}", stdout(&output));
    assert_eq!(
        fs::read_to_string(tmp.path().join("a.swift")).unwrap(),
        "if x {\n  y()\n}\n"
    );
}

// ── list-rules / init ──

#[test]
fn list_rules_shows_builtins() {
    let tmp = project(&[]);
    let output = restyle(tmp.path(), &["list-rules", "--options"]);

    assert!(output.status.success());
    let text = stdout(&output);
    assert!(text.contains("indent"));
    assert!(text.contains("redundantInternal"));
    assert!(text.contains("max-blank-lines"));
}

#[test]
fn init_writes_config_once() {
    let tmp = project(&[]);
    assert!(restyle(tmp.path(), &["init"]).status.success());
    assert!(tmp.path().join("restyle.toml").is_file());
    assert!(!restyle(tmp.path(), &["init"]).status.success());
    assert!(restyle(tmp.path(), &["init", "--force"]).status.success());
}
