//! List rules command implementation.

use restyle::rules::all_rules;
use restyle::OPTION_SCHEMA;

/// Runs the list-rules command.
pub fn run(with_options: bool) {
    println!("Available rules:\n");
    println!("{:<26} {:<10} Description", "Name", "Default");
    println!("{}", "-".repeat(80));

    for rule in all_rules() {
        let status = if rule.deprecation().is_some() {
            "deprecated"
        } else if rule.enabled_by_default() {
            "yes"
        } else {
            "opt-in"
        };
        println!("{:<26} {:<10} {}", rule.name(), status, rule.help());
    }

    if with_options {
        println!("\nFormatting options:\n");
        println!("{:<26} {:<10} Description", "Key", "Default");
        println!("{}", "-".repeat(80));
        for option in OPTION_SCHEMA {
            println!("{:<26} {:<10} {}", option.key, option.default, option.help);
        }
    }

    println!("\nUse --rules to run specific rules, e.g.:");
    println!("  restyle lint --rules indent,semicolons");
    println!("  restyle format --enable redundantInternal --disable trailingCommas");
}
