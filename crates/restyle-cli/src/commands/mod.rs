//! Subcommand implementations.

pub mod files;
pub mod format;
pub mod init;
pub mod lint;
pub mod list_rules;
pub mod output;
pub mod session;
