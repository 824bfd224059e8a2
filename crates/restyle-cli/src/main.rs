//! restyle CLI tool.
//!
//! Usage:
//! ```bash
//! restyle format [OPTIONS] [PATHS]...
//! restyle lint [OPTIONS] [PATHS]...
//! restyle list-rules
//! restyle init
//! ```

use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

mod commands;
mod config_resolver;

/// Style-driven rewriting of Swift source files
#[derive(Parser)]
#[command(name = "restyle")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Path to configuration file
    #[arg(short, long, global = true, env = "RESTYLE_CONFIG")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Rewrite files in place
    Format {
        #[command(flatten)]
        selection: Selection,

        /// Report files that would change instead of writing them
        #[arg(long)]
        check: bool,

        /// Output format for `--check`
        #[arg(short, long, default_value = "text")]
        format: OutputFormat,
    },

    /// Report what formatting would change; exits non-zero on any change
    Lint {
        #[command(flatten)]
        selection: Selection,

        /// Output format
        #[arg(short, long, default_value = "text")]
        format: OutputFormat,
    },

    /// List available rules
    ListRules {
        /// Also list formatting options
        #[arg(long)]
        options: bool,
    },

    /// Initialize configuration file
    Init {
        /// Overwrite existing config
        #[arg(long)]
        force: bool,
    },
}

/// Which files to process and with which rules.
#[derive(Args, Debug, Clone, Default)]
pub struct Selection {
    /// Files or directories to process (default: current directory)
    #[arg(default_value = ".")]
    pub paths: Vec<PathBuf>,

    /// Only run specific rules (comma-separated)
    #[arg(long)]
    pub rules: Option<String>,

    /// Enable opt-in rules (comma-separated)
    #[arg(long)]
    pub enable: Option<String>,

    /// Disable rules (comma-separated)
    #[arg(long)]
    pub disable: Option<String>,

    /// Exclude patterns (can be specified multiple times)
    #[arg(short, long)]
    pub exclude: Vec<String>,

    /// Accept incomplete input such as snippets
    #[arg(long)]
    pub fragment: bool,

    /// Number of files processed in parallel
    #[arg(short, long)]
    pub jobs: Option<usize>,
}

/// Output format for reports.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// Human-readable text output.
    #[default]
    Text,
    /// JSON output.
    Json,
    /// One-line-per-change compact format.
    Compact,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let config = cli.config.as_deref();
    let clean = match cli.command {
        Commands::Format {
            selection,
            check,
            format,
        } => commands::format::run(&selection, check, format, config)?,
        Commands::Lint { selection, format } => commands::lint::run(&selection, format, config)?,
        Commands::ListRules { options } => {
            commands::list_rules::run(options);
            true
        }
        Commands::Init { force } => {
            commands::init::run(force)?;
            true
        }
    };

    if !clean {
        std::process::exit(1);
    }
    Ok(())
}
