//! hexalint CLI tool.
//!
//! Usage:
//! ```bash
//! hexalint check [OPTIONS] [DESCRIPTORS]
//! hexalint list-rules
//! hexalint init
//! ```
//!
//! Exit codes: 0 on a passing run, 1 when violations are found, 2 on
//! a setup error (unreadable or invalid configuration or descriptors).

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

mod commands;

/// Architecture-conformance checker for layered codebases
#[derive(Parser)]
#[command(name = "hexalint")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Path to configuration file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Evaluate the configured rules against a descriptor export
    Check {
        /// Path to the class-descriptor JSON export
        #[arg(default_value = "hexalint-classes.json")]
        descriptors: PathBuf,

        /// Output format
        #[arg(short, long, default_value = "text")]
        format: OutputFormat,
    },

    /// Show the rules compiled from the configuration
    ListRules,

    /// Initialize configuration file
    Init {
        /// Overwrite existing config
        #[arg(long)]
        force: bool,
    },
}

/// Output format for evaluation reports.
#[derive(Clone, Copy, Debug, Default, clap::ValueEnum)]
pub enum OutputFormat {
    /// Human-readable text output.
    #[default]
    Text,
    /// JSON output.
    Json,
    /// One-line-per-violation compact format.
    Compact,
}

fn main() {
    let cli = Cli::parse();

    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();

    let result = match cli.command {
        Commands::Check {
            descriptors,
            format,
        } => commands::check::run(&descriptors, format, cli.config.as_deref()),
        Commands::ListRules => commands::list_rules::run(cli.config.as_deref()),
        Commands::Init { force } => commands::init::run(force),
    };

    if let Err(e) = result {
        eprintln!("hexalint: {e:#}");
        std::process::exit(2);
    }
}
