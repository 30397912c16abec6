//! merge-gate CLI tool.
//!
//! Usage:
//! ```bash
//! merge-gate check <SNAPSHOT> [--actor LOGIN] [--allow-state STATE]...
//! merge-gate owners <SNAPSHOT>
//! merge-gate list-checks
//! merge-gate init
//! ```

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

mod commands;
mod config_resolver;
mod snapshot;

/// Decides whether a pull request may be merged by automation
#[derive(Parser)]
#[command(name = "merge-gate")]
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
    /// Evaluate a pull request snapshot against the configured checks
    Check {
        /// JSON snapshot of the pull request
        snapshot: PathBuf,

        /// Checkout to read declaration files from when the snapshot lacks them
        #[arg(long)]
        repo_dir: Option<PathBuf>,

        /// Login that triggered the evaluation
        #[arg(long, env = "MERGE_GATE_ACTOR")]
        actor: Option<String>,

        /// Additional allowed mergeable state (can be specified multiple times)
        #[arg(long)]
        allow_state: Vec<String>,

        /// Output format
        #[arg(short, long, default_value = "text")]
        format: OutputFormat,
    },

    /// Show the code owners of each changed file
    Owners {
        /// JSON snapshot of the pull request
        snapshot: PathBuf,

        /// Checkout to read declaration files from when the snapshot lacks them
        #[arg(long)]
        repo_dir: Option<PathBuf>,

        /// Output format
        #[arg(short, long, default_value = "text")]
        format: OutputFormat,
    },

    /// List available checks
    ListChecks,

    /// Initialize configuration file
    Init {
        /// Overwrite existing config
        #[arg(long)]
        force: bool,
    },
}

/// Output format for gate results.
#[derive(Clone, Copy, Debug, Default, clap::ValueEnum)]
pub enum OutputFormat {
    /// Human-readable text output.
    #[default]
    Text,
    /// JSON output.
    Json,
    /// Single-line output.
    Compact,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let source = config_resolver::resolve(Path::new("."), cli.config.as_deref());

    match cli.command {
        Commands::Check {
            snapshot,
            repo_dir,
            actor,
            allow_state,
            format,
        } => commands::check::run(
            commands::check::CheckArgs {
                snapshot,
                repo_dir,
                actor,
                allow_state,
                format,
            },
            &source,
        ),
        Commands::Owners {
            snapshot,
            repo_dir,
            format,
        } => commands::owners::run(snapshot, repo_dir, format, &source),
        Commands::ListChecks => {
            commands::list_checks::run();
            Ok(())
        }
        Commands::Init { force } => commands::init::run(force),
    }
}
