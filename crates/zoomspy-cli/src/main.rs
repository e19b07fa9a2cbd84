//! zoomspy CLI — entry point.
//!
//! # Commands
//!
//! - `zoomspy [run] [--dry-run]` — one pass: find, repost, mark read
//! - `zoomspy watch [--every SECS | --cron EXPR]` — repeat on a timer
//! - `zoomspy check TEXT...` — classify a message locally
//! - `zoomspy status` — show configuration

mod check;
mod helpers;
mod run_cmd;
mod status;

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};

// ─────────────────────────────────────────────
// CLI definition
// ─────────────────────────────────────────────

/// Reposts unread Zoom meeting links from Mattermost into a spy channel
#[derive(Parser)]
#[command(name = "zoomspy", version, about, long_about = None)]
struct Cli {
    /// Config file (default: ~/.zoomspy/config.json)
    #[arg(long, global = true)]
    config: Option<String>,

    /// Enable debug logging
    #[arg(short, long, global = true, default_value_t = false)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Run one pass (the default)
    Run {
        /// Show what would be reposted without posting or marking read
        #[arg(long, default_value_t = false)]
        dry_run: bool,
    },

    /// Run repeatedly until Ctrl+C
    Watch {
        /// Seconds between the end of one run and the start of the next
        #[arg(long, conflicts_with = "cron")]
        every: Option<u64>,

        /// Cron expression (5 fields, or 6 with seconds), UTC
        #[arg(long)]
        cron: Option<String>,
    },

    /// Classify a message and list the Zoom links in it
    Check {
        /// Message text
        #[arg(required = true)]
        text: Vec<String>,
    },

    /// Show configuration status
    Status,
}

// ─────────────────────────────────────────────
// Entrypoint
// ─────────────────────────────────────────────

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let config_path: Option<PathBuf> = cli.config.as_deref().map(helpers::expand_tilde);

    match cli.command.unwrap_or(Commands::Run { dry_run: false }) {
        Commands::Run { dry_run } => {
            init_logging(cli.verbose);
            run_cmd::run(config_path.as_deref(), dry_run).await
        }
        Commands::Watch { every, cron } => {
            init_logging(cli.verbose);
            run_cmd::watch(config_path.as_deref(), every, cron).await
        }
        Commands::Check { text } => check::run(&text.join(" ")),
        Commands::Status => status::run(config_path.as_deref()),
    }
}

/// Initialize tracing/logging. `RUST_LOG` wins when set.
fn init_logging(verbose: bool) {
    use tracing_subscriber::EnvFilter;

    let default = if verbose { "zoomspy=debug,info" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .compact()
        .init();
}
