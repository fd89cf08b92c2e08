//! # clipsafe CLI
//!
//! The `clipsafe` binary archives CopyQ clipboard history into a local
//! SQLite database and searches it. Clipboard managers cap how many items
//! a tab retains; clipsafe keeps everything that was ever seen, deduplicated,
//! with first- and last-seen timestamps.
//!
//! ## Usage
//!
//! ```bash
//! clipsafe --config ./clipsafe.toml <command>
//! ```
//!
//! ## Commands
//!
//! | Command | Description |
//! |---------|-------------|
//! | `clipsafe save [TABS]...` | Archive the named tabs (or every tab) into the database |
//! | `clipsafe tabs` | List the tabs CopyQ currently holds |
//! | `clipsafe search <QUERY>...` | Print archived items containing the query, newest first |
//!
//! ## Examples
//!
//! ```bash
//! # Archive every tab
//! clipsafe save
//!
//! # Archive only the work tab
//! clipsafe save work
//!
//! # Find that URL you copied last month
//! clipsafe search example.com
//!
//! # Search within one tab
//! clipsafe search --tab work standup notes
//! ```

mod backup;
mod config;
mod copyq;
mod db;
#[allow(dead_code)]
mod models;
mod record;
mod schema;
mod script;
mod search;
#[allow(dead_code)]
mod store;

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// clipsafe — archive CopyQ clipboard history into a searchable SQLite store.
#[derive(Parser)]
#[command(
    name = "clipsafe",
    about = "Archive CopyQ clipboard history into a searchable SQLite store",
    version,
    long_about = "clipsafe drains every CopyQ tab through the copyq scripting interface and \
    upserts the items into a SQLite database, so clipboard history survives the manager's \
    own retention limit. Previously seen items only refresh their last-seen timestamp; \
    nothing is ever dropped."
)]
struct Cli {
    /// Path to configuration file (TOML).
    ///
    /// Defaults to `./clipsafe.toml`. A missing file is fine; the built-in
    /// defaults use `history.db` in the working directory and `copyq` on
    /// `$PATH`.
    #[arg(long, global = true, default_value = "./clipsafe.toml")]
    config: PathBuf,

    /// Increase log verbosity (-v: debug, -vv: trace).
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

/// Top-level CLI commands.
#[derive(Subcommand)]
enum Commands {
    /// Archive clipboard tabs into the database.
    ///
    /// Runs one extraction per tab concurrently. With no arguments, every
    /// tab CopyQ reports is archived. Re-running is cheap: items already in
    /// the database only get their last-seen timestamp refreshed.
    Save {
        /// Tabs to archive. Empty means all of them.
        tabs: Vec<String>,
    },

    /// List the tabs CopyQ currently holds, sorted.
    Tabs,

    /// Search archived items by substring.
    ///
    /// Matches are case-insensitive and ordered newest first. Multiple
    /// words are joined with spaces into a single query.
    Search {
        /// Restrict matches to one tab.
        #[arg(long)]
        tab: Option<String>,

        /// Text to look for inside archived items.
        #[arg(required = true)]
        query: Vec<String>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let cfg = config::load_config(&cli.config)?;

    match cli.command {
        Commands::Save { tabs } => {
            backup::run_backup(&cfg, tabs).await?;
        }
        Commands::Tabs => {
            let tabs = copyq::list_tabs(&cfg.copyq).await?;
            println!("{}", tabs.join("\n"));
        }
        Commands::Search { tab, query } => {
            let query = query.join(" ");
            search::run_search(&cfg, &query, tab.as_deref()).await?;
        }
    }

    Ok(())
}

/// Logs go to stderr; stdout carries command output only.
fn init_logging(verbose: u8) {
    use tracing_subscriber::{fmt, EnvFilter};

    let level = match verbose {
        0 => "info",
        1 => "debug",
        _ => "trace",
    };

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    fmt()
        .with_env_filter(filter)
        .with_target(verbose > 1)
        .with_writer(std::io::stderr)
        .init();
}
