pub mod clock;
pub mod commands;
pub mod config;
pub mod db;
pub mod state;

use clap::{Parser, Subcommand};
use commands::review::ReviewOptions;
use commands::OutputFormat;
use config::Config;
use state::AppState;
use std::io::{BufRead, Write};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use vocab_core::types::{Direction, ReviewMode};

#[derive(Debug, Parser)]
#[command(name = "vocab", about = "Spaced repetition trainer for English/Russian vocabulary", version)]
pub struct Cli {
    /// Card database path (overrides VOCAB_DB_PATH)
    #[arg(long, global = true)]
    pub db: Option<PathBuf>,

    /// Output format for list and stats
    #[arg(long, global = true, value_enum, default_value = "plain")]
    pub format: OutputFormat,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Review due cards interactively
    Review {
        /// flip (reveal, then grade) or type (type the Russian answer)
        #[arg(long, default_value = "flip")]
        mode: ReviewMode,
        /// en-ru or ru-en; type mode always uses en-ru
        #[arg(long, default_value = "en-ru")]
        direction: Direction,
        /// Stop after grading this many cards
        #[arg(long)]
        limit: Option<usize>,
    },

    /// Add a card
    Add {
        /// English text
        front: String,
        /// Russian text; separate synonyms with "/"
        back: String,
        /// Example sentence
        #[arg(long, default_value = "")]
        example: String,
    },

    /// List all cards
    List,

    /// Show total and due counts
    Stats,

    /// Delete a card
    Delete { id: String },

    /// Make a card due now
    MakeDue { id: String },

    /// Delete ALL cards
    Clear {
        /// Confirm deletion
        #[arg(long)]
        yes: bool,
    },

    /// Import cards from a CSV file (english,russian,example)
    Import { path: PathBuf },

    /// Export cards as CSV (stdout when no path is given)
    Export { path: Option<PathBuf> },

    /// Write a JSON backup (stdout when no path is given)
    Backup { path: Option<PathBuf> },

    /// Restore cards from a JSON backup
    Restore {
        path: PathBuf,
        /// Replace the whole collection instead of merging
        #[arg(long)]
        replace: bool,
    },
}

pub fn run() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "warn".into()),
        ))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();
    let mut config = Config::from_env();
    if let Some(db) = cli.db {
        config.db_path = db;
    }

    let state = AppState::open(config)?;
    let stdin = std::io::stdin();
    let stdout = std::io::stdout();
    execute(&state, cli.command, cli.format, &mut stdin.lock(), &mut stdout.lock())
}

/// Dispatch a parsed command against `state`.
pub fn execute<R: BufRead, W: Write>(
    state: &AppState,
    command: Command,
    format: OutputFormat,
    input: &mut R,
    out: &mut W,
) -> anyhow::Result<()> {
    match command {
        Command::Review {
            mode,
            direction,
            limit,
        } => {
            let options = ReviewOptions {
                mode,
                direction,
                limit,
            };
            commands::review::run(state, &options, input, out)?;
        }
        Command::Add {
            front,
            back,
            example,
        } => {
            commands::cards::add(state, &front, &back, &example, out)?;
        }
        Command::List => commands::cards::list(state, format, out)?,
        Command::Stats => commands::cards::stats(state, format, out)?,
        Command::Delete { id } => commands::cards::delete(state, &id, out)?,
        Command::MakeDue { id } => commands::cards::make_due(state, &id, out)?,
        Command::Clear { yes } => commands::cards::clear(state, yes, out)?,
        Command::Import { path } => {
            commands::transfer::import_csv(state, &path, out)?;
        }
        Command::Export { path } => commands::transfer::export_csv(state, path.as_deref(), out)?,
        Command::Backup { path } => commands::transfer::backup(state, path.as_deref(), out)?,
        Command::Restore { path, replace } => {
            commands::transfer::restore(state, &path, replace, out)?;
        }
    }
    Ok(())
}
