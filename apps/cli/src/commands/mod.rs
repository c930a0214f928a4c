//! Commands behind the `vocab` subcommands.
//!
//! Every command writes to a caller-supplied writer so it can be driven
//! from tests.

pub mod cards;
pub mod review;
pub mod transfer;

/// Output format for listing commands.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    #[default]
    Plain,
    Json,
}
