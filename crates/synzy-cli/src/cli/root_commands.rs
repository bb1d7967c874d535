use std::path::PathBuf;

use clap::{Args, Subcommand};

use crate::cli::subcommands::{CompareCommands, ConfigCommands, SessionCommands};

/// Top-level command tree.
#[derive(Clone, Debug, Subcommand)]
pub enum Commands {
    /// Comparison list.
    Compare {
        #[command(subcommand)]
        action: CompareCommands,
    },
    /// Persisted sign-in session.
    Session {
        #[command(subcommand)]
        action: SessionCommands,
    },
    /// Score, measure and order a listing.
    Rank(RankArgs),
    /// Effective configuration.
    Config {
        #[command(subcommand)]
        action: ConfigCommands,
    },
}

#[derive(Clone, Debug, Args)]
pub struct RankArgs {
    /// JSON file holding an array of institution records (`-` for stdin).
    pub file: PathBuf,

    /// Origin as `lat,lon`.
    #[arg(long, conflicts_with = "city")]
    pub origin: Option<String>,

    /// Origin from a city preset (Bangalore, Mumbai, Delhi, Chennai, Hyderabad, Pune).
    #[arg(long)]
    pub city: Option<String>,

    /// Order: distance, score or name (defaults to `geo.sort`).
    #[arg(long)]
    pub sort: Option<String>,

    /// Keep only the first N results.
    #[arg(short, long)]
    pub limit: Option<usize>,
}
