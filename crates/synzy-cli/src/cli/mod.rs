use std::path::PathBuf;

use clap::Parser;

pub mod global;
pub mod root_commands;
pub mod subcommands;

pub use global::{GlobalFlags, OutputFormat};
pub use root_commands::Commands;

/// Top-level CLI parser for the `synzy` binary.
#[derive(Debug, Parser)]
#[command(name = "synzy", version, about = "synzy - admissions shortlist and comparison toolbox")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Output format: json, raw
    #[arg(short, long, global = true, default_value = "json")]
    pub format: OutputFormat,

    /// Quiet mode (errors only)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Verbose mode (debug logging)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Storage file (defaults to `storage.path` from config)
    #[arg(long, global = true)]
    pub storage: Option<PathBuf>,
}

impl Cli {
    #[must_use]
    pub fn global_flags(&self) -> GlobalFlags {
        GlobalFlags {
            format: self.format,
            quiet: self.quiet,
            verbose: self.verbose,
            storage: self.storage.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use clap::{CommandFactory, Parser};

    use super::{Cli, Commands, OutputFormat};
    use crate::cli::subcommands::{CompareCommands, SessionCommands};

    #[test]
    fn clap_command_tree_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn global_flags_parse_before_subcommand() {
        let cli = Cli::try_parse_from(["synzy", "--format", "raw", "--verbose", "compare", "list"])
            .expect("cli should parse");

        assert_eq!(cli.format, OutputFormat::Raw);
        assert!(cli.verbose);
        assert!(matches!(
            cli.command,
            Commands::Compare {
                action: CompareCommands::List
            }
        ));
    }

    #[test]
    fn global_flags_parse_after_subcommand() {
        let cli = Cli::try_parse_from(["synzy", "session", "show", "--storage", "/tmp/s.json", "-q"])
            .expect("cli should parse");

        assert!(cli.quiet);
        assert_eq!(cli.storage.as_deref(), Some(std::path::Path::new("/tmp/s.json")));
        assert!(matches!(
            cli.command,
            Commands::Session {
                action: SessionCommands::Show
            }
        ));
    }

    #[test]
    fn rank_accepts_city_and_sort() {
        let cli = Cli::try_parse_from([
            "synzy", "rank", "listing.json", "--city", "pune", "--sort", "score",
        ])
        .expect("cli should parse");

        let Commands::Rank(args) = cli.command else {
            panic!("expected rank command");
        };
        assert_eq!(args.city.as_deref(), Some("pune"));
        assert_eq!(args.sort.as_deref(), Some("score"));
        assert!(args.origin.is_none());
    }

    #[test]
    fn rank_rejects_origin_with_city() {
        let result = Cli::try_parse_from([
            "synzy", "rank", "x.json", "--city", "pune", "--origin", "1,2",
        ]);
        assert!(result.is_err());
    }
}
