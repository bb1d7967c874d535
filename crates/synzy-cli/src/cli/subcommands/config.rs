use clap::Subcommand;

#[derive(Clone, Debug, Subcommand)]
pub enum ConfigCommands {
    /// Print the merged configuration.
    Show,
}
