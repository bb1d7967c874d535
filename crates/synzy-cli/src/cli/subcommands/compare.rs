use clap::Subcommand;

/// Comparison list commands.
///
/// `ENTITY` is either a JSON object or a bare institution id.
#[derive(Clone, Debug, Subcommand)]
pub enum CompareCommands {
    /// Show the stored list.
    List,
    /// Add the entity, or remove it if already listed.
    Toggle { entity: String },
    /// Add the entity unless already listed.
    Add { entity: String },
    /// Empty the list.
    Clear,
}
