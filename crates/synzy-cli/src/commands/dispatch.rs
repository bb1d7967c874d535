use crate::cli::GlobalFlags;
use crate::cli::root_commands::Commands;
use crate::commands;
use crate::context::AppContext;

/// Dispatch a parsed command to the corresponding handler module.
pub fn dispatch(command: Commands, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    match command {
        Commands::Compare { action } => commands::compare::handle(&action, ctx, flags),
        Commands::Session { action } => commands::session::handle(&action, ctx, flags),
        Commands::Rank(args) => commands::rank::handle(&args, ctx, flags),
        Commands::Config { .. } => unreachable!("config is pre-dispatched in main"),
    }
}
