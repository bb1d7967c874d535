use synzy_config::SynzyConfig;

use crate::cli::GlobalFlags;
use crate::cli::subcommands::ConfigCommands;
use crate::output::output;

pub fn handle(action: &ConfigCommands, config: &SynzyConfig, flags: &GlobalFlags) -> anyhow::Result<()> {
    match action {
        ConfigCommands::Show => output(config, flags.format),
    }
}
