mod commands;
mod terminal;

use commands::{CommandLine, Commands, adapters, apply, profiles};
use terminal::{logging, print};

fn main() -> anyhow::Result<()> {
    let command_line = CommandLine::parse_args();

    logging::init();
    print::banner();

    let config = command_line
        .config
        .unwrap_or_else(netswitch_common::profile::default_path);

    match command_line.command.unwrap_or_default() {
        Commands::Apply { adapter, profile } => apply::apply(&config, adapter, profile),
        Commands::Adapters => adapters::adapters(),
        Commands::Profiles => profiles::profiles(&config),
    }
}
