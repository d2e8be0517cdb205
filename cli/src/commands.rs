pub mod adapters;
pub mod apply;
pub mod profiles;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "netswitch")]
#[command(about = "Apply static IP/DNS profiles to wired network adapters.")]
pub struct CommandLine {
    /// Path to the profile file (default: profiles.yaml next to the executable)
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Pick an adapter and a profile, then apply the settings
    #[command(alias = "a")]
    Apply {
        /// Adapter name, skips the interactive adapter prompt
        #[arg(long)]
        adapter: Option<String>,

        /// Profile name, skips the interactive profile prompt
        #[arg(long)]
        profile: Option<String>,
    },
    /// List active wired adapters
    #[command(alias = "l")]
    Adapters,
    /// List the profiles defined in the config file
    #[command(alias = "p")]
    Profiles,
}

impl Default for Commands {
    fn default() -> Self {
        Commands::Apply {
            adapter: None,
            profile: None,
        }
    }
}

impl CommandLine {
    pub fn parse_args() -> Self {
        Self::parse()
    }
}
