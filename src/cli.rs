use clap::{ArgAction, Parser, Subcommand};
use clap_complete::Shell;

use crate::commands::config::ConfigCommands;
use crate::commands::fix::FixArgs;
use crate::commands::init::InitArgs;
use crate::commands::list::ListArgs;

#[derive(Parser)]
#[command(
    name = "medic",
    version,
    about = "Send GitHub issues to the Code Medic fix service",
    subcommand_required = true,
    arg_required_else_help = true
)]
pub struct Cli {
    /// Increase log verbosity (-v: info, -vv: debug)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Clone, PartialEq, Eq)]
pub enum Commands {
    /// List open issues of the configured repository
    List(ListArgs),

    /// Send an issue to the fix service and show the agent's response
    Fix(FixArgs),

    /// Store a GitHub token and repository in the config file
    Init(InitArgs),

    /// Configuration management
    #[command(subcommand)]
    Config(ConfigCommands),

    /// Generate shell completion scripts
    Completions {
        /// Target shell
        #[arg(value_enum)]
        shell: Shell,
    },
}
