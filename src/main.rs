mod cli;
mod commands;
mod error;
mod format;
mod infra;
mod models;
mod shared;
#[cfg(test)]
mod testing;

use std::process::ExitCode;

use clap::{CommandFactory, Parser};
use cli::{Cli, Commands};
use shared::env_var::EnvVars;

#[tokio::main]
async fn main() -> ExitCode {
    let Cli { verbose, command } = Cli::parse();
    shared::logging::init(verbose, EnvVars::load().log.as_deref());

    let result = match command {
        Commands::List(args) => commands::list::run(&args).await,
        Commands::Fix(args) => commands::fix::run(&args).await,
        Commands::Init(args) => commands::init::run(&args),
        Commands::Config(config_cmd) => config_cmd.run(),
        Commands::Completions { shell } => {
            clap_complete::generate(shell, &mut Cli::command(), "medic", &mut std::io::stdout());
            Ok(())
        }
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            report(&err);
            ExitCode::FAILURE
        }
    }
}

fn report(err: &anyhow::Error) {
    eprintln!("Error: {err}");
    if let Some(err) = err.downcast_ref::<error::Error>() {
        tracing::debug!(kind = ?err.kind(), "command failed");
        if let Some(hint) = err.hint() {
            eprintln!("Hint: {hint}");
        }
    }
}
