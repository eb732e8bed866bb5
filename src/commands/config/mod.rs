use std::io::Write;
use std::path::Path;

use clap::{Args, Subcommand};

use crate::error::Error;
use crate::models::RepoName;
use crate::shared::config::{
    Config, config_dir, config_file_in, load_config, load_config_from_dir, save_config,
};

/// Configuration management commands.
#[derive(Subcommand, Clone, PartialEq, Eq, Debug)]
pub enum ConfigCommands {
    /// Update the stored GitHub token and/or repository
    Set(SetArgs),

    /// Show the effective configuration (token masked)
    Show,

    /// Print JSON Schema for the configuration file
    Schema,
}

#[derive(Args, Clone, PartialEq, Eq, Debug)]
pub struct SetArgs {
    /// GitHub personal access token
    #[arg(short, long)]
    pub token: Option<String>,

    /// Target repository (owner/repo)
    #[arg(short, long)]
    pub repository: Option<String>,
}

impl ConfigCommands {
    pub fn run(&self) -> anyhow::Result<()> {
        let mut stdout = std::io::stdout().lock();
        match self {
            Self::Set(args) => {
                let dir = config_dir().map_err(Error::from)?;
                run_set(args, &dir, &mut stdout)
            }
            Self::Show => {
                let config = load_config().map_err(Error::from)?;
                let path = config_file_in(&config_dir().map_err(Error::from)?);
                for line in format_config(&config, &path) {
                    writeln!(stdout, "{line}")?;
                }
                Ok(())
            }
            Self::Schema => {
                let schema = crate::shared::config::generate_schema();
                let json = serde_json::to_string_pretty(&schema)?;
                writeln!(stdout, "{json}")?;
                Ok(())
            }
        }
    }
}

/// Apply `args` to the config file in `dir`, keeping every other setting.
pub(crate) fn run_set<W: Write>(args: &SetArgs, dir: &Path, out: &mut W) -> anyhow::Result<()> {
    if args.token.is_none() && args.repository.is_none() {
        writeln!(out, "Nothing to update. Pass --token and/or --repository.")?;
        return Ok(());
    }
    if let Some(repository) = &args.repository {
        repository.parse::<RepoName>().map_err(Error::from)?;
    }

    let mut config = load_config_from_dir(dir).map_err(Error::from)?;
    if let Some(token) = &args.token {
        config.github.token = Some(token.trim().to_string());
        writeln!(out, "GitHub token updated.")?;
    }
    if let Some(repository) = &args.repository {
        config.github.repository = Some(repository.clone());
        writeln!(out, "Repository set to {repository}.")?;
    }

    let path = config_file_in(dir);
    save_config(&config, &path).map_err(Error::from)?;
    writeln!(out, "Configuration written to {}", path.display())?;
    Ok(())
}

/// Lines printed by `medic config show`.
pub(crate) fn format_config(config: &Config, path: &Path) -> Vec<String> {
    vec![
        format!("GitHub token:  {}", mask_token(config.github.token.as_deref())),
        format!(
            "Repository:    {}",
            config.github.repository.as_deref().unwrap_or("(not set)")
        ),
        format!("GitHub API:    {}", config.github.api_url),
        format!("Fix service:   {}", config.fix_service.url),
        format!("Timeout:       {}s", config.fix_service.timeout_secs),
        format!("Config file:   {}", path.display()),
    ]
}

/// Show the first and last four characters of a token. Short tokens are not
/// shown at all.
pub(crate) fn mask_token(token: Option<&str>) -> String {
    let Some(token) = token else {
        return "(not set)".to_string();
    };
    let chars: Vec<char> = token.chars().collect();
    if chars.len() <= 10 {
        return "(not set)".to_string();
    }
    let head: String = chars[..4].iter().collect();
    let tail: String = chars[chars.len() - 4..].iter().collect();
    format!("{head}...{tail}")
}
