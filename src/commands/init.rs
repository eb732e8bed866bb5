//! Interactive first-time setup.

use std::io::{BufRead, Write};
use std::path::Path;

use clap::Args;
use indoc::indoc;

use crate::error::Error;
use crate::models::Credentials;
use crate::shared::config::{
    ConfigError, config_dir, config_file_in, load_config_from_dir, save_config,
};

#[derive(Args, Clone, PartialEq, Eq, Debug)]
pub struct InitArgs {}

pub fn run(_args: &InitArgs) -> anyhow::Result<()> {
    let dir = config_dir().map_err(Error::from)?;
    let stdin = std::io::stdin().lock();
    let mut stdout = std::io::stdout().lock();
    run_with_io(&dir, stdin, &mut stdout)
}

/// Prompt for a token and repository, validate them, then write the config file in `dir`.
pub(crate) fn run_with_io<R: BufRead, W: Write>(
    dir: &Path,
    mut input: R,
    out: &mut W,
) -> anyhow::Result<()> {
    write!(
        out,
        indoc! {"
            medic needs a GitHub personal access token with access to the issues of your
            repository. The token is also handed to the fix service so it can open a pull request.

        "}
    )?;

    let token = prompt(&mut input, out, "GitHub token: ")?;
    if token.is_empty() {
        return Err(Error::from(ConfigError::MissingValue("github.token")).into());
    }
    let repository = prompt(&mut input, out, "GitHub repository (owner/repo): ")?;
    if repository.is_empty() {
        return Err(Error::from(ConfigError::MissingValue("github.repository")).into());
    }
    let credentials = Credentials::new(token, &repository).map_err(Error::from)?;

    let mut config = load_config_from_dir(dir).map_err(Error::from)?;
    config.github.token = Some(credentials.token().to_string());
    config.github.repository = Some(credentials.repository().to_string());

    let path = config_file_in(dir);
    save_config(&config, &path).map_err(Error::from)?;
    writeln!(out, "Configuration written to {}", path.display())?;
    Ok(())
}

/// Print `label` and read one trimmed line. End of input reads as empty.
fn prompt<R: BufRead, W: Write>(
    input: &mut R,
    out: &mut W,
    label: &str,
) -> std::io::Result<String> {
    write!(out, "{label}")?;
    out.flush()?;
    let mut line = String::new();
    input.read_line(&mut line)?;
    Ok(line.trim().to_string())
}
