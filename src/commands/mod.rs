pub mod config;
pub mod fix;
pub mod init;
pub mod list;

use crate::error::Result;
use crate::infra::github::GitHubClient;
use crate::models::Credentials;
use crate::shared::config::{Config, load_config};

/// Everything a GitHub-facing command needs, loaded once per invocation.
struct Session {
    config: Config,
    credentials: Credentials,
    github: GitHubClient,
}

impl Session {
    fn load() -> Result<Self> {
        let config = load_config()?;
        let credentials = config.credentials()?;
        let github = GitHubClient::new(&config.github, credentials.token())?;
        Ok(Self {
            config,
            credentials,
            github,
        })
    }
}
