use std::fmt;
use std::str::FromStr;

use serde::{Serialize, Serializer};

use crate::shared::config::ConfigError;

/// A GitHub repository identifier in `owner/repo` form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepoName {
    owner: String,
    name: String,
}

impl RepoName {
    pub fn owner(&self) -> &str {
        &self.owner
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}

impl FromStr for RepoName {
    type Err = ConfigError;

    /// Splits on the first `/`. Both halves must be non-empty and the repo half
    /// must not contain another `/`.
    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        let invalid = || ConfigError::InvalidRepository(raw.to_string());
        let (owner, name) = raw.split_once('/').ok_or_else(invalid)?;
        if owner.is_empty() || name.is_empty() || name.contains('/') {
            return Err(invalid());
        }
        Ok(Self {
            owner: owner.to_string(),
            name: name.to_string(),
        })
    }
}

impl fmt::Display for RepoName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.owner, self.name)
    }
}

impl Serialize for RepoName {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// GitHub token plus the repository it is used against.
///
/// Serializes to the fix service's `github_credentials` object.
#[derive(Clone, PartialEq, Eq, Serialize)]
pub struct Credentials {
    token: String,
    #[serde(rename = "repository_name")]
    repository: RepoName,
}

impl Credentials {
    /// Validates the repository identifier; the token is passed through untouched.
    pub fn new(token: impl Into<String>, repository: &str) -> Result<Self, ConfigError> {
        Ok(Self {
            token: token.into(),
            repository: repository.parse()?,
        })
    }

    pub fn token(&self) -> &str {
        &self.token
    }

    pub fn repository(&self) -> &RepoName {
        &self.repository
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("token", &"<redacted>")
            .field("repository", &self.repository)
            .finish()
    }
}
