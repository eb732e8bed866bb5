use std::path::{Path, PathBuf};
use std::time::Duration;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::models::Credentials;
use crate::shared::env_var::EnvVars;

const CONFIG_FILENAMES: [&str; 2] = ["config.yaml", "config.yml"];

/// Top-level configuration for medic.
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// GitHub credentials and API settings.
    #[serde(default)]
    pub github: GitHubConfig,

    /// Remote fix service settings.
    #[serde(default)]
    pub fix_service: FixServiceConfig,
}

/// GitHub configuration.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct GitHubConfig {
    /// Personal access token used for the GitHub API and handed to the fix service.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,

    /// Target repository in `owner/repo` form.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub repository: Option<String>,

    /// REST API base URL (default: "https://api.github.com").
    #[serde(default = "default_api_url")]
    #[schemars(default = "default_api_url")]
    pub api_url: String,

    /// Issues requested per page when listing (default: 30, max: 100).
    #[serde(default = "default_page_size")]
    #[schemars(default = "default_page_size")]
    pub page_size: u8,
}

impl Default for GitHubConfig {
    fn default() -> Self {
        Self {
            token: None,
            repository: None,
            api_url: default_api_url(),
            page_size: default_page_size(),
        }
    }
}

/// Fix service configuration.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct FixServiceConfig {
    /// Endpoint receiving fix requests.
    #[serde(default = "default_fix_service_url")]
    #[schemars(default = "default_fix_service_url")]
    pub url: String,

    /// Upper bound for a single fix call, in seconds (default: 600).
    #[serde(default = "default_timeout_secs")]
    #[schemars(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl FixServiceConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

impl Default for FixServiceConfig {
    fn default() -> Self {
        Self {
            url: default_fix_service_url(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

fn default_api_url() -> String {
    "https://api.github.com".to_string()
}

fn default_page_size() -> u8 {
    30
}

fn default_fix_service_url() -> String {
    "https://codemedic-203855113547.us-central1.run.app/api/fix/".to_string()
}

fn default_timeout_secs() -> u64 {
    600
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Failed to read config file (permission error, etc.)
    #[error("Failed to read config file {path}: {source}")]
    ReadError {
        path: PathBuf,
        source: std::io::Error,
    },

    /// YAML parse error
    #[error("Invalid config file {path}: {message}")]
    ParseError { path: PathBuf, message: String },

    #[error("Failed to write config file {path}: {source}")]
    WriteError {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Could not determine the config directory (HOME is not set)")]
    NoConfigDir,

    #[error("{0} is not configured")]
    MissingValue(&'static str),

    #[error("Invalid repository '{0}' (expected 'owner/repo')")]
    InvalidRepository(String),

    #[error("Invalid value for {field}: {message}")]
    InvalidValue {
        field: &'static str,
        message: String,
    },
}

impl Config {
    /// Build validated credentials from the configured token and repository.
    pub fn credentials(&self) -> Result<Credentials, ConfigError> {
        let token = self
            .github
            .token
            .as_deref()
            .filter(|t| !t.is_empty())
            .ok_or(ConfigError::MissingValue("github.token"))?;
        let repository = self
            .github
            .repository
            .as_deref()
            .ok_or(ConfigError::MissingValue("github.repository"))?;
        Credentials::new(token, repository)
    }

    /// Apply MEDIC_* environment overrides on top of file values.
    pub fn apply_env(mut self, env: &EnvVars) -> Self {
        if let Some(token) = &env.github_token {
            self.github.token = Some(token.clone());
        }
        if let Some(repository) = &env.github_repository {
            self.github.repository = Some(repository.clone());
        }
        if let Some(url) = &env.fix_service_url {
            self.fix_service.url = url.clone();
        }
        self
    }

    fn validate(self) -> Result<Self, ConfigError> {
        if !(1..=100).contains(&self.github.page_size) {
            return Err(ConfigError::InvalidValue {
                field: "github.page_size",
                message: format!("{} is outside 1..=100", self.github.page_size),
            });
        }
        if self.fix_service.timeout_secs == 0 {
            return Err(ConfigError::InvalidValue {
                field: "fix_service.timeout_secs",
                message: "must be greater than zero".to_string(),
            });
        }
        Ok(self)
    }
}

/// Directory holding the config file: ~/.config/medic (or $XDG_CONFIG_HOME/medic).
pub fn config_dir() -> Result<PathBuf, ConfigError> {
    crate::shared::dirs::config_dir()
        .map(|d| d.join("medic"))
        .ok_or(ConfigError::NoConfigDir)
}

/// Load configuration from the config directory with environment overrides applied.
/// Returns defaults (plus overrides) if no config file exists.
pub fn load_config() -> Result<Config, ConfigError> {
    let config = load_config_from_dir(&config_dir()?)?;
    config.apply_env(&EnvVars::load()).validate()
}

/// Load configuration from a specific directory.
/// Searches for config.yaml, then config.yml in the given directory.
/// Returns Config::default() if neither file exists.
pub fn load_config_from_dir(dir: &Path) -> Result<Config, ConfigError> {
    for filename in CONFIG_FILENAMES {
        let path = dir.join(filename);
        match std::fs::read_to_string(&path) {
            Ok(content) => return parse_config(&content, &path)?.validate(),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => continue,
            Err(e) => return Err(ConfigError::ReadError { path, source: e }),
        }
    }

    Ok(Config::default())
}

/// Path of the existing config file in `dir`, or `dir/config.yaml` if there is none yet.
pub fn config_file_in(dir: &Path) -> PathBuf {
    CONFIG_FILENAMES
        .iter()
        .map(|name| dir.join(name))
        .find(|path| path.is_file())
        .unwrap_or_else(|| dir.join(CONFIG_FILENAMES[0]))
}

/// Write `config` as YAML, creating parent directories as needed.
pub fn save_config(config: &Config, path: &Path) -> Result<(), ConfigError> {
    let write_error = |source| ConfigError::WriteError {
        path: path.to_path_buf(),
        source,
    };
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).map_err(write_error)?;
    }
    let yaml = serde_yaml::to_string(config).map_err(|e| ConfigError::ParseError {
        path: path.to_path_buf(),
        message: e.to_string(),
    })?;
    std::fs::write(path, yaml).map_err(write_error)
}

/// Parse YAML content into Config.
fn parse_config(content: &str, path: &Path) -> Result<Config, ConfigError> {
    serde_yaml::from_str(content).map_err(|e| ConfigError::ParseError {
        path: path.to_path_buf(),
        message: e.to_string(),
    })
}

/// Generate JSON Schema for the Config struct.
pub fn generate_schema() -> schemars::Schema {
    schemars::schema_for!(Config)
}
