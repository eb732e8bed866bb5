//! Centralized reader for MEDIC_* environment variables.
//!
//! Environment variable names are defined as private constants here;
//! external code accesses values through the `EnvVars` struct.

const GITHUB_TOKEN: &str = "MEDIC_GITHUB_TOKEN";
const GITHUB_REPOSITORY: &str = "MEDIC_GITHUB_REPOSITORY";
const FIX_SERVICE_URL: &str = "MEDIC_FIX_SERVICE_URL";
const LOG: &str = "MEDIC_LOG";

/// Snapshot of all MEDIC_* environment variables at load time.
pub struct EnvVars {
    /// Overrides `github.token` from the config file.
    pub github_token: Option<String>,

    /// Overrides `github.repository` from the config file.
    pub github_repository: Option<String>,

    /// Overrides `fix_service.url` from the config file.
    pub fix_service_url: Option<String>,

    /// tracing filter directive, e.g. "debug" or "medic=trace".
    pub log: Option<String>,
}

fn non_empty_var(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|s| !s.is_empty())
}

impl EnvVars {
    /// Read all MEDIC_* environment variables from the current process.
    pub fn load() -> Self {
        Self {
            github_token: non_empty_var(GITHUB_TOKEN),
            github_repository: non_empty_var(GITHUB_REPOSITORY),
            fix_service_url: non_empty_var(FIX_SERVICE_URL),
            log: non_empty_var(LOG),
        }
    }
}
