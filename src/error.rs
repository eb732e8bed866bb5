//! Errors surfaced by the issue-to-fix pipeline, grouped by kind.

use thiserror::Error;

use crate::infra::fix_service::FixServiceError;
use crate::infra::github::GitHubError;
use crate::shared::config::ConfigError;

/// What went wrong, without the details. Callers branch on this instead of
/// matching message text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Missing or malformed configuration (token, repository, config file).
    Config,
    /// The issue tracker could not be queried or returned something unusable.
    Tracker,
    /// The fix service answered with a status other than 200.
    RemoteRejected,
    /// No response was obtained: connection failure or deadline exceeded.
    Transport,
    /// The fix service answered 200 but the body is not an agent response.
    MalformedResponse,
}

#[derive(Error, Debug)]
pub enum Error {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Tracker(#[from] GitHubError),

    #[error(transparent)]
    FixService(#[from] FixServiceError),
}

impl Error {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Config(_) => ErrorKind::Config,
            Self::Tracker(_) => ErrorKind::Tracker,
            Self::FixService(err) => match err {
                FixServiceError::InvalidEndpoint { .. } => ErrorKind::Config,
                FixServiceError::RemoteRejected { .. } => ErrorKind::RemoteRejected,
                FixServiceError::MalformedResponse { .. } => ErrorKind::MalformedResponse,
                FixServiceError::Encode(_)
                | FixServiceError::DeadlineExceeded { .. }
                | FixServiceError::Transport(_) => ErrorKind::Transport,
            },
        }
    }

    /// Follow-up advice printed under the error message, if any.
    pub fn hint(&self) -> Option<&'static str> {
        match self {
            Self::Config(_) => Some("Run `medic init` or `medic config set` to configure medic."),
            Self::FixService(FixServiceError::InvalidEndpoint { .. }) => {
                Some("Check fix_service.url in the config file or MEDIC_FIX_SERVICE_URL.")
            }
            Self::FixService(FixServiceError::DeadlineExceeded { .. }) => {
                Some("The fix may still be running remotely; raise fix_service.timeout_secs to wait longer.")
            }
            _ => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
