//! Fix service error types.

use std::fmt;
use std::time::Duration;

use thiserror::Error;

/// Declared `Content-Length` disagreed with the bytes actually read.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LengthMismatch {
    pub declared: u64,
    pub received: usize,
}

impl fmt::Display for LengthMismatch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Content-Length declared {} bytes but {} were received",
            self.declared, self.received
        )
    }
}

#[derive(Error, Debug)]
pub enum FixServiceError {
    #[error("Invalid fix service URL '{url}': {message}")]
    InvalidEndpoint { url: String, message: String },

    #[error("Failed to encode fix request: {0}")]
    Encode(#[source] serde_json::Error),

    #[error("Fix service rejected the request (HTTP {status}): {body}")]
    RemoteRejected { status: u16, body: String },

    #[error("Fix service did not respond within {}s", .timeout.as_secs())]
    DeadlineExceeded { timeout: Duration },

    #[error("Fix service request failed: {0}")]
    Transport(#[source] reqwest::Error),

    #[error(
        "Fix service returned a malformed response: {source}{}\nRaw response: {body}",
        format_mismatch(.length_mismatch)
    )]
    MalformedResponse {
        /// Raw body, cut down if very large.
        body: String,
        length_mismatch: Option<LengthMismatch>,
        #[source]
        source: serde_json::Error,
    },
}

fn format_mismatch(mismatch: &Option<LengthMismatch>) -> String {
    mismatch
        .map(|m| format!(" ({m})"))
        .unwrap_or_default()
}

pub type Result<T> = std::result::Result<T, FixServiceError>;
