//! GitHub API error types.

use serde::Deserialize;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum GitHubError {
    #[error("Issue number must be greater than zero")]
    InvalidIssueNumber,

    #[error("Invalid GitHub API URL '{url}': {message}")]
    InvalidBaseUrl { url: String, message: String },

    #[error("GitHub token contains characters that cannot be sent in a header")]
    InvalidToken,

    #[error("{resource} not found on GitHub")]
    NotFound { resource: String },

    #[error("#{0} is a pull request, not an issue")]
    NotAnIssue(u64),

    #[error("GitHub API error: {message} (HTTP {status})")]
    Api { status: u16, message: String },

    #[error("GitHub request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("Unexpected GitHub response: {0}")]
    Decode(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, GitHubError>;

/// Error body GitHub sends with non-2xx responses.
#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    message: String,
    #[serde(default)]
    errors: Vec<serde_json::Value>,
}

/// Build a readable message from a GitHub error body.
/// Falls back to the raw text when the body is not GitHub's JSON shape.
pub(super) fn format_api_error(body: &str) -> String {
    match serde_json::from_str::<ApiErrorBody>(body) {
        Ok(parsed) => format!("{}{}", parsed.message, format_error_details(&parsed.errors)),
        Err(_) if body.trim().is_empty() => "(empty response body)".to_string(),
        Err(_) => body.trim().to_string(),
    }
}

/// Format error details from GitHub API errors array.
/// Returns a formatted string like " [field1 is code1, field2 is code2]" or empty string.
fn format_error_details(errors: &[serde_json::Value]) -> String {
    let error_details: Vec<String> = errors
        .iter()
        .filter_map(|e| {
            let field = e.get("field").and_then(|v| v.as_str());
            let code = e.get("code").and_then(|v| v.as_str());
            match (field, code) {
                (Some(f), Some(c)) => Some(format!("{f} is {c}")),
                (Some(f), None) => Some(f.to_string()),
                (None, Some(c)) => Some(c.to_string()),
                (None, None) => None,
            }
        })
        .collect();

    if error_details.is_empty() {
        String::new()
    } else {
        format!(" [{}]", error_details.join(", "))
    }
}
