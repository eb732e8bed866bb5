//! HTTP transport to the remote fix service.
//!
//! One POST per call, no retries, no connection reuse. The whole response body
//! is read before the status is looked at, and only HTTP 200 counts as success.

use std::time::Duration;

use reqwest::header::{ACCEPT, CONTENT_TYPE};
use reqwest::{StatusCode, Url};
use tracing::{debug, info, warn};

use super::error::{FixServiceError, LengthMismatch, Result};
use crate::models::{AgentResponse, FixRequest};
use crate::shared::config::FixServiceConfig;

/// Largest slice of a bad response body kept for diagnostics.
const MAX_BODY_SNIPPET: usize = 2048;

pub struct FixServiceClient {
    http: reqwest::Client,
    endpoint: Url,
    timeout: Duration,
}

impl FixServiceClient {
    pub fn new(config: &FixServiceConfig) -> Result<Self> {
        Self::with_endpoint(&config.url, config.timeout())
    }

    pub fn with_endpoint(endpoint: &str, timeout: Duration) -> Result<Self> {
        let invalid = |message: String| FixServiceError::InvalidEndpoint {
            url: endpoint.to_string(),
            message,
        };
        let parsed = Url::parse(endpoint).map_err(|e| invalid(e.to_string()))?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(invalid(format!("unsupported scheme '{}'", parsed.scheme())));
        }

        // The server may close the connection after each response, so never
        // keep idle connections around.
        let http = reqwest::Client::builder()
            .user_agent(concat!("medic/", env!("CARGO_PKG_VERSION")))
            .timeout(timeout)
            .pool_max_idle_per_host(0)
            .http1_only()
            .build()
            .map_err(FixServiceError::Transport)?;

        Ok(Self {
            http,
            endpoint: parsed,
            timeout,
        })
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Send one fix request and wait for the agent's response.
    ///
    /// Takes the request by value: a request is sent at most once.
    pub async fn send(&self, request: FixRequest) -> Result<AgentResponse> {
        let issue = request.issue();
        info!(
            repository = %request.credentials().repository(),
            issue = issue.number,
            state = issue.state.as_str(),
            title = %issue.title,
            endpoint = %self.endpoint,
            "sending fix request"
        );

        let body = serde_json::to_vec(&request).map_err(FixServiceError::Encode)?;
        debug!(bytes = body.len(), "fix request encoded");

        let response = self
            .http
            .post(self.endpoint.clone())
            .header(CONTENT_TYPE, "application/json")
            .header(ACCEPT, "application/json")
            .body(body)
            .send()
            .await
            .map_err(|e| self.classify(e))?;

        let status = response.status();
        let declared = response.content_length();
        let bytes = self.read_body(response, declared).await?;
        info!(
            status = status.as_u16(),
            bytes = bytes.len(),
            "fix service responded"
        );

        let length_mismatch = check_length(declared, bytes.len());
        if let Some(mismatch) = length_mismatch {
            warn!(
                declared = mismatch.declared,
                received = mismatch.received,
                "content length mismatch in fix service response"
            );
        }

        if status != StatusCode::OK {
            let body = String::from_utf8_lossy(&bytes).into_owned();
            warn!(status = status.as_u16(), body = %body, "fix service returned non-200 status");
            return Err(FixServiceError::RemoteRejected {
                status: status.as_u16(),
                body,
            });
        }

        serde_json::from_slice(&bytes).map_err(|source| {
            warn!(error = %source, "failed to decode fix service response");
            FixServiceError::MalformedResponse {
                body: body_snippet(&bytes),
                length_mismatch,
                source,
            }
        })
    }

    /// Read the body chunk by chunk.
    ///
    /// When a length was declared and the connection ends early, the bytes read
    /// so far are kept: the shortfall is reported by `check_length` and only
    /// fails the call if the body does not parse.
    async fn read_body(
        &self,
        mut response: reqwest::Response,
        declared: Option<u64>,
    ) -> Result<Vec<u8>> {
        let mut body = Vec::new();
        loop {
            match response.chunk().await {
                Ok(Some(chunk)) => body.extend_from_slice(&chunk),
                Ok(None) => return Ok(body),
                Err(err) if err.is_timeout() => return Err(self.classify(err)),
                Err(err) if declared.is_some() => {
                    debug!(error = %err, received = body.len(), "fix service body ended early");
                    return Ok(body);
                }
                Err(err) => return Err(FixServiceError::Transport(err)),
            }
        }
    }

    fn classify(&self, err: reqwest::Error) -> FixServiceError {
        if err.is_timeout() {
            FixServiceError::DeadlineExceeded {
                timeout: self.timeout,
            }
        } else {
            FixServiceError::Transport(err)
        }
    }
}

/// A mismatch only counts when the server declared a non-zero length.
fn check_length(declared: Option<u64>, received: usize) -> Option<LengthMismatch> {
    match declared {
        Some(declared) if declared > 0 && declared != received as u64 => {
            Some(LengthMismatch { declared, received })
        }
        _ => None,
    }
}

fn body_snippet(bytes: &[u8]) -> String {
    let text = String::from_utf8_lossy(bytes);
    if text.len() <= MAX_BODY_SNIPPET {
        return text.into_owned();
    }
    let mut end = MAX_BODY_SNIPPET;
    while !text.is_char_boundary(end) {
        end -= 1;
    }
    format!("{}… ({} bytes total)", &text[..end], bytes.len())
}
