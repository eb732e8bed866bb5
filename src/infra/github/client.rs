//! GitHub REST client built on reqwest.

use reqwest::header::{ACCEPT, AUTHORIZATION, HeaderMap, HeaderValue};
use reqwest::{StatusCode, Url};
use serde::de::DeserializeOwned;
use tracing::debug;

use super::error::{GitHubError, Result, format_api_error};
use crate::shared::config::GitHubConfig;

const API_VERSION: &str = "2022-11-28";
const DEFAULT_PAGE_SIZE: u8 = 30;

/// Client for the GitHub REST API, authenticated with a personal access token.
pub struct GitHubClient {
    http: reqwest::Client,
    base_url: Url,
    pub(super) page_size: u8,
}

impl GitHubClient {
    /// Build a client from configuration.
    pub fn new(config: &GitHubConfig, token: &str) -> Result<Self> {
        Ok(Self::with_base_url(&config.api_url, token)?.with_page_size(config.page_size))
    }

    /// Build a client against an explicit API base URL (GitHub Enterprise, test servers).
    /// An empty token sends unauthenticated requests.
    pub fn with_base_url(base_url: &str, token: &str) -> Result<Self> {
        let invalid = |message: String| GitHubError::InvalidBaseUrl {
            url: base_url.to_string(),
            message,
        };
        let parsed = Url::parse(base_url).map_err(|e| invalid(e.to_string()))?;
        if parsed.cannot_be_a_base() {
            return Err(invalid("not a base URL".to_string()));
        }

        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/vnd.github+json"));
        headers.insert("X-GitHub-Api-Version", HeaderValue::from_static(API_VERSION));
        if !token.is_empty() {
            let mut auth = HeaderValue::from_str(&format!("Bearer {token}"))
                .map_err(|_| GitHubError::InvalidToken)?;
            auth.set_sensitive(true);
            headers.insert(AUTHORIZATION, auth);
        }

        let http = reqwest::Client::builder()
            .user_agent(concat!("medic/", env!("CARGO_PKG_VERSION")))
            .default_headers(headers)
            .build()?;

        Ok(Self {
            http,
            base_url: parsed,
            page_size: DEFAULT_PAGE_SIZE,
        })
    }

    pub fn with_page_size(mut self, page_size: u8) -> Self {
        self.page_size = page_size;
        self
    }

    /// Append path segments to the base URL, escaping each one.
    pub(super) fn endpoint(&self, segments: &[&str]) -> Url {
        let mut url = self.base_url.clone();
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }

    /// GET `url`, mapping non-success statuses to typed errors.
    ///
    /// `resource` names what was requested and is only used for 404s.
    pub(super) async fn get(&self, url: Url, resource: &str) -> Result<reqwest::Response> {
        debug!(%url, "GitHub request");
        let response = self.http.get(url).send().await?;
        let status = response.status();
        debug!(status = status.as_u16(), "GitHub response");

        if status.is_success() {
            return Ok(response);
        }

        let body = match response.text().await {
            Ok(body) => body,
            Err(err) => {
                debug!(error = %err, "failed to read GitHub error body");
                String::new()
            }
        };
        if status == StatusCode::NOT_FOUND {
            return Err(GitHubError::NotFound {
                resource: resource.to_string(),
            });
        }
        Err(GitHubError::Api {
            status: status.as_u16(),
            message: format_api_error(&body),
        })
    }
}

/// Read the full body and decode it as JSON.
pub(super) async fn decode<T: DeserializeOwned>(response: reqwest::Response) -> Result<T> {
    let bytes = response.bytes().await?;
    Ok(serde_json::from_slice(&bytes)?)
}
