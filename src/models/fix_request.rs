use serde::Serialize;

use super::{Credentials, Issue};

/// One fix attempt: the credentials the agent acts with and the issue it should fix.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FixRequest {
    #[serde(rename = "github_credentials")]
    credentials: Credentials,
    #[serde(rename = "issue_data")]
    issue: Issue,
}

impl FixRequest {
    pub fn new(credentials: Credentials, issue: Issue) -> Self {
        Self { credentials, issue }
    }

    pub fn credentials(&self) -> &Credentials {
        &self.credentials
    }

    pub fn issue(&self) -> &Issue {
        &self.issue
    }
}
