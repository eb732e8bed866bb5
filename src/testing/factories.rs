//! Test factories for creating test data with sensible defaults.
//!
//! Use `*_with()` variants to customize specific fields.
//!
//! # Example
//! ```ignore
//! use crate::testing::factories::{issue, issue_with};
//!
//! let i = issue();
//! let i = issue_with(|i| {
//!     i.title = "Custom Title".to_string();
//!     i.number = 42;
//! });
//! ```

use chrono::{TimeZone, Utc};

use crate::models::{AgentResponse, Credentials, Issue, IssueState};

// =============================================================================
// Issue factories
// =============================================================================

/// Create an Issue with default test values.
pub fn issue() -> Issue {
    Issue {
        number: 1,
        title: "Test Issue".to_string(),
        body: "Test body".to_string(),
        state: IssueState::Open,
        created_at: Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap(),
        updated_at: Utc.with_ymd_and_hms(2024, 1, 2, 0, 0, 0).unwrap(),
    }
}

/// Create an Issue with customizations applied via closure.
pub fn issue_with(f: impl FnOnce(&mut Issue)) -> Issue {
    let mut i = issue();
    f(&mut i);
    i
}

// =============================================================================
// Credential and response factories
// =============================================================================

pub fn credentials() -> Credentials {
    Credentials::new("test-token", "owner/repo").unwrap()
}

pub fn agent_response_with(f: impl FnOnce(&mut AgentResponse)) -> AgentResponse {
    let mut r = AgentResponse {
        status: "success".to_string(),
        summary: "Fixed the issue".to_string(),
        ..AgentResponse::default()
    };
    f(&mut r);
    r
}
