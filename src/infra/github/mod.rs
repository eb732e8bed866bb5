//! GitHub issue tracker client.
//!
//! Provides `GitHubClient` for fetching single issues and paging through open
//! issues over the REST API.

mod client;
pub(crate) mod error;
mod issue;
#[cfg(test)]
pub mod mock;

pub use client::GitHubClient;
pub use error::GitHubError;
