//! Remote AI fix service client.

mod client;
pub(crate) mod error;
#[cfg(test)]
pub mod mock;

pub use client::FixServiceClient;
pub use error::FixServiceError;
