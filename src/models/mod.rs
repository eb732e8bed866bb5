//! Domain values shared by the tracker client, the fix-service transport and the presenter.

mod agent_response;
mod credentials;
mod fix_request;
mod issue;

pub use agent_response::AgentResponse;
pub use credentials::{Credentials, RepoName};
pub use fix_request::FixRequest;
pub use issue::{Issue, IssueState};
