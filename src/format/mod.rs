//! Terminal text for issues and agent responses.

mod agent_response;
mod issue_list;
mod time;

pub use agent_response::render_agent_response;
pub use issue_list::format_issue_line;
