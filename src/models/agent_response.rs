use serde::Deserialize;

/// Structured result of a fix attempt.
///
/// Every field tolerates being absent or `null` on the wire and falls back to
/// its empty form; only a body that is not a JSON object fails to parse.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(from = "AgentResponseWire")]
pub struct AgentResponse {
    pub status: String,
    pub summary: String,
    pub messages: Vec<String>,
    /// Tools the agent invoked, in call order.
    pub tool_path: Vec<String>,
    pub files_modified: Vec<String>,
    pub errors: Vec<String>,
    pub pull_request_url: Option<String>,
}

#[derive(Deserialize)]
struct AgentResponseWire {
    #[serde(default)]
    status: Option<String>,
    #[serde(default)]
    data: Option<AgentDataWire>,
}

#[derive(Default, Deserialize)]
struct AgentDataWire {
    #[serde(default)]
    summary: Option<String>,
    #[serde(default)]
    messages: Option<Vec<String>>,
    #[serde(default)]
    tool_path: Option<Vec<String>>,
    #[serde(default)]
    files_modified: Option<Vec<String>>,
    #[serde(default)]
    errors: Option<Vec<String>>,
    #[serde(default)]
    pull_request_url: Option<String>,
}

impl From<AgentResponseWire> for AgentResponse {
    fn from(wire: AgentResponseWire) -> Self {
        let data = wire.data.unwrap_or_default();
        Self {
            status: wire.status.unwrap_or_default(),
            summary: data.summary.unwrap_or_default(),
            messages: data.messages.unwrap_or_default(),
            tool_path: data.tool_path.unwrap_or_default(),
            files_modified: data.files_modified.unwrap_or_default(),
            errors: data.errors.unwrap_or_default(),
            pull_request_url: data.pull_request_url.filter(|url| !url.is_empty()),
        }
    }
}
