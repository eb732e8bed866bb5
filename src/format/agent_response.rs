use crate::models::AgentResponse;

/// Render an agent response as display lines.
///
/// Messages and tool calls always get a section; an empty list renders an
/// explicit marker. Files, errors and the PR link appear only when present.
pub fn render_agent_response(response: &AgentResponse) -> Vec<String> {
    let mut lines = vec![format!(
        "Status: {} | Summary: {}",
        or_placeholder(&response.status),
        or_placeholder(&response.summary)
    )];

    push_section(&mut lines, "Messages:", &response.messages, "(no messages)");
    push_section(&mut lines, "Tools used:", &response.tool_path, "(no tools used)");

    if !response.files_modified.is_empty() {
        push_section(&mut lines, "Files modified:", &response.files_modified, "");
    }
    if !response.errors.is_empty() {
        push_section(&mut lines, "Errors:", &response.errors, "");
    }
    if let Some(url) = &response.pull_request_url {
        lines.push(String::new());
        lines.push(format!("Pull request: {url}"));
    }

    lines
}

fn or_placeholder(value: &str) -> &str {
    if value.trim().is_empty() { "(none)" } else { value }
}

fn push_section(lines: &mut Vec<String>, heading: &str, items: &[String], empty_marker: &str) {
    lines.push(String::new());
    lines.push(heading.to_string());
    if items.is_empty() {
        lines.push(format!("  {empty_marker}"));
        return;
    }
    for (i, item) in items.iter().enumerate() {
        lines.push(format!("  {}. {}", i + 1, item));
    }
}
