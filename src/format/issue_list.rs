use chrono::{DateTime, Utc};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

use super::time::format_relative_time;
use crate::models::Issue;

/// Display width reserved for titles in `medic list`.
const TITLE_WIDTH: usize = 60;

/// One line of `medic list`: number, padded title, last update.
pub fn format_issue_line(issue: &Issue, now: DateTime<Utc>) -> String {
    let title = truncate_title(&issue.title, TITLE_WIDTH);
    let padding = TITLE_WIDTH.saturating_sub(title.width());
    format!(
        "{:<7} {}{}  updated {}",
        format!("#{}", issue.number),
        title,
        " ".repeat(padding),
        format_relative_time(issue.updated_at, now)
    )
}

/// Cut `title` to `max_width` display columns, ending in "..." when shortened.
/// Wide characters (CJK) count as two columns.
pub fn truncate_title(title: &str, max_width: usize) -> String {
    let title = title.trim();
    if title.width() <= max_width {
        return title.to_string();
    }
    if max_width < 3 {
        return take_width(title, max_width);
    }
    format!("{}...", take_width(title, max_width - 3))
}

fn take_width(s: &str, max_width: usize) -> String {
    let mut result = String::new();
    let mut width = 0;
    for c in s.chars() {
        let w = c.width().unwrap_or(0);
        if width + w > max_width {
            break;
        }
        result.push(c);
        width += w;
    }
    result
}
