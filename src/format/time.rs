use chrono::{DateTime, Utc};

/// Formats a timestamp relative to `now`.
///
/// Returns strings like "just now", "5 minutes ago", "3 hours ago", "2 days ago",
/// "1 week ago". Anything older than eight weeks, or in the future, is shown as
/// a plain date.
pub fn format_relative_time(timestamp: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let seconds = now.signed_duration_since(timestamp).num_seconds();

    if seconds < 0 || seconds >= 8 * 604800 {
        return format!("on {}", timestamp.format("%Y-%m-%d"));
    }

    if seconds < 60 {
        "just now".to_string()
    } else if seconds < 3600 {
        plural(seconds / 60, "minute")
    } else if seconds < 86400 {
        plural(seconds / 3600, "hour")
    } else if seconds < 604800 {
        plural(seconds / 86400, "day")
    } else {
        plural(seconds / 604800, "week")
    }
}

fn plural(count: i64, unit: &str) -> String {
    format!("{count} {unit}{} ago", if count == 1 { "" } else { "s" })
}
