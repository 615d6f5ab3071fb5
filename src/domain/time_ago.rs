//! Relative time labels for rendered events

use chrono::{DateTime, Utc};

/// Render how long ago `then` was, relative to `now`
///
/// Under a minute (including timestamps slightly in the future) is "just now",
/// under an hour is whole minutes, anything older is whole hours.
pub fn format_time_ago(then: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let minutes = now.signed_duration_since(then).num_minutes();

    if minutes < 1 {
        return "just now".to_string();
    }
    if minutes < 60 {
        return format!("{minutes}m ago");
    }
    format!("{}h ago", minutes / 60)
}
