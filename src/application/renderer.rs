//! Terminal rendering of feed events

use crate::domain::{format_time_ago, DetailsLink, Event, WatcherStats};
use chrono::{DateTime, Utc};

/// Shown for a feed that has not produced anything yet
pub const EMPTY_FEED: &str = "Waiting for activity...";
/// Shown when the feed has events but the active filter hides all of them
pub const NO_MATCHES: &str = "No events found for the selected filter.";

/// One line describing an event the way its panel shows it
pub fn render_event(event: &Event, now: DateTime<Utc>) -> String {
    let age = format_time_ago(event.timestamp, now);
    match event.severity {
        Some(severity) => {
            let location = event
                .location
                .as_ref()
                .map(|location| format!(" @ {location}"))
                .unwrap_or_default();
            format!(
                "[{severity}] {}: {} - {} ({}{location}, {age})",
                event.category, event.title, event.message, event.source
            )
        }
        None => format!(
            "[{}] {} (source: {}, {age})",
            event.category.as_str().to_uppercase(),
            event.message,
            event.source
        ),
    }
}

/// Header line for a panel showing `shown` of its events
pub fn render_header(name: &str, shown: usize) -> String {
    format!("{name}: recent events ({shown})")
}

/// The whole panel body, newest first
///
/// `events` is the filtered view and `total` the unfiltered buffer length.
pub fn render_feed(events: &[Event], total: usize, now: DateTime<Utc>) -> Vec<String> {
    if events.is_empty() {
        let placeholder = if total == 0 { EMPTY_FEED } else { NO_MATCHES };
        return vec![placeholder.to_string()];
    }
    events
        .iter()
        .map(|event| {
            format!(
                "{} -> {}",
                render_event(event, now),
                DetailsLink::from_event(event).to_path()
            )
        })
        .collect()
}

pub fn render_stats(stats: &WatcherStats) -> String {
    format!(
        "endpoints monitored: {}, active alerts: {}, threats blocked: {}, uptime: {}",
        stats.monitored, stats.alerts, stats.blocked, stats.uptime
    )
}
