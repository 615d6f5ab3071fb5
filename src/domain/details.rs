//! Details page links for feed events
//!
//! Selecting a rendered event opens a details page whose only input is a
//! path of the form `/logs/{id}?level=..&message=..&timestamp=..&source=..`.
//! Every field travels as a flat, percent-encoded string.

use crate::domain::event::{Category, Event};
use chrono::SecondsFormat;
use serde::{Deserialize, Serialize};
use std::borrow::Cow;

pub const DETAILS_PATH_PREFIX: &str = "/logs/";
pub const DEFAULT_LEVEL: &str = "info";
pub const DEFAULT_MESSAGE: &str = "No message provided";

/// Flat string view of an event as carried by the details link
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DetailsLink {
    pub id: String,
    pub level: String,
    pub message: String,
    pub timestamp: String,
    pub source: String,
}

impl DetailsLink {
    pub fn from_event(event: &Event) -> Self {
        Self {
            id: event.id.to_string(),
            level: event.category.as_str().to_string(),
            message: event.message.as_ref().to_string(),
            timestamp: event.timestamp.to_rfc3339_opts(SecondsFormat::Millis, true),
            source: event.source.as_ref().to_string(),
        }
    }

    /// Render the navigation path, including the encoded query string
    pub fn to_path(&self) -> String {
        format!(
            "{DETAILS_PATH_PREFIX}{}?{}",
            urlencoding::encode(&self.id),
            self.to_query()
        )
    }

    pub fn to_query(&self) -> String {
        [
            ("level", &self.level),
            ("message", &self.message),
            ("timestamp", &self.timestamp),
            ("source", &self.source),
        ]
        .iter()
        .map(|(key, value)| format!("{key}={}", urlencoding::encode(value)))
        .collect::<Vec<_>>()
        .join("&")
    }

    /// Read a details path (or a bare query string) back
    ///
    /// Missing or undecodable fields fall back to the same defaults the
    /// details page shows: level `info`, a placeholder message and empty
    /// timestamp and source.
    pub fn parse(path: &str) -> Self {
        let (route, query) = match path.split_once('?') {
            Some((route, query)) => (route, query),
            None if path.contains('=') => ("", path),
            None => (path, ""),
        };

        let id = route
            .strip_prefix(DETAILS_PATH_PREFIX)
            .and_then(decode_component)
            .map(Cow::into_owned)
            .unwrap_or_default();

        let mut link = Self {
            id,
            level: String::new(),
            message: String::new(),
            timestamp: String::new(),
            source: String::new(),
        };

        for pair in query.split('&').filter(|pair| !pair.is_empty()) {
            let (key, raw) = pair.split_once('=').unwrap_or((pair, ""));
            let Some(value) = decode_component(raw) else {
                continue;
            };
            match key {
                "level" => link.level = value.into_owned(),
                "message" => link.message = value.into_owned(),
                "timestamp" => link.timestamp = value.into_owned(),
                "source" => link.source = value.into_owned(),
                _ => {}
            }
        }

        if link.level.is_empty() {
            link.level = DEFAULT_LEVEL.to_string();
        }
        if link.message.is_empty() {
            link.message = DEFAULT_MESSAGE.to_string();
        }
        link
    }

    /// Category named by the `level` field, when it is a known one
    pub fn category(&self) -> Option<Category> {
        self.level.parse().ok()
    }

    pub fn likely_cause(&self) -> &'static str {
        likely_cause(self.category().unwrap_or(Category::Info), &self.source)
    }
}

fn decode_component(raw: &str) -> Option<Cow<'_, str>> {
    if raw.contains('+') {
        let spaced = raw.replace('+', " ");
        return urlencoding::decode(&spaced)
            .ok()
            .map(|decoded| Cow::Owned(decoded.into_owned()));
    }
    urlencoding::decode(raw).ok()
}

/// Explanation shown on the details page for an event's level and source
pub fn likely_cause(category: Category, source: &str) -> &'static str {
    match category {
        Category::Error => match source {
            "Auth" => "Likely invalid credentials, expired session, or provider outage.",
            "DB" => "Possible connection timeout, migration lock, or failing query.",
            "API" => "Upstream 5xx/timeout or schema mismatch.",
            "System" => "Resource limits (CPU/memory) or misconfiguration.",
            "Payment" => "Gateway declined or provider downtime.",
            _ => "General runtime error in simulated data.",
        },
        Category::Warning => "Degraded performance or non-blocking issue detected.",
        Category::Success => "Operation completed as expected.",
        _ => "Informational telemetry event.",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::event::{EventMessage, EventSource, EventTitle};
    use crate::domain::identifiers::EventId;
    use chrono::{TimeZone, Utc};

    fn sample_event() -> Event {
        Event {
            id: EventId::generate(),
            timestamp: Utc.with_ymd_and_hms(2024, 5, 1, 12, 30, 0).unwrap(),
            category: Category::Error,
            severity: None,
            title: EventTitle::new("API response time: 234ms".to_string()),
            message: EventMessage::new("API response time: 234ms".to_string()),
            source: EventSource::new("API".to_string()),
            location: None,
        }
    }

    #[test]
    fn test_path_carries_all_fields_encoded() {
        let event = sample_event();
        let path = DetailsLink::from_event(&event).to_path();

        assert!(path.starts_with(&format!("/logs/{}?", event.id)));
        assert!(path.contains("level=error"));
        assert!(path.contains("message=API%20response%20time%3A%20234ms"));
        assert!(path.contains("timestamp=2024-05-01T12%3A30%3A00.000Z"));
        assert!(path.contains("source=API"));
    }

    #[test]
    fn test_parse_reads_back_rendered_path() {
        let link = DetailsLink::from_event(&sample_event());
        assert_eq!(DetailsLink::parse(&link.to_path()), link);
    }

    #[test]
    fn test_parse_applies_page_defaults() {
        let link = DetailsLink::parse("/logs/abc");
        assert_eq!(link.id, "abc");
        assert_eq!(link.level, DEFAULT_LEVEL);
        assert_eq!(link.message, DEFAULT_MESSAGE);
        assert!(link.timestamp.is_empty());
        assert!(link.source.is_empty());
    }

    #[test]
    fn test_parse_accepts_bare_query_with_plus_spaces() {
        let link = DetailsLink::parse("level=warning&message=Memory+usage%3A+67%25");
        assert_eq!(link.id, "");
        assert_eq!(link.category(), Some(Category::Warning));
        assert_eq!(link.message, "Memory usage: 67%");
    }

    #[test]
    fn test_likely_cause_depends_on_source_for_errors() {
        assert_eq!(
            likely_cause(Category::Error, "DB"),
            "Possible connection timeout, migration lock, or failing query."
        );
        assert_eq!(
            likely_cause(Category::Error, "Cache"),
            "General runtime error in simulated data."
        );
        assert_eq!(
            likely_cause(Category::Warning, "DB"),
            "Degraded performance or non-blocking issue detected."
        );
        assert_eq!(
            likely_cause(Category::Info, "Auth"),
            "Informational telemetry event."
        );
    }

    #[test]
    fn test_unknown_level_falls_back_to_informational_cause() {
        let link = DetailsLink::parse("/logs/x?level=bogus&source=DB");
        assert_eq!(link.category(), None);
        assert_eq!(link.likely_cause(), "Informational telemetry event.");
    }
}
