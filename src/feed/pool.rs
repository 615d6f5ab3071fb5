//! Candidate pools the generator draws event fields from
//!
//! A pool decides which feed variant it produces: a live activity pool has
//! only log categories and no severities or locations, a silent watcher pool
//! has only watcher categories and at least one severity.

use crate::domain::{Category, EventMessage, EventSource, EventTitle, FeedKind, Location, Severity};
use crate::error::{Error, Result};

/// A title/message pair, optionally restricted to one category
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Headline {
    pub category: Option<Category>,
    pub title: EventTitle,
    pub message: EventMessage,
}

impl Headline {
    /// Headline usable for any category whose title is its message
    pub fn any(text: &str) -> Self {
        Self {
            category: None,
            title: EventTitle::new(text.to_string()),
            message: EventMessage::new(text.to_string()),
        }
    }

    pub fn for_category(category: Category, title: &str, message: &str) -> Self {
        Self {
            category: Some(category),
            title: EventTitle::new(title.to_string()),
            message: EventMessage::new(message.to_string()),
        }
    }

    pub fn applies_to(&self, category: Category) -> bool {
        self.category.is_none_or(|own| own == category)
    }
}

/// Fixed candidate sets for every drawn event field
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CandidatePool {
    pub categories: Vec<Category>,
    pub headlines: Vec<Headline>,
    pub sources: Vec<EventSource>,
    pub severities: Vec<Severity>,
    pub locations: Vec<Location>,
}

const LIVE_ACTIVITY_MESSAGES: [&str; 8] = [
    "User authentication successful",
    "Database connection established",
    "API response time: 234ms",
    "Memory usage: 67%",
    "New user registration",
    "Payment processed successfully",
    "Cache invalidated",
    "Background job completed",
];

const LIVE_ACTIVITY_SOURCES: [&str; 5] = ["Auth", "DB", "API", "System", "Payment"];

const WATCHER_HEADLINES: [(Category, &str, &str); 12] = [
    (
        Category::Security,
        "Suspicious Login Attempt",
        "Multiple failed login attempts from unknown IP",
    ),
    (
        Category::Security,
        "Port Scan Detected",
        "Sequential connection attempts across restricted ports",
    ),
    (
        Category::Security,
        "Privilege Escalation Blocked",
        "Process attempted to acquire administrative rights",
    ),
    (
        Category::Performance,
        "High Memory Usage",
        "Server memory usage exceeded 85% threshold",
    ),
    (
        Category::Performance,
        "Slow Response Times",
        "API latency above 2s for the last five minutes",
    ),
    (
        Category::Performance,
        "CPU Saturation",
        "Sustained CPU usage above 95% on worker nodes",
    ),
    (
        Category::User,
        "New User Registration",
        "User registered from new geographic location",
    ),
    (
        Category::User,
        "Unusual Session Activity",
        "Session accessed from two regions within minutes",
    ),
    (
        Category::User,
        "Password Reset Requested",
        "Multiple password reset requests for one account",
    ),
    (
        Category::System,
        "Database Connection Lost",
        "Primary database connection interrupted",
    ),
    (
        Category::System,
        "Disk Space Low",
        "Volume usage exceeded 90% capacity",
    ),
    (
        Category::System,
        "Service Restarted",
        "Background worker restarted after a crash",
    ),
];

const WATCHER_SOURCES: [&str; 5] = [
    "Authentication System",
    "Performance Monitor",
    "User Management",
    "Database Monitor",
    "Silent Watcher",
];

const WATCHER_LOCATIONS: [&str; 5] = [
    "192.168.1.1",
    "Server-01",
    "New York, US",
    "DB-Primary",
    "System",
];

impl CandidatePool {
    /// Pool of the live activity log feed
    pub fn live_activity() -> Self {
        Self {
            categories: Category::LOG_LEVELS.to_vec(),
            headlines: LIVE_ACTIVITY_MESSAGES.iter().map(|m| Headline::any(m)).collect(),
            sources: to_sources(&LIVE_ACTIVITY_SOURCES),
            severities: Vec::new(),
            locations: Vec::new(),
        }
    }

    /// Pool of the silent watcher feed, with per-category alert texts
    pub fn silent_watcher() -> Self {
        Self {
            categories: Category::WATCHER_TYPES.to_vec(),
            headlines: WATCHER_HEADLINES
                .iter()
                .map(|(category, title, message)| Headline::for_category(*category, title, message))
                .collect(),
            sources: to_sources(&WATCHER_SOURCES),
            severities: Severity::ALL.to_vec(),
            locations: WATCHER_LOCATIONS
                .iter()
                .map(|location| Location::new(location.to_string()))
                .collect(),
        }
    }

    /// Watcher pool emitting a single placeholder alert for every category
    pub fn silent_watcher_placeholder() -> Self {
        Self {
            categories: Category::WATCHER_TYPES.to_vec(),
            headlines: vec![Headline {
                category: None,
                title: EventTitle::new("New Alert Detected".to_string()),
                message: EventMessage::new("Automated surveillance detected anomaly".to_string()),
            }],
            sources: to_sources(&["Silent Watcher"]),
            severities: Severity::ALL.to_vec(),
            locations: vec![Location::new("System".to_string())],
        }
    }

    /// Headlines eligible for a drawn category
    pub fn headlines_for(&self, category: Category) -> Vec<&Headline> {
        self.headlines
            .iter()
            .filter(|headline| headline.applies_to(category))
            .collect()
    }

    /// Which feed this pool produces, once validated
    pub fn feed_kind(&self) -> Option<FeedKind> {
        self.categories.first().map(Category::feed_kind)
    }

    /// Check that every draw the generator makes has at least one candidate
    pub fn validate(&self) -> Result<FeedKind> {
        let kind = self
            .feed_kind()
            .ok_or_else(|| Error::invalid_config("candidate pool has no categories"))?;

        if let Some(stray) = self.categories.iter().find(|c| c.feed_kind() != kind) {
            return Err(Error::invalid_config(format!(
                "category '{stray}' does not belong to the {kind} feed"
            )));
        }
        if self.sources.is_empty() {
            return Err(Error::invalid_config("candidate pool has no sources"));
        }
        if self.sources.iter().any(|source| source.as_ref().is_empty()) {
            return Err(Error::invalid_config("candidate pool has an empty source"));
        }
        if self
            .headlines
            .iter()
            .any(|h| h.title.as_ref().is_empty() || h.message.as_ref().is_empty())
        {
            return Err(Error::invalid_config("candidate pool has an empty headline"));
        }
        if let Some(uncovered) = self
            .categories
            .iter()
            .find(|category| self.headlines_for(**category).is_empty())
        {
            return Err(Error::invalid_config(format!(
                "no headline available for category '{uncovered}'"
            )));
        }

        match kind {
            FeedKind::SilentWatcher if self.severities.is_empty() => Err(Error::invalid_config(
                "silent watcher pool needs at least one severity",
            )),
            FeedKind::LiveActivity if !self.severities.is_empty() || !self.locations.is_empty() => {
                Err(Error::invalid_config(
                    "live activity pool cannot carry severities or locations",
                ))
            }
            _ => Ok(kind),
        }
    }
}

fn to_sources(labels: &[&str]) -> Vec<EventSource> {
    labels
        .iter()
        .map(|label| EventSource::new(label.to_string()))
        .collect()
}
