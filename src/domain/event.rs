//! Feed event types
//!
//! Both feeds share one [`Event`] shape. Log feed events carry one of the
//! log categories and no severity or location; watcher events carry a
//! watcher category, a severity and usually a location.

use crate::domain::identifiers::EventId;
use chrono::{DateTime, Utc};
use nutype::nutype;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Which panel a category (and therefore an event) belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FeedKind {
    LiveActivity,
    SilentWatcher,
}

impl FeedKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            FeedKind::LiveActivity => "live_activity",
            FeedKind::SilentWatcher => "silent_watcher",
        }
    }
}

impl fmt::Display for FeedKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Category tag of an event
///
/// The first four belong to the live activity log feed, the last four to the
/// silent watcher feed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Info,
    Warning,
    Error,
    Success,
    Security,
    Performance,
    User,
    System,
}

impl Category {
    pub const LOG_LEVELS: [Category; 4] = [
        Category::Info,
        Category::Warning,
        Category::Error,
        Category::Success,
    ];

    pub const WATCHER_TYPES: [Category; 4] = [
        Category::Security,
        Category::Performance,
        Category::User,
        Category::System,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Info => "info",
            Category::Warning => "warning",
            Category::Error => "error",
            Category::Success => "success",
            Category::Security => "security",
            Category::Performance => "performance",
            Category::User => "user",
            Category::System => "system",
        }
    }

    pub fn feed_kind(&self) -> FeedKind {
        match self {
            Category::Info | Category::Warning | Category::Error | Category::Success => {
                FeedKind::LiveActivity
            }
            Category::Security | Category::Performance | Category::User | Category::System => {
                FeedKind::SilentWatcher
            }
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for Category {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "info" => Ok(Category::Info),
            "warning" | "warn" => Ok(Category::Warning),
            "error" => Ok(Category::Error),
            "success" => Ok(Category::Success),
            "security" => Ok(Category::Security),
            "performance" => Ok(Category::Performance),
            "user" => Ok(Category::User),
            "system" => Ok(Category::System),
            _ => Err(format!("Invalid event category: {s}")),
        }
    }
}

/// Severity of a watcher event, ordered from least to most severe
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Low,
    Medium,
    High,
    Critical,
}

impl Severity {
    pub const ALL: [Severity; 4] = [
        Severity::Low,
        Severity::Medium,
        Severity::High,
        Severity::Critical,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Low => "low",
            Severity::Medium => "medium",
            Severity::High => "high",
            Severity::Critical => "critical",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for Severity {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "low" => Ok(Severity::Low),
            "medium" => Ok(Severity::Medium),
            "high" => Ok(Severity::High),
            "critical" => Ok(Severity::Critical),
            _ => Err(format!("Invalid severity: {s}")),
        }
    }
}

/// Short headline shown for an event
#[nutype(
    sanitize(trim),
    derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, Display, AsRef, From)
)]
pub struct EventTitle(String);

/// Longer human readable text of an event (the log line or alert description)
#[nutype(
    sanitize(trim),
    derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, Display, AsRef, From)
)]
pub struct EventMessage(String);

/// Label of the subsystem an event originates from
#[nutype(
    sanitize(trim),
    derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, Display, AsRef, From)
)]
pub struct EventSource(String);

/// Free-text origin descriptor of a watcher event (IP, host, city)
#[nutype(
    sanitize(trim),
    derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, Display, AsRef, From)
)]
pub struct Location(String);

/// One synthetic record in a feed
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Event {
    pub id: EventId,
    pub timestamp: DateTime<Utc>,
    pub category: Category,
    pub severity: Option<Severity>,
    pub title: EventTitle,
    pub message: EventMessage,
    pub source: EventSource,
    pub location: Option<Location>,
}

impl Event {
    pub fn feed_kind(&self) -> FeedKind {
        self.category.feed_kind()
    }
}
