//! Silent watcher summary figures and historical events

use crate::domain::event::{
    Category, Event, EventMessage, EventSource, EventTitle, Location, Severity,
};
use crate::domain::identifiers::EventId;
use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

/// Static summary shown above the watcher feed
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WatcherStats {
    pub monitored: u32,
    pub alerts: u32,
    pub blocked: u32,
    pub uptime: String,
}

impl Default for WatcherStats {
    fn default() -> Self {
        Self {
            monitored: 1247,
            alerts: 23,
            blocked: 8,
            uptime: "99.97%".to_string(),
        }
    }
}

struct HistoricalAlert {
    minutes_ago: i64,
    category: Category,
    severity: Severity,
    title: &'static str,
    description: &'static str,
    source: &'static str,
    location: &'static str,
}

const HISTORY: [HistoricalAlert; 4] = [
    HistoricalAlert {
        minutes_ago: 2,
        category: Category::Security,
        severity: Severity::High,
        title: "Suspicious Login Attempt",
        description: "Multiple failed login attempts from unknown IP",
        source: "Authentication System",
        location: "192.168.1.1",
    },
    HistoricalAlert {
        minutes_ago: 5,
        category: Category::Performance,
        severity: Severity::Medium,
        title: "High Memory Usage",
        description: "Server memory usage exceeded 85% threshold",
        source: "Performance Monitor",
        location: "Server-01",
    },
    HistoricalAlert {
        minutes_ago: 8,
        category: Category::User,
        severity: Severity::Low,
        title: "New User Registration",
        description: "User registered from new geographic location",
        source: "User Management",
        location: "New York, US",
    },
    HistoricalAlert {
        minutes_ago: 12,
        category: Category::System,
        severity: Severity::Critical,
        title: "Database Connection Lost",
        description: "Primary database connection interrupted",
        source: "Database Monitor",
        location: "DB-Primary",
    },
];

/// Events the watcher panel shows before live monitoring produced anything,
/// newest first
pub fn silent_watcher_backfill(now: DateTime<Utc>) -> Vec<Event> {
    HISTORY
        .iter()
        .map(|alert| Event {
            id: EventId::generate(),
            timestamp: now - Duration::minutes(alert.minutes_ago),
            category: alert.category,
            severity: Some(alert.severity),
            title: EventTitle::new(alert.title.to_string()),
            message: EventMessage::new(alert.description.to_string()),
            source: EventSource::new(alert.source.to_string()),
            location: Some(Location::new(alert.location.to_string())),
        })
        .collect()
}
