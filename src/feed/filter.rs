//! Category filters over feed snapshots

use crate::domain::{Category, Event, Severity};
use std::fmt;

/// Predicate selecting which events a consumer wants to see
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum EventFilter {
    #[default]
    All,
    Category(Category),
    AnyOf(Vec<Category>),
    /// Watcher events at or above a severity; log events never match
    MinSeverity(Severity),
}

impl EventFilter {
    pub fn matches(&self, event: &Event) -> bool {
        match self {
            EventFilter::All => true,
            EventFilter::Category(category) => event.category == *category,
            EventFilter::AnyOf(categories) => categories.contains(&event.category),
            EventFilter::MinSeverity(threshold) => {
                event.severity.is_some_and(|severity| severity >= *threshold)
            }
        }
    }
}

impl From<Category> for EventFilter {
    fn from(category: Category) -> Self {
        EventFilter::Category(category)
    }
}

impl fmt::Display for EventFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EventFilter::All => write!(f, "all"),
            EventFilter::Category(category) => write!(f, "{category}"),
            EventFilter::AnyOf(categories) => {
                let names: Vec<_> = categories.iter().map(Category::as_str).collect();
                write!(f, "{}", names.join(","))
            }
            EventFilter::MinSeverity(severity) => write!(f, "{severity}+"),
        }
    }
}

/// Parses the filter buttons' labels: `all`, a single category, or a
/// comma-separated category list
impl std::str::FromStr for EventFilter {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.is_empty() || trimmed.eq_ignore_ascii_case("all") {
            return Ok(EventFilter::All);
        }
        if let Some(severity) = trimmed.strip_suffix('+') {
            return severity.parse().map(EventFilter::MinSeverity);
        }
        let categories = trimmed
            .split(',')
            .map(str::parse)
            .collect::<Result<Vec<Category>, _>>()?;
        match categories.as_slice() {
            [single] => Ok(EventFilter::Category(*single)),
            _ => Ok(EventFilter::AnyOf(categories)),
        }
    }
}
