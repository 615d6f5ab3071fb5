//! Domain types for Watchtower
//!
//! Events, their identifiers and the presentation-facing helpers (details
//! links, relative time labels, watcher summary) that consumers of a feed
//! need without reaching into the simulator.

pub mod config_types;
pub mod details;
pub mod event;
pub mod identifiers;
pub mod time_ago;
pub mod watcher;

pub use config_types::{LogFormat, LogLevel};
pub use details::{likely_cause, DetailsLink};
pub use event::*;
pub use identifiers::EventId;
pub use time_ago::format_time_ago;
pub use watcher::{silent_watcher_backfill, WatcherStats};
