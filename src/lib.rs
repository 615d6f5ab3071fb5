//! Watchtower - simulated monitoring feeds
//!
//! Bounded, time-ordered streams of synthetic events backing a "live
//! activity" log panel and a "silent watcher" alert panel. Each feed is an
//! [`EventFeedSimulator`](feed::EventFeedSimulator) that appends events on a
//! randomized schedule and exposes filtered snapshots to a renderer.

pub mod application;
pub mod config;
pub mod domain;
pub mod error;
pub mod feed;

pub use application::Application;
pub use error::{Error, Result};
pub use feed::{EventFeedSimulator, EventFilter, SimulatorConfig};
