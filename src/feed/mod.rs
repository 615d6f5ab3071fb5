//! Bounded, time-ordered synthetic event feeds
//!
//! [`EventFeedSimulator`] is the entry point: it validates a
//! [`SimulatorConfig`], drives a [`FeedEngine`] from a randomized timer and
//! exposes filtered snapshots plus a change notification to renderers.

pub mod buffer;
pub mod config;
pub mod engine;
pub mod filter;
pub mod pool;
pub mod simulator;

pub use buffer::{FeedBuffer, FeedCapacity};
pub use config::{IntervalBounds, SimulatorConfig, ValidatedConfig};
pub use engine::FeedEngine;
pub use filter::EventFilter;
pub use pool::{CandidatePool, Headline};
pub use simulator::EventFeedSimulator;
