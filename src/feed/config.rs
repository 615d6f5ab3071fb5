//! Simulator configuration and its validation

use crate::domain::{silent_watcher_backfill, Event, FeedKind};
use crate::error::{Error, Result};
use crate::feed::buffer::FeedCapacity;
use crate::feed::pool::CandidatePool;
use chrono::Utc;
use rand::Rng;
use std::time::Duration;

pub const LIVE_ACTIVITY_MIN_INTERVAL_MS: u64 = 2_000;
pub const LIVE_ACTIVITY_MAX_INTERVAL_MS: u64 = 5_000;
pub const LIVE_ACTIVITY_CAPACITY: usize = 10;

pub const SILENT_WATCHER_INTERVAL_MS: u64 = 15_000;
pub const SILENT_WATCHER_CAPACITY: usize = 20;

/// Options recognized by `EventFeedSimulator::start`
#[derive(Debug, Clone)]
pub struct SimulatorConfig {
    pub min_interval: Duration,
    pub max_interval: Duration,
    pub capacity: usize,
    pub candidate_pool: CandidatePool,
    /// Seed for the random source; `None` seeds from the OS
    pub seed: Option<u64>,
    /// Events present in the buffer before the first tick
    pub backfill: Vec<Event>,
}

impl SimulatorConfig {
    pub fn new(
        min_interval: Duration,
        max_interval: Duration,
        capacity: usize,
        candidate_pool: CandidatePool,
    ) -> Self {
        Self {
            min_interval,
            max_interval,
            capacity,
            candidate_pool,
            seed: None,
            backfill: Vec::new(),
        }
    }

    /// Live activity feed: a log line every 2-5 seconds, last 10 kept
    pub fn live_activity() -> Self {
        Self::new(
            Duration::from_millis(LIVE_ACTIVITY_MIN_INTERVAL_MS),
            Duration::from_millis(LIVE_ACTIVITY_MAX_INTERVAL_MS),
            LIVE_ACTIVITY_CAPACITY,
            CandidatePool::live_activity(),
        )
    }

    /// Silent watcher feed: an alert every 15 seconds, last 20 kept
    pub fn silent_watcher() -> Self {
        Self::new(
            Duration::from_millis(SILENT_WATCHER_INTERVAL_MS),
            Duration::from_millis(SILENT_WATCHER_INTERVAL_MS),
            SILENT_WATCHER_CAPACITY,
            CandidatePool::silent_watcher(),
        )
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn with_backfill(mut self, events: Vec<Event>) -> Self {
        self.backfill = events;
        self
    }

    /// Backfill with the watcher's historical alerts
    pub fn with_watcher_history(self) -> Self {
        self.with_backfill(silent_watcher_backfill(Utc::now()))
    }

    pub fn validate(&self) -> Result<ValidatedConfig> {
        let bounds = IntervalBounds::new(self.min_interval, self.max_interval)?;
        let capacity = FeedCapacity::try_new(self.capacity)
            .map_err(|e| Error::invalid_config(format!("capacity {}: {e}", self.capacity)))?;
        let kind = self.candidate_pool.validate()?;

        if let Some(stray) = self.backfill.iter().find(|event| event.feed_kind() != kind) {
            return Err(Error::invalid_config(format!(
                "backfill event '{}' does not belong to the {kind} feed",
                stray.id
            )));
        }

        Ok(ValidatedConfig {
            bounds,
            capacity,
            kind,
        })
    }
}

/// Checked form of the scalar options
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ValidatedConfig {
    pub bounds: IntervalBounds,
    pub capacity: FeedCapacity,
    pub kind: FeedKind,
}

/// Inclusive-exclusive range the delay between ticks is drawn from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IntervalBounds {
    min: Duration,
    max: Duration,
}

impl IntervalBounds {
    pub fn new(min: Duration, max: Duration) -> Result<Self> {
        if min > max {
            return Err(Error::invalid_config(format!(
                "min interval {}ms exceeds max interval {}ms",
                min.as_millis(),
                max.as_millis()
            )));
        }
        Ok(Self { min, max })
    }

    pub fn min(&self) -> Duration {
        self.min
    }

    pub fn max(&self) -> Duration {
        self.max
    }

    /// Draw a delay uniformly from `[min, max)`, or exactly `min` when equal
    pub fn sample<R: Rng>(&self, rng: &mut R) -> Duration {
        if self.min >= self.max {
            return self.min;
        }
        rng.random_range(self.min..self.max)
    }
}
