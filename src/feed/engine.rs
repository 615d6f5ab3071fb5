//! Synchronous generation core
//!
//! [`FeedEngine`] owns the buffer and the random source and performs exactly
//! one generation step per [`FeedEngine::tick`]. It knows nothing about
//! timers, which is what lets the simulator and the tests drive it alike.

use crate::domain::{Category, Event, EventId, FeedKind};
use crate::error::Result;
use crate::feed::buffer::FeedBuffer;
use crate::feed::config::{IntervalBounds, SimulatorConfig};
use crate::feed::filter::EventFilter;
use crate::feed::pool::CandidatePool;
use chrono::{DateTime, Utc};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::time::Duration;

/// Buffer plus generator for one feed
#[derive(Debug)]
pub struct FeedEngine {
    buffer: FeedBuffer,
    pool: CandidatePool,
    bounds: IntervalBounds,
    kind: FeedKind,
    rng: StdRng,
    ticks: u64,
}

impl FeedEngine {
    /// Validate `config` and build an engine whose buffer holds only the
    /// configured backfill
    pub fn new(config: &SimulatorConfig) -> Result<Self> {
        let validated = config.validate()?;

        let mut buffer = FeedBuffer::new(validated.capacity);
        let mut backfill = config.backfill.clone();
        // Oldest first so each push lands at the head
        backfill.sort_by_key(|event| event.timestamp);
        for event in backfill {
            buffer.push(event);
        }

        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };

        Ok(Self {
            buffer,
            pool: config.candidate_pool.clone(),
            bounds: validated.bounds,
            kind: validated.kind,
            rng,
            ticks: 0,
        })
    }

    /// Draw the delay until the next tick
    pub fn next_delay(&mut self) -> Duration {
        self.bounds.sample(&mut self.rng)
    }

    /// Generate one event stamped with the current wall-clock time
    pub fn tick(&mut self) -> Event {
        self.tick_at(Utc::now())
    }

    /// Generate one event as if the wall clock read `now`
    ///
    /// A clock that went backwards is clamped to the current head's
    /// timestamp so the buffer stays ordered by generation time.
    pub fn tick_at(&mut self, now: DateTime<Utc>) -> Event {
        let timestamp = match self.buffer.head() {
            Some(head) if head.timestamp > now => head.timestamp,
            _ => now,
        };
        let event = self.generate(timestamp);

        self.buffer.push(event.clone());
        self.ticks += 1;
        event
    }

    fn generate(&mut self, timestamp: DateTime<Utc>) -> Event {
        let category: Category = pick(&mut self.rng, &self.pool.categories);
        let headlines = self.pool.headlines_for(category);
        let headline = headlines[self.rng.random_range(0..headlines.len())].clone();
        let source = pick(&mut self.rng, &self.pool.sources);

        let (severity, location) = match self.kind {
            FeedKind::SilentWatcher => (
                Some(pick(&mut self.rng, &self.pool.severities)),
                (!self.pool.locations.is_empty())
                    .then(|| pick(&mut self.rng, &self.pool.locations)),
            ),
            FeedKind::LiveActivity => (None, None),
        };

        Event {
            id: EventId::generate(),
            timestamp,
            category,
            severity,
            title: headline.title,
            message: headline.message,
            source,
            location,
        }
    }

    pub fn current_events(&self, filter: &EventFilter) -> Vec<Event> {
        self.buffer.snapshot(filter)
    }

    pub fn buffer(&self) -> &FeedBuffer {
        &self.buffer
    }

    pub fn kind(&self) -> FeedKind {
        self.kind
    }

    pub fn bounds(&self) -> IntervalBounds {
        self.bounds
    }

    /// Number of ticks generated so far (backfill not included)
    pub fn tick_count(&self) -> u64 {
        self.ticks
    }
}

// Pools are validated non-empty before an engine exists
fn pick<T: Clone>(rng: &mut StdRng, candidates: &[T]) -> T {
    candidates[rng.random_range(0..candidates.len())].clone()
}
