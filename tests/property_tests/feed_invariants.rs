//! Invariants of the bounded, newest-first feed buffer
//!
//! The engine is driven directly with explicit clock readings, including
//! readings that go backwards, so every property is checked without timers.

use chrono::{DateTime, Duration, TimeZone, Utc};
use proptest::prelude::*;
use std::time::Duration as StdDuration;
use watchtower::domain::{Category, Event, Severity};
use watchtower::feed::{CandidatePool, FeedEngine};
use watchtower::{EventFilter, SimulatorConfig};

pub mod generators {
    use super::*;
    use proptest::collection::vec;
    use proptest::sample::subsequence;

    pub fn capacity() -> impl Strategy<Value = usize> {
        1usize..=32
    }

    /// Clock offsets in seconds relative to the previous reading
    pub fn clock_steps() -> impl Strategy<Value = Vec<i64>> {
        vec(-30i64..120, 0..80)
    }

    /// Interval bounds in microseconds, including sub-millisecond spans
    pub fn interval_us() -> impl Strategy<Value = (u64, u64)> {
        (1u64..10_000_000).prop_flat_map(|min| (Just(min), min..=min + 10_000))
    }

    pub fn pool() -> impl Strategy<Value = CandidatePool> {
        prop_oneof![
            Just(CandidatePool::live_activity()),
            Just(CandidatePool::silent_watcher()),
            Just(CandidatePool::silent_watcher_placeholder()),
        ]
    }

    pub fn filter() -> impl Strategy<Value = EventFilter> {
        let categories: Vec<Category> = Category::LOG_LEVELS
            .iter()
            .chain(Category::WATCHER_TYPES.iter())
            .copied()
            .collect();
        prop_oneof![
            Just(EventFilter::All),
            proptest::sample::select(categories.clone()).prop_map(EventFilter::Category),
            subsequence(categories, 0..=4).prop_map(EventFilter::AnyOf),
            proptest::sample::select(Severity::ALL.to_vec()).prop_map(EventFilter::MinSeverity),
        ]
    }
}

pub struct FeedInvariants;

impl FeedInvariants {
    pub fn newest_first(events: &[Event]) -> bool {
        events
            .windows(2)
            .all(|pair| pair[0].timestamp >= pair[1].timestamp)
    }

    pub fn within_capacity(events: &[Event], capacity: usize) -> bool {
        events.len() <= capacity
    }

    /// `filtered` is exactly the matching elements of `all`, order preserved
    pub fn is_matching_subsequence(
        all: &[Event],
        filtered: &[Event],
        filter: &EventFilter,
    ) -> bool {
        let expected: Vec<&Event> = all.iter().filter(|event| filter.matches(event)).collect();
        expected.len() == filtered.len() && expected.iter().zip(filtered).all(|(a, b)| *a == b)
    }
}

fn epoch() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 6, 1, 12, 0, 0).unwrap()
}

fn engine(pool: CandidatePool, capacity: usize, seed: u64) -> FeedEngine {
    let config = SimulatorConfig::new(
        StdDuration::from_millis(100),
        StdDuration::from_millis(200),
        capacity,
        pool,
    )
    .with_seed(seed);
    FeedEngine::new(&config).expect("generated config is valid")
}

/// Tick once per step and return the generated events, oldest first
fn drive(engine: &mut FeedEngine, steps: &[i64]) -> Vec<Event> {
    let mut now = epoch();
    steps
        .iter()
        .map(|step| {
            now += Duration::seconds(*step);
            engine.tick_at(now)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    proptest! {
        #[test]
        fn prop_length_never_exceeds_capacity(
            capacity in generators::capacity(),
            steps in generators::clock_steps(),
            pool in generators::pool(),
            seed in any::<u64>(),
        ) {
            let mut engine = engine(pool, capacity, seed);
            let generated = drive(&mut engine, &steps);
            let events = engine.current_events(&EventFilter::All);

            prop_assert!(FeedInvariants::within_capacity(&events, capacity));
            prop_assert_eq!(events.len(), generated.len().min(capacity));
            prop_assert_eq!(engine.tick_count(), generated.len() as u64);
        }

        #[test]
        fn prop_buffer_holds_the_newest_events_in_order(
            capacity in generators::capacity(),
            steps in generators::clock_steps(),
            seed in any::<u64>(),
        ) {
            let mut engine = engine(CandidatePool::live_activity(), capacity, seed);
            let generated = drive(&mut engine, &steps);
            let events = engine.current_events(&EventFilter::All);

            let expected: Vec<Event> = generated.iter().rev().take(capacity).cloned().collect();
            prop_assert_eq!(events, expected);
        }

        #[test]
        fn prop_timestamps_are_newest_first(
            steps in generators::clock_steps(),
            pool in generators::pool(),
            seed in any::<u64>(),
        ) {
            let mut engine = engine(pool, 32, seed);
            drive(&mut engine, &steps);
            prop_assert!(FeedInvariants::newest_first(&engine.current_events(&EventFilter::All)));
        }

        #[test]
        fn prop_filtered_view_is_matching_subsequence(
            capacity in generators::capacity(),
            steps in generators::clock_steps(),
            pool in generators::pool(),
            filter in generators::filter(),
            seed in any::<u64>(),
        ) {
            let mut engine = engine(pool, capacity, seed);
            drive(&mut engine, &steps);

            let all = engine.current_events(&EventFilter::All);
            let filtered = engine.current_events(&filter);
            prop_assert!(FeedInvariants::is_matching_subsequence(&all, &filtered, &filter));
        }

        #[test]
        fn prop_events_come_from_the_pool(
            steps in generators::clock_steps(),
            pool in generators::pool(),
            seed in any::<u64>(),
        ) {
            let mut engine = engine(pool.clone(), 32, seed);
            let kind = engine.kind();

            for event in drive(&mut engine, &steps) {
                prop_assert!(pool.categories.contains(&event.category));
                prop_assert!(pool.sources.contains(&event.source));
                prop_assert_eq!(event.feed_kind(), kind);
                prop_assert!(pool
                    .headlines_for(event.category)
                    .iter()
                    .any(|h| h.title == event.title && h.message == event.message));
            }
        }

        #[test]
        fn prop_sampled_delay_stays_within_bounds(
            (min_us, max_us) in generators::interval_us(),
            seed in any::<u64>(),
        ) {
            let config = SimulatorConfig::new(
                StdDuration::from_micros(min_us),
                StdDuration::from_micros(max_us),
                1,
                CandidatePool::live_activity(),
            )
            .with_seed(seed);
            let mut engine = FeedEngine::new(&config).expect("min <= max");

            for _ in 0..20 {
                let delay = engine.next_delay();
                prop_assert!(delay >= config.min_interval);
                if config.min_interval < config.max_interval {
                    prop_assert!(delay < config.max_interval);
                } else {
                    prop_assert_eq!(delay, config.min_interval);
                }
            }
        }
    }
}
