//! Bounded, newest-first event buffer

use crate::domain::Event;
use crate::feed::filter::EventFilter;
use nutype::nutype;
use std::collections::VecDeque;

/// Maximum number of events a feed keeps
#[nutype(
    validate(predicate = |capacity| *capacity > 0),
    derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Display, AsRef, TryFrom)
)]
pub struct FeedCapacity(usize);

/// Newest-first sequence of events with FIFO eviction at capacity
#[derive(Debug, Clone)]
pub struct FeedBuffer {
    // Head (index 0) is the newest event
    events: VecDeque<Event>,
    capacity: FeedCapacity,
    evicted: u64,
}

impl FeedBuffer {
    pub fn new(capacity: FeedCapacity) -> Self {
        Self {
            events: VecDeque::with_capacity(*capacity.as_ref()),
            capacity,
            evicted: 0,
        }
    }

    /// Insert a new event at the head, returning the evicted tail if full
    pub fn push(&mut self, event: Event) -> Option<Event> {
        self.events.push_front(event);
        if self.events.len() > *self.capacity.as_ref() {
            self.evicted += 1;
            self.events.pop_back()
        } else {
            None
        }
    }

    pub fn head(&self) -> Option<&Event> {
        self.events.front()
    }

    pub fn tail(&self) -> Option<&Event> {
        self.events.back()
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn capacity(&self) -> FeedCapacity {
        self.capacity
    }

    /// Number of events dropped from the tail since creation
    pub fn evicted_count(&self) -> u64 {
        self.evicted
    }

    /// Iterate newest first
    pub fn iter(&self) -> impl Iterator<Item = &Event> {
        self.events.iter()
    }

    /// Owned copy of the events matching `filter`, newest first
    pub fn snapshot(&self, filter: &EventFilter) -> Vec<Event> {
        self.events
            .iter()
            .filter(|event| filter.matches(event))
            .cloned()
            .collect()
    }
}
