//! Property-based tests for feed invariants
//!
//! Generators for feed configurations and tick schedules, plus the
//! invariants every buffer snapshot must satisfy.

pub mod feed_invariants;
