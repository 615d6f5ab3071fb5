//! Identifiers for feed events
//!
//! Event ids are newtypes around UUID v7 so that ids generated later also
//! sort later, which keeps rendering keys stable and roughly time-ordered.

use nutype::nutype;
use uuid::Uuid;

/// Unique identifier for a single feed event
#[nutype(derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    Display,
    AsRef
))]
pub struct EventId(Uuid);

impl EventId {
    pub fn generate() -> Self {
        Self::new(Uuid::now_v7())
    }
}

impl Default for EventId {
    fn default() -> Self {
        Self::generate()
    }
}
