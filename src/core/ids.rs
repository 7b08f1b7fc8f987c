//! Idea id generation.
//!
//! Ids are decimal millisecond timestamps, matching what older snapshots
//! contain, but bumped by one whenever the clock hasn't advanced past the
//! last id handed out. That keeps them unique and increasing within a
//! process even for submissions in the same millisecond.

use crate::models::IdeaId;
use chrono::{DateTime, Utc};

#[derive(Debug, Clone, Default)]
pub struct IdGenerator {
    last: u64,
}

impl IdGenerator {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns an id strictly greater than every id previously returned or observed.
    pub fn next_id(&mut self, now: DateTime<Utc>) -> IdeaId {
        let millis = u64::try_from(now.timestamp_millis()).unwrap_or(0);
        let next = millis.max(self.last.saturating_add(1));
        self.last = next;
        IdeaId::new(next.to_string())
    }

    /// Records an existing id so later ids sort after it. Non-numeric ids are ignored.
    pub fn observe(&mut self, id: &IdeaId) {
        if let Ok(value) = id.as_str().parse::<u64>() {
            self.last = self.last.max(value);
        }
    }
}
