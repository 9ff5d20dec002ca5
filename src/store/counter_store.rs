//! Per-day counter collection backing quota enforcement.

use std::collections::HashMap;

use chrono::{DateTime, Utc};

use crate::domain::{DailyCounter, DayKey};

/// Collection of [`DailyCounter`] records keyed by calendar date.
///
/// Holds no lock of its own: every mutation runs inside the single
/// [`super::BoardStore`] write guard, which is what keeps the quota check
/// and the increment atomic. There is no decrement and no delete; a
/// counter only ever grows within its day.
#[derive(Debug, Default)]
pub struct CounterStore {
    counters: HashMap<DayKey, DailyCounter>,
}

impl CounterStore {
    /// Creates an empty counter collection.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Reads the counter for a day. An absent record reads as all-zero.
    #[must_use]
    pub fn get(&self, day: DayKey) -> DailyCounter {
        self.counters.get(&day).copied().unwrap_or_default()
    }

    /// Increments the post count for a day, creating the record if absent.
    pub fn increment_posts(&mut self, day: DayKey, now: DateTime<Utc>) {
        let counter = self.counters.entry(day).or_default();
        counter.post_count = counter.post_count.saturating_add(1);
        counter.last_updated = Some(now);
    }

    /// Increments the vote count for a day, creating the record if absent.
    pub fn increment_votes(&mut self, day: DayKey, now: DateTime<Utc>) {
        let counter = self.counters.entry(day).or_default();
        counter.vote_count = counter.vote_count.saturating_add(1);
        counter.last_updated = Some(now);
    }
}
