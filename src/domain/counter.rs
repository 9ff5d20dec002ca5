//! Daily aggregate counters backing quota enforcement.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::DayKey;

/// Per-day aggregate record tracking board-wide usage.
///
/// Created implicitly on first increment each day; never deleted; mutated
/// only from inside a transactional operation so the quota check and the
/// increment are atomic. An absent counter reads as all-zero.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DailyCounter {
    /// Posts created today.
    pub post_count: u32,
    /// Votes cast today.
    pub vote_count: u32,
    /// Timestamp of the most recent increment.
    pub last_updated: Option<DateTime<Utc>>,
}

/// Snapshot of today's usage against the configured limits.
#[derive(Debug, Clone, Serialize)]
pub struct DailyUsage {
    /// The counter day.
    pub day: DayKey,
    /// Posts created.
    pub post_count: u32,
    /// Configured daily post cap.
    pub post_limit: u32,
    /// Votes cast.
    pub vote_count: u32,
    /// Configured daily vote cap.
    pub vote_limit: u32,
    /// Timestamp of the most recent increment, if any.
    pub last_updated: Option<DateTime<Utc>>,
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;

    #[test]
    fn absent_counter_reads_as_zero() {
        let counter = DailyCounter::default();
        assert_eq!(counter.post_count, 0);
        assert_eq!(counter.vote_count, 0);
        assert!(counter.last_updated.is_none());
    }
}
