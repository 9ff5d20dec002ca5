//! Append-only login-history audit log.

use chrono::{DateTime, Utc};

use crate::domain::LoginHistoryEntry;

/// Append-only log of successful authentications.
///
/// Same retention pattern as rejected posts, on a shorter window
/// (default 7 days). Mutated only under the [`super::BoardStore`] write
/// guard.
#[derive(Debug, Default)]
pub struct LoginLog {
    entries: Vec<LoginHistoryEntry>,
}

impl LoginLog {
    /// Creates an empty log.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends one entry.
    pub fn append(&mut self, entry: LoginHistoryEntry) {
        self.entries.push(entry);
    }

    /// Removes up to `limit` entries older than `cutoff`, returning how
    /// many were removed.
    pub fn purge_older_than(&mut self, cutoff: DateTime<Utc>, limit: usize) -> usize {
        let mut removed = 0;
        self.entries.retain(|entry| {
            if removed < limit && entry.logged_in_at < cutoff {
                removed += 1;
                false
            } else {
                true
            }
        });
        removed
    }

    /// Returns the number of retained entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if the log holds no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
