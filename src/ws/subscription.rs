//! Per-connection subscription manager.
//!
//! Tracks which posts a WebSocket client is watching and provides
//! server-side event filtering. Dropping the connection drops the
//! manager, which is the only cancellation path a client needs.

use std::collections::HashSet;

use crate::domain::PostId;

/// Manages the set of post subscriptions for a single WebSocket connection.
#[derive(Debug, Default)]
pub struct SubscriptionManager {
    /// Subscribed post IDs. If `subscribe_all` is true, this set is ignored.
    post_ids: HashSet<PostId>,
    /// Whether the client watches the whole board (wildcard `"*"`).
    subscribe_all: bool,
}

impl SubscriptionManager {
    /// Creates a new empty subscription manager.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds post IDs to the subscription set. `"*"` enables the wildcard.
    pub fn subscribe(&mut self, ids: &[PostId], wildcard: bool) {
        if wildcard {
            self.subscribe_all = true;
        }
        for id in ids {
            self.post_ids.insert(*id);
        }
    }

    /// Removes post IDs from the subscription set.
    pub fn unsubscribe(&mut self, ids: &[PostId]) {
        for id in ids {
            self.post_ids.remove(id);
        }
    }

    /// Returns `true` if the given post ID matches the subscription filter.
    #[must_use]
    pub fn matches(&self, post_id: PostId) -> bool {
        self.subscribe_all || self.post_ids.contains(&post_id)
    }

    /// Returns the number of explicitly subscribed post IDs.
    #[must_use]
    pub fn count(&self) -> usize {
        self.post_ids.len()
    }

    /// Returns `true` if the wildcard subscription is active.
    #[must_use]
    pub fn is_subscribed_all(&self) -> bool {
        self.subscribe_all
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;

    #[test]
    fn empty_matches_nothing() {
        let mgr = SubscriptionManager::new();
        assert!(!mgr.matches(PostId::new()));
    }

    #[test]
    fn subscribe_specific_post() {
        let mut mgr = SubscriptionManager::new();
        let id = PostId::new();
        mgr.subscribe(&[id], false);
        assert!(mgr.matches(id));
        assert!(!mgr.matches(PostId::new()));
    }

    #[test]
    fn wildcard_matches_everything() {
        let mut mgr = SubscriptionManager::new();
        mgr.subscribe(&[], true);
        assert!(mgr.matches(PostId::new()));
        assert!(mgr.matches(PostId::new()));
    }

    #[test]
    fn unsubscribe_removes_post() {
        let mut mgr = SubscriptionManager::new();
        let id = PostId::new();
        mgr.subscribe(&[id], false);
        assert!(mgr.matches(id));
        mgr.unsubscribe(&[id]);
        assert!(!mgr.matches(id));
    }

    #[test]
    fn count_tracks_explicit() {
        let mut mgr = SubscriptionManager::new();
        assert_eq!(mgr.count(), 0);
        mgr.subscribe(&[PostId::new(), PostId::new()], false);
        assert_eq!(mgr.count(), 2);
    }
}
