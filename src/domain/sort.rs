//! Board-view sort orders for approved posts.
//!
//! Sorting always runs in memory over the full result set. The backing
//! store's native ordering cannot express the tie-break chains, so the
//! listing path never relies on it.

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

use super::Post;

/// Selectable sort key for the approved-posts listing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortOrder {
    /// Most recent first.
    #[default]
    Newest,
    /// Oldest first.
    Oldest,
    /// Most `agree` first; ties broken by `neutral`, then `disagree`,
    /// then recency.
    Popular,
    /// Most `disagree` first; ties broken by `neutral`, then `agree`,
    /// then recency.
    Controversial,
}

impl SortOrder {
    /// Compares two posts under this order.
    #[must_use]
    pub fn compare(&self, a: &Post, b: &Post) -> Ordering {
        match self {
            Self::Newest => b.created_at.cmp(&a.created_at),
            Self::Oldest => a.created_at.cmp(&b.created_at),
            Self::Popular => b
                .tally
                .agree
                .cmp(&a.tally.agree)
                .then(b.tally.neutral.cmp(&a.tally.neutral))
                .then(b.tally.disagree.cmp(&a.tally.disagree))
                .then(b.created_at.cmp(&a.created_at)),
            Self::Controversial => b
                .tally
                .disagree
                .cmp(&a.tally.disagree)
                .then(b.tally.neutral.cmp(&a.tally.neutral))
                .then(b.tally.agree.cmp(&a.tally.agree))
                .then(b.created_at.cmp(&a.created_at)),
        }
    }
}

/// Sorts posts in place under the given order.
pub fn sort_posts(posts: &mut [Post], order: SortOrder) {
    posts.sort_by(|a, b| order.compare(a, b));
}
