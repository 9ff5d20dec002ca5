//! Proposal posts: lifecycle status, moderation fields, and tallies.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{PostId, UserId, VoteKind};

/// Moderation lifecycle state of a post.
///
/// Created `pending`; transitions to `approved` or `rejected` exactly once
/// by an admin action. Rejected posts are purged after the retention
/// window; approved posts are permanent until manually removed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PostStatus {
    /// Awaiting moderation.
    Pending,
    /// Visible on the board and open for voting.
    Approved,
    /// Declined; retained only for the configured window.
    Rejected,
}

impl PostStatus {
    /// Returns the status as a static string slice.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Approved => "approved",
            Self::Rejected => "rejected",
        }
    }
}

/// Denormalized per-post vote counts.
///
/// Fast-read copy of the ballot records. Must eventually equal the counts
/// recomputed from the vote store; the reconciliation sweep repairs drift.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tally {
    /// Count of `agree` ballots.
    pub agree: u32,
    /// Count of `neutral` ballots.
    pub neutral: u32,
    /// Count of `disagree` ballots.
    pub disagree: u32,
}

impl Tally {
    /// Increments the counter for the given kind by one.
    pub fn record(&mut self, kind: VoteKind) {
        match kind {
            VoteKind::Agree => self.agree = self.agree.saturating_add(1),
            VoteKind::Neutral => self.neutral = self.neutral.saturating_add(1),
            VoteKind::Disagree => self.disagree = self.disagree.saturating_add(1),
        }
    }
}

/// A user-submitted proposal subject to moderation and voting.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Post {
    /// Unique identifier (immutable after creation).
    pub id: PostId,
    /// Proposal title, non-empty after trimming.
    pub title: String,
    /// Proposal body, non-empty after trimming.
    pub content: String,
    /// Identity-provider uid of the author.
    pub author_id: UserId,
    /// Display name shown on the board.
    pub author_name: String,
    /// Moderation lifecycle state.
    pub status: PostStatus,
    /// Server-assigned creation timestamp.
    pub created_at: DateTime<Utc>,
    /// When the post was approved, if it was.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub approved_at: Option<DateTime<Utc>>,
    /// Admin who approved the post.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub approved_by: Option<UserId>,
    /// When the post was rejected, if it was. Mutually exclusive with the
    /// approval fields.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rejected_at: Option<DateTime<Utc>>,
    /// Admin who rejected the post.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rejected_by: Option<UserId>,
    /// Optional reason supplied on rejection; empty string when omitted.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rejection_reason: Option<String>,
    /// Denormalized vote counts.
    pub tally: Tally,
}

impl Post {
    /// Creates a new pending post with zeroed tallies.
    #[must_use]
    pub fn new_pending(
        title: String,
        content: String,
        author_id: UserId,
        author_name: String,
    ) -> Self {
        Self {
            id: PostId::new(),
            title,
            content,
            author_id,
            author_name,
            status: PostStatus::Pending,
            created_at: Utc::now(),
            approved_at: None,
            approved_by: None,
            rejected_at: None,
            rejected_by: None,
            rejection_reason: None,
            tally: Tally::default(),
        }
    }

    /// Returns `true` if the post is still awaiting moderation.
    #[must_use]
    pub fn is_pending(&self) -> bool {
        self.status == PostStatus::Pending
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;

    fn make_post() -> Post {
        Post::new_pending(
            "Longer lunch breaks".to_string(),
            "Extend lunch by 15 minutes.".to_string(),
            UserId::new("u1"),
            "taro".to_string(),
        )
    }

    #[test]
    fn new_posts_are_pending_with_zero_tally() {
        let post = make_post();
        assert_eq!(post.status, PostStatus::Pending);
        assert!(post.is_pending());
        assert_eq!(post.tally, Tally::default());
        assert!(post.approved_at.is_none());
        assert!(post.rejected_at.is_none());
    }

    #[test]
    fn tally_record_increments_only_the_kind() {
        let mut tally = Tally::default();
        tally.record(VoteKind::Agree);
        tally.record(VoteKind::Agree);
        tally.record(VoteKind::Disagree);
        assert_eq!(tally.agree, 2);
        assert_eq!(tally.neutral, 0);
        assert_eq!(tally.disagree, 1);
    }

    #[test]
    fn status_serializes_snake_case() {
        let json = serde_json::to_string(&PostStatus::Approved).ok();
        assert_eq!(json.as_deref(), Some("\"approved\""));
    }
}
