//! Domain events reflecting board state mutations.
//!
//! Every state change emits a [`BoardEvent`] through the [`super::EventBus`].
//! Events are broadcast to WebSocket subscribers and optionally persisted
//! to the PostgreSQL event log.

use chrono::{DateTime, Utc};
use serde::Serialize;

use super::{PostId, Tally, UserId, VoteKind};

/// Domain event emitted after every state mutation.
///
/// Vote-bearing events carry the tally resulting from the mutation, so a
/// subscriber can replace its rendered counts wholesale instead of
/// accumulating deltas.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "event_type", rename_all = "snake_case")]
pub enum BoardEvent {
    /// Emitted when a new proposal enters the pending queue.
    PostSubmitted {
        /// Post identifier.
        post_id: PostId,
        /// Author's uid.
        author_id: UserId,
        /// Proposal title.
        title: String,
        /// Submission timestamp.
        timestamp: DateTime<Utc>,
    },

    /// Emitted when an admin approves a pending post.
    PostApproved {
        /// Post identifier.
        post_id: PostId,
        /// Approving admin.
        approved_by: UserId,
        /// Approval timestamp.
        timestamp: DateTime<Utc>,
    },

    /// Emitted when an admin rejects a pending post.
    PostRejected {
        /// Post identifier.
        post_id: PostId,
        /// Rejecting admin.
        rejected_by: UserId,
        /// Reason string, empty when omitted.
        reason: String,
        /// Rejection timestamp.
        timestamp: DateTime<Utc>,
    },

    /// Emitted after a successful vote transaction.
    VoteCast {
        /// Post identifier.
        post_id: PostId,
        /// Voter's uid.
        user_id: UserId,
        /// The ballot option chosen.
        kind: VoteKind,
        /// Tally after the increment.
        tally: Tally,
        /// Vote timestamp.
        timestamp: DateTime<Utc>,
    },

    /// Emitted when the reconciliation sweep corrects tally drift.
    TallyRepaired {
        /// Post identifier.
        post_id: PostId,
        /// Tally recomputed from the ballot records.
        tally: Tally,
        /// Repair timestamp.
        timestamp: DateTime<Utc>,
    },

    /// Emitted when the retention sweep deletes an expired rejected post.
    PostPurged {
        /// Post identifier.
        post_id: PostId,
        /// Purge timestamp.
        timestamp: DateTime<Utc>,
    },
}

impl BoardEvent {
    /// Returns the post ID associated with this event.
    #[must_use]
    pub fn post_id(&self) -> PostId {
        match self {
            Self::PostSubmitted { post_id, .. }
            | Self::PostApproved { post_id, .. }
            | Self::PostRejected { post_id, .. }
            | Self::VoteCast { post_id, .. }
            | Self::TallyRepaired { post_id, .. }
            | Self::PostPurged { post_id, .. } => *post_id,
        }
    }

    /// Returns the event type as a static string slice.
    #[must_use]
    pub const fn event_type_str(&self) -> &'static str {
        match self {
            Self::PostSubmitted { .. } => "post_submitted",
            Self::PostApproved { .. } => "post_approved",
            Self::PostRejected { .. } => "post_rejected",
            Self::VoteCast { .. } => "vote_cast",
            Self::TallyRepaired { .. } => "tally_repaired",
            Self::PostPurged { .. } => "post_purged",
        }
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;

    #[test]
    fn vote_cast_serializes_with_tally() {
        let event = BoardEvent::VoteCast {
            post_id: PostId::new(),
            user_id: UserId::new("u1"),
            kind: VoteKind::Agree,
            tally: Tally {
                agree: 1,
                neutral: 0,
                disagree: 0,
            },
            timestamp: Utc::now(),
        };
        let json = serde_json::to_string(&event).unwrap_or_default();
        assert!(json.contains("vote_cast"));
        assert!(json.contains("\"agree\":1"));
    }

    #[test]
    fn post_id_accessor_covers_all_variants() {
        let id = PostId::new();
        let event = BoardEvent::PostPurged {
            post_id: id,
            timestamp: Utc::now(),
        };
        assert_eq!(event.post_id(), id);
        assert_eq!(event.event_type_str(), "post_purged");
    }
}
