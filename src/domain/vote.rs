//! Ballot types: vote kinds and immutable vote records.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{PostId, UserId};

/// The three ballot options a user may cast on a proposal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VoteKind {
    /// In favor of the proposal.
    Agree,
    /// Neither for nor against.
    Neutral,
    /// Against the proposal.
    Disagree,
}

impl VoteKind {
    /// Returns the kind as a static string slice.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Agree => "agree",
            Self::Neutral => "neutral",
            Self::Disagree => "disagree",
        }
    }
}

impl std::fmt::Display for VoteKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A single ballot, keyed by `(post_id, user_id)`.
///
/// The source of truth for tallies. Immutable once created: there is no
/// update or delete path in normal flow, which is what makes the
/// one-vote-per-user invariant meaningful for the lifetime of the post.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VoteRecord {
    /// The post this ballot belongs to.
    pub post_id: PostId,
    /// The voter.
    pub user_id: UserId,
    /// The option chosen.
    pub kind: VoteKind,
    /// When the ballot was cast.
    pub created_at: DateTime<Utc>,
}
