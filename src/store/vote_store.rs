//! Ballot collection: the source of truth for tallies.

use std::collections::{BTreeMap, HashMap};

use crate::domain::{PostId, Tally, UserId, VoteRecord};
use crate::error::BoardError;

/// Per-post ballot collections keyed by voter uid.
///
/// Using the uid as the record key is what enforces at most one ballot
/// per `(post_id, user_id)` pair. Records are immutable once inserted;
/// the only removal path is purging the whole post.
#[derive(Debug, Default)]
pub struct VoteStore {
    ballots: HashMap<PostId, BTreeMap<UserId, VoteRecord>>,
}

impl VoteStore {
    /// Creates an empty ballot collection.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns `true` if the user already holds a ballot on the post.
    #[must_use]
    pub fn has_voted(&self, post_id: PostId, user_id: &UserId) -> bool {
        self.ballots
            .get(&post_id)
            .is_some_and(|votes| votes.contains_key(user_id))
    }

    /// Inserts a ballot.
    ///
    /// # Errors
    ///
    /// Returns [`BoardError::AlreadyVoted`] if a record for the
    /// `(post_id, user_id)` pair already exists.
    pub fn insert(&mut self, record: VoteRecord) -> Result<(), BoardError> {
        let votes = self.ballots.entry(record.post_id).or_default();
        if votes.contains_key(&record.user_id) {
            return Err(BoardError::AlreadyVoted(record.post_id));
        }
        votes.insert(record.user_id.clone(), record);
        Ok(())
    }

    /// Recomputes the tally for a post by scanning all of its ballots.
    ///
    /// Used only by the reconciliation sweep; the hot read path uses the
    /// denormalized tally on the post itself.
    #[must_use]
    pub fn tally_for(&self, post_id: PostId) -> Tally {
        let mut tally = Tally::default();
        if let Some(votes) = self.ballots.get(&post_id) {
            for record in votes.values() {
                tally.record(record.kind);
            }
        }
        tally
    }

    /// Drops all ballots for a purged post.
    pub fn remove_post(&mut self, post_id: PostId) {
        self.ballots.remove(&post_id);
    }

    /// Returns the ballot a user cast on a post, if any.
    #[must_use]
    pub fn get(&self, post_id: PostId, user_id: &UserId) -> Option<&VoteRecord> {
        self.ballots.get(&post_id).and_then(|v| v.get(user_id))
    }
}
