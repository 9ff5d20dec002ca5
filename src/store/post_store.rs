//! Proposal collection: lifecycle state and denormalized tallies.

use std::collections::HashMap;

use chrono::{DateTime, Utc};

use crate::domain::{Post, PostId, PostStatus, Tally, UserId, VoteKind};
use crate::error::BoardError;

/// Collection of [`Post`] records keyed by [`PostId`].
///
/// Mutated only under the [`super::BoardStore`] write guard. The tally
/// fields have exactly two writer paths: the vote transaction and the
/// reconciliation sweep's [`Self::apply_tally`].
#[derive(Debug, Default)]
pub struct PostStore {
    posts: HashMap<PostId, Post>,
}

impl PostStore {
    /// Creates an empty post collection.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a freshly created pending post.
    pub fn insert(&mut self, post: Post) {
        self.posts.insert(post.id, post);
    }

    /// Returns a reference to a post.
    #[must_use]
    pub fn get(&self, post_id: PostId) -> Option<&Post> {
        self.posts.get(&post_id)
    }

    /// Marks a pending post approved, recording approver and timestamp.
    ///
    /// # Errors
    ///
    /// Returns [`BoardError::PostNotFound`] if the post does not exist and
    /// [`BoardError::NotPending`] if it was already moderated; moderation
    /// transitions happen exactly once.
    pub fn approve(
        &mut self,
        post_id: PostId,
        admin: &UserId,
        now: DateTime<Utc>,
    ) -> Result<Post, BoardError> {
        let post = self
            .posts
            .get_mut(&post_id)
            .ok_or(BoardError::PostNotFound(post_id))?;
        if !post.is_pending() {
            return Err(BoardError::NotPending(post_id));
        }
        post.status = PostStatus::Approved;
        post.approved_at = Some(now);
        post.approved_by = Some(admin.clone());
        Ok(post.clone())
    }

    /// Marks a pending post rejected, recording rejecter, timestamp, and
    /// the optional reason (empty string when omitted).
    ///
    /// # Errors
    ///
    /// Returns [`BoardError::PostNotFound`] if the post does not exist and
    /// [`BoardError::NotPending`] if it was already moderated.
    pub fn reject(
        &mut self,
        post_id: PostId,
        admin: &UserId,
        reason: String,
        now: DateTime<Utc>,
    ) -> Result<Post, BoardError> {
        let post = self
            .posts
            .get_mut(&post_id)
            .ok_or(BoardError::PostNotFound(post_id))?;
        if !post.is_pending() {
            return Err(BoardError::NotPending(post_id));
        }
        post.status = PostStatus::Rejected;
        post.rejected_at = Some(now);
        post.rejected_by = Some(admin.clone());
        post.rejection_reason = Some(reason);
        Ok(post.clone())
    }

    /// Returns clones of all posts with the given status, unsorted.
    ///
    /// Callers sort in memory; see [`crate::domain::sort`].
    #[must_use]
    pub fn list_by_status(&self, status: PostStatus) -> Vec<Post> {
        self.posts
            .values()
            .filter(|p| p.status == status)
            .cloned()
            .collect()
    }

    /// Increments one tally counter on an approved post.
    ///
    /// # Errors
    ///
    /// Returns [`BoardError::PostNotFound`] if the post does not exist.
    pub fn record_vote(&mut self, post_id: PostId, kind: VoteKind) -> Result<Tally, BoardError> {
        let post = self
            .posts
            .get_mut(&post_id)
            .ok_or(BoardError::PostNotFound(post_id))?;
        post.tally.record(kind);
        Ok(post.tally)
    }

    /// Overwrites a post's tally with a recomputed value.
    ///
    /// Reconciliation-only writer path.
    ///
    /// # Errors
    ///
    /// Returns [`BoardError::PostNotFound`] if the post does not exist.
    pub fn apply_tally(&mut self, post_id: PostId, tally: Tally) -> Result<(), BoardError> {
        let post = self
            .posts
            .get_mut(&post_id)
            .ok_or(BoardError::PostNotFound(post_id))?;
        post.tally = tally;
        Ok(())
    }

    /// Removes up to `limit` rejected posts whose rejection timestamp is
    /// older than `cutoff`, returning the removed ids.
    pub fn take_rejected_older_than(
        &mut self,
        cutoff: DateTime<Utc>,
        limit: usize,
    ) -> Vec<PostId> {
        let expired: Vec<PostId> = self
            .posts
            .values()
            .filter(|p| {
                p.status == PostStatus::Rejected
                    && p.rejected_at.is_some_and(|rejected| rejected < cutoff)
            })
            .map(|p| p.id)
            .take(limit)
            .collect();
        for id in &expired {
            self.posts.remove(id);
        }
        expired
    }

    /// Returns the ids of all approved posts.
    #[must_use]
    pub fn approved_ids(&self) -> Vec<PostId> {
        self.posts
            .values()
            .filter(|p| p.status == PostStatus::Approved)
            .map(|p| p.id)
            .collect()
    }
}
