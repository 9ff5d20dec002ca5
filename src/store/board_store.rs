//! Serializable in-memory document store for the whole board.
//!
//! [`BoardStore`] wraps every collection behind one
//! [`tokio::sync::RwLock`]. A transactional operation takes the write
//! guard once and performs its entire read-check-write sequence inside
//! it, which gives the serializable, no-lost-update semantics the quota
//! and uniqueness invariants require: the counter value any committed
//! transaction observed reflects all previously committed increments.

use chrono::{DateTime, Utc};
use tokio::sync::RwLock;

use super::counter_store::CounterStore;
use super::login_log::LoginLog;
use super::post_store::PostStore;
use super::vote_store::VoteStore;
use crate::domain::{
    DailyCounter, DayKey, LoginHistoryEntry, Post, PostId, PostStatus, Tally, UserId, VoteKind,
    VoteRecord,
};
use crate::error::{BoardError, QuotaKind};

/// All mutable board state. Only ever touched under the store's lock.
#[derive(Debug, Default)]
struct BoardState {
    counters: CounterStore,
    posts: PostStore,
    votes: VoteStore,
    logins: LoginLog,
}

/// Central durable-store stand-in for counters, posts, ballots, and the
/// login log.
///
/// # Concurrency
///
/// - Reads share the lock and run concurrently.
/// - Transactional operations serialize on the write guard; two
///   concurrent `cast_vote` calls for the same `(post, user)` commit at
///   most one ballot, and concurrent `create_post` calls never lose a
///   counter update.
#[derive(Debug, Default)]
pub struct BoardStore {
    state: RwLock<BoardState>,
}

impl BoardStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Transactional post creation:
    /// `check daily post quota → increment counter → insert pending post`.
    ///
    /// Input validation happens in the service layer before this call so
    /// invalid input never consumes quota.
    ///
    /// # Errors
    ///
    /// Returns [`BoardError::QuotaExceeded`] when the day's post counter
    /// is at or above `limit`; the transaction then has no side effects.
    pub async fn create_post(
        &self,
        title: String,
        content: String,
        author_id: UserId,
        author_name: String,
        day: DayKey,
        limit: u32,
    ) -> Result<Post, BoardError> {
        let mut state = self.state.write().await;

        if state.counters.get(day).post_count >= limit {
            return Err(BoardError::QuotaExceeded {
                kind: QuotaKind::Posts,
                limit,
            });
        }

        state.counters.increment_posts(day, Utc::now());
        let post = Post::new_pending(title, content, author_id, author_name);
        state.posts.insert(post.clone());
        Ok(post)
    }

    /// Transactional vote cast:
    /// `check existing vote → check daily vote quota → increment vote
    /// counter → insert vote record → increment post tally`.
    ///
    /// # Errors
    ///
    /// - [`BoardError::PostNotFound`] if the post does not exist.
    /// - [`BoardError::Validation`] if the post is not approved; voting
    ///   is only open on the public board.
    /// - [`BoardError::AlreadyVoted`] if the user already holds a ballot.
    /// - [`BoardError::QuotaExceeded`] when the day's vote counter is at
    ///   or above `limit`.
    ///
    /// On any error the transaction has no side effects.
    pub async fn cast_vote(
        &self,
        post_id: PostId,
        user_id: UserId,
        kind: VoteKind,
        day: DayKey,
        limit: u32,
    ) -> Result<(VoteRecord, Tally), BoardError> {
        let mut state = self.state.write().await;

        let post = state
            .posts
            .get(post_id)
            .ok_or(BoardError::PostNotFound(post_id))?;
        if post.status != PostStatus::Approved {
            return Err(BoardError::Validation(
                "voting is only open for approved posts".to_string(),
            ));
        }

        if state.votes.has_voted(post_id, &user_id) {
            return Err(BoardError::AlreadyVoted(post_id));
        }

        if state.counters.get(day).vote_count >= limit {
            return Err(BoardError::QuotaExceeded {
                kind: QuotaKind::Votes,
                limit,
            });
        }

        let now = Utc::now();
        state.counters.increment_votes(day, now);

        let record = VoteRecord {
            post_id,
            user_id,
            kind,
            created_at: now,
        };
        state.votes.insert(record.clone())?;
        let tally = state.posts.record_vote(post_id, kind)?;

        Ok((record, tally))
    }

    /// Marks a pending post approved.
    ///
    /// # Errors
    ///
    /// See [`PostStore::approve`].
    pub async fn approve_post(&self, post_id: PostId, admin: &UserId) -> Result<Post, BoardError> {
        let mut state = self.state.write().await;
        state.posts.approve(post_id, admin, Utc::now())
    }

    /// Marks a pending post rejected.
    ///
    /// # Errors
    ///
    /// See [`PostStore::reject`].
    pub async fn reject_post(
        &self,
        post_id: PostId,
        admin: &UserId,
        reason: String,
    ) -> Result<Post, BoardError> {
        let mut state = self.state.write().await;
        state.posts.reject(post_id, admin, reason, Utc::now())
    }

    /// Returns a clone of a post.
    ///
    /// # Errors
    ///
    /// Returns [`BoardError::PostNotFound`] if the post does not exist.
    pub async fn get_post(&self, post_id: PostId) -> Result<Post, BoardError> {
        let state = self.state.read().await;
        state
            .posts
            .get(post_id)
            .cloned()
            .ok_or(BoardError::PostNotFound(post_id))
    }

    /// Returns clones of all posts with the given status, unsorted.
    pub async fn list_by_status(&self, status: PostStatus) -> Vec<Post> {
        self.state.read().await.posts.list_by_status(status)
    }

    /// Reads the counter for a day. An absent record reads as all-zero.
    pub async fn daily_counter(&self, day: DayKey) -> DailyCounter {
        self.state.read().await.counters.get(day)
    }

    /// Returns `true` if the user already holds a ballot on the post.
    pub async fn has_voted(&self, post_id: PostId, user_id: &UserId) -> bool {
        self.state.read().await.votes.has_voted(post_id, user_id)
    }

    /// Recomputes a post's tally from its ballot records.
    pub async fn tally_from_votes(&self, post_id: PostId) -> Tally {
        self.state.read().await.votes.tally_for(post_id)
    }

    /// Returns the ids of all approved posts.
    pub async fn approved_post_ids(&self) -> Vec<PostId> {
        self.state.read().await.posts.approved_ids()
    }

    /// Atomically compares a post's stored tally against its ballots and
    /// overwrites it when they differ. Returns the corrected tally when a
    /// repair happened.
    ///
    /// # Errors
    ///
    /// Returns [`BoardError::PostNotFound`] if the post vanished between
    /// the sweep's id scan and this call (it is then skipped upstream).
    pub async fn repair_tally(&self, post_id: PostId) -> Result<Option<Tally>, BoardError> {
        let mut state = self.state.write().await;
        let stored = state
            .posts
            .get(post_id)
            .ok_or(BoardError::PostNotFound(post_id))?
            .tally;
        let actual = state.votes.tally_for(post_id);
        if stored == actual {
            return Ok(None);
        }
        state.posts.apply_tally(post_id, actual)?;
        Ok(Some(actual))
    }

    /// Overwrites a post's tally with an externally recomputed value.
    ///
    /// # Errors
    ///
    /// Returns [`BoardError::PostNotFound`] if the post does not exist.
    pub async fn apply_tally(&self, post_id: PostId, tally: Tally) -> Result<(), BoardError> {
        self.state.write().await.posts.apply_tally(post_id, tally)
    }

    /// Appends a login-history entry.
    pub async fn record_login(&self, entry: LoginHistoryEntry) {
        self.state.write().await.logins.append(entry);
    }

    /// Number of retained login-history entries.
    pub async fn login_history_len(&self) -> usize {
        self.state.read().await.logins.len()
    }

    /// Deletes one batch of expired rejected posts (and their ballots),
    /// returning the purged ids.
    pub async fn purge_rejected_batch(
        &self,
        cutoff: DateTime<Utc>,
        limit: usize,
    ) -> Vec<PostId> {
        let mut state = self.state.write().await;
        let removed = state.posts.take_rejected_older_than(cutoff, limit);
        for id in &removed {
            state.votes.remove_post(*id);
        }
        removed
    }

    /// Deletes one batch of expired login-history entries, returning how
    /// many were removed.
    pub async fn purge_login_batch(&self, cutoff: DateTime<Utc>, limit: usize) -> usize {
        self.state.write().await.logins.purge_older_than(cutoff, limit)
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;
    use std::sync::Arc;

    const POST_LIMIT: u32 = 30;
    const VOTE_LIMIT: u32 = 3000;

    async fn create_one(store: &BoardStore, day: DayKey, limit: u32) -> Result<Post, BoardError> {
        store
            .create_post(
                "title".to_string(),
                "content".to_string(),
                UserId::new("author"),
                "author".to_string(),
                day,
                limit,
            )
            .await
    }

    async fn approved_post(store: &BoardStore, day: DayKey) -> PostId {
        let Ok(post) = create_one(store, day, POST_LIMIT).await else {
            panic!("post creation failed");
        };
        let Ok(approved) = store.approve_post(post.id, &UserId::new("admin")).await else {
            panic!("approval failed");
        };
        approved.id
    }

    #[tokio::test]
    async fn create_post_increments_counter() {
        let store = BoardStore::new();
        let day = DayKey::today();
        assert!(create_one(&store, day, POST_LIMIT).await.is_ok());
        assert_eq!(store.daily_counter(day).await.post_count, 1);
    }

    #[tokio::test]
    async fn post_quota_edge_at_one_below_limit() {
        // Scenario A: counter at 29/30 admits exactly one more post.
        let store = BoardStore::new();
        let day = DayKey::today();
        for _ in 0..29 {
            let Ok(_) = create_one(&store, day, POST_LIMIT).await else {
                panic!("warm-up creation failed");
            };
        }

        assert!(create_one(&store, day, POST_LIMIT).await.is_ok());
        assert_eq!(store.daily_counter(day).await.post_count, 30);

        let over = create_one(&store, day, POST_LIMIT).await;
        assert!(matches!(
            over,
            Err(BoardError::QuotaExceeded {
                kind: QuotaKind::Posts,
                ..
            })
        ));
        assert_eq!(store.daily_counter(day).await.post_count, 30);
    }

    #[tokio::test]
    async fn concurrent_creates_never_exceed_quota() {
        let store = Arc::new(BoardStore::new());
        let day = DayKey::today();

        let mut handles = Vec::new();
        for _ in 0..40 {
            let store = Arc::clone(&store);
            handles.push(tokio::spawn(async move {
                create_one(&store, day, POST_LIMIT).await.is_ok()
            }));
        }

        let mut successes = 0;
        for handle in handles {
            if handle.await.unwrap_or(false) {
                successes += 1;
            }
        }

        assert_eq!(successes, 30);
        assert_eq!(store.daily_counter(day).await.post_count, 30);
    }

    #[tokio::test]
    async fn vote_then_revote_leaves_counters_unchanged() {
        // Scenario B.
        let store = BoardStore::new();
        let day = DayKey::today();
        let post_id = approved_post(&store, day).await;
        let user = UserId::new("u1");

        let first = store
            .cast_vote(post_id, user.clone(), VoteKind::Agree, day, VOTE_LIMIT)
            .await;
        let Ok((_, tally)) = first else {
            panic!("first vote failed");
        };
        assert_eq!(tally.agree, 1);
        assert_eq!(store.daily_counter(day).await.vote_count, 1);

        let second = store
            .cast_vote(post_id, user.clone(), VoteKind::Disagree, day, VOTE_LIMIT)
            .await;
        assert!(matches!(second, Err(BoardError::AlreadyVoted(_))));

        // No side effects from the failed attempt.
        assert_eq!(store.daily_counter(day).await.vote_count, 1);
        let Ok(post) = store.get_post(post_id).await else {
            panic!("post lookup failed");
        };
        assert_eq!(post.tally.agree, 1);
        assert_eq!(post.tally.disagree, 0);
    }

    #[tokio::test]
    async fn concurrent_votes_from_same_user_commit_once() {
        let store = Arc::new(BoardStore::new());
        let day = DayKey::today();
        let post_id = approved_post(&store, day).await;

        let mut handles = Vec::new();
        for kind in [VoteKind::Agree, VoteKind::Disagree, VoteKind::Neutral] {
            let store = Arc::clone(&store);
            handles.push(tokio::spawn(async move {
                store
                    .cast_vote(post_id, UserId::new("u1"), kind, day, VOTE_LIMIT)
                    .await
                    .is_ok()
            }));
        }

        let mut successes = 0;
        for handle in handles {
            if handle.await.unwrap_or(false) {
                successes += 1;
            }
        }

        assert_eq!(successes, 1);
        assert_eq!(store.daily_counter(day).await.vote_count, 1);
        let tally = store.tally_from_votes(post_id).await;
        assert_eq!(tally.agree + tally.neutral + tally.disagree, 1);
    }

    #[tokio::test]
    async fn vote_quota_is_enforced() {
        let store = BoardStore::new();
        let day = DayKey::today();
        let post_id = approved_post(&store, day).await;

        let first = store
            .cast_vote(post_id, UserId::new("u1"), VoteKind::Agree, day, 1)
            .await;
        assert!(first.is_ok());

        let over = store
            .cast_vote(post_id, UserId::new("u2"), VoteKind::Agree, day, 1)
            .await;
        assert!(matches!(
            over,
            Err(BoardError::QuotaExceeded {
                kind: QuotaKind::Votes,
                ..
            })
        ));
        assert!(!store.has_voted(post_id, &UserId::new("u2")).await);
    }

    #[tokio::test]
    async fn voting_on_pending_post_is_rejected() {
        let store = BoardStore::new();
        let day = DayKey::today();
        let Ok(post) = create_one(&store, day, POST_LIMIT).await else {
            panic!("post creation failed");
        };

        let result = store
            .cast_vote(post.id, UserId::new("u1"), VoteKind::Agree, day, VOTE_LIMIT)
            .await;
        assert!(matches!(result, Err(BoardError::Validation(_))));
        assert_eq!(store.daily_counter(day).await.vote_count, 0);
    }

    #[tokio::test]
    async fn repair_tally_corrects_drift() {
        // Scenario C: stored {5,0,0}, ballots say {3,0,1}.
        let store = BoardStore::new();
        let day = DayKey::today();
        let post_id = approved_post(&store, day).await;

        for uid in ["u1", "u2", "u3"] {
            let Ok(_) = store
                .cast_vote(post_id, UserId::new(uid), VoteKind::Agree, day, VOTE_LIMIT)
                .await
            else {
                panic!("vote failed");
            };
        }
        let Ok(_) = store
            .cast_vote(post_id, UserId::new("u4"), VoteKind::Disagree, day, VOTE_LIMIT)
            .await
        else {
            panic!("vote failed");
        };

        // Inject drift through the reconciliation writer path.
        let Ok(()) = store
            .apply_tally(
                post_id,
                Tally {
                    agree: 5,
                    neutral: 0,
                    disagree: 0,
                },
            )
            .await
        else {
            panic!("drift injection failed");
        };

        let repaired = store.repair_tally(post_id).await;
        let Ok(Some(tally)) = repaired else {
            panic!("expected a repair");
        };
        assert_eq!(
            tally,
            Tally {
                agree: 3,
                neutral: 0,
                disagree: 1,
            }
        );

        // Idempotent: a second pass finds nothing to fix.
        let second = store.repair_tally(post_id).await;
        assert!(matches!(second, Ok(None)));
    }

    #[tokio::test]
    async fn purge_removes_ballots_with_the_post() {
        let store = BoardStore::new();
        let day = DayKey::today();
        let post_id = approved_post(&store, day).await;
        let Ok(_) = store
            .cast_vote(post_id, UserId::new("u1"), VoteKind::Agree, day, VOTE_LIMIT)
            .await
        else {
            panic!("vote failed");
        };

        // Rejected posts are the only purge target; fabricate one.
        let Ok(pending) = create_one(&store, day, POST_LIMIT).await else {
            panic!("post creation failed");
        };
        let Ok(_) = store
            .reject_post(pending.id, &UserId::new("admin"), String::new())
            .await
        else {
            panic!("rejection failed");
        };

        let removed = store
            .purge_rejected_batch(Utc::now() + chrono::Duration::seconds(1), 500)
            .await;
        assert_eq!(removed, vec![pending.id]);
        assert!(store.get_post(pending.id).await.is_err());
        // The approved post and its ballots survive.
        assert!(store.has_voted(post_id, &UserId::new("u1")).await);
    }
}
