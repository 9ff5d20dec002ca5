//! Board service: orchestrates posting, voting, and moderation.

use std::collections::HashSet;
use std::sync::Arc;

use chrono::Utc;

use crate::config::BoardConfig;
use crate::domain::{
    BoardEvent, DailyUsage, DayKey, EventBus, LoginHistoryEntry, Post, PostId, PostStatus,
    SortOrder, UserId, VoteKind, VoteRecord, sort_posts,
};
use crate::error::BoardError;
use crate::store::BoardStore;

/// Maximum accepted title length in characters.
pub const MAX_TITLE_LEN: usize = 100;

/// Maximum accepted body length in characters.
pub const MAX_CONTENT_LEN: usize = 2000;

/// Quota, retention, and authorization settings the service enforces.
///
/// Captured from [`BoardConfig`] at startup so handlers never reach back
/// into the environment.
#[derive(Debug, Clone)]
pub struct BoardPolicy {
    /// Board-wide post quota per calendar day.
    pub daily_post_limit: u32,
    /// Board-wide vote quota per calendar day.
    pub daily_vote_limit: u32,
    /// Age in days after which rejected posts are purged.
    pub rejected_retention_days: u32,
    /// Age in days after which login-history entries are purged.
    pub login_history_retention_days: u32,
    /// Maximum records deleted per purge batch.
    pub purge_batch_size: usize,
    /// Maximum batches per purge sweep.
    pub purge_max_batches: u32,
    /// Users granted moderation rights.
    pub admins: HashSet<UserId>,
}

impl BoardPolicy {
    /// Builds a policy from loaded configuration.
    #[must_use]
    pub fn from_config(config: &BoardConfig) -> Self {
        Self {
            daily_post_limit: config.daily_post_limit,
            daily_vote_limit: config.daily_vote_limit,
            rejected_retention_days: config.rejected_retention_days,
            login_history_retention_days: config.login_history_retention_days,
            purge_batch_size: config.purge_batch_size,
            purge_max_batches: config.purge_max_batches,
            admins: config
                .admin_user_ids
                .iter()
                .map(|id| UserId::new(id.as_str()))
                .collect(),
        }
    }
}

/// Orchestration layer for all board operations.
///
/// Stateless coordinator: owns references to [`BoardStore`] for state and
/// [`EventBus`] for event emission. Every mutation method follows the
/// pattern: validate input → run the store transaction → emit events →
/// return result. Validation failures never consume quota.
#[derive(Debug, Clone)]
pub struct BoardService {
    store: Arc<BoardStore>,
    event_bus: EventBus,
    policy: BoardPolicy,
}

impl BoardService {
    /// Creates a new `BoardService`.
    #[must_use]
    pub fn new(store: Arc<BoardStore>, event_bus: EventBus, policy: BoardPolicy) -> Self {
        Self {
            store,
            event_bus,
            policy,
        }
    }

    /// Returns a reference to the inner [`EventBus`].
    #[must_use]
    pub fn event_bus(&self) -> &EventBus {
        &self.event_bus
    }

    /// Returns a reference to the inner [`BoardStore`].
    #[must_use]
    pub fn store(&self) -> &Arc<BoardStore> {
        &self.store
    }

    /// Returns the active policy.
    #[must_use]
    pub fn policy(&self) -> &BoardPolicy {
        &self.policy
    }

    /// Returns `true` if the user holds moderation rights.
    #[must_use]
    pub fn is_admin(&self, user_id: &UserId) -> bool {
        self.policy.admins.contains(user_id)
    }

    fn ensure_admin(&self, user_id: &UserId) -> Result<(), BoardError> {
        if self.is_admin(user_id) {
            Ok(())
        } else {
            Err(BoardError::Forbidden)
        }
    }

    /// Submits a new proposal. The post starts out pending moderation.
    ///
    /// # Errors
    ///
    /// - [`BoardError::Validation`] for an empty or over-length title or
    ///   body; validation runs before the quota transaction, so invalid
    ///   input never consumes quota.
    /// - [`BoardError::QuotaExceeded`] when the day's post quota is spent.
    pub async fn create_post(
        &self,
        author_id: UserId,
        author_name: String,
        title: &str,
        content: &str,
    ) -> Result<Post, BoardError> {
        let title = title.trim();
        let content = content.trim();

        if title.is_empty() {
            return Err(BoardError::Validation("title must not be empty".to_string()));
        }
        if title.chars().count() > MAX_TITLE_LEN {
            return Err(BoardError::Validation(format!(
                "title must be at most {MAX_TITLE_LEN} characters"
            )));
        }
        if content.is_empty() {
            return Err(BoardError::Validation(
                "content must not be empty".to_string(),
            ));
        }
        if content.chars().count() > MAX_CONTENT_LEN {
            return Err(BoardError::Validation(format!(
                "content must be at most {MAX_CONTENT_LEN} characters"
            )));
        }

        let post = self
            .store
            .create_post(
                title.to_string(),
                content.to_string(),
                author_id,
                author_name,
                DayKey::today(),
                self.policy.daily_post_limit,
            )
            .await?;

        let _ = self.event_bus.publish(BoardEvent::PostSubmitted {
            post_id: post.id,
            author_id: post.author_id.clone(),
            title: post.title.clone(),
            timestamp: Utc::now(),
        });

        tracing::info!(post_id = %post.id, author = %post.author_id, "post submitted");
        Ok(post)
    }

    /// Casts a vote on an approved post.
    ///
    /// # Errors
    ///
    /// See [`BoardStore::cast_vote`]. The failed attempt leaves every
    /// counter and tally untouched.
    pub async fn cast_vote(
        &self,
        post_id: PostId,
        user_id: UserId,
        kind: VoteKind,
    ) -> Result<(VoteRecord, Post), BoardError> {
        let (record, tally) = self
            .store
            .cast_vote(
                post_id,
                user_id,
                kind,
                DayKey::today(),
                self.policy.daily_vote_limit,
            )
            .await?;

        let _ = self.event_bus.publish(BoardEvent::VoteCast {
            post_id,
            user_id: record.user_id.clone(),
            kind,
            tally,
            timestamp: Utc::now(),
        });

        tracing::info!(%post_id, voter = %record.user_id, kind = %kind, "vote cast");
        let post = self.store.get_post(post_id).await?;
        Ok((record, post))
    }

    /// Returns the public board: approved posts sorted in memory by the
    /// requested order.
    pub async fn list_approved(&self, order: SortOrder) -> Vec<Post> {
        let mut posts = self.store.list_by_status(PostStatus::Approved).await;
        sort_posts(&mut posts, order);
        posts
    }

    /// Returns the moderation queue, oldest submissions first.
    ///
    /// # Errors
    ///
    /// Returns [`BoardError::Forbidden`] unless the caller holds
    /// moderation rights.
    pub async fn list_pending(&self, caller: &UserId) -> Result<Vec<Post>, BoardError> {
        self.ensure_admin(caller)?;
        let mut posts = self.store.list_by_status(PostStatus::Pending).await;
        posts.sort_by(|a, b| a.created_at.cmp(&b.created_at).then(a.id.cmp(&b.id)));
        Ok(posts)
    }

    /// Returns a single post.
    ///
    /// # Errors
    ///
    /// Returns [`BoardError::PostNotFound`] if the post does not exist.
    pub async fn get_post(&self, post_id: PostId) -> Result<Post, BoardError> {
        self.store.get_post(post_id).await
    }

    /// Approves a pending post, publishing it to the board.
    ///
    /// # Errors
    ///
    /// - [`BoardError::Forbidden`] unless the caller holds moderation
    ///   rights.
    /// - [`BoardError::PostNotFound`] / [`BoardError::NotPending`] from
    ///   the store transition.
    pub async fn approve_post(&self, post_id: PostId, caller: &UserId) -> Result<Post, BoardError> {
        self.ensure_admin(caller)?;
        let post = self.store.approve_post(post_id, caller).await?;

        let _ = self.event_bus.publish(BoardEvent::PostApproved {
            post_id,
            approved_by: caller.clone(),
            timestamp: Utc::now(),
        });

        tracing::info!(%post_id, admin = %caller, "post approved");
        Ok(post)
    }

    /// Rejects a pending post. The reason is optional and stored as an
    /// empty string when omitted.
    ///
    /// # Errors
    ///
    /// Same conditions as [`Self::approve_post`].
    pub async fn reject_post(
        &self,
        post_id: PostId,
        caller: &UserId,
        reason: Option<String>,
    ) -> Result<Post, BoardError> {
        self.ensure_admin(caller)?;
        let reason = reason.unwrap_or_default();
        let post = self
            .store
            .reject_post(post_id, caller, reason.clone())
            .await?;

        let _ = self.event_bus.publish(BoardEvent::PostRejected {
            post_id,
            rejected_by: caller.clone(),
            reason,
            timestamp: Utc::now(),
        });

        tracing::info!(%post_id, admin = %caller, "post rejected");
        Ok(post)
    }

    /// Returns a day's quota consumption next to the configured limits.
    pub async fn daily_usage(&self, day: DayKey) -> DailyUsage {
        let counter = self.store.daily_counter(day).await;
        DailyUsage {
            day,
            post_count: counter.post_count,
            post_limit: self.policy.daily_post_limit,
            vote_count: counter.vote_count,
            vote_limit: self.policy.daily_vote_limit,
            last_updated: counter.last_updated,
        }
    }

    /// Records a successful authentication in the login history.
    ///
    /// The login path itself never fails on audit bookkeeping.
    pub async fn record_login(&self, entry: LoginHistoryEntry) {
        tracing::debug!(user = %entry.user_id, provider = %entry.provider, "login recorded");
        self.store.record_login(entry).await;
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
pub(crate) mod tests {
    use super::*;
    use crate::domain::Tally;

    pub(crate) fn make_policy() -> BoardPolicy {
        BoardPolicy {
            daily_post_limit: 30,
            daily_vote_limit: 3000,
            rejected_retention_days: 30,
            login_history_retention_days: 7,
            purge_batch_size: 500,
            purge_max_batches: 20,
            admins: [UserId::new("admin")].into_iter().collect(),
        }
    }

    pub(crate) fn make_service(policy: BoardPolicy) -> BoardService {
        BoardService::new(Arc::new(BoardStore::new()), EventBus::new(1000), policy)
    }

    pub(crate) async fn submitted_post(service: &BoardService) -> Post {
        let result = service
            .create_post(
                UserId::new("author"),
                "hana".to_string(),
                "new vending machine",
                "Add a vending machine near the gym.",
            )
            .await;
        let Ok(post) = result else {
            panic!("post creation failed");
        };
        post
    }

    pub(crate) async fn approved_post(service: &BoardService) -> Post {
        let post = submitted_post(service).await;
        let Ok(approved) = service.approve_post(post.id, &UserId::new("admin")).await else {
            panic!("approval failed");
        };
        approved
    }

    #[tokio::test]
    async fn create_post_emits_event_and_starts_pending() {
        let service = make_service(make_policy());
        let mut rx = service.event_bus().subscribe();

        let post = submitted_post(&service).await;
        assert_eq!(post.status, PostStatus::Pending);
        assert_eq!(post.tally, Tally::default());

        let Ok(event) = rx.recv().await else {
            panic!("expected event");
        };
        assert_eq!(event.event_type_str(), "post_submitted");
    }

    #[tokio::test]
    async fn blank_title_fails_without_consuming_quota() {
        let service = make_service(make_policy());

        let result = service
            .create_post(UserId::new("author"), "hana".to_string(), "   ", "body")
            .await;
        assert!(matches!(result, Err(BoardError::Validation(_))));

        let usage = service.daily_usage(DayKey::today()).await;
        assert_eq!(usage.post_count, 0);
    }

    #[tokio::test]
    async fn overlong_content_is_rejected() {
        let service = make_service(make_policy());
        let content = "x".repeat(MAX_CONTENT_LEN + 1);

        let result = service
            .create_post(UserId::new("author"), "hana".to_string(), "title", &content)
            .await;
        assert!(matches!(result, Err(BoardError::Validation(_))));
    }

    #[tokio::test]
    async fn vote_emits_event_with_resulting_tally() {
        let service = make_service(make_policy());
        let post = approved_post(&service).await;
        let mut rx = service.event_bus().subscribe();

        let result = service
            .cast_vote(post.id, UserId::new("u1"), VoteKind::Agree)
            .await;
        let Ok((_, updated)) = result else {
            panic!("vote failed");
        };
        assert_eq!(updated.tally.agree, 1);

        let Ok(event) = rx.recv().await else {
            panic!("expected event");
        };
        let BoardEvent::VoteCast { tally, .. } = event else {
            panic!("expected vote_cast event");
        };
        assert_eq!(tally.agree, 1);
    }

    #[tokio::test]
    async fn moderation_requires_admin() {
        let service = make_service(make_policy());
        let post = submitted_post(&service).await;
        let outsider = UserId::new("student");

        let approve = service.approve_post(post.id, &outsider).await;
        assert!(matches!(approve, Err(BoardError::Forbidden)));

        let pending = service.list_pending(&outsider).await;
        assert!(matches!(pending, Err(BoardError::Forbidden)));

        // The post is still pending and moderatable by a real admin.
        let Ok(queue) = service.list_pending(&UserId::new("admin")).await else {
            panic!("admin listing failed");
        };
        assert_eq!(queue.len(), 1);
    }

    #[tokio::test]
    async fn reject_without_reason_stores_empty_string() {
        let service = make_service(make_policy());
        let post = submitted_post(&service).await;

        let Ok(rejected) = service
            .reject_post(post.id, &UserId::new("admin"), None)
            .await
        else {
            panic!("rejection failed");
        };
        assert_eq!(rejected.rejection_reason.as_deref(), Some(""));
    }

    #[tokio::test]
    async fn approved_listing_excludes_pending_and_rejected() {
        let service = make_service(make_policy());
        let approved = approved_post(&service).await;
        let _pending = submitted_post(&service).await;
        let rejected = submitted_post(&service).await;
        let Ok(_) = service
            .reject_post(rejected.id, &UserId::new("admin"), None)
            .await
        else {
            panic!("rejection failed");
        };

        let board = service.list_approved(SortOrder::Newest).await;
        assert_eq!(board.len(), 1);
        assert_eq!(board.first().map(|p| p.id), Some(approved.id));
    }

    #[tokio::test]
    async fn daily_usage_reports_counts_and_limits() {
        let service = make_service(make_policy());
        let _ = submitted_post(&service).await;

        let usage = service.daily_usage(DayKey::today()).await;
        assert_eq!(usage.post_count, 1);
        assert_eq!(usage.post_limit, 30);
        assert_eq!(usage.vote_count, 0);
        assert_eq!(usage.vote_limit, 3000);
    }

    #[tokio::test]
    async fn daily_usage_is_scoped_to_the_requested_day() {
        let service = make_service(make_policy());
        let _ = submitted_post(&service).await;

        let yesterday = DayKey::from_date(
            DayKey::today().as_date() - chrono::Duration::days(1),
        );
        let usage = service.daily_usage(yesterday).await;
        assert_eq!(usage.day, yesterday);
        assert_eq!(usage.post_count, 0);
        assert_eq!(usage.vote_count, 0);
    }
}
