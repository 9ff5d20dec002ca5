//! Retention sweeps for rejected posts and the login history.
//!
//! Each sweep deletes expired records in bounded batches. A pass removes
//! at most `purge_batch_size` records; the sweep keeps going while passes
//! come back full and stops after `purge_max_batches` passes no matter
//! what, so a sweep can never loop forever.

use chrono::{Duration, Utc};

use crate::domain::BoardEvent;
use super::board_service::BoardService;

/// Outcome of one retention sweep.
#[derive(Debug, Clone, Copy, Default)]
pub struct PurgeReport {
    /// Batch passes executed.
    pub batches: u32,
    /// Records deleted across all passes.
    pub removed: usize,
}

impl BoardService {
    /// Purges rejected posts older than the retention window, together
    /// with their ballots.
    pub async fn purge_rejected_posts(&self) -> PurgeReport {
        let policy = self.policy();
        let cutoff = Utc::now() - Duration::days(i64::from(policy.rejected_retention_days));
        let batch_size = policy.purge_batch_size;
        let max_batches = policy.purge_max_batches;

        let mut report = PurgeReport::default();
        while report.batches < max_batches {
            let removed = self.store().purge_rejected_batch(cutoff, batch_size).await;
            if removed.is_empty() {
                break;
            }
            report.batches += 1;
            report.removed += removed.len();

            for post_id in &removed {
                let _ = self.event_bus().publish(BoardEvent::PostPurged {
                    post_id: *post_id,
                    timestamp: Utc::now(),
                });
            }

            if removed.len() < batch_size {
                break;
            }
        }

        if report.removed > 0 {
            tracing::info!(
                removed = report.removed,
                batches = report.batches,
                "purged expired rejected posts"
            );
        }
        report
    }

    /// Purges login-history entries older than the retention window.
    pub async fn purge_login_history(&self) -> PurgeReport {
        let policy = self.policy();
        let cutoff = Utc::now() - Duration::days(i64::from(policy.login_history_retention_days));
        let batch_size = policy.purge_batch_size;
        let max_batches = policy.purge_max_batches;

        let mut report = PurgeReport::default();
        while report.batches < max_batches {
            let removed = self.store().purge_login_batch(cutoff, batch_size).await;
            if removed == 0 {
                break;
            }
            report.batches += 1;
            report.removed += removed;

            if removed < batch_size {
                break;
            }
        }

        if report.removed > 0 {
            tracing::info!(
                removed = report.removed,
                batches = report.batches,
                "purged expired login history"
            );
        }
        report
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;
    use crate::domain::{LoginHistoryEntry, UserId};
    use crate::service::board_service::tests::{make_policy, make_service, submitted_post};

    #[tokio::test]
    async fn fresh_rejections_survive_the_sweep() {
        let service = make_service(make_policy());
        let post = submitted_post(&service).await;
        let Ok(_) = service
            .reject_post(post.id, &UserId::new("admin"), None)
            .await
        else {
            panic!("rejection failed");
        };

        let report = service.purge_rejected_posts().await;
        assert_eq!(report.removed, 0);
        assert!(service.get_post(post.id).await.is_ok());
    }

    #[tokio::test]
    async fn expired_rejections_are_purged_with_event() {
        // A zero-day window expires rejections immediately.
        let mut policy = make_policy();
        policy.rejected_retention_days = 0;
        let service = make_service(policy);

        let post = submitted_post(&service).await;
        let Ok(_) = service
            .reject_post(post.id, &UserId::new("admin"), None)
            .await
        else {
            panic!("rejection failed");
        };

        let mut rx = service.event_bus().subscribe();
        let report = service.purge_rejected_posts().await;
        assert_eq!(report.removed, 1);
        assert!(service.get_post(post.id).await.is_err());

        let Ok(event) = rx.recv().await else {
            panic!("expected event");
        };
        assert_eq!(event.event_type_str(), "post_purged");
    }

    #[tokio::test]
    async fn sweep_stops_at_the_batch_cap() {
        let mut policy = make_policy();
        policy.rejected_retention_days = 0;
        policy.purge_batch_size = 2;
        policy.purge_max_batches = 1;
        let service = make_service(policy);

        for _ in 0..5 {
            let post = submitted_post(&service).await;
            let Ok(_) = service
                .reject_post(post.id, &UserId::new("admin"), None)
                .await
            else {
                panic!("rejection failed");
            };
        }

        let report = service.purge_rejected_posts().await;
        assert_eq!(report.batches, 1);
        assert_eq!(report.removed, 2);

        // The remainder goes in later sweeps.
        let next = service.purge_rejected_posts().await;
        assert_eq!(next.removed, 2);
    }

    #[tokio::test]
    async fn login_history_outside_window_is_purged() {
        let mut policy = make_policy();
        policy.login_history_retention_days = 0;
        let service = make_service(policy);

        service
            .record_login(LoginHistoryEntry {
                user_id: UserId::new("u1"),
                email: "u1@example.ed.jp".to_string(),
                display_name: "u1".to_string(),
                provider: "google.com".to_string(),
                logged_in_at: Utc::now() - Duration::seconds(1),
                user_agent: String::new(),
            })
            .await;

        let report = service.purge_login_history().await;
        assert_eq!(report.removed, 1);
        assert_eq!(service.store().login_history_len().await, 0);
    }
}
