//! Tally reconciliation sweep.
//!
//! Denormalized tallies on posts can drift from the ballot records if a
//! process dies between the ballot insert and the tally increment. The
//! sweep recomputes each approved post's tally from its ballots and
//! overwrites the stored value when they differ. Running it against a
//! consistent board changes nothing, so it is safe to trigger from any
//! read path or schedule.

use chrono::Utc;

use crate::domain::BoardEvent;
use super::board_service::BoardService;

/// Outcome of one reconciliation sweep.
#[derive(Debug, Clone, Copy, Default)]
pub struct RepairReport {
    /// Approved posts examined.
    pub scanned: usize,
    /// Posts whose stored tally was overwritten.
    pub repaired: usize,
}

impl BoardService {
    /// Recomputes tallies for every approved post, fixing any drift.
    ///
    /// A post that disappears between the id scan and its repair is
    /// skipped; the next sweep no longer sees it.
    pub async fn repair_tallies(&self) -> RepairReport {
        let ids = self.store().approved_post_ids().await;
        let mut report = RepairReport {
            scanned: ids.len(),
            repaired: 0,
        };

        for post_id in ids {
            match self.store().repair_tally(post_id).await {
                Ok(Some(tally)) => {
                    report.repaired += 1;
                    tracing::warn!(%post_id, ?tally, "tally drift repaired");
                    let _ = self.event_bus().publish(BoardEvent::TallyRepaired {
                        post_id,
                        tally,
                        timestamp: Utc::now(),
                    });
                }
                Ok(None) => {}
                Err(error) => {
                    tracing::debug!(%post_id, %error, "post vanished during sweep");
                }
            }
        }

        if report.repaired > 0 {
            tracing::info!(
                scanned = report.scanned,
                repaired = report.repaired,
                "reconciliation sweep finished"
            );
        }
        report
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;
    use crate::domain::{Tally, UserId, VoteKind};
    use crate::service::board_service::tests::{approved_post, make_policy, make_service};

    #[tokio::test]
    async fn sweep_fixes_drifted_tally() {
        let service = make_service(make_policy());
        let post = approved_post(&service).await;

        for uid in ["u1", "u2", "u3"] {
            let Ok(_) = service
                .cast_vote(post.id, UserId::new(uid), VoteKind::Agree)
                .await
            else {
                panic!("vote failed");
            };
        }
        let Ok(_) = service
            .cast_vote(post.id, UserId::new("u4"), VoteKind::Disagree)
            .await
        else {
            panic!("vote failed");
        };

        // Simulate a crash between ballot insert and tally increment.
        let Ok(()) = service
            .store()
            .apply_tally(
                post.id,
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

        let mut rx = service.event_bus().subscribe();
        let report = service.repair_tallies().await;
        assert_eq!(report.scanned, 1);
        assert_eq!(report.repaired, 1);

        let Ok(fixed) = service.get_post(post.id).await else {
            panic!("post lookup failed");
        };
        assert_eq!(fixed.tally.agree, 3);
        assert_eq!(fixed.tally.disagree, 1);

        let Ok(event) = rx.recv().await else {
            panic!("expected event");
        };
        assert_eq!(event.event_type_str(), "tally_repaired");
    }

    #[tokio::test]
    async fn sweep_is_idempotent_on_consistent_board() {
        let service = make_service(make_policy());
        let post = approved_post(&service).await;
        let Ok(_) = service
            .cast_vote(post.id, UserId::new("u1"), VoteKind::Neutral)
            .await
        else {
            panic!("vote failed");
        };

        let first = service.repair_tallies().await;
        assert_eq!(first.repaired, 0);

        let second = service.repair_tallies().await;
        assert_eq!(second.scanned, 1);
        assert_eq!(second.repaired, 0);
    }
}
