//! Persistence layer: optional PostgreSQL event log.
//!
//! The in-memory store is authoritative; the event log is an append-only
//! audit trail fed from the [`crate::domain::EventBus`]. A dropped write
//! is logged and skipped, it never fails the operation that produced the
//! event.

pub mod models;
pub mod postgres;

use tokio::sync::broadcast;

use crate::domain::BoardEvent;
use postgres::BoardEventLog;

/// Drains the event bus into the durable log until the bus closes.
///
/// Spawned as a background task at startup when persistence is enabled.
pub async fn run_event_writer(log: BoardEventLog, mut rx: broadcast::Receiver<BoardEvent>) {
    loop {
        match rx.recv().await {
            Ok(event) => {
                let payload = serde_json::to_value(&event).unwrap_or_default();
                if let Err(error) = log
                    .save_event(event.post_id().into(), event.event_type_str(), &payload)
                    .await
                {
                    tracing::warn!(%error, event_type = event.event_type_str(), "event log write failed");
                }
            }
            Err(broadcast::error::RecvError::Lagged(n)) => {
                tracing::warn!(lagged = n, "event writer lagged behind event bus");
            }
            Err(broadcast::error::RecvError::Closed) => break,
        }
    }

    tracing::debug!("event writer stopped");
}
