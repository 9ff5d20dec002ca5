//! PostgreSQL implementation of the event log.

use std::time::Duration;

use chrono::{DateTime, Utc};
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;
use uuid::Uuid;

use super::models::StoredBoardEvent;
use crate::config::BoardConfig;
use crate::error::BoardError;

/// PostgreSQL-backed event log using `sqlx::PgPool`.
#[derive(Debug, Clone)]
pub struct BoardEventLog {
    pool: PgPool,
}

impl BoardEventLog {
    /// Creates a new event log with the given connection pool.
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Connects to PostgreSQL using the pool settings from `config`.
    ///
    /// # Errors
    ///
    /// Returns [`BoardError::StoreUnavailable`] if the connection cannot
    /// be established.
    pub async fn connect(config: &BoardConfig) -> Result<Self, BoardError> {
        let pool = PgPoolOptions::new()
            .max_connections(config.database_max_connections)
            .min_connections(config.database_min_connections)
            .acquire_timeout(Duration::from_secs(config.database_connect_timeout_secs))
            .connect(&config.database_url)
            .await
            .map_err(|e| BoardError::StoreUnavailable(e.to_string()))?;

        Ok(Self::new(pool))
    }

    /// Appends an event to the log.
    ///
    /// # Errors
    ///
    /// Returns [`BoardError::StoreUnavailable`] on database failure.
    pub async fn save_event(
        &self,
        post_id: Uuid,
        event_type: &str,
        payload: &serde_json::Value,
    ) -> Result<i64, BoardError> {
        let row = sqlx::query_scalar::<_, i64>(
            "INSERT INTO board_events (post_id, event_type, payload) \
             VALUES ($1, $2, $3) RETURNING id",
        )
        .bind(post_id)
        .bind(event_type)
        .bind(payload)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| BoardError::StoreUnavailable(e.to_string()))?;

        Ok(row)
    }

    /// Loads events after the given timestamp, optionally filtered by post ID.
    ///
    /// # Errors
    ///
    /// Returns [`BoardError::StoreUnavailable`] on database failure.
    pub async fn load_events_after(
        &self,
        after: DateTime<Utc>,
        post_id: Option<Uuid>,
    ) -> Result<Vec<StoredBoardEvent>, BoardError> {
        let rows = if let Some(pid) = post_id {
            sqlx::query_as::<_, (i64, Uuid, String, serde_json::Value, DateTime<Utc>)>(
                "SELECT id, post_id, event_type, payload, created_at FROM board_events \
                 WHERE created_at > $1 AND post_id = $2 ORDER BY created_at ASC",
            )
            .bind(after)
            .bind(pid)
            .fetch_all(&self.pool)
            .await
        } else {
            sqlx::query_as::<_, (i64, Uuid, String, serde_json::Value, DateTime<Utc>)>(
                "SELECT id, post_id, event_type, payload, created_at FROM board_events \
                 WHERE created_at > $1 ORDER BY created_at ASC",
            )
            .bind(after)
            .fetch_all(&self.pool)
            .await
        }
        .map_err(|e| BoardError::StoreUnavailable(e.to_string()))?;

        Ok(rows
            .into_iter()
            .map(
                |(id, post_id, event_type, payload, created_at)| StoredBoardEvent {
                    id,
                    post_id,
                    event_type,
                    payload,
                    created_at,
                },
            )
            .collect())
    }

    /// Deletes event rows older than the given number of days.
    ///
    /// # Errors
    ///
    /// Returns [`BoardError::StoreUnavailable`] on database failure.
    pub async fn delete_events_older_than(&self, before_days: u64) -> Result<u64, BoardError> {
        let cutoff =
            Utc::now() - chrono::Duration::days(i64::try_from(before_days).unwrap_or(i64::MAX));

        let result = sqlx::query("DELETE FROM board_events WHERE created_at < $1")
            .bind(cutoff)
            .execute(&self.pool)
            .await
            .map_err(|e| BoardError::StoreUnavailable(e.to_string()))?;

        Ok(result.rows_affected())
    }
}
