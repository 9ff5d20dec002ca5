//! Database models for the durable event log.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A stored event row from the `board_events` table.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoredBoardEvent {
    /// Auto-increment row ID.
    pub id: i64,
    /// Post the event belongs to.
    pub post_id: Uuid,
    /// Event type discriminator (e.g. `"vote_cast"`).
    pub event_type: String,
    /// JSONB payload with event-specific data.
    pub payload: serde_json::Value,
    /// Server-side creation timestamp.
    pub created_at: DateTime<Utc>,
}
