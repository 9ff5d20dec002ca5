//! Vote-related DTOs.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use super::common_dto::TallyDto;

/// Request body for `POST /posts/{id}/votes`.
#[derive(Debug, Deserialize, ToSchema)]
pub struct CastVoteRequest {
    /// Vote position: `agree`, `neutral`, or `disagree`.
    pub vote: String,
}

/// Response body for `POST /posts/{id}/votes` (201 Created).
#[derive(Debug, Serialize, ToSchema)]
pub struct CastVoteResponse {
    /// Post the ballot was cast on.
    pub post_id: Uuid,
    /// The recorded position.
    pub vote: String,
    /// The post's tally after this vote.
    pub tally: TallyDto,
    /// Server timestamp of the ballot.
    pub created_at: DateTime<Utc>,
}
