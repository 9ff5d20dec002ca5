//! Moderation DTOs for the admin endpoints.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::post_dto::PostDto;

/// Request body for `POST /admin/posts/{id}/reject`.
#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct RejectRequest {
    /// Optional reason shown to the author. Stored as an empty string
    /// when omitted.
    #[serde(default)]
    pub reason: Option<String>,
}

/// Moderation queue listing for `GET /admin/posts/pending`.
#[derive(Debug, Serialize, ToSchema)]
pub struct PendingListResponse {
    /// Pending posts, oldest first.
    pub data: Vec<PostDto>,
    /// Total pending posts.
    pub total: u32,
}
