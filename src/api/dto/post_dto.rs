//! Post-related DTOs for submission and board listing.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;

use super::common_dto::{PaginationMeta, TallyDto};
use crate::domain::Post;

/// Request body for `POST /posts`.
#[derive(Debug, Deserialize, ToSchema)]
pub struct CreatePostRequest {
    /// Proposal title (max 100 characters after trimming).
    pub title: String,
    /// Proposal body (max 2000 characters after trimming).
    pub content: String,
}

/// A proposal as exposed over the API.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct PostDto {
    /// Unique post identifier.
    pub id: Uuid,
    /// Proposal title.
    pub title: String,
    /// Proposal body.
    pub content: String,
    /// Author's user id.
    pub author_id: String,
    /// Display name captured at submission time.
    pub author_name: String,
    /// Lifecycle state: `pending`, `approved`, or `rejected`.
    pub status: String,
    /// Submission timestamp.
    pub created_at: DateTime<Utc>,
    /// Approval timestamp, present once approved.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub approved_at: Option<DateTime<Utc>>,
    /// Rejection timestamp, present once rejected.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rejected_at: Option<DateTime<Utc>>,
    /// Moderator-supplied rejection reason, present once rejected.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rejection_reason: Option<String>,
    /// Denormalized vote tally.
    pub tally: TallyDto,
}

impl From<Post> for PostDto {
    fn from(post: Post) -> Self {
        Self {
            id: post.id.into(),
            title: post.title,
            content: post.content,
            author_id: post.author_id.to_string(),
            author_name: post.author_name,
            status: post.status.as_str().to_string(),
            created_at: post.created_at,
            approved_at: post.approved_at,
            rejected_at: post.rejected_at,
            rejection_reason: post.rejection_reason,
            tally: post.tally.into(),
        }
    }
}

/// Query parameters for `GET /posts`.
#[derive(Debug, Clone, Deserialize, IntoParams)]
pub struct ListPostsParams {
    /// Sort order: `newest` (default), `oldest`, `popular`, or
    /// `controversial`.
    #[serde(default)]
    pub sort: Option<String>,
    /// Page number (1-indexed). Defaults to 1.
    #[serde(default = "default_page")]
    pub page: u32,
    /// Items per page (max 100). Defaults to 20.
    #[serde(default = "default_per_page")]
    pub per_page: u32,
}

fn default_page() -> u32 {
    1
}

fn default_per_page() -> u32 {
    20
}

impl ListPostsParams {
    /// Clamps the pagination fields to their allowed ranges.
    #[must_use]
    pub fn clamped(&self) -> Self {
        Self {
            sort: self.sort.clone(),
            page: self.page.max(1),
            per_page: self.per_page.clamp(1, 100),
        }
    }
}

/// Paginated board listing for `GET /posts`.
#[derive(Debug, Serialize, ToSchema)]
pub struct PostListResponse {
    /// Posts on this page.
    pub data: Vec<PostDto>,
    /// Pagination metadata.
    pub pagination: PaginationMeta,
}
