//! Session and quota DTOs.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::domain::DailyUsage;

/// Request body for `POST /session`.
#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct SessionRequest {
    /// Identity provider the client authenticated with
    /// (e.g. `google.com`).
    #[serde(default)]
    pub provider: Option<String>,
}

/// Response body for `POST /session`.
#[derive(Debug, Serialize, ToSchema)]
pub struct SessionResponse {
    /// Authenticated user id.
    pub user_id: String,
    /// Resolved display name.
    pub display_name: String,
    /// Whether the user holds moderation rights.
    pub is_admin: bool,
}

/// Query parameters for `GET /usage`.
#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
pub struct UsageParams {
    /// Day to report (`YYYY-MM-DD`). Defaults to today.
    #[serde(default)]
    pub date: Option<String>,
}

/// Response body for `GET /usage`: a day's quota consumption.
#[derive(Debug, Serialize, ToSchema)]
pub struct UsageResponse {
    /// Calendar day the counters belong to (`YYYY-MM-DD`).
    pub day: String,
    /// Posts created today, board-wide.
    pub post_count: u32,
    /// Daily post quota.
    pub post_limit: u32,
    /// Votes cast today, board-wide.
    pub vote_count: u32,
    /// Daily vote quota.
    pub vote_limit: u32,
    /// Timestamp of the last counter update, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_updated: Option<DateTime<Utc>>,
}

impl From<DailyUsage> for UsageResponse {
    fn from(usage: DailyUsage) -> Self {
        Self {
            day: usage.day.to_string(),
            post_count: usage.post_count,
            post_limit: usage.post_limit,
            vote_count: usage.vote_count,
            vote_limit: usage.vote_limit,
            last_updated: usage.last_updated,
        }
    }
}
