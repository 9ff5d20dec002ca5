//! Board error types with HTTP status code mapping.
//!
//! [`BoardError`] is the central error type for the service. Each variant
//! maps to a specific HTTP status code and structured JSON error response.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;

use crate::domain::PostId;

/// Structured JSON error response body.
///
/// All error responses follow this shape:
/// ```json
/// {
///   "error": {
///     "code": 4001,
///     "message": "daily post limit of 30 reached",
///     "details": null
///   }
/// }
/// ```
#[derive(Debug, Serialize, utoipa::ToSchema)]
pub struct ErrorResponse {
    /// Structured error payload.
    pub error: ErrorBody,
}

/// Inner error body with numeric code and human-readable message.
#[derive(Debug, Serialize, utoipa::ToSchema)]
pub struct ErrorBody {
    /// Numeric error code (see code ranges on [`BoardError`]).
    pub code: u32,
    /// Human-readable error message.
    pub message: String,
    /// Optional additional details.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

/// Which daily quota was exhausted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuotaKind {
    /// The daily post-creation cap.
    Posts,
    /// The daily vote cap.
    Votes,
}

impl std::fmt::Display for QuotaKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Posts => write!(f, "post"),
            Self::Votes => write!(f, "vote"),
        }
    }
}

/// Server-side error enum with HTTP status code mapping.
///
/// # Error Code Ranges
///
/// | Range     | Category        | HTTP Status                  |
/// |-----------|-----------------|------------------------------|
/// | 1000–1999 | Validation/Auth | 400 Bad Request / 401        |
/// | 2000–2999 | State/Not Found | 404 Not Found / 409 Conflict |
/// | 3000–3999 | Server/Store    | 500 / 503                    |
/// | 4000–4999 | Quota           | 429 Too Many Requests        |
#[derive(Debug, thiserror::Error)]
pub enum BoardError {
    /// Request validation failed (empty title/content, malformed input).
    /// Raised before any store interaction so invalid input never
    /// consumes quota.
    #[error("invalid request: {0}")]
    Validation(String),

    /// No authenticated principal on the request.
    #[error("authentication required")]
    Unauthenticated,

    /// The principal is not an admin but attempted a moderation action.
    #[error("admin privileges required")]
    Forbidden,

    /// Post with the given ID was not found.
    #[error("post not found: {0}")]
    PostNotFound(PostId),

    /// Moderation attempted on a post that is no longer pending.
    #[error("post {0} is not pending")]
    NotPending(PostId),

    /// The user already holds a ballot on this post. Votes are immutable
    /// once cast.
    #[error("already voted on post {0}")]
    AlreadyVoted(PostId),

    /// A daily quota is exhausted. Surfaced verbatim to the user; no retry.
    #[error("daily {kind} limit of {limit} reached")]
    QuotaExceeded {
        /// Which cap was hit.
        kind: QuotaKind,
        /// The configured daily limit.
        limit: u32,
    },

    /// Transport or permission failure from the durable backing store.
    #[error("store unavailable: {0}")]
    StoreUnavailable(String),

    /// Internal server error.
    #[error("internal error: {0}")]
    Internal(String),
}

impl BoardError {
    /// Returns the numeric error code for this variant.
    #[must_use]
    pub const fn error_code(&self) -> u32 {
        match self {
            Self::Validation(_) => 1001,
            Self::Unauthenticated => 1004,
            Self::PostNotFound(_) => 2001,
            Self::NotPending(_) => 2002,
            Self::AlreadyVoted(_) => 2003,
            Self::Forbidden => 2004,
            Self::QuotaExceeded {
                kind: QuotaKind::Posts,
                ..
            } => 4001,
            Self::QuotaExceeded {
                kind: QuotaKind::Votes,
                ..
            } => 4002,
            Self::StoreUnavailable(_) => 3002,
            Self::Internal(_) => 3000,
        }
    }

    /// Returns the HTTP status code for this variant.
    #[must_use]
    pub const fn status_code(&self) -> StatusCode {
        match self {
            Self::Validation(_) => StatusCode::BAD_REQUEST,
            Self::Unauthenticated => StatusCode::UNAUTHORIZED,
            Self::Forbidden => StatusCode::FORBIDDEN,
            Self::PostNotFound(_) => StatusCode::NOT_FOUND,
            Self::NotPending(_) | Self::AlreadyVoted(_) => StatusCode::CONFLICT,
            Self::QuotaExceeded { .. } => StatusCode::TOO_MANY_REQUESTS,
            Self::StoreUnavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for BoardError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body = ErrorResponse {
            error: ErrorBody {
                code: self.error_code(),
                message: self.to_string(),
                details: None,
            },
        };
        let mut response = axum::Json(body).into_response();
        *response.status_mut() = status;
        response
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;

    #[test]
    fn quota_codes_distinguish_kinds() {
        let posts = BoardError::QuotaExceeded {
            kind: QuotaKind::Posts,
            limit: 30,
        };
        let votes = BoardError::QuotaExceeded {
            kind: QuotaKind::Votes,
            limit: 3000,
        };
        assert_eq!(posts.error_code(), 4001);
        assert_eq!(votes.error_code(), 4002);
        assert_eq!(posts.status_code(), StatusCode::TOO_MANY_REQUESTS);
    }

    #[test]
    fn conflict_variants_map_to_409() {
        let id = PostId::new();
        assert_eq!(
            BoardError::AlreadyVoted(id).status_code(),
            StatusCode::CONFLICT
        );
        assert_eq!(
            BoardError::NotPending(id).status_code(),
            StatusCode::CONFLICT
        );
    }

    #[test]
    fn quota_message_names_the_limit() {
        let err = BoardError::QuotaExceeded {
            kind: QuotaKind::Posts,
            limit: 30,
        };
        assert_eq!(err.to_string(), "daily post limit of 30 reached");
    }

    #[test]
    fn forbidden_is_403() {
        assert_eq!(BoardError::Forbidden.status_code(), StatusCode::FORBIDDEN);
        assert_eq!(
            BoardError::Unauthenticated.status_code(),
            StatusCode::UNAUTHORIZED
        );
    }
}
