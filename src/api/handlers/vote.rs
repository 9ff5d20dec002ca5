//! Vote handler.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::post;
use axum::{Json, Router};

use crate::api::dto::{CastVoteRequest, CastVoteResponse};
use crate::api::principal::Principal;
use crate::app_state::AppState;
use crate::domain::{PostId, VoteKind};
use crate::error::{BoardError, ErrorResponse};

/// `POST /posts/{id}/votes` — Cast a vote on an approved post.
///
/// # Errors
///
/// Returns [`BoardError`] when the post is missing or not approved, the
/// user already voted, or the daily vote quota is spent.
#[utoipa::path(
    post,
    path = "/api/v1/posts/{id}/votes",
    tag = "Votes",
    summary = "Cast a vote",
    description = "Records one immutable ballot per user per post and increments the post's tally. Counts against the board-wide daily vote quota.",
    request_body = CastVoteRequest,
    params(
        ("id" = uuid::Uuid, Path, description = "Post UUID"),
        ("x-user-id" = String, Header, description = "Authenticated user id"),
    ),
    responses(
        (status = 201, description = "Vote recorded", body = CastVoteResponse),
        (status = 400, description = "Unknown vote position or post not approved", body = ErrorResponse),
        (status = 401, description = "Missing identity headers", body = ErrorResponse),
        (status = 404, description = "Post not found", body = ErrorResponse),
        (status = 409, description = "User already voted on this post", body = ErrorResponse),
        (status = 429, description = "Daily vote quota spent", body = ErrorResponse),
    )
)]
pub async fn cast_vote(
    State(state): State<AppState>,
    Path(id): Path<uuid::Uuid>,
    principal: Principal,
    Json(req): Json<CastVoteRequest>,
) -> Result<impl IntoResponse, BoardError> {
    let kind = parse_vote(&req.vote)?;
    let post_id = PostId::from_uuid(id);

    let (record, post) = state
        .board_service
        .cast_vote(post_id, principal.user_id, kind)
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(CastVoteResponse {
            post_id: post.id.into(),
            vote: record.kind.as_str().to_string(),
            tally: post.tally.into(),
            created_at: record.created_at,
        }),
    ))
}

/// Parses the wire vote position.
fn parse_vote(value: &str) -> Result<VoteKind, BoardError> {
    match value {
        "agree" => Ok(VoteKind::Agree),
        "neutral" => Ok(VoteKind::Neutral),
        "disagree" => Ok(VoteKind::Disagree),
        other => Err(BoardError::Validation(format!(
            "unknown vote position: {other}"
        ))),
    }
}

/// Vote routes.
pub fn routes() -> Router<AppState> {
    Router::new().route("/posts/{id}/votes", post(cast_vote))
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;

    #[test]
    fn all_three_positions_parse() {
        assert!(matches!(parse_vote("agree"), Ok(VoteKind::Agree)));
        assert!(matches!(parse_vote("neutral"), Ok(VoteKind::Neutral)));
        assert!(matches!(parse_vote("disagree"), Ok(VoteKind::Disagree)));
    }

    #[test]
    fn unknown_position_is_rejected() {
        assert!(matches!(
            parse_vote("abstain"),
            Err(BoardError::Validation(_))
        ));
    }
}
