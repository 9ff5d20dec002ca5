//! Moderation handlers: the admin queue and approve/reject decisions.

use axum::extract::{Path, Query, State};
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::{Json, Router};

use crate::api::dto::{PaginationParams, PendingListResponse, PostDto, RejectRequest};
use crate::api::principal::Principal;
use crate::app_state::AppState;
use crate::domain::PostId;
use crate::error::{BoardError, ErrorResponse};

/// `GET /admin/posts/pending` — The moderation queue, oldest first.
///
/// # Errors
///
/// Returns [`BoardError::Forbidden`] unless the caller is an admin.
#[utoipa::path(
    get,
    path = "/api/v1/admin/posts/pending",
    tag = "Moderation",
    summary = "List pending posts",
    description = "Returns posts awaiting moderation, oldest submissions first.",
    params(
        PaginationParams,
        ("x-user-id" = String, Header, description = "Authenticated admin user id"),
    ),
    responses(
        (status = 200, description = "Moderation queue", body = PendingListResponse),
        (status = 401, description = "Missing identity headers", body = ErrorResponse),
        (status = 403, description = "Caller is not an admin", body = ErrorResponse),
    )
)]
pub async fn list_pending(
    State(state): State<AppState>,
    Query(params): Query<PaginationParams>,
    principal: Principal,
) -> Result<impl IntoResponse, BoardError> {
    let params = params.clamped();
    let posts = state.board_service.list_pending(&principal.user_id).await?;

    let total = posts.len() as u32;
    // Offset in u64: the page and size are caller-controlled and their
    // product can exceed u32.
    let start = (u64::from(params.page) - 1).saturating_mul(u64::from(params.per_page));
    let data: Vec<PostDto> = posts
        .into_iter()
        .skip(usize::try_from(start).unwrap_or(usize::MAX))
        .take(params.per_page as usize)
        .map(PostDto::from)
        .collect();

    Ok(Json(PendingListResponse { data, total }))
}

/// `POST /admin/posts/{id}/approve` — Publish a pending post.
///
/// # Errors
///
/// Returns [`BoardError`] when the caller is not an admin, the post is
/// missing, or it was already moderated.
#[utoipa::path(
    post,
    path = "/api/v1/admin/posts/{id}/approve",
    tag = "Moderation",
    summary = "Approve a pending post",
    description = "Moves a pending post to the public board. Moderation decisions are final; an already-moderated post returns 409.",
    params(
        ("id" = uuid::Uuid, Path, description = "Post UUID"),
        ("x-user-id" = String, Header, description = "Authenticated admin user id"),
    ),
    responses(
        (status = 200, description = "Post approved", body = PostDto),
        (status = 401, description = "Missing identity headers", body = ErrorResponse),
        (status = 403, description = "Caller is not an admin", body = ErrorResponse),
        (status = 404, description = "Post not found", body = ErrorResponse),
        (status = 409, description = "Post already moderated", body = ErrorResponse),
    )
)]
pub async fn approve_post(
    State(state): State<AppState>,
    Path(id): Path<uuid::Uuid>,
    principal: Principal,
) -> Result<impl IntoResponse, BoardError> {
    let post = state
        .board_service
        .approve_post(PostId::from_uuid(id), &principal.user_id)
        .await?;
    Ok(Json(PostDto::from(post)))
}

/// `POST /admin/posts/{id}/reject` — Reject a pending post.
///
/// # Errors
///
/// Same conditions as [`approve_post`].
#[utoipa::path(
    post,
    path = "/api/v1/admin/posts/{id}/reject",
    tag = "Moderation",
    summary = "Reject a pending post",
    description = "Rejects a pending post with an optional reason. Rejected posts are purged after the retention window.",
    request_body = RejectRequest,
    params(
        ("id" = uuid::Uuid, Path, description = "Post UUID"),
        ("x-user-id" = String, Header, description = "Authenticated admin user id"),
    ),
    responses(
        (status = 200, description = "Post rejected", body = PostDto),
        (status = 401, description = "Missing identity headers", body = ErrorResponse),
        (status = 403, description = "Caller is not an admin", body = ErrorResponse),
        (status = 404, description = "Post not found", body = ErrorResponse),
        (status = 409, description = "Post already moderated", body = ErrorResponse),
    )
)]
pub async fn reject_post(
    State(state): State<AppState>,
    Path(id): Path<uuid::Uuid>,
    principal: Principal,
    body: Option<Json<RejectRequest>>,
) -> Result<impl IntoResponse, BoardError> {
    let reason = body.and_then(|Json(req)| req.reason);
    let post = state
        .board_service
        .reject_post(PostId::from_uuid(id), &principal.user_id, reason)
        .await?;
    Ok(Json(PostDto::from(post)))
}

/// Moderation routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/admin/posts/pending", get(list_pending))
        .route("/admin/posts/{id}/approve", post(approve_post))
        .route("/admin/posts/{id}/reject", post(reject_post))
}
