//! Post handlers: submission and the public board listing.

use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::post;
use axum::{Json, Router};

use crate::api::dto::{
    CreatePostRequest, ListPostsParams, PaginationMeta, PostDto, PostListResponse,
};
use crate::api::principal::Principal;
use crate::app_state::AppState;
use crate::domain::SortOrder;
use crate::error::{BoardError, ErrorResponse};

/// `POST /posts` — Submit a new proposal.
///
/// # Errors
///
/// Returns [`BoardError`] on invalid input or a spent daily quota.
#[utoipa::path(
    post,
    path = "/api/v1/posts",
    tag = "Posts",
    summary = "Submit a proposal",
    description = "Creates a proposal in the pending state, awaiting moderation. Counts against the board-wide daily post quota.",
    request_body = CreatePostRequest,
    params(
        ("x-user-id" = String, Header, description = "Authenticated user id"),
    ),
    responses(
        (status = 201, description = "Proposal submitted", body = PostDto),
        (status = 400, description = "Invalid title or content", body = ErrorResponse),
        (status = 401, description = "Missing identity headers", body = ErrorResponse),
        (status = 429, description = "Daily post quota spent", body = ErrorResponse),
    )
)]
pub async fn create_post(
    State(state): State<AppState>,
    principal: Principal,
    Json(req): Json<CreatePostRequest>,
) -> Result<impl IntoResponse, BoardError> {
    let post = state
        .board_service
        .create_post(
            principal.user_id.clone(),
            principal.author_name(),
            &req.title,
            &req.content,
        )
        .await?;

    Ok((StatusCode::CREATED, Json(PostDto::from(post))))
}

/// `GET /posts` — The public board: approved posts, sorted and paginated.
///
/// # Errors
///
/// Returns [`BoardError::Validation`] on an unknown sort order.
#[utoipa::path(
    get,
    path = "/api/v1/posts",
    tag = "Posts",
    summary = "List approved posts",
    description = "Returns approved posts sorted by the requested order. Reading the board also kicks off the tally-reconciliation and retention sweeps in the background.",
    params(ListPostsParams),
    responses(
        (status = 200, description = "Paginated board listing", body = PostListResponse),
        (status = 400, description = "Unknown sort order", body = ErrorResponse),
    )
)]
pub async fn list_posts(
    State(state): State<AppState>,
    Query(params): Query<ListPostsParams>,
) -> Result<impl IntoResponse, BoardError> {
    let params = params.clamped();
    let order = parse_sort(params.sort.as_deref())?;

    // Board reads double as the maintenance trigger; both sweeps are
    // no-ops on a consistent board.
    let service = state.board_service.clone();
    tokio::spawn(async move {
        let _ = service.repair_tallies().await;
        let _ = service.purge_rejected_posts().await;
    });

    let posts = state.board_service.list_approved(order).await;

    let total = posts.len() as u32;
    let per_page = params.per_page;
    let page = params.page;
    let total_pages = if total == 0 {
        0
    } else {
        total.div_ceil(per_page)
    };

    // Offset in u64: the page and size are caller-controlled and their
    // product can exceed u32.
    let start = (u64::from(page) - 1).saturating_mul(u64::from(per_page));
    let data: Vec<PostDto> = posts
        .into_iter()
        .skip(usize::try_from(start).unwrap_or(usize::MAX))
        .take(per_page as usize)
        .map(PostDto::from)
        .collect();

    Ok(Json(PostListResponse {
        data,
        pagination: PaginationMeta {
            page,
            per_page,
            total,
            total_pages,
        },
    }))
}

/// Parses the `sort` query value, defaulting to newest-first.
fn parse_sort(value: Option<&str>) -> Result<SortOrder, BoardError> {
    match value {
        None | Some("newest") => Ok(SortOrder::Newest),
        Some("oldest") => Ok(SortOrder::Oldest),
        Some("popular") => Ok(SortOrder::Popular),
        Some("controversial") => Ok(SortOrder::Controversial),
        Some(other) => Err(BoardError::Validation(format!(
            "unknown sort order: {other}"
        ))),
    }
}

/// Post routes.
pub fn routes() -> Router<AppState> {
    Router::new().route("/posts", post(create_post).get(list_posts))
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;
    use crate::service::board_service::tests::{approved_post, make_policy, make_service};
    use axum::http::StatusCode;

    #[test]
    fn sort_defaults_to_newest() {
        assert!(matches!(parse_sort(None), Ok(SortOrder::Newest)));
    }

    #[test]
    fn unknown_sort_is_rejected() {
        assert!(matches!(
            parse_sort(Some("spiciest")),
            Err(BoardError::Validation(_))
        ));
    }

    #[tokio::test]
    async fn out_of_range_page_returns_empty_page() {
        let service = make_service(make_policy());
        let _ = approved_post(&service).await;
        let event_bus = service.event_bus().clone();
        let state = AppState {
            board_service: std::sync::Arc::new(service),
            event_bus,
        };

        // page * per_page overflows u32; the offset math must not panic.
        let params = ListPostsParams {
            sort: None,
            page: u32::MAX,
            per_page: 100,
        };
        let result = list_posts(State(state), Query(params)).await;
        let Ok(response) = result else {
            panic!("listing failed");
        };
        let response = response.into_response();
        assert_eq!(response.status(), StatusCode::OK);
    }
}
