//! Session handlers: login recording and quota introspection.

use axum::extract::{Query, State};
use axum::http::HeaderMap;
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::{Json, Router};
use chrono::{NaiveDate, Utc};

use crate::api::dto::{SessionRequest, SessionResponse, UsageParams, UsageResponse};
use crate::api::principal::Principal;
use crate::app_state::AppState;
use crate::domain::{DayKey, LoginHistoryEntry};
use crate::error::{BoardError, ErrorResponse};

/// `POST /session` — Record a successful login.
///
/// # Errors
///
/// Returns [`BoardError::Unauthenticated`] when the identity headers are
/// missing.
#[utoipa::path(
    post,
    path = "/api/v1/session",
    tag = "Session",
    summary = "Record a login",
    description = "Appends an entry to the login history and reports the caller's moderation rights. Also kicks off the login-history retention sweep in the background.",
    request_body = SessionRequest,
    params(
        ("x-user-id" = String, Header, description = "Authenticated user id"),
    ),
    responses(
        (status = 200, description = "Login recorded", body = SessionResponse),
        (status = 401, description = "Missing identity headers", body = ErrorResponse),
    )
)]
pub async fn create_session(
    State(state): State<AppState>,
    headers: HeaderMap,
    principal: Principal,
    body: Option<Json<SessionRequest>>,
) -> Result<impl IntoResponse, BoardError> {
    let provider = body
        .and_then(|Json(req)| req.provider)
        .unwrap_or_else(|| "google.com".to_string());
    let user_agent = headers
        .get("user-agent")
        .and_then(|value| value.to_str().ok())
        .unwrap_or_default()
        .to_string();

    let display_name = principal.author_name();
    state
        .board_service
        .record_login(LoginHistoryEntry {
            user_id: principal.user_id.clone(),
            email: principal.email.clone().unwrap_or_default(),
            display_name: display_name.clone(),
            provider,
            logged_in_at: Utc::now(),
            user_agent,
        })
        .await;

    let service = state.board_service.clone();
    tokio::spawn(async move {
        let _ = service.purge_login_history().await;
    });

    Ok(Json(SessionResponse {
        is_admin: state.board_service.is_admin(&principal.user_id),
        user_id: principal.user_id.to_string(),
        display_name,
    }))
}

/// `GET /usage` — A day's quota consumption, defaulting to today.
///
/// # Errors
///
/// Returns [`BoardError::Validation`] on a malformed `date` value.
#[utoipa::path(
    get,
    path = "/api/v1/usage",
    tag = "Session",
    summary = "Daily quota usage",
    description = "Returns the board-wide post and vote counts for the requested day (default today) next to the configured daily limits.",
    params(UsageParams),
    responses(
        (status = 200, description = "Quota usage", body = UsageResponse),
        (status = 400, description = "Malformed date", body = ErrorResponse),
    )
)]
pub async fn get_usage(
    State(state): State<AppState>,
    Query(params): Query<UsageParams>,
) -> Result<impl IntoResponse, BoardError> {
    let day = parse_day(params.date.as_deref())?;
    Ok(Json(UsageResponse::from(
        state.board_service.daily_usage(day).await,
    )))
}

/// Parses the `date` query value, defaulting to today.
fn parse_day(value: Option<&str>) -> Result<DayKey, BoardError> {
    match value {
        None => Ok(DayKey::today()),
        Some(raw) => NaiveDate::parse_from_str(raw, "%Y-%m-%d")
            .map(DayKey::from_date)
            .map_err(|_| BoardError::Validation(format!("invalid date: {raw}"))),
    }
}

/// Session routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/session", post(create_session))
        .route("/usage", get(get_usage))
}
