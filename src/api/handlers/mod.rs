//! REST endpoint handlers organized by resource.

pub mod moderation;
pub mod post;
pub mod session;
pub mod system;
pub mod vote;

use axum::Router;

use crate::app_state::AppState;

/// Composes all resource routes under `/api/v1`.
pub fn routes() -> Router<AppState> {
    Router::new()
        .merge(post::routes())
        .merge(vote::routes())
        .merge(moderation::routes())
        .merge(session::routes())
}
