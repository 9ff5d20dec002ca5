//! Shared application state injected into all Axum handlers.

use std::sync::Arc;

use crate::domain::EventBus;
use crate::service::BoardService;

/// Shared application state available to all handlers via Axum's
/// `State` extractor.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Board service for all business logic.
    pub board_service: Arc<BoardService>,
    /// Event bus for WebSocket subscriptions.
    pub event_bus: EventBus,
}
