//! agora-board server entry point.
//!
//! Starts the Axum HTTP server with REST and WebSocket endpoints.

use std::sync::Arc;
use std::time::Duration;

use axum::Router;
use axum::routing::get;
use tower::ServiceBuilder;
use tower_http::cors::CorsLayer;
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;
use tracing_subscriber::EnvFilter;

use agora_board::api;
use agora_board::app_state::AppState;
use agora_board::config::BoardConfig;
use agora_board::domain::EventBus;
use agora_board::persistence::postgres::BoardEventLog;
use agora_board::persistence::run_event_writer;
use agora_board::service::{BoardPolicy, BoardService};
use agora_board::store::BoardStore;
use agora_board::ws::handler::ws_handler;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    // Load configuration
    let config = BoardConfig::from_env()?;
    tracing::info!(addr = %config.listen_addr, "starting agora-board");

    // Build domain layer
    let store = Arc::new(BoardStore::new());
    let event_bus = EventBus::new(config.event_bus_capacity);

    // Build service layer
    let board_service = Arc::new(BoardService::new(
        store,
        event_bus.clone(),
        BoardPolicy::from_config(&config),
    ));

    // Optional durable event log
    if config.persistence_enabled {
        let log = BoardEventLog::connect(&config).await?;
        tracing::info!("event log connected");

        tokio::spawn(run_event_writer(log.clone(), event_bus.subscribe()));

        let cleanup_after_days = config.persistence_cleanup_after_days;
        if cleanup_after_days > 0 {
            tokio::spawn(async move {
                let mut ticker = tokio::time::interval(std::time::Duration::from_secs(86_400));
                loop {
                    ticker.tick().await;
                    match log.delete_events_older_than(cleanup_after_days).await {
                        Ok(rows) if rows > 0 => {
                            tracing::info!(rows, "pruned event log");
                        }
                        Ok(_) => {}
                        Err(error) => tracing::warn!(%error, "event log prune failed"),
                    }
                }
            });
        }
    }

    // Build application state
    let app_state = AppState {
        board_service,
        event_bus,
    };

    // Build router
    let app = Router::new()
        .merge(api::build_router())
        .route("/ws", get(ws_handler))
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(TimeoutLayer::new(Duration::from_secs(30)))
                .layer(CorsLayer::permissive()),
        )
        .with_state(app_state);

    // Start server
    let listener = tokio::net::TcpListener::bind(config.listen_addr).await?;
    tracing::info!(addr = %config.listen_addr, "server listening");

    axum::serve(listener, app).await?;

    Ok(())
}
