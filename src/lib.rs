//! # agora-board
//!
//! REST API and WebSocket service for a school-community proposal board.
//!
//! Users submit proposals, vote once per proposal (`agree | neutral |
//! disagree`), and admins moderate the pending queue. Global daily quotas
//! bound posts created and votes cast, and an idempotent reconciliation
//! sweep keeps the denormalized per-post tallies consistent with the
//! underlying ballot records.
//!
//! ## Architecture
//!
//! ```text
//! Clients (HTTP, WebSocket)
//!     │
//!     ├── REST Handlers (api/)
//!     ├── WS Handler (ws/)
//!     │
//!     ├── BoardService (service/)
//!     ├── EventBus (domain/)
//!     │
//!     ├── BoardStore (store/)
//!     │
//!     └── PostgreSQL event log (persistence/)
//! ```

pub mod api;
pub mod app_state;
pub mod config;
pub mod domain;
pub mod error;
pub mod persistence;
pub mod service;
pub mod store;
pub mod ws;
