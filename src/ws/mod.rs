//! WebSocket layer: connection handling, message routing, subscriptions.
//!
//! The WebSocket endpoint at `/ws` streams board events (submissions,
//! moderation decisions, votes with their resulting tallies) to clients
//! filtered by per-connection post subscriptions.

pub mod connection;
pub mod handler;
pub mod messages;
pub mod subscription;
