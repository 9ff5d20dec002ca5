//! Service layer: business logic orchestration.
//!
//! [`BoardService`] coordinates posting, voting, and moderation against
//! the [`crate::store::BoardStore`] and emits events through the
//! [`crate::domain::EventBus`]. The maintenance sweeps (tally
//! reconciliation, retention purges) live in their own modules but hang
//! off the same service.

pub mod board_service;
pub mod reconcile;
pub mod retention;

pub use board_service::{BoardPolicy, BoardService};
pub use reconcile::RepairReport;
pub use retention::PurgeReport;
