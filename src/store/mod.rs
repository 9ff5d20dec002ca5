//! In-memory storage layer.
//!
//! One [`BoardStore`] owns every collection behind a single lock so that
//! multi-collection operations (quota check plus insert, ballot check
//! plus tally increment) commit atomically or not at all. The sub-store
//! types hold no synchronization of their own.

pub mod board_store;
pub mod counter_store;
pub mod login_log;
pub mod post_store;
pub mod vote_store;

pub use board_store::BoardStore;
pub use counter_store::CounterStore;
pub use login_log::LoginLog;
pub use post_store::PostStore;
pub use vote_store::VoteStore;
