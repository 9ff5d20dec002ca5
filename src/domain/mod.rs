//! Domain layer: core types, counters, ballots, and the event system.
//!
//! This module contains the board's domain model: post and user identity,
//! the daily counter records behind quota enforcement, ballot records,
//! listing sort orders, and the event bus for broadcasting state changes.

pub mod board_event;
pub mod counter;
pub mod day_key;
pub mod event_bus;
pub mod login;
pub mod post;
pub mod post_id;
pub mod sort;
pub mod user_id;
pub mod vote;

pub use board_event::BoardEvent;
pub use counter::{DailyCounter, DailyUsage};
pub use day_key::DayKey;
pub use event_bus::EventBus;
pub use login::LoginHistoryEntry;
pub use post::{Post, PostStatus, Tally};
pub use post_id::PostId;
pub use sort::{SortOrder, sort_posts};
pub use user_id::UserId;
pub use vote::{VoteKind, VoteRecord};
