//! Data Transfer Objects for REST request/response serialization.
//!
//! Domain types stay out of the wire format: DTOs flatten ids to plain
//! strings and UUIDs so the schema is stable even when internals move.

pub mod common_dto;
pub mod moderation_dto;
pub mod post_dto;
pub mod session_dto;
pub mod vote_dto;

pub use common_dto::*;
pub use moderation_dto::*;
pub use post_dto::*;
pub use session_dto::*;
pub use vote_dto::*;
