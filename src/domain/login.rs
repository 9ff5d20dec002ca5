//! Login-history audit records.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::UserId;

/// Append-only audit record of one successful authentication.
///
/// Not part of the transactional core; retained for a short window
/// (default 7 days) and then purged by the same batched sweep pattern as
/// rejected posts.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginHistoryEntry {
    /// Authenticated user's uid.
    pub user_id: UserId,
    /// Email supplied by the identity provider, empty when absent.
    pub email: String,
    /// Display name, with the email local-part fallback applied.
    pub display_name: String,
    /// Identity-provider discriminator (e.g. `"google.com"`).
    pub provider: String,
    /// When the login happened.
    pub logged_in_at: DateTime<Utc>,
    /// Client user agent, empty when absent.
    pub user_agent: String,
}
