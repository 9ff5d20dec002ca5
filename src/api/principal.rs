//! Authenticated caller identity, taken from trusted edge headers.
//!
//! The service sits behind an authenticating proxy that verifies the
//! user's identity and forwards it in `x-user-id`, `x-user-name`, and
//! `x-user-email` headers. The core trusts those headers and never
//! verifies credentials itself; authorization (the admin check) happens
//! in the service layer against the configured admin set.

use axum::extract::FromRequestParts;
use axum::http::HeaderMap;
use axum::http::request::Parts;

use crate::domain::UserId;
use crate::error::BoardError;

/// The identity of the caller on an authenticated request.
#[derive(Debug, Clone)]
pub struct Principal {
    /// Stable user id assigned by the identity provider.
    pub user_id: UserId,
    /// Display name, when the proxy forwarded one.
    pub display_name: Option<String>,
    /// Email address, when the proxy forwarded one.
    pub email: Option<String>,
}

impl Principal {
    /// Resolves the name to stamp on authored content: the display name,
    /// falling back to the email local part, falling back to
    /// `"anonymous"`.
    #[must_use]
    pub fn author_name(&self) -> String {
        if let Some(name) = &self.display_name
            && !name.trim().is_empty()
        {
            return name.trim().to_string();
        }
        if let Some(email) = &self.email
            && let Some((local, _)) = email.split_once('@')
            && !local.is_empty()
        {
            return local.to_string();
        }
        "anonymous".to_string()
    }
}

fn header_string(headers: &HeaderMap, name: &str) -> Option<String> {
    headers
        .get(name)
        .and_then(|value| value.to_str().ok())
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .map(str::to_string)
}

impl<S> FromRequestParts<S> for Principal
where
    S: Send + Sync,
{
    type Rejection = BoardError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let user_id = header_string(&parts.headers, "x-user-id")
            .map(UserId::new)
            .ok_or(BoardError::Unauthenticated)?;

        Ok(Self {
            user_id,
            display_name: header_string(&parts.headers, "x-user-name"),
            email: header_string(&parts.headers, "x-user-email"),
        })
    }
}
