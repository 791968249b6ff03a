//! Request Extractors
//!
//! Stateless bearer-token verification for protected routes. Other crates'
//! router states opt in by implementing [`AuthState`].

use axum::extract::FromRequestParts;
use axum::http::{HeaderMap, header, request::Parts};

use crate::application::config::AuthConfig;
use crate::application::token::{self, AccessClaims};
use crate::domain::value_object::user_role::UserRole;
use crate::error::AuthError;
use kernel::id::UserId;

/// Capability to hand the extractor its verification config
pub trait AuthState {
    fn auth_config(&self) -> &AuthConfig;
}

/// Extractor: a verified access token's claims.
///
/// Verification is signature + expiry only; handlers that need the full
/// user record load it themselves.
#[derive(Debug, Clone)]
pub struct AuthenticatedUser(pub AccessClaims);

impl AuthenticatedUser {
    pub fn user_id(&self) -> UserId {
        UserId::from_uuid(self.0.sub)
    }

    pub fn role(&self) -> UserRole {
        UserRole::from_id(self.0.role)
    }

    /// Reject non-admin callers
    pub fn require_admin(&self) -> Result<(), AuthError> {
        if self.role().is_admin() {
            Ok(())
        } else {
            Err(AuthError::Forbidden)
        }
    }
}

impl<S> FromRequestParts<S> for AuthenticatedUser
where
    S: AuthState + Send + Sync,
{
    type Rejection = AuthError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let token = bearer_token(&parts.headers).ok_or(AuthError::TokenInvalid)?;
        let claims = token::verify_access_token(state.auth_config(), token)?;
        Ok(Self(claims))
    }
}

/// Extract the token from an `Authorization: Bearer <token>` header
pub fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    headers
        .get(header::AUTHORIZATION)?
        .to_str()
        .ok()?
        .strip_prefix("Bearer ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    #[test]
    fn test_bearer_token_extraction() {
        let mut headers = HeaderMap::new();
        headers.insert(
            header::AUTHORIZATION,
            HeaderValue::from_static("Bearer abc123"),
        );
        assert_eq!(bearer_token(&headers), Some("abc123"));
    }

    #[test]
    fn test_bearer_token_missing_or_malformed() {
        assert_eq!(bearer_token(&HeaderMap::new()), None);

        let mut headers = HeaderMap::new();
        headers.insert(header::AUTHORIZATION, HeaderValue::from_static("abc123"));
        assert_eq!(bearer_token(&headers), None);

        let mut headers = HeaderMap::new();
        headers.insert(
            header::AUTHORIZATION,
            HeaderValue::from_static("Basic abc123"),
        );
        assert_eq!(bearer_token(&headers), None);
    }
}
