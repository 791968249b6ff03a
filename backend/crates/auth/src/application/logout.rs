//! Logout Use Case
//!
//! Revokes the server-side refresh session. Only invoked when
//! `AuthConfig::revoke_refresh_on_logout` is set; otherwise logout is a
//! purely client-local operation and the server just clears the cookie.

use std::sync::Arc;

use crate::application::config::AuthConfig;
use crate::application::token;
use crate::domain::repository::RefreshSessionRepository;
use crate::error::AuthResult;

/// Logout use case
pub struct LogoutUseCase<R>
where
    R: RefreshSessionRepository,
{
    repo: Arc<R>,
    config: Arc<AuthConfig>,
}

impl<R> LogoutUseCase<R>
where
    R: RefreshSessionRepository,
{
    pub fn new(repo: Arc<R>, config: Arc<AuthConfig>) -> Self {
        Self { repo, config }
    }

    /// Revoke the refresh session referenced by the cookie value
    pub async fn execute(&self, cookie_value: &str) -> AuthResult<()> {
        let session_id = token::parse_refresh_token(&self.config, cookie_value)?;
        self.repo.delete_session(session_id).await?;

        tracing::info!(session_id = %session_id, "Refresh session revoked");
        Ok(())
    }
}
