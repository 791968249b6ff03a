//! Refresh Use Case
//!
//! Exchanges a valid refresh cookie for a new access token. This is the
//! silent-refresh bootstrap entry point: it must never require the caller
//! to already hold an access token.

use std::sync::Arc;

use crate::application::config::AuthConfig;
use crate::application::token;
use crate::domain::repository::{RefreshSessionRepository, UserRepository};
use crate::error::{AuthError, AuthResult};

/// Refresh output
pub struct RefreshOutput {
    /// Fresh access token for the response body
    pub access_token: String,
    /// Re-issued refresh cookie value, present when the session's expiry
    /// was slid forward and the browser needs the longer Max-Age
    pub renewed_refresh_token: Option<String>,
}

/// Refresh use case
pub struct RefreshUseCase<R>
where
    R: UserRepository + RefreshSessionRepository + Clone + Send + Sync + 'static,
{
    repo: Arc<R>,
    config: Arc<AuthConfig>,
}

impl<R> RefreshUseCase<R>
where
    R: UserRepository + RefreshSessionRepository + Clone + Send + Sync + 'static,
{
    pub fn new(repo: Arc<R>, config: Arc<AuthConfig>) -> Self {
        Self { repo, config }
    }

    /// Exchange the refresh cookie value for a new access token.
    ///
    /// Every invalid input — unparseable token, unknown session, expired
    /// session, vanished user — maps to the same `RefreshInvalid`.
    pub async fn execute(&self, cookie_value: &str) -> AuthResult<RefreshOutput> {
        let session_id = token::parse_refresh_token(&self.config, cookie_value)?;

        let session = self
            .repo
            .find_session(session_id)
            .await?
            .ok_or(AuthError::RefreshInvalid)?;

        if session.is_expired() {
            self.repo.delete_session(session_id).await?;
            return Err(AuthError::RefreshInvalid);
        }

        let user = self
            .repo
            .find_by_id(&session.user_id)
            .await?
            .ok_or(AuthError::RefreshInvalid)?;

        let mut session = session;
        session.touch();

        let ttl = chrono::Duration::from_std(self.config.refresh_ttl)
            .map_err(|e| AuthError::Internal(format!("Invalid refresh TTL: {e}")))?;
        let extended = session.extend_if_needed(ttl);

        // Persist the touch in the background; a failed update must not
        // block token issuance
        let session_clone = session.clone();
        let repo = self.repo.clone();
        tokio::spawn(async move {
            if let Err(e) = repo.update_session(&session_clone).await {
                tracing::warn!(error = %e, "Failed to update refresh session");
            }
        });

        let access_token = token::issue_access_token(&self.config, &user)?;

        let renewed_refresh_token =
            extended.then(|| token::sign_refresh_token(&self.config, session.session_id));

        tracing::debug!(
            session_id = %session.session_id,
            extended = extended,
            "Access token refreshed"
        );

        Ok(RefreshOutput {
            access_token,
            renewed_refresh_token,
        })
    }
}
