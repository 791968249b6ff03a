//! Login Use Case
//!
//! Authenticates a user, issues the access token and opens a refresh session.

use std::sync::Arc;

use crate::application::config::AuthConfig;
use crate::application::token;
use crate::domain::entity::refresh_session::RefreshSession;
use crate::domain::entity::user::User;
use crate::domain::repository::{RefreshSessionRepository, UserRepository};
use crate::domain::value_object::email::Email;
use crate::error::{AuthError, AuthResult};
use platform::password::ClearTextPassword;

/// Login input
pub struct LoginInput {
    /// Email address
    pub email: String,
    /// Password
    pub password: String,
}

/// Login output
pub struct LoginOutput {
    /// The authenticated user
    pub user: User,
    /// Access token for the response body
    pub access_token: String,
    /// Refresh token for the cookie
    pub refresh_token: String,
}

/// Login use case
pub struct LoginUseCase<R>
where
    R: UserRepository + RefreshSessionRepository,
{
    repo: Arc<R>,
    config: Arc<AuthConfig>,
}

impl<R> LoginUseCase<R>
where
    R: UserRepository + RefreshSessionRepository,
{
    pub fn new(repo: Arc<R>, config: Arc<AuthConfig>) -> Self {
        Self { repo, config }
    }

    pub async fn execute(&self, input: LoginInput) -> AuthResult<LoginOutput> {
        // Every failure below is the same InvalidCredentials: the response
        // must not reveal whether the email exists.
        let email = Email::new(&input.email).map_err(|_| AuthError::InvalidCredentials)?;

        let user = self
            .repo
            .find_by_email(&email)
            .await?
            .ok_or(AuthError::InvalidCredentials)?;

        let password =
            ClearTextPassword::new(input.password).map_err(|_| AuthError::InvalidCredentials)?;

        if !user.password_hash.verify(&password, self.config.pepper()) {
            return Err(AuthError::InvalidCredentials);
        }

        // Open the refresh session
        let ttl = chrono::Duration::from_std(self.config.refresh_ttl)
            .map_err(|e| AuthError::Internal(format!("Invalid refresh TTL: {e}")))?;
        let session = RefreshSession::new(user.user_id, ttl);
        self.repo.create_session(&session).await?;

        let access_token = token::issue_access_token(&self.config, &user)?;
        let refresh_token = token::sign_refresh_token(&self.config, session.session_id);

        tracing::info!(
            public_id = %user.public_id,
            session_id = %session.session_id,
            "User signed in"
        );

        Ok(LoginOutput {
            user,
            access_token,
            refresh_token,
        })
    }
}
