//! Current User Use Case
//!
//! Resolves a bearer access token to the user it belongs to.

use std::sync::Arc;

use crate::application::config::AuthConfig;
use crate::application::token;
use crate::domain::entity::user::User;
use crate::domain::repository::UserRepository;
use crate::error::{AuthError, AuthResult};
use kernel::id::UserId;

/// Current user use case
pub struct CurrentUserUseCase<R>
where
    R: UserRepository,
{
    repo: Arc<R>,
    config: Arc<AuthConfig>,
}

impl<R> CurrentUserUseCase<R>
where
    R: UserRepository,
{
    pub fn new(repo: Arc<R>, config: Arc<AuthConfig>) -> Self {
        Self { repo, config }
    }

    /// Verify the token and load the user.
    ///
    /// A valid signature over a vanished user still yields `TokenInvalid`:
    /// from the caller's perspective there is no session.
    pub async fn execute(&self, bearer_token: &str) -> AuthResult<User> {
        let claims = token::verify_access_token(&self.config, bearer_token)?;

        self.repo
            .find_by_id(&UserId::from_uuid(claims.sub))
            .await?
            .ok_or(AuthError::TokenInvalid)
    }
}
