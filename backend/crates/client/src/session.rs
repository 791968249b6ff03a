//! Session Bootstrap / Auth Context
//!
//! The one-per-page-lifetime session state machine:
//!
//! ```text
//! Initializing -> Authenticated(user, token) | Unauthenticated
//! ```
//!
//! `Initializing` is the only initial state; once left it is never
//! re-entered. The bootstrap sequence is guarded by a cancellation token:
//! after every awaited step it re-checks the token and writes no state
//! once the owner has been torn down.

use tokio_util::sync::CancellationToken;

use crate::dto::CurrentUser;
use crate::error::ApiError;
use crate::transport::AuthTransport;

/// Observable session state
#[derive(Debug, Clone)]
pub enum SessionState {
    /// Bootstrap has not finished; render a blocking placeholder
    Initializing,
    /// A valid access token fetched this user in this lifetime
    Authenticated {
        user: CurrentUser,
        access_token: String,
    },
    /// No session; the login form is the way forward
    Unauthenticated,
}

impl SessionState {
    pub fn is_initializing(&self) -> bool {
        matches!(self, SessionState::Initializing)
    }

    pub fn is_authenticated(&self) -> bool {
        matches!(self, SessionState::Authenticated { .. })
    }
}

/// Session behavior knobs
#[derive(Debug, Clone, Default)]
pub struct SessionConfig {
    /// Also call the server's logout endpoint on [`AuthContext::logout`],
    /// revoking the refresh credential. Off by default: the observed
    /// behavior is client-local logout only.
    pub revoke_on_logout: bool,
}

/// The capability surface handed to the rest of the application:
/// `user()`, `access_token()`, `login()`, `logout()`. State is read-only
/// to consumers except through the last two.
pub struct AuthContext<T>
where
    T: AuthTransport,
{
    transport: T,
    config: SessionConfig,
    state: SessionState,
    bootstrapped: bool,
}

impl<T> AuthContext<T>
where
    T: AuthTransport,
{
    pub fn new(transport: T) -> Self {
        Self::with_config(transport, SessionConfig::default())
    }

    pub fn with_config(transport: T, config: SessionConfig) -> Self {
        Self {
            transport,
            config,
            state: SessionState::Initializing,
            bootstrapped: false,
        }
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    pub fn user(&self) -> Option<&CurrentUser> {
        match &self.state {
            SessionState::Authenticated { user, .. } => Some(user),
            _ => None,
        }
    }

    pub fn access_token(&self) -> Option<&str> {
        match &self.state {
            SessionState::Authenticated { access_token, .. } => Some(access_token),
            _ => None,
        }
    }

    /// Silent refresh, executed exactly once per context lifetime.
    ///
    /// 1. Exchange the refresh cookie for an access token. Any failure
    ///    means `Unauthenticated`; a routine 401 is an expected first-visit
    ///    outcome and logged at debug, transport failures at warn.
    /// 2. Fetch the current user with the token.
    /// 3. Success: `Authenticated`. Failure: `Unauthenticated`, and the
    ///    freshly obtained token is discarded - a token without a user is
    ///    not a session.
    ///
    /// `cancel` is re-checked after every await; once cancelled, no state
    /// is written. A second call is a no-op.
    pub async fn bootstrap(&mut self, cancel: &CancellationToken) {
        if self.bootstrapped {
            return;
        }
        self.bootstrapped = true;

        let access_token = match self.transport.refresh().await {
            Ok(token) => {
                if cancel.is_cancelled() {
                    return;
                }
                token
            }
            Err(err) => {
                if cancel.is_cancelled() {
                    return;
                }
                if err.is_auth_failure() {
                    tracing::debug!("No session to restore");
                } else {
                    tracing::warn!(error = %err, "Session refresh failed");
                }
                self.state = SessionState::Unauthenticated;
                return;
            }
        };

        match self.transport.current_user(&access_token).await {
            Ok(user) => {
                if cancel.is_cancelled() {
                    return;
                }
                self.state = SessionState::Authenticated { user, access_token };
            }
            Err(err) => {
                if cancel.is_cancelled() {
                    return;
                }
                tracing::debug!(error = %err, "User fetch failed, discarding token");
                self.state = SessionState::Unauthenticated;
            }
        }
    }

    /// Log in and replace the session state.
    ///
    /// On failure the state is left exactly as it was - a failed login
    /// attempt must not log anyone out. User-triggered, so not subject to
    /// the bootstrap cancellation token.
    pub async fn login(&mut self, email: &str, password: &str) -> Result<(), ApiError> {
        let success = self.transport.login(email, password).await?;

        self.state = SessionState::Authenticated {
            user: success.user,
            access_token: success.access_token,
        };

        Ok(())
    }

    /// Drop the in-memory session. Idempotent.
    ///
    /// When `revoke_on_logout` is set, the server's logout endpoint is
    /// called best-effort afterwards; its failure cannot un-log-out the
    /// client.
    pub async fn logout(&mut self) {
        self.state = SessionState::Unauthenticated;

        if self.config.revoke_on_logout {
            if let Err(err) = self.transport.logout().await {
                tracing::debug!(error = %err, "Server logout failed, local state already cleared");
            }
        }
    }
}
