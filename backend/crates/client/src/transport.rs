//! Auth Transport
//!
//! The four wire operations the session core needs, behind a trait so the
//! state machine can be exercised against a stub.

use reqwest::Method;

use crate::dto::{CurrentUser, LoginPayload, LoginSuccess, RefreshSuccess};
use crate::error::ApiError;
use crate::http::ApiClient;
use crate::parse::error_from_response;

/// Auth wire operations
#[trait_variant::make(AuthTransport: Send)]
pub trait LocalAuthTransport {
    /// GET /api/auth/token - exchange the refresh cookie for an access
    /// token. Requires no access token; this is the bootstrap entry point.
    async fn refresh(&self) -> Result<String, ApiError>;

    /// GET /api/users/me with a bearer token
    async fn current_user(&self, access_token: &str) -> Result<CurrentUser, ApiError>;

    /// POST /api/auth/login; success also sets the refresh cookie,
    /// invisibly to this layer
    async fn login(&self, email: &str, password: &str) -> Result<LoginSuccess, ApiError>;

    /// POST /api/auth/logout - server-side refresh revocation
    async fn logout(&self) -> Result<(), ApiError>;
}

/// The real transport over [`ApiClient`]
#[derive(Debug, Clone)]
pub struct HttpAuthTransport {
    client: ApiClient,
}

impl HttpAuthTransport {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }
}

impl AuthTransport for HttpAuthTransport {
    async fn refresh(&self) -> Result<String, ApiError> {
        let request = self.client.request(Method::GET, "/api/auth/token", None);
        let response = self.client.execute(request).await?;

        if !response.status().is_success() {
            return Err(error_from_response(response).await);
        }

        let body: RefreshSuccess = response.json().await?;
        Ok(body.access_token)
    }

    async fn current_user(&self, access_token: &str) -> Result<CurrentUser, ApiError> {
        let request = self
            .client
            .request(Method::GET, "/api/users/me", Some(access_token));
        let response = self.client.execute(request).await?;

        if !response.status().is_success() {
            return Err(error_from_response(response).await);
        }

        Ok(response.json().await?)
    }

    async fn login(&self, email: &str, password: &str) -> Result<LoginSuccess, ApiError> {
        let request = self
            .client
            .request(Method::POST, "/api/auth/login", None)
            .json(&LoginPayload { email, password });
        let response = self.client.execute(request).await?;

        if !response.status().is_success() {
            return Err(error_from_response(response).await);
        }

        Ok(response.json().await?)
    }

    async fn logout(&self) -> Result<(), ApiError> {
        let request = self.client.request(Method::POST, "/api/auth/logout", None);
        let response = self.client.execute(request).await?;

        if !response.status().is_success() {
            return Err(error_from_response(response).await);
        }

        Ok(())
    }
}
