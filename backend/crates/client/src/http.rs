//! Authenticated Fetch
//!
//! A pass-through helper over `reqwest`: attaches the bearer token, merges
//! nothing away from the caller, interprets nothing. Non-2xx responses are
//! returned as-is; only transport-level failures surface as errors. No
//! retries, no backoff, no special handling of 401s.

use reqwest::{Method, RequestBuilder, Response};

use crate::error::ApiError;

/// HTTP client bound to one API origin.
///
/// Built with a cookie store so the HTTP-only refresh cookie travels with
/// refresh requests without the caller ever seeing it.
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
}

impl ApiClient {
    /// Create a client for `base_url` (origin, no trailing slash)
    pub fn new(base_url: impl Into<String>) -> Result<Self, ApiError> {
        let http = reqwest::Client::builder().cookie_store(true).build()?;

        let mut base_url = base_url.into();
        while base_url.ends_with('/') {
            base_url.pop();
        }

        Ok(Self { http, base_url })
    }

    /// Build a request for `path`, attaching `Authorization: Bearer <token>`
    /// when a token is given. The caller finishes the builder (body, query)
    /// and decides what the response means.
    pub fn request(&self, method: Method, path: &str, token: Option<&str>) -> RequestBuilder {
        let url = format!("{}{}", self.base_url, path);
        let builder = self.http.request(method, url);

        match token {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        }
    }

    /// Send the request. Fails only on network-level errors; any response,
    /// success or not, is handed back untouched.
    pub async fn execute(&self, builder: RequestBuilder) -> Result<Response, ApiError> {
        builder.send().await.map_err(ApiError::Network)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_url_trailing_slash_stripped() {
        let client = ApiClient::new("http://localhost:8080/").unwrap();
        let request = client
            .request(Method::GET, "/api/posts", None)
            .build()
            .unwrap();
        assert_eq!(request.url().as_str(), "http://localhost:8080/api/posts");
    }

    #[test]
    fn test_bearer_token_attached() {
        let client = ApiClient::new("http://localhost:8080").unwrap();
        let request = client
            .request(Method::GET, "/api/users/me", Some("token123"))
            .build()
            .unwrap();

        let auth = request.headers().get("authorization").unwrap();
        assert_eq!(auth, "Bearer token123");
    }

    #[test]
    fn test_no_token_no_header() {
        let client = ApiClient::new("http://localhost:8080").unwrap();
        let request = client
            .request(Method::GET, "/api/posts", None)
            .build()
            .unwrap();
        assert!(request.headers().get("authorization").is_none());
    }
}
