//! Application Configuration
//!
//! Configuration for the Auth application layer.

use std::time::Duration;

/// Re-export SameSite from platform
pub use platform::cookie::SameSite;

use platform::cookie::CookieConfig;

/// Auth application configuration
#[derive(Debug, Clone)]
pub struct AuthConfig {
    /// Refresh cookie name
    pub refresh_cookie_name: String,
    /// Path the refresh cookie is scoped to; browsers only send it there
    pub refresh_cookie_path: String,
    /// Secret key for HMAC token signing (32 bytes)
    pub token_secret: [u8; 32],
    /// Access token TTL (10 minutes)
    pub access_token_ttl: Duration,
    /// Refresh session TTL (1 week)
    pub refresh_ttl: Duration,
    /// Whether to require Secure cookie
    pub cookie_secure: bool,
    /// SameSite policy
    pub cookie_same_site: SameSite,
    /// Whether logout also revokes the server-side refresh session.
    /// The observed client behavior only discards local state; both
    /// paths are supported and this flag selects between them.
    pub revoke_refresh_on_logout: bool,
    /// Password pepper (optional, application-wide secret)
    pub password_pepper: Option<Vec<u8>>,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            refresh_cookie_name: "refresh_token".to_string(),
            refresh_cookie_path: "/api/auth/token".to_string(),
            token_secret: [0u8; 32],
            access_token_ttl: Duration::from_secs(10 * 60),
            refresh_ttl: Duration::from_secs(7 * 24 * 3600),
            cookie_secure: true,
            cookie_same_site: SameSite::Lax,
            revoke_refresh_on_logout: false,
            password_pepper: None,
        }
    }
}

impl AuthConfig {
    /// Create config with a random token secret (for development)
    pub fn with_random_secret() -> Self {
        use rand::RngCore;
        let mut secret = [0u8; 32];
        rand::rng().fill_bytes(&mut secret);
        Self {
            token_secret: secret,
            ..Default::default()
        }
    }

    /// Create config for development (insecure cookie)
    pub fn development() -> Self {
        Self {
            cookie_secure: false,
            ..Self::with_random_secret()
        }
    }

    /// Cookie configuration for issuing the refresh credential
    pub fn refresh_cookie(&self, max_age_secs: i64) -> CookieConfig {
        CookieConfig {
            name: self.refresh_cookie_name.clone(),
            secure: self.cookie_secure,
            http_only: true,
            same_site: self.cookie_same_site,
            path: self.refresh_cookie_path.clone(),
            max_age_secs: Some(max_age_secs),
        }
    }

    /// Access token TTL in milliseconds
    pub fn access_token_ttl_ms(&self) -> i64 {
        self.access_token_ttl.as_millis() as i64
    }

    /// Refresh TTL in seconds
    pub fn refresh_ttl_secs(&self) -> i64 {
        self.refresh_ttl.as_secs() as i64
    }

    /// Get password pepper as slice
    pub fn pepper(&self) -> Option<&[u8]> {
        self.password_pepper.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = AuthConfig::default();
        assert_eq!(config.refresh_cookie_name, "refresh_token");
        assert_eq!(config.refresh_cookie_path, "/api/auth/token");
        assert_eq!(config.access_token_ttl, Duration::from_secs(600));
        assert_eq!(config.refresh_ttl, Duration::from_secs(7 * 24 * 3600));
        assert!(config.cookie_secure);
        assert!(!config.revoke_refresh_on_logout);
    }

    #[test]
    fn test_with_random_secret() {
        let config1 = AuthConfig::with_random_secret();
        let config2 = AuthConfig::with_random_secret();

        assert_ne!(config1.token_secret, config2.token_secret);
        assert!(config1.token_secret.iter().any(|&b| b != 0));
    }

    #[test]
    fn test_development_config() {
        let config = AuthConfig::development();
        assert!(!config.cookie_secure);
        assert!(config.token_secret.iter().any(|&b| b != 0));
    }

    #[test]
    fn test_refresh_cookie_is_scoped_and_http_only() {
        let config = AuthConfig::development();
        let cookie = config.refresh_cookie(3600);
        assert_eq!(cookie.path, "/api/auth/token");
        assert!(cookie.http_only);
        assert_eq!(cookie.max_age_secs, Some(3600));
    }
}
