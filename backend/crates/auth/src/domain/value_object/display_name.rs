//! DisplayName Value Object
//!
//! The name shown next to a user's posts.

use kernel::error::app_error::{AppError, AppResult};
use serde::{Deserialize, Serialize};
use unicode_normalization::UnicodeNormalization;

/// Maximum display name length in characters
const DISPLAY_NAME_MAX_LENGTH: usize = 64;

/// Display name value object (NFKC-normalized, trimmed)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DisplayName(String);

impl DisplayName {
    /// Create a new display name with validation
    pub fn new(name: impl Into<String>) -> AppResult<Self> {
        let name: String = name.into().nfkc().collect();
        let name = name.trim().to_string();

        if name.is_empty() {
            return Err(AppError::validation("Display name cannot be empty"));
        }

        if name.chars().count() > DISPLAY_NAME_MAX_LENGTH {
            return Err(AppError::validation(format!(
                "Display name must be at most {} characters",
                DISPLAY_NAME_MAX_LENGTH
            )));
        }

        if name.chars().any(char::is_control) {
            return Err(AppError::validation(
                "Display name contains invalid characters",
            ));
        }

        Ok(Self(name))
    }

    /// Create from database value (assumed already validated)
    pub fn from_db(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_db(self) -> String {
        self.0
    }
}

impl std::fmt::Display for DisplayName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl AsRef<str> for DisplayName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
