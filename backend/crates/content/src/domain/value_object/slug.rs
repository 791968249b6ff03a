//! Slug Value Object
//!
//! URL-safe post/tag identifier: lowercase ASCII alphanumerics separated
//! by single hyphens.

use kernel::error::app_error::{AppError, AppResult};
use serde::{Deserialize, Serialize};

/// Maximum slug length in characters
const SLUG_MAX_LENGTH: usize = 100;

/// Slug value object
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Slug(String);

impl Slug {
    /// Validate an explicit slug
    pub fn new(slug: impl Into<String>) -> AppResult<Self> {
        let slug = slug.into();

        if slug.is_empty() {
            return Err(AppError::validation("Slug cannot be empty"));
        }

        if slug.len() > SLUG_MAX_LENGTH {
            return Err(AppError::validation(format!(
                "Slug must be at most {} characters",
                SLUG_MAX_LENGTH
            )));
        }

        let valid = slug
            .chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-')
            && !slug.starts_with('-')
            && !slug.ends_with('-')
            && !slug.contains("--");

        if !valid {
            return Err(AppError::validation(
                "Slug may only contain lowercase letters, digits and single hyphens",
            ));
        }

        Ok(Self(slug))
    }

    /// Derive a slug from free text (a post title, a tag name).
    ///
    /// Returns an error when nothing slug-worthy remains, e.g. for
    /// punctuation-only input.
    pub fn from_text(text: &str) -> AppResult<Self> {
        let mut slug = String::with_capacity(text.len());
        let mut last_was_hyphen = true; // suppress leading hyphen

        for c in text.chars() {
            if c.is_ascii_alphanumeric() {
                slug.push(c.to_ascii_lowercase());
                last_was_hyphen = false;
            } else if !last_was_hyphen {
                slug.push('-');
                last_was_hyphen = true;
            }
        }

        while slug.ends_with('-') {
            slug.pop();
        }

        slug.truncate(SLUG_MAX_LENGTH);
        while slug.ends_with('-') {
            slug.pop();
        }

        if slug.is_empty() {
            return Err(AppError::validation("Cannot derive a slug from this text"));
        }

        Ok(Self(slug))
    }

    /// Create from database value (assumed already validated)
    pub fn from_db(slug: impl Into<String>) -> Self {
        Self(slug.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_db(self) -> String {
        self.0
    }
}

impl std::fmt::Display for Slug {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl AsRef<str> for Slug {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slug_valid() {
        assert!(Slug::new("hello-world").is_ok());
        assert!(Slug::new("release-2024").is_ok());
        assert!(Slug::new("a").is_ok());
    }

    #[test]
    fn test_slug_invalid() {
        assert!(Slug::new("").is_err());
        assert!(Slug::new("Hello-World").is_err());
        assert!(Slug::new("hello world").is_err());
        assert!(Slug::new("-leading").is_err());
        assert!(Slug::new("trailing-").is_err());
        assert!(Slug::new("double--hyphen").is_err());
        assert!(Slug::new("a".repeat(SLUG_MAX_LENGTH + 1)).is_err());
    }

    #[test]
    fn test_slug_from_text() {
        assert_eq!(
            Slug::from_text("Hello, World!").unwrap().as_str(),
            "hello-world"
        );
        assert_eq!(
            Slug::from_text("  Rust & Friends 2024  ").unwrap().as_str(),
            "rust-friends-2024"
        );
        assert!(Slug::from_text("!!!").is_err());
    }

    #[test]
    fn test_slug_from_text_is_valid_slug() {
        let derived = Slug::from_text("Some: Very? Odd -- Title").unwrap();
        assert!(Slug::new(derived.as_str()).is_ok());
    }
}
