//! Persistence error classification
//!
//! Translates ORM-level failures into the domain taxonomy at the
//! data-access boundary. Classification happens exactly once, here;
//! downstream code only ever sees [`AppError`].

use super::app_error::AppError;

/// Capability interface over one storage backend's error signals.
///
/// Keeps backend-specific error codes out of the mapper, and lets the
/// mapping logic be tested with a stub instead of a live database.
pub trait PersistenceErrorClassifier {
    /// Name of the violated constraint, when `err` is a unique violation.
    fn unique_violation_constraint(&self, err: &sqlx::Error) -> Option<String>;

    /// Whether `err` signals "the requested row does not exist".
    fn is_not_found(&self, err: &sqlx::Error) -> bool;
}

/// PostgreSQL classifier.
///
/// Error codes per the PostgreSQL errcodes appendix; 23505 is
/// `unique_violation`.
#[derive(Debug, Clone, Copy, Default)]
pub struct PgErrorClassifier;

impl PersistenceErrorClassifier for PgErrorClassifier {
    fn unique_violation_constraint(&self, err: &sqlx::Error) -> Option<String> {
        match err {
            sqlx::Error::Database(db_err) if db_err.code().as_deref() == Some("23505") => {
                Some(db_err.constraint().unwrap_or_default().to_string())
            }
            _ => None,
        }
    }

    fn is_not_found(&self, err: &sqlx::Error) -> bool {
        matches!(err, sqlx::Error::RowNotFound)
    }
}

/// Map a persistence error into the domain taxonomy.
///
/// Total over the known signals and pure:
/// - unique violation -> [`AppError::unique_constraint`], message naming the
///   offending column when the constraint name resolves to one, else
///   `fallback_field` (the caller's last known conflicting field), else a
///   generic "value already exists";
/// - row not found -> [`AppError::not_found`];
/// - anything else -> `None`, telling the caller to propagate the error
///   unchanged.
///
/// Designed to compose as an optional narrowing step:
///
/// ```rust,ignore
/// repo_call().await.map_err(|e| {
///     map_persistence_error(&PgErrorClassifier, &e, Some("slug"))
///         .unwrap_or_else(|| AppError::internal("Database error").with_source(e))
/// })?;
/// ```
pub fn map_persistence_error<C>(
    classifier: &C,
    err: &sqlx::Error,
    fallback_field: Option<&str>,
) -> Option<AppError>
where
    C: PersistenceErrorClassifier,
{
    if let Some(constraint) = classifier.unique_violation_constraint(err) {
        let field = resolve_constraint_field(&constraint)
            .or_else(|| fallback_field.map(str::to_string));

        let message = match field {
            Some(field) => format!("{field} already exists"),
            None => "given value already exists".to_string(),
        };

        return Some(AppError::unique_constraint(message));
    }

    if classifier.is_not_found(err) {
        return Some(AppError::not_found("Record not found"));
    }

    None
}

/// Resolve a column name from a conventional constraint name.
///
/// PostgreSQL names implicit unique constraints `<table>_<column..>_key`
/// (indexes end in `_idx`). Strips the table prefix and the suffix;
/// returns `None` when the name does not follow the convention.
fn resolve_constraint_field(constraint: &str) -> Option<String> {
    let rest = constraint
        .strip_suffix("_key")
        .or_else(|| constraint.strip_suffix("_idx"))?;

    // Drop the leading table segment
    let (_table, field) = rest.split_once('_')?;
    if field.is_empty() {
        return None;
    }

    Some(field.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::kind::ErrorKind;

    /// Stub backend: fully scripted, ignores the actual error value.
    struct StubClassifier {
        constraint: Option<&'static str>,
        not_found: bool,
    }

    impl PersistenceErrorClassifier for StubClassifier {
        fn unique_violation_constraint(&self, _err: &sqlx::Error) -> Option<String> {
            self.constraint.map(str::to_string)
        }

        fn is_not_found(&self, _err: &sqlx::Error) -> bool {
            self.not_found
        }
    }

    fn any_error() -> sqlx::Error {
        sqlx::Error::RowNotFound
    }

    #[test]
    fn test_unique_violation_names_resolved_field() {
        let classifier = StubClassifier {
            constraint: Some("posts_slug_key"),
            not_found: false,
        };

        let err = map_persistence_error(&classifier, &any_error(), None).unwrap();
        assert_eq!(err.kind(), ErrorKind::UniqueConstraint);
        assert_eq!(err.status_code(), 400);
        assert!(err.message().contains("slug"));
    }

    #[test]
    fn test_unique_violation_falls_back_to_caller_hint() {
        let classifier = StubClassifier {
            constraint: Some("some_opaque_name"),
            not_found: false,
        };

        let err = map_persistence_error(&classifier, &any_error(), Some("email")).unwrap();
        assert!(err.message().contains("email"));
    }

    #[test]
    fn test_unique_violation_generic_message_without_hints() {
        let classifier = StubClassifier {
            constraint: Some(""),
            not_found: false,
        };

        let err = map_persistence_error(&classifier, &any_error(), None).unwrap();
        assert_eq!(err.message(), "given value already exists");
    }

    #[test]
    fn test_not_found_maps_to_404() {
        let classifier = StubClassifier {
            constraint: None,
            not_found: true,
        };

        let err = map_persistence_error(&classifier, &any_error(), None).unwrap();
        assert_eq!(err.kind(), ErrorKind::NotFound);
        assert_eq!(err.status_code(), 404);
    }

    #[test]
    fn test_unknown_error_returns_none() {
        let classifier = StubClassifier {
            constraint: None,
            not_found: false,
        };

        assert!(map_persistence_error(&classifier, &any_error(), None).is_none());
    }

    #[test]
    fn test_pg_classifier_row_not_found() {
        let classifier = PgErrorClassifier;
        assert!(classifier.is_not_found(&sqlx::Error::RowNotFound));
        assert!(!classifier.is_not_found(&sqlx::Error::PoolClosed));
        assert!(
            classifier
                .unique_violation_constraint(&sqlx::Error::RowNotFound)
                .is_none()
        );
    }

    #[test]
    fn test_resolve_constraint_field() {
        assert_eq!(
            resolve_constraint_field("users_email_key").as_deref(),
            Some("email")
        );
        assert_eq!(
            resolve_constraint_field("posts_slug_key").as_deref(),
            Some("slug")
        );
        assert_eq!(
            resolve_constraint_field("tags_name_idx").as_deref(),
            Some("name")
        );
        assert_eq!(resolve_constraint_field("no_suffix_here"), None);
        assert_eq!(resolve_constraint_field("_key"), None);
    }
}
