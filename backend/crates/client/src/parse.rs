//! Error-Response Parsing
//!
//! The generic parser for non-2xx responses. Tolerates anything: a JSON
//! body with an `errors` mapping (first value wins), an `errorMessage`, a
//! `title`, an empty body, or bytes that are not JSON at all. It never
//! fails; the worst case is falling back to the HTTP status text.

use serde_json::Value;

use crate::error::ApiError;

/// Classify a non-2xx response into the failure union.
///
/// Body reading happens here, once; the response is consumed.
pub async fn error_from_response(response: reqwest::Response) -> ApiError {
    let status = response.status();
    let body = response.text().await.unwrap_or_default();

    match extract_message(&body) {
        Some((message, details)) => ApiError::Domain {
            kind: kind_for_status(status.as_u16()).to_string(),
            status: status.as_u16(),
            message,
            details,
        },
        None => ApiError::Http {
            status: status.as_u16(),
            message: status_text(status),
        },
    }
}

/// Pull a display message (and optional details) out of an error body.
///
/// Precedence: `errors` mapping (first value) > `errorMessage` > `title`.
/// Returns `None` for empty, non-JSON or shape-less bodies.
fn extract_message(body: &str) -> Option<(String, Option<Value>)> {
    let value: Value = serde_json::from_str(body).ok()?;
    let map = value.as_object()?;

    let details = map.get("details").cloned();

    if let Some(errors) = map.get("errors").and_then(Value::as_object) {
        if let Some(first) = errors.values().find_map(Value::as_str) {
            return Some((first.to_string(), Some(Value::Object(errors.clone()))));
        }
    }

    if let Some(message) = map.get("errorMessage").and_then(Value::as_str) {
        return Some((message.to_string(), details));
    }

    if let Some(title) = map.get("title").and_then(Value::as_str) {
        return Some((title.to_string(), details));
    }

    None
}

/// Canonical status text, e.g. "Unauthorized"
fn status_text(status: reqwest::StatusCode) -> String {
    status
        .canonical_reason()
        .unwrap_or("Unknown error")
        .to_string()
}

/// Stable classification for a domain failure, from the status code
fn kind_for_status(status: u16) -> &'static str {
    match status {
        400 => "ValidationError",
        401 => "UnauthorizedError",
        403 => "ForbiddenError",
        404 => "NotFoundError",
        _ => "ServerError",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn response(status: u16, body: &str) -> reqwest::Response {
        let response = ::http::Response::builder()
            .status(status)
            .body(body.to_string())
            .unwrap();
        reqwest::Response::from(response)
    }

    #[tokio::test]
    async fn test_errors_mapping_first_value_wins() {
        let err = error_from_response(response(400, r#"{"errors":{"email":"taken"}}"#)).await;

        match err {
            ApiError::Domain { message, .. } => assert_eq!(message, "taken"),
            other => panic!("expected Domain, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_error_message_field() {
        let err =
            error_from_response(response(404, r#"{"errorMessage":"Post not found"}"#)).await;

        match err {
            ApiError::Domain {
                kind,
                status,
                message,
                ..
            } => {
                assert_eq!(kind, "NotFoundError");
                assert_eq!(status, 404);
                assert_eq!(message, "Post not found");
            }
            other => panic!("expected Domain, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_title_fallback() {
        let err = error_from_response(response(400, r#"{"title":"Bad Request"}"#)).await;
        assert_eq!(err.message(), "Bad Request");
    }

    #[tokio::test]
    async fn test_empty_body_falls_back_to_status_text() {
        let err = error_from_response(response(401, "")).await;

        match err {
            ApiError::Http { status, message } => {
                assert_eq!(status, 401);
                assert_eq!(message, "Unauthorized");
            }
            other => panic!("expected Http, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_malformed_json_does_not_panic() {
        let err = error_from_response(response(500, "<html>oops")).await;
        assert_eq!(err.status(), Some(500));
        assert_eq!(err.message(), "Internal Server Error");
    }

    #[tokio::test]
    async fn test_details_are_carried() {
        let body = r#"{"errorMessage":"Request validation failed","details":{"title":"must not be empty"}}"#;
        let err = error_from_response(response(400, body)).await;

        match err {
            ApiError::Domain { details, .. } => {
                assert_eq!(
                    details.unwrap()["title"],
                    serde_json::json!("must not be empty")
                );
            }
            other => panic!("expected Domain, got {other:?}"),
        }
    }
}
