//! HTTP Handlers

use axum::Json;
use axum::extract::State;
use axum::http::{HeaderMap, StatusCode, header};
use axum::response::IntoResponse;
use std::sync::Arc;

use platform::cookie::extract_cookie;
use platform::password::ClearTextPassword;

use crate::application::config::AuthConfig;
use crate::application::{
    CurrentUserUseCase, LoginInput, LoginUseCase, LogoutUseCase, RefreshUseCase,
};
use crate::domain::entity::user::User;
use crate::domain::repository::{RefreshSessionRepository, UserRepository};
use crate::domain::value_object::{
    display_name::DisplayName, email::Email, user_role::UserRole,
};
use crate::error::{AuthError, AuthResult};
use crate::presentation::dto::{
    CreateUserRequest, LoginRequest, LoginResponse, RefreshResponse, UserResponse,
};
use crate::presentation::extract::{AuthState, AuthenticatedUser, bearer_token};

/// Shared state for auth handlers
#[derive(Clone)]
pub struct AuthAppState<R>
where
    R: UserRepository + RefreshSessionRepository + Clone + Send + Sync + 'static,
{
    pub repo: Arc<R>,
    pub config: Arc<AuthConfig>,
}

impl<R> AuthState for AuthAppState<R>
where
    R: UserRepository + RefreshSessionRepository + Clone + Send + Sync + 'static,
{
    fn auth_config(&self) -> &AuthConfig {
        &self.config
    }
}

// ============================================================================
// Login
// ============================================================================

/// POST /api/auth/login
///
/// Success sets the refresh cookie as a side effect; the access token is
/// only ever in the response body.
pub async fn login<R>(
    State(state): State<AuthAppState<R>>,
    Json(req): Json<LoginRequest>,
) -> AuthResult<impl IntoResponse>
where
    R: UserRepository + RefreshSessionRepository + Clone + Send + Sync + 'static,
{
    let use_case = LoginUseCase::new(state.repo.clone(), state.config.clone());

    let output = use_case
        .execute(LoginInput {
            email: req.email,
            password: req.password,
        })
        .await?;

    let cookie = state
        .config
        .refresh_cookie(state.config.refresh_ttl_secs())
        .build_set_cookie(&output.refresh_token);

    Ok((
        StatusCode::OK,
        [(header::SET_COOKIE, cookie)],
        Json(LoginResponse {
            user: UserResponse::from(&output.user),
            access_token: output.access_token,
        }),
    ))
}

// ============================================================================
// Refresh
// ============================================================================

/// GET /api/auth/token
///
/// The silent-refresh entry point: authenticates with the refresh cookie
/// alone and never requires an access token.
pub async fn refresh_token<R>(
    State(state): State<AuthAppState<R>>,
    headers: HeaderMap,
) -> AuthResult<impl IntoResponse>
where
    R: UserRepository + RefreshSessionRepository + Clone + Send + Sync + 'static,
{
    let cookie_value = extract_cookie(&headers, &state.config.refresh_cookie_name)
        .ok_or(AuthError::RefreshInvalid)?;

    let use_case = RefreshUseCase::new(state.repo.clone(), state.config.clone());
    let output = use_case.execute(&cookie_value).await?;

    let body = Json(RefreshResponse {
        access_token: output.access_token,
    });

    // Re-issue the cookie only when the session's expiry moved
    match output.renewed_refresh_token {
        Some(renewed) => {
            let cookie = state
                .config
                .refresh_cookie(state.config.refresh_ttl_secs())
                .build_set_cookie(&renewed);
            Ok((StatusCode::OK, [(header::SET_COOKIE, cookie)], body).into_response())
        }
        None => Ok((StatusCode::OK, body).into_response()),
    }
}

// ============================================================================
// Logout
// ============================================================================

/// POST /api/auth/logout
///
/// Always clears the cookie. Whether the server-side refresh session is
/// also revoked depends on `AuthConfig::revoke_refresh_on_logout`.
pub async fn logout<R>(
    State(state): State<AuthAppState<R>>,
    headers: HeaderMap,
) -> AuthResult<impl IntoResponse>
where
    R: UserRepository + RefreshSessionRepository + Clone + Send + Sync + 'static,
{
    if state.config.revoke_refresh_on_logout {
        if let Some(cookie_value) = extract_cookie(&headers, &state.config.refresh_cookie_name) {
            let use_case = LogoutUseCase::new(state.repo.clone(), state.config.clone());
            // Revocation is best-effort; the cookie is cleared either way
            if let Err(e) = use_case.execute(&cookie_value).await {
                tracing::debug!(error = %e, "Refresh revocation skipped");
            }
        }
    }

    let cookie = state
        .config
        .refresh_cookie(0)
        .build_delete_cookie();

    Ok((StatusCode::NO_CONTENT, [(header::SET_COOKIE, cookie)]))
}

// ============================================================================
// Current User
// ============================================================================

/// GET /api/users/me
pub async fn me<R>(
    State(state): State<AuthAppState<R>>,
    headers: HeaderMap,
) -> AuthResult<Json<UserResponse>>
where
    R: UserRepository + RefreshSessionRepository + Clone + Send + Sync + 'static,
{
    let token = bearer_token(&headers).ok_or(AuthError::TokenInvalid)?;

    let use_case = CurrentUserUseCase::new(state.repo.clone(), state.config.clone());
    let user = use_case.execute(token).await?;

    Ok(Json(UserResponse::from(&user)))
}

// ============================================================================
// User Administration
// ============================================================================

/// GET /api/users (admin)
pub async fn list_users<R>(
    auth: AuthenticatedUser,
    State(state): State<AuthAppState<R>>,
) -> AuthResult<Json<Vec<UserResponse>>>
where
    R: UserRepository + RefreshSessionRepository + Clone + Send + Sync + 'static,
{
    auth.require_admin()?;

    let users = state.repo.list().await?;
    Ok(Json(users.iter().map(UserResponse::from).collect()))
}

/// POST /api/users (admin)
pub async fn create_user<R>(
    auth: AuthenticatedUser,
    State(state): State<AuthAppState<R>>,
    Json(req): Json<CreateUserRequest>,
) -> AuthResult<impl IntoResponse>
where
    R: UserRepository + RefreshSessionRepository + Clone + Send + Sync + 'static,
{
    auth.require_admin()?;

    let user = validate_new_user(req, state.config.pepper())?;
    state.repo.create(&user).await?;

    tracing::info!(public_id = %user.public_id, "User created");

    Ok((StatusCode::CREATED, Json(UserResponse::from(&user))))
}

/// Validate the request field by field; all issues are reported at once.
/// Runs before any persistence call.
fn validate_new_user(req: CreateUserRequest, pepper: Option<&[u8]>) -> AuthResult<User> {
    let mut issues = serde_json::Map::new();

    let email = match Email::new(&req.email) {
        Ok(email) => Some(email),
        Err(e) => {
            issues.insert("email".into(), e.message().into());
            None
        }
    };

    let password = match ClearTextPassword::new(req.password) {
        Ok(password) => Some(password),
        Err(e) => {
            issues.insert("password".into(), e.to_string().into());
            None
        }
    };

    let display_name = match DisplayName::new(&req.display_name) {
        Ok(name) => Some(name),
        Err(e) => {
            issues.insert("displayName".into(), e.message().into());
            None
        }
    };

    let role = match req.role.as_deref() {
        None => Some(UserRole::default()),
        Some(code) => match UserRole::from_code(code) {
            Some(role) => Some(role),
            None => {
                issues.insert("role".into(), "must be \"author\" or \"admin\"".into());
                None
            }
        },
    };

    if !issues.is_empty() {
        return Err(AuthError::Validation(serde_json::Value::Object(issues)));
    }

    // All Somes by construction once issues is empty
    let (Some(email), Some(password), Some(display_name), Some(role)) =
        (email, password, display_name, role)
    else {
        return Err(AuthError::Internal("Validation invariant broken".into()));
    };

    let password_hash = password
        .hash(pepper)
        .map_err(|e| AuthError::Internal(format!("Password hashing failed: {e}")))?;

    Ok(User::new(email, password_hash, display_name, role))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_new_user_collects_all_issues() {
        let req = CreateUserRequest {
            email: "not-an-email".to_string(),
            password: "short".to_string(),
            display_name: "".to_string(),
            role: Some("superuser".to_string()),
        };

        let err = validate_new_user(req, None).unwrap_err();
        let AuthError::Validation(details) = err else {
            panic!("expected validation error");
        };

        let details = details.as_object().unwrap();
        assert!(details.contains_key("email"));
        assert!(details.contains_key("password"));
        assert!(details.contains_key("displayName"));
        assert!(details.contains_key("role"));
    }

    #[test]
    fn test_validate_new_user_defaults_to_author() {
        let req = CreateUserRequest {
            email: "writer@example.com".to_string(),
            password: "correct horse battery".to_string(),
            display_name: "Writer".to_string(),
            role: None,
        };

        let user = validate_new_user(req, None).unwrap();
        assert_eq!(user.role, UserRole::Author);
    }
}
