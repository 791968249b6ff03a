//! Auth Routers

use axum::{
    Router,
    routing::{get, post},
};
use std::sync::Arc;

use crate::application::config::AuthConfig;
use crate::domain::repository::{RefreshSessionRepository, UserRepository};
use crate::infra::postgres::PgAuthRepository;
use crate::presentation::handlers::{self, AuthAppState};

/// Create the Auth router with PostgreSQL repository
pub fn auth_router(repo: PgAuthRepository, config: AuthConfig) -> Router {
    auth_router_generic(repo, config)
}

/// Create a generic Auth router for any repository implementation
pub fn auth_router_generic<R>(repo: R, config: AuthConfig) -> Router
where
    R: UserRepository + RefreshSessionRepository + Clone + Send + Sync + 'static,
{
    let state = AuthAppState {
        repo: Arc::new(repo),
        config: Arc::new(config),
    };

    Router::new()
        .route("/login", post(handlers::login::<R>))
        .route("/token", get(handlers::refresh_token::<R>))
        .route("/logout", post(handlers::logout::<R>))
        .with_state(state)
}

/// Create the Users router with PostgreSQL repository
pub fn users_router(repo: PgAuthRepository, config: AuthConfig) -> Router {
    users_router_generic(repo, config)
}

/// Create a generic Users router for any repository implementation
pub fn users_router_generic<R>(repo: R, config: AuthConfig) -> Router
where
    R: UserRepository + RefreshSessionRepository + Clone + Send + Sync + 'static,
{
    let state = AuthAppState {
        repo: Arc::new(repo),
        config: Arc::new(config),
    };

    Router::new()
        .route("/me", get(handlers::me::<R>))
        .route("/", get(handlers::list_users::<R>))
        .route("/", post(handlers::create_user::<R>))
        .with_state(state)
}
