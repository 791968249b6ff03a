//! Content Routers

use axum::{
    Router,
    routing::{delete, get, post, put},
};
use std::sync::Arc;

use auth::config::AuthConfig;

use crate::domain::repository::{CommentRepository, PostRepository, TagRepository};
use crate::infra::postgres::PgContentRepository;
use crate::presentation::handlers::{self, ContentAppState};

/// Create the Posts router (includes per-post comments) with PostgreSQL
pub fn posts_router(repo: PgContentRepository, config: AuthConfig) -> Router {
    posts_router_generic(repo, config)
}

/// Create a generic Posts router for any repository implementation
pub fn posts_router_generic<R>(repo: R, config: AuthConfig) -> Router
where
    R: PostRepository + TagRepository + CommentRepository + Clone + Send + Sync + 'static,
{
    let state = ContentAppState {
        repo: Arc::new(repo),
        auth_config: Arc::new(config),
    };

    Router::new()
        .route("/", get(handlers::list_posts::<R>))
        .route("/", post(handlers::create_post::<R>))
        .route("/{slug}", get(handlers::get_post::<R>))
        .route("/{slug}", put(handlers::update_post::<R>))
        .route("/{slug}", delete(handlers::delete_post::<R>))
        .route("/{slug}/comments", get(handlers::list_comments::<R>))
        .route("/{slug}/comments", post(handlers::create_comment::<R>))
        .with_state(state)
}

/// Create the Tags router with PostgreSQL
pub fn tags_router(repo: PgContentRepository, config: AuthConfig) -> Router {
    tags_router_generic(repo, config)
}

/// Create a generic Tags router for any repository implementation
pub fn tags_router_generic<R>(repo: R, config: AuthConfig) -> Router
where
    R: PostRepository + TagRepository + CommentRepository + Clone + Send + Sync + 'static,
{
    let state = ContentAppState {
        repo: Arc::new(repo),
        auth_config: Arc::new(config),
    };

    Router::new()
        .route("/", get(handlers::list_tags::<R>))
        .route("/", post(handlers::create_tag::<R>))
        .route("/{id}", delete(handlers::delete_tag::<R>))
        .with_state(state)
}

/// Create the Comments router (admin moderation) with PostgreSQL
pub fn comments_router(repo: PgContentRepository, config: AuthConfig) -> Router {
    comments_router_generic(repo, config)
}

/// Create a generic Comments router for any repository implementation
pub fn comments_router_generic<R>(repo: R, config: AuthConfig) -> Router
where
    R: PostRepository + TagRepository + CommentRepository + Clone + Send + Sync + 'static,
{
    let state = ContentAppState {
        repo: Arc::new(repo),
        auth_config: Arc::new(config),
    };

    Router::new()
        .route("/{id}", delete(handlers::delete_comment::<R>))
        .with_state(state)
}
