//! API Server Entry Point
//!
//! Application entry point and server initialization.
//! Uses `anyhow` for startup errors; application-level errors use
//! `kernel::error::AppError`.

use auth::{AuthConfig, PgAuthRepository};
use axum::{
    Router, http,
    http::{Method, header},
    routing::get,
};
use base64::Engine;
use base64::engine::general_purpose;
use content::PgContentRepository;
use sqlx::postgres::PgPoolOptions;
use std::env;
use std::net::SocketAddr;
use tokio::net::TcpListener;
use tower_http::cors::{AllowHeaders, AllowMethods, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

// Re-export unified error types for use in handlers
pub use kernel::error::{
    app_error::{AppError, AppResult},
    kind::ErrorKind,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "api=info,auth=info,content=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Database connection
    let database_url = env::var("DATABASE_URL").expect("DATABASE_URL must be set in environment");

    let pool = PgPoolOptions::new()
        .max_connections(5)
        .connect(&database_url)
        .await?;

    tracing::info!("Connected to database");

    // Run migrations
    sqlx::migrate!("../../../database/migrations")
        .run(&pool)
        .await?;

    tracing::info!("Migrations completed");

    // Startup cleanup: remove expired refresh sessions.
    // Errors here should not prevent server startup.
    let auth_repo_for_cleanup = PgAuthRepository::new(pool.clone());
    match auth_repo_for_cleanup.cleanup_expired_sessions().await {
        Ok(sessions) => {
            tracing::info!(sessions_deleted = sessions, "Refresh session cleanup completed");
        }
        Err(e) => {
            tracing::warn!(error = %e, "Refresh session cleanup failed, continuing anyway");
        }
    }

    // Auth configuration
    let auth_config = build_auth_config()?;

    // CORS configuration; credentials must be allowed for the refresh cookie
    let frontend_origins = env::var("FRONTEND_ORIGINS")
        .unwrap_or_else(|_| "http://localhost:5173,http://127.0.0.1:5173".to_string());

    let allowed_origins: Vec<http::HeaderValue> = frontend_origins
        .split(',')
        .filter_map(|origin| origin.trim().parse().ok())
        .collect();

    let cors = CorsLayer::new()
        .allow_origin(allowed_origins)
        .allow_methods(AllowMethods::list([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ]))
        .allow_headers(AllowHeaders::list([
            header::CONTENT_TYPE,
            header::AUTHORIZATION,
            header::ACCEPT,
        ]))
        .allow_credentials(true);

    // Build router
    let auth_repo = PgAuthRepository::new(pool.clone());
    let content_repo = PgContentRepository::new(pool.clone());

    let app = Router::new()
        .route("/health", get(health_check))
        .nest(
            "/api/auth",
            auth::auth_router(auth_repo.clone(), auth_config.clone()),
        )
        .nest(
            "/api/users",
            auth::users_router(auth_repo, auth_config.clone()),
        )
        .nest(
            "/api/posts",
            content::posts_router(content_repo.clone(), auth_config.clone()),
        )
        .nest(
            "/api/tags",
            content::tags_router(content_repo.clone(), auth_config.clone()),
        )
        .nest(
            "/api/comments",
            content::comments_router(content_repo, auth_config),
        )
        .layer(TraceLayer::new_for_http())
        .layer(cors);

    // Start server
    let port = env::var("PORT")
        .ok()
        .and_then(|p| p.parse().ok())
        .unwrap_or(8080);
    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    tracing::info!("Listening on {}", addr);

    let listener = TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// Build the auth configuration from the environment.
///
/// In debug builds a random secret is generated; in production the
/// 32-byte secret must be provided base64-encoded.
fn build_auth_config() -> anyhow::Result<AuthConfig> {
    let mut config = if cfg!(debug_assertions) {
        AuthConfig::development()
    } else {
        let secret_b64 =
            env::var("AUTH_TOKEN_SECRET").expect("AUTH_TOKEN_SECRET must be set in production");
        let secret_bytes = Engine::decode(&general_purpose::STANDARD, &secret_b64)?;
        anyhow::ensure!(
            secret_bytes.len() == 32,
            "AUTH_TOKEN_SECRET must decode to exactly 32 bytes"
        );
        let mut secret = [0u8; 32];
        secret.copy_from_slice(&secret_bytes);
        AuthConfig {
            token_secret: secret,
            ..AuthConfig::default()
        }
    };

    // Logout revocation is opt-in; the default matches the observed
    // client-local-only behavior.
    config.revoke_refresh_on_logout = env::var("REVOKE_REFRESH_ON_LOGOUT")
        .map(|v| v == "1" || v.eq_ignore_ascii_case("true"))
        .unwrap_or(false);

    if let Ok(pepper_b64) = env::var("PASSWORD_PEPPER") {
        config.password_pepper = Some(Engine::decode(&general_purpose::STANDARD, &pepper_b64)?);
    }

    Ok(config)
}

async fn health_check() -> &'static str {
    "OK"
}
