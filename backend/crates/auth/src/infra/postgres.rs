//! PostgreSQL Repository Implementations

use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use crate::domain::entity::{refresh_session::RefreshSession, user::User};
use crate::domain::repository::{RefreshSessionRepository, UserRepository};
use crate::domain::value_object::{
    display_name::DisplayName, email::Email, public_id::PublicId, user_role::UserRole,
};
use crate::error::{AuthError, AuthResult};
use kernel::error::persistence::{PgErrorClassifier, map_persistence_error};
use kernel::id::UserId;
use platform::password::HashedPassword;

/// PostgreSQL-backed auth repository
#[derive(Clone)]
pub struct PgAuthRepository {
    pool: PgPool,
}

impl PgAuthRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Clean up expired refresh sessions
    pub async fn cleanup_expired_sessions(&self) -> AuthResult<u64> {
        let now_ms = Utc::now().timestamp_millis();

        let deleted = sqlx::query("DELETE FROM refresh_sessions WHERE expires_at_ms < $1")
            .bind(now_ms)
            .execute(&self.pool)
            .await?
            .rows_affected();

        tracing::info!(
            sessions_deleted = deleted,
            "Cleaned up expired refresh sessions"
        );

        Ok(deleted)
    }
}

const USER_COLUMNS: &str = r#"
    user_id,
    public_id,
    email,
    password_hash,
    display_name,
    role,
    created_at,
    updated_at
"#;

// ============================================================================
// User Repository Implementation
// ============================================================================

impl UserRepository for PgAuthRepository {
    async fn create(&self, user: &User) -> AuthResult<()> {
        sqlx::query(
            r#"
            INSERT INTO users (
                user_id,
                public_id,
                email,
                password_hash,
                display_name,
                role,
                created_at,
                updated_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            "#,
        )
        .bind(user.user_id.as_uuid())
        .bind(user.public_id.as_str())
        .bind(user.email.as_str())
        .bind(user.password_hash.as_phc_string())
        .bind(user.display_name.as_str())
        .bind(user.role.id())
        .bind(user.created_at)
        .bind(user.updated_at)
        .execute(&self.pool)
        .await
        .map_err(|e| classify(e, Some("email")))?;

        Ok(())
    }

    async fn find_by_id(&self, user_id: &UserId) -> AuthResult<Option<User>> {
        let row = sqlx::query_as::<_, UserRow>(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE user_id = $1"
        ))
        .bind(user_id.as_uuid())
        .fetch_optional(&self.pool)
        .await?;

        row.map(|r| r.into_user()).transpose()
    }

    async fn find_by_public_id(&self, public_id: &PublicId) -> AuthResult<Option<User>> {
        let row = sqlx::query_as::<_, UserRow>(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE public_id = $1"
        ))
        .bind(public_id.as_str())
        .fetch_optional(&self.pool)
        .await?;

        row.map(|r| r.into_user()).transpose()
    }

    async fn find_by_email(&self, email: &Email) -> AuthResult<Option<User>> {
        let row = sqlx::query_as::<_, UserRow>(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE email = $1"
        ))
        .bind(email.as_str())
        .fetch_optional(&self.pool)
        .await?;

        row.map(|r| r.into_user()).transpose()
    }

    async fn list(&self) -> AuthResult<Vec<User>> {
        let rows = sqlx::query_as::<_, UserRow>(&format!(
            "SELECT {USER_COLUMNS} FROM users ORDER BY created_at DESC"
        ))
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(|r| r.into_user()).collect()
    }
}

// ============================================================================
// Refresh Session Repository Implementation
// ============================================================================

impl RefreshSessionRepository for PgAuthRepository {
    async fn create_session(&self, session: &RefreshSession) -> AuthResult<()> {
        sqlx::query(
            r#"
            INSERT INTO refresh_sessions (
                session_id,
                user_id,
                expires_at_ms,
                created_at,
                last_used_at
            ) VALUES ($1, $2, $3, $4, $5)
            "#,
        )
        .bind(session.session_id)
        .bind(session.user_id.as_uuid())
        .bind(session.expires_at_ms)
        .bind(session.created_at)
        .bind(session.last_used_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn find_session(&self, session_id: Uuid) -> AuthResult<Option<RefreshSession>> {
        let row = sqlx::query_as::<_, RefreshSessionRow>(
            r#"
            SELECT
                session_id,
                user_id,
                expires_at_ms,
                created_at,
                last_used_at
            FROM refresh_sessions
            WHERE session_id = $1
            "#,
        )
        .bind(session_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(RefreshSessionRow::into_session))
    }

    async fn update_session(&self, session: &RefreshSession) -> AuthResult<()> {
        sqlx::query(
            r#"
            UPDATE refresh_sessions SET
                expires_at_ms = $2,
                last_used_at = $3
            WHERE session_id = $1
            "#,
        )
        .bind(session.session_id)
        .bind(session.expires_at_ms)
        .bind(session.last_used_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn delete_session(&self, session_id: Uuid) -> AuthResult<()> {
        sqlx::query("DELETE FROM refresh_sessions WHERE session_id = $1")
            .bind(session_id)
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    async fn cleanup_expired(&self) -> AuthResult<u64> {
        self.cleanup_expired_sessions().await
    }
}

/// Classify a write error at the data-access boundary; anything the mapper
/// does not recognize propagates as a plain database error.
fn classify(err: sqlx::Error, unique_field: Option<&str>) -> AuthError {
    match map_persistence_error(&PgErrorClassifier, &err, unique_field) {
        Some(app_err) => AuthError::App(app_err.with_source(err)),
        None => AuthError::Database(err),
    }
}

// ============================================================================
// Row Types
// ============================================================================

#[derive(sqlx::FromRow)]
struct UserRow {
    user_id: Uuid,
    public_id: String,
    email: String,
    password_hash: String,
    display_name: String,
    role: i16,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl UserRow {
    fn into_user(self) -> AuthResult<User> {
        let password_hash = HashedPassword::from_phc_string(self.password_hash)
            .map_err(|e| AuthError::Internal(format!("Corrupt password hash: {e}")))?;

        Ok(User {
            user_id: UserId::from_uuid(self.user_id),
            public_id: PublicId::parse_str(&self.public_id)?,
            email: Email::from_db(self.email),
            password_hash,
            display_name: DisplayName::from_db(self.display_name),
            role: UserRole::from_id(self.role),
            created_at: self.created_at,
            updated_at: self.updated_at,
        })
    }
}

#[derive(sqlx::FromRow)]
struct RefreshSessionRow {
    session_id: Uuid,
    user_id: Uuid,
    expires_at_ms: i64,
    created_at: DateTime<Utc>,
    last_used_at: DateTime<Utc>,
}

impl RefreshSessionRow {
    fn into_session(self) -> RefreshSession {
        RefreshSession {
            session_id: self.session_id,
            user_id: UserId::from_uuid(self.user_id),
            expires_at_ms: self.expires_at_ms,
            created_at: self.created_at,
            last_used_at: self.last_used_at,
        }
    }
}
