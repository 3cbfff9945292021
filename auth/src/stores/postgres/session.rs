//! PostgreSQL session adapter.

use crate::error::{AuthError, Result};
use crate::providers::SessionAdapter;
use crate::state::{SessionRecord, SessionToken, UserId};
use chrono::{DateTime, Utc};
use sqlx::PgPool;

/// PostgreSQL session adapter.
///
/// `create_session` uses `ON CONFLICT DO NOTHING`: a token collision yields
/// `None` and the existing row is left alone.
#[derive(Clone)]
pub struct PostgresSessionAdapter {
    pool: PgPool,
}

#[derive(sqlx::FromRow)]
struct SessionRow {
    session_token: String,
    user_id: UserId,
    expires: DateTime<Utc>,
}

impl From<SessionRow> for SessionRecord {
    fn from(row: SessionRow) -> Self {
        Self {
            session_token: SessionToken::from_string(row.session_token),
            user_id: row.user_id,
            expires: row.expires,
        }
    }
}

impl PostgresSessionAdapter {
    /// Create a new PostgreSQL session adapter.
    #[must_use]
    pub const fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

impl SessionAdapter for PostgresSessionAdapter {
    async fn create_session(&self, session: &SessionRecord) -> Result<Option<SessionRecord>> {
        let row = sqlx::query_as::<_, SessionRow>(
            r"
            INSERT INTO sessions (session_token, user_id, expires)
            VALUES ($1, $2, $3)
            ON CONFLICT (session_token) DO NOTHING
            RETURNING session_token, user_id, expires
            ",
        )
        .bind(session.session_token.as_str())
        .bind(session.user_id)
        .bind(session.expires)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AuthError::DatabaseError(format!("Failed to create session: {e}")))?;

        Ok(row.map(SessionRecord::from))
    }

    async fn get_session(&self, session_token: &SessionToken) -> Result<Option<SessionRecord>> {
        let row = sqlx::query_as::<_, SessionRow>(
            r"
            SELECT session_token, user_id, expires
            FROM sessions
            WHERE session_token = $1
            ",
        )
        .bind(session_token.as_str())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AuthError::DatabaseError(format!("Failed to get session: {e}")))?;

        Ok(row.map(SessionRecord::from))
    }

    async fn delete_session(&self, session_token: &SessionToken) -> Result<Option<SessionRecord>> {
        let row = sqlx::query_as::<_, SessionRow>(
            r"
            DELETE FROM sessions
            WHERE session_token = $1
            RETURNING session_token, user_id, expires
            ",
        )
        .bind(session_token.as_str())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AuthError::DatabaseError(format!("Failed to delete session: {e}")))?;

        Ok(row.map(SessionRecord::from))
    }
}
