//! Redis-based session adapter.
//!
//! # Architecture
//!
//! - **Key**: `session:{session_token}` → JSON-serialized [`SessionRecord`]
//! - **TTL**: seconds until `expires`, so Redis drops sessions on its own
//! - **Create**: `SET NX EX`, so an existing token is never overwritten
//!
//! # Example
//!
//! ```no_run
//! use hybrid_auth::stores::RedisSessionAdapter;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let sessions = RedisSessionAdapter::new("redis://127.0.0.1:6379").await?;
//! # Ok(())
//! # }
//! ```

use crate::error::{AuthError, Result};
use crate::providers::SessionAdapter;
use crate::state::{SessionRecord, SessionToken};
use chrono::Utc;
use redis::aio::ConnectionManager;
use redis::{AsyncCommands, Client};

/// Redis-based session adapter with TTL-based expiration.
#[derive(Clone)]
pub struct RedisSessionAdapter {
    /// Connection manager for connection pooling.
    conn_manager: ConnectionManager,
}

impl RedisSessionAdapter {
    /// Create a new Redis session adapter.
    ///
    /// # Arguments
    ///
    /// * `redis_url` - Redis connection URL (e.g., "redis://127.0.0.1:6379")
    ///
    /// # Errors
    ///
    /// Returns error if connection to Redis fails.
    pub async fn new(redis_url: &str) -> Result<Self> {
        let client = Client::open(redis_url).map_err(|e| {
            AuthError::InternalError(format!("Failed to create Redis client: {e}"))
        })?;

        let conn_manager = ConnectionManager::new(client).await.map_err(|e| {
            AuthError::InternalError(format!("Failed to create Redis connection manager: {e}"))
        })?;

        Ok(Self { conn_manager })
    }

    fn session_key(session_token: &SessionToken) -> String {
        format!("session:{}", session_token.as_str())
    }

    fn decode(bytes: Option<String>) -> Result<Option<SessionRecord>> {
        bytes
            .map(|json| {
                serde_json::from_str(&json)
                    .map_err(|e| AuthError::InternalError(format!("Corrupt session record: {e}")))
            })
            .transpose()
    }
}

impl SessionAdapter for RedisSessionAdapter {
    async fn create_session(&self, session: &SessionRecord) -> Result<Option<SessionRecord>> {
        let mut conn = self.conn_manager.clone();
        let key = Self::session_key(&session.session_token);

        let json = serde_json::to_string(session)
            .map_err(|e| AuthError::InternalError(format!("Failed to serialize session: {e}")))?;

        // EX must be positive
        let ttl_seconds = (session.expires - Utc::now()).num_seconds().max(1);

        let reply: Option<String> = redis::cmd("SET")
            .arg(&key)
            .arg(json)
            .arg("NX")
            .arg("EX")
            .arg(ttl_seconds)
            .query_async(&mut conn)
            .await
            .map_err(|e| AuthError::InternalError(format!("Failed to create session: {e}")))?;

        if reply.is_none() {
            tracing::warn!(user_id = %session.user_id, "Session token already exists");
            return Ok(None);
        }

        tracing::debug!(
            user_id = %session.user_id,
            ttl_seconds = ttl_seconds,
            "Created session in Redis"
        );

        Ok(Some(session.clone()))
    }

    async fn get_session(&self, session_token: &SessionToken) -> Result<Option<SessionRecord>> {
        let mut conn = self.conn_manager.clone();

        let json: Option<String> = conn
            .get(Self::session_key(session_token))
            .await
            .map_err(|e| AuthError::InternalError(format!("Failed to get session from Redis: {e}")))?;

        Self::decode(json)
    }

    async fn delete_session(&self, session_token: &SessionToken) -> Result<Option<SessionRecord>> {
        let mut conn = self.conn_manager.clone();

        let json: Option<String> = redis::cmd("GETDEL")
            .arg(Self::session_key(session_token))
            .query_async(&mut conn)
            .await
            .map_err(|e| AuthError::InternalError(format!("Failed to delete session: {e}")))?;

        Self::decode(json)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::state::UserId;
    use chrono::Duration;

    // Requires a running Redis: `cargo test -- --ignored`
    async fn adapter() -> RedisSessionAdapter {
        let url = std::env::var("REDIS_URL").unwrap_or_else(|_| "redis://127.0.0.1:6379".into());
        RedisSessionAdapter::new(&url).await.unwrap()
    }

    fn session() -> SessionRecord {
        SessionRecord {
            session_token: SessionToken::generate(),
            user_id: UserId::new(),
            expires: Utc::now() + Duration::days(30),
        }
    }

    #[test]
    fn test_session_key_format() {
        let token = SessionToken::from_string("abc");
        assert_eq!(RedisSessionAdapter::session_key(&token), "session:abc");
    }

    #[test]
    fn test_decode_rejects_corrupt_json() {
        assert!(RedisSessionAdapter::decode(Some("{".to_string())).is_err());
        assert!(RedisSessionAdapter::decode(None).unwrap().is_none());
    }

    #[tokio::test]
    #[ignore = "requires Redis"]
    async fn test_create_get_delete() {
        let sessions = adapter().await;
        let record = session();

        assert_eq!(sessions.create_session(&record).await.unwrap(), Some(record.clone()));
        assert_eq!(sessions.get_session(&record.session_token).await.unwrap(), Some(record.clone()));
        assert_eq!(sessions.delete_session(&record.session_token).await.unwrap(), Some(record.clone()));
        assert!(sessions.get_session(&record.session_token).await.unwrap().is_none());
    }

    #[tokio::test]
    #[ignore = "requires Redis"]
    async fn test_duplicate_token_not_overwritten() {
        let sessions = adapter().await;
        let record = session();
        let hijack = SessionRecord {
            user_id: UserId::new(),
            ..record.clone()
        };

        sessions.create_session(&record).await.unwrap();
        assert!(sessions.create_session(&hijack).await.unwrap().is_none());
        assert_eq!(sessions.get_session(&record.session_token).await.unwrap(), Some(record.clone()));

        sessions.delete_session(&record.session_token).await.unwrap();
    }
}
