//! PostgreSQL user store.
//!
//! # Example
//!
//! ```no_run
//! use hybrid_auth::stores::postgres::PostgresUserStore;
//! use sqlx::PgPool;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let pool = PgPool::connect("postgresql://localhost/auth").await?;
//! let users = PostgresUserStore::new(pool);
//! # Ok(())
//! # }
//! ```

use crate::error::{AuthError, Result};
use crate::providers::UserStore;
use crate::state::{UserId, UserRecord};
use sqlx::PgPool;

/// PostgreSQL user store.
#[derive(Clone)]
pub struct PostgresUserStore {
    /// PostgreSQL connection pool.
    pool: PgPool,
}

impl PostgresUserStore {
    /// Create a new PostgreSQL user store.
    ///
    /// # Arguments
    ///
    /// * `pool` - PostgreSQL connection pool
    #[must_use]
    pub const fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

impl UserStore for PostgresUserStore {
    async fn find_user_by_email(&self, email: &str) -> Result<Option<UserRecord>> {
        sqlx::query_as::<_, UserRecord>(
            r"
            SELECT id, email, name, image, password_hash
            FROM users
            WHERE email = $1
            ",
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AuthError::DatabaseError(format!("Failed to get user: {e}")))
    }

    async fn get_user(&self, user_id: UserId) -> Result<Option<UserRecord>> {
        sqlx::query_as::<_, UserRecord>(
            r"
            SELECT id, email, name, image, password_hash
            FROM users
            WHERE id = $1
            ",
        )
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AuthError::DatabaseError(format!("Failed to get user: {e}")))
    }
}
