//! PostgreSQL storage implementations.
//!
//! - `users` (read-only here; rows come from registration)
//! - `sessions` (database-backed sign-in sessions)

pub mod session;
pub mod user;

// Re-exports
pub use session::PostgresSessionAdapter;
pub use user::PostgresUserStore;

use crate::error::{AuthError, Result};
use sqlx::PgPool;

/// Run database migrations.
///
/// # Errors
///
/// Returns error if migrations fail.
pub async fn migrate(pool: &PgPool) -> Result<()> {
    sqlx::migrate!("./migrations")
        .run(pool)
        .await
        .map_err(|e| AuthError::DatabaseError(format!("Migration failed: {e}")))?;
    Ok(())
}
