//! Storage implementations for the sign-in flow.
//!
//! - **User Store** (PostgreSQL) - Read-only user lookup
//! - **Session Adapter** (PostgreSQL) - Durable database sessions
//! - **Session Adapter** (Redis) - Sessions with TTL-based expiration

#[cfg(feature = "postgres")]
pub mod postgres;
pub mod session_redis;

// Re-exports
#[cfg(feature = "postgres")]
pub use postgres::{PostgresSessionAdapter, PostgresUserStore};
pub use session_redis::RedisSessionAdapter;
