//! HTTP request handlers.
//!
//! All routes are mounted under `/api/auth` by [`crate::router::app`].

pub mod credentials;
pub mod health;
pub mod providers;
pub mod session;

mod cookie;

// Re-export common handler utilities
pub use health::health_check;
