//! Axum HTTP surface for `hybrid-auth`.
//!
//! # Request Flow
//!
//! 1. **HTTP Request** arrives at an Axum handler under `/api/auth`
//! 2. **Extract** credentials, session cookie or bearer token
//! 3. **Call** the [`SignIn`](hybrid_auth::SignIn) service
//! 4. **Map** the result or [`AuthError`](hybrid_auth::AuthError) to a response
//!
//! # Example
//!
//! ```ignore
//! use hybrid_auth_web::{router, AppState};
//!
//! let state = AppState::new(signin);
//! let app = router::app(state);
//! axum::serve(listener, app).await?;
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs, clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod config;
pub mod error;
pub mod extractors;
pub mod handlers;
pub mod middleware;
pub mod router;
pub mod state;

// Re-export key types for convenience
pub use config::{ServerConfig, SessionBackend};
pub use error::AppError;
pub use extractors::{CorrelationId, CredentialsInput, SessionCookie};
pub use middleware::{correlation_id_layer, CORRELATION_ID_HEADER};
pub use state::AppState;

/// Result type alias for web handlers.
pub type WebResult<T> = Result<T, AppError>;
