//! Authentication providers.
//!
//! This module defines traits for all external collaborators of the sign-in
//! flow. The authorizer and the issuer depend on these traits; the server
//! wires in concrete implementations.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────┐      ┌──────────────────┐
//! │ CredentialAuthorizer │─────▶│ UserStore        │  read-only lookup
//! │                      │─────▶│ PasswordVerifier │  hash comparison
//! └──────────┬───────────┘      └──────────────────┘
//!            │ UserRecord
//!            ▼
//! ┌──────────────────────┐      ┌──────────────────┐
//! │ TokenIssuer          │─────▶│ SessionAdapter   │  DatabaseBacked
//! │                      │─────▶│ TokenEncoder     │  Delegated
//! └──────────────────────┘      └──────────────────┘
//! ```
//!
//! This enables:
//! - **Testing**: Use mocks (in-memory, deterministic)
//! - **Production**: Use real services (PostgreSQL, Redis)

pub mod argon2;
pub mod clock;
pub mod encoder;
pub mod jwt;
pub mod password;
pub mod session;
pub mod user;

// Re-export provider traits
pub use self::argon2::Argon2PasswordVerifier;
pub use clock::{Clock, SystemClock};
pub use encoder::TokenEncoder;
pub use jwt::{JwtClaims, JwtTokenEncoder};
pub use password::PasswordVerifier;
pub use session::SessionAdapter;
pub use user::UserStore;
