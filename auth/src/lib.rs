//! # Hybrid Auth
//!
//! Sign-in with a hybrid session strategy: email/password sign-ins get
//! opaque database-backed sessions, federated sign-ins (GitHub, Google) get
//! self-contained stateless tokens.
//!
//! ## Architecture
//!
//! ```text
//! Credentials ─▶ CredentialAuthorizer ─▶ prepare_token ─▶ TokenIssuer ─▶ IssuedToken
//!                  (UserStore,             (mark by        (SessionAdapter |
//!                   PasswordVerifier)       provider)       TokenEncoder)
//! ```
//!
//! External collaborators are traits in [`providers`]; [`stores`] holds the
//! PostgreSQL and Redis implementations and [`mocks`] the in-memory ones.
//!
//! ## Example: Credentials Sign-In
//!
//! ```rust,ignore
//! use hybrid_auth::*;
//!
//! let env = AuthEnvironment::new(users, sessions, passwords, encoder, SystemClock);
//! let signin = SignIn::new(env, AuthConfig::from_env()?);
//!
//! let issued = signin
//!     .sign_in_with_credentials(&Credentials::new("a@x.com", "hunter2"))
//!     .await?;
//!
//! // Opaque token, stored as a session row
//! assert_eq!(issued.issuance(), Issuance::DatabaseBacked);
//! ```

#![deny(missing_docs)]
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]
#![deny(clippy::todo)]
#![deny(clippy::unimplemented)]

// Public modules
pub mod authorizer;
pub mod claims;
pub mod config;
pub mod constants;
pub mod environment;
pub mod error;
pub mod issuance;
pub mod providers;
pub mod signin;
pub mod state;
pub mod stores;

#[cfg(any(test, feature = "test-utils"))]
pub mod mocks;

// Re-export main types for convenience
pub use authorizer::CredentialAuthorizer;
pub use claims::{prepare_token, Claims, Issuance, Token};
pub use config::{AuthConfig, PageRoutes, ProviderConfig};
pub use environment::AuthEnvironment;
pub use error::{AuthError, Result};
pub use issuance::{IssuedToken, TokenIssuer};
pub use providers::SystemClock;
pub use signin::SignIn;
pub use state::{
    AuthProvider, Credentials, SessionRecord, SessionToken, UserId, UserIdentity, UserRecord,
};
