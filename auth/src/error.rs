//! Error types for sign-in and session operations.

use thiserror::Error;

/// Result type alias for authentication operations.
pub type Result<T> = std::result::Result<T, AuthError>;

/// Error taxonomy for the sign-in flow.
///
/// Rejected credentials carry no detail: callers cannot tell an unknown
/// email from a wrong password.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AuthError {
    // ═══════════════════════════════════════════════════════════
    // Authentication Errors
    // ═══════════════════════════════════════════════════════════

    /// Email/password pair was rejected.
    #[error("Authentication failed")]
    InvalidCredentials,

    /// The requested provider is not enabled in the configuration.
    #[error("Provider not enabled: {provider}")]
    ProviderNotEnabled {
        /// Provider id (e.g. "github")
        provider: String,
    },

    // ═══════════════════════════════════════════════════════════
    // Issuance Invariants
    // ═══════════════════════════════════════════════════════════

    /// A database-backed token had no subject to attach the session to.
    #[error("Could not find user ID in token")]
    MissingSubject,

    /// The session adapter did not return the created session.
    #[error("Failed to create new session")]
    SessionNotCreated,

    // ═══════════════════════════════════════════════════════════
    // Session Errors
    // ═══════════════════════════════════════════════════════════

    /// Session not found.
    #[error("Session not found")]
    SessionNotFound,

    /// Session has expired.
    #[error("Session has expired")]
    SessionExpired,

    // ═══════════════════════════════════════════════════════════
    // System Errors
    // ═══════════════════════════════════════════════════════════

    /// Invalid or incomplete configuration.
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Database operation failed.
    #[error("Database error: {0}")]
    DatabaseError(String),

    /// Stateless token could not be encoded or decoded.
    #[error("Token encoding error: {0}")]
    TokenEncoding(String),

    /// Password hashing failed.
    #[error("Password hash error: {0}")]
    PasswordHash(String),

    /// Internal error (should not be exposed to users).
    #[error("Internal error: {0}")]
    InternalError(String),
}

impl AuthError {
    /// Returns `true` if this error is due to user input.
    ///
    /// # Examples
    ///
    /// ```
    /// # use hybrid_auth::AuthError;
    /// assert!(AuthError::InvalidCredentials.is_user_error());
    /// assert!(!AuthError::SessionNotCreated.is_user_error());
    /// ```
    #[must_use]
    pub const fn is_user_error(&self) -> bool {
        matches!(
            self,
            Self::InvalidCredentials | Self::SessionNotFound | Self::SessionExpired
        )
    }

    /// Returns `true` if the error aborts the sign-in as an invariant violation.
    ///
    /// Fatal errors are never retried.
    ///
    /// # Examples
    ///
    /// ```
    /// # use hybrid_auth::AuthError;
    /// assert!(AuthError::MissingSubject.is_fatal());
    /// assert!(!AuthError::InvalidCredentials.is_fatal());
    /// ```
    #[must_use]
    pub const fn is_fatal(&self) -> bool {
        matches!(self, Self::MissingSubject | Self::SessionNotCreated)
    }
}
