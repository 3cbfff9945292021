//! Authentication constants.

/// Provider identifiers, as they appear in callback URLs.
pub mod provider_ids {
    /// Local email/password sign-in.
    pub const CREDENTIALS: &str = "credentials";

    /// GitHub `OAuth`.
    pub const GITHUB: &str = "github";

    /// Google `OAuth`.
    pub const GOOGLE: &str = "google";
}

/// Default lifetime of a database session, in days.
pub const DEFAULT_SESSION_MAX_AGE_DAYS: i64 = 30;

/// Longest accepted database session lifetime, in days.
pub const MAX_SESSION_MAX_AGE_DAYS: i64 = 3650;

/// Default lifetime of a stateless token, in days.
pub const DEFAULT_JWT_MAX_AGE_DAYS: i64 = 30;

/// Default session cookie name.
pub const DEFAULT_SESSION_COOKIE: &str = "authjs.session-token";

/// Error code reported when a credentials sign-in is rejected.
pub const CREDENTIALS_SIGNIN_ERROR: &str = "CredentialsSignin";
