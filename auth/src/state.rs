//! Authentication state types.
//!
//! Identifiers, user records and session records shared by the
//! authorizer, the issuer and the stores.

use crate::constants::provider_ids;
use crate::error::AuthError;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

// ═══════════════════════════════════════════════════════════════════════
// ID Types
// ═══════════════════════════════════════════════════════════════════════

/// Unique identifier for a user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "postgres", derive(sqlx::Type))]
#[cfg_attr(feature = "postgres", sqlx(transparent))]
#[serde(transparent)]
pub struct UserId(pub uuid::Uuid);

impl UserId {
    /// Generate a new random `UserId`.
    #[must_use]
    pub fn new() -> Self {
        Self(uuid::Uuid::new_v4())
    }
}

impl Default for UserId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Opaque session token.
///
/// A random lookup key with no embedded claims. The `Debug` output is
/// redacted so tokens never end up in logs.
#[derive(Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SessionToken(String);

impl SessionToken {
    /// Generate a fresh random token (UUID v4).
    #[must_use]
    pub fn generate() -> Self {
        Self(uuid::Uuid::new_v4().to_string())
    }

    /// Wrap a token received from a client or a store.
    #[must_use]
    pub fn from_string(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    /// Token as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consume into the inner string.
    #[must_use]
    pub fn into_string(self) -> String {
        self.0
    }
}

impl fmt::Debug for SessionToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("SessionToken(..)")
    }
}

// ═══════════════════════════════════════════════════════════════════════
// Users
// ═══════════════════════════════════════════════════════════════════════

/// A row of the user table.
///
/// Created by registration (outside this crate); read-only here.
/// `email` is unique across records.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "postgres", derive(sqlx::FromRow))]
pub struct UserRecord {
    /// User ID.
    pub id: UserId,

    /// Email address (unique).
    pub email: String,

    /// Display name.
    pub name: String,

    /// Profile picture URL.
    pub image: Option<String>,

    /// Password hash (PHC string). Never serialized outward.
    #[serde(skip_serializing, default)]
    pub password_hash: String,
}

impl UserRecord {
    /// Public projection of this record, without the password hash.
    #[must_use]
    pub fn identity(&self) -> UserIdentity {
        UserIdentity {
            id: self.id,
            email: self.email.clone(),
            name: self.name.clone(),
            image: self.image.clone(),
        }
    }
}

/// Public user identity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserIdentity {
    /// User ID.
    pub id: UserId,

    /// Email address.
    pub email: String,

    /// Display name.
    pub name: String,

    /// Profile picture URL.
    pub image: Option<String>,
}

/// Email/password pair submitted by the sign-in form.
///
/// Transient: never persisted. An empty field counts as absent.
#[derive(Clone, Default, Deserialize)]
pub struct Credentials {
    /// Email address.
    #[serde(default)]
    pub email: Option<String>,

    /// Plaintext password.
    #[serde(default)]
    pub password: Option<String>,
}

impl Credentials {
    /// Create credentials with both fields present.
    #[must_use]
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            email: Some(email.into()),
            password: Some(password.into()),
        }
    }

    /// Email, if present and non-empty.
    #[must_use]
    pub fn email(&self) -> Option<&str> {
        self.email.as_deref().filter(|s| !s.is_empty())
    }

    /// Password, if present and non-empty.
    #[must_use]
    pub fn password(&self) -> Option<&str> {
        self.password.as_deref().filter(|s| !s.is_empty())
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("email", &self.email.as_ref().map(|_| ".."))
            .field("password", &self.password.as_ref().map(|_| ".."))
            .finish()
    }
}

// ═══════════════════════════════════════════════════════════════════════
// Sessions
// ═══════════════════════════════════════════════════════════════════════

/// Database-backed session.
///
/// Owned by the session adapter; lives until `expires` or sign-out.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionRecord {
    /// Opaque lookup key.
    pub session_token: SessionToken,

    /// Owner of the session.
    pub user_id: UserId,

    /// Expiration timestamp.
    pub expires: DateTime<Utc>,
}

impl SessionRecord {
    /// Returns `true` if the session has expired at `now`.
    #[must_use]
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        self.expires <= now
    }
}

// ═══════════════════════════════════════════════════════════════════════
// Providers
// ═══════════════════════════════════════════════════════════════════════

/// Sign-in provider.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AuthProvider {
    /// Local email/password.
    Credentials,
    /// GitHub `OAuth`.
    GitHub,
    /// Google `OAuth`.
    Google,
}

impl AuthProvider {
    /// Get the provider id as a string.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Credentials => provider_ids::CREDENTIALS,
            Self::GitHub => provider_ids::GITHUB,
            Self::Google => provider_ids::GOOGLE,
        }
    }

    /// Human-readable provider name.
    #[must_use]
    pub const fn display_name(&self) -> &'static str {
        match self {
            Self::Credentials => "Credentials",
            Self::GitHub => "GitHub",
            Self::Google => "Google",
        }
    }

    /// Returns `true` for providers that delegate to an external identity provider.
    #[must_use]
    pub const fn is_federated(&self) -> bool {
        !matches!(self, Self::Credentials)
    }
}

impl FromStr for AuthProvider {
    type Err = AuthError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            provider_ids::CREDENTIALS => Ok(Self::Credentials),
            provider_ids::GITHUB => Ok(Self::GitHub),
            provider_ids::GOOGLE => Ok(Self::Google),
            _ => Err(AuthError::ProviderNotEnabled {
                provider: s.to_string(),
            }),
        }
    }
}

impl fmt::Display for AuthProvider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
