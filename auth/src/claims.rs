//! Sign-in tokens and claim marking.
//!
//! A [`Token`] exists for the duration of one sign-in request. Before it is
//! issued, [`Token::mark`] records which issuance path applies:
//!
//! ```text
//! provider == Credentials  →  Issuance::DatabaseBacked  (opaque session)
//! anything else            →  Issuance::Delegated       (stateless token)
//! ```

use crate::state::{AuthProvider, UserId, UserIdentity};
use serde::{Deserialize, Serialize};

/// Claims carried by an in-flight token.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    /// Subject (user ID).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sub: Option<UserId>,

    /// Display name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    /// Email address.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,

    /// Profile picture URL.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub picture: Option<String>,
}

impl From<&UserIdentity> for Claims {
    fn from(user: &UserIdentity) -> Self {
        Self {
            sub: Some(user.id),
            name: Some(user.name.clone()),
            email: Some(user.email.clone()),
            picture: user.image.clone(),
        }
    }
}

/// How a token becomes an external session identifier.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Issuance {
    /// Mint an opaque token backed by a session record.
    DatabaseBacked,

    /// Hand the claims to the stateless encoder.
    #[default]
    Delegated,
}

impl Issuance {
    /// Issuance path for a provider.
    #[must_use]
    pub const fn for_provider(provider: AuthProvider) -> Self {
        match provider {
            AuthProvider::Credentials => Self::DatabaseBacked,
            AuthProvider::GitHub | AuthProvider::Google => Self::Delegated,
        }
    }

    /// Short name for logs and responses.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::DatabaseBacked => "database",
            Self::Delegated => "jwt",
        }
    }
}

/// Token being prepared for issuance.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Token {
    /// Claims.
    pub claims: Claims,

    /// Selected issuance path.
    pub issuance: Issuance,
}

impl Token {
    /// Unmarked token (delegated issuance).
    #[must_use]
    pub fn new(claims: Claims) -> Self {
        Self {
            claims,
            issuance: Issuance::default(),
        }
    }

    /// Mark the token for the provider used in this sign-in.
    ///
    /// Only a credentials sign-in changes the token; claims are never touched.
    pub fn mark(&mut self, provider: AuthProvider) {
        if provider == AuthProvider::Credentials {
            self.issuance = Issuance::DatabaseBacked;
        }
    }
}

/// Build and mark the token for a sign-in.
#[must_use]
pub fn prepare_token(user: &UserIdentity, provider: AuthProvider) -> Token {
    let mut token = Token::new(Claims::from(user));
    token.mark(provider);
    token
}
