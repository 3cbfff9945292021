//! Token issuance.
//!
//! Turns a prepared [`Token`] into the identifier handed to the session
//! cookie. The path is chosen by [`Issuance`]:
//!
//! ```text
//! DatabaseBacked ─▶ new SessionToken ─▶ SessionAdapter::create_session ─▶ IssuedToken::Session
//! Delegated      ─▶ TokenEncoder::encode ─────────────────────────────▶ IssuedToken::Stateless
//! ```
//!
//! Both invariant failures on the database path (`MissingSubject`,
//! `SessionNotCreated`) abort the sign-in. Nothing is retried.

use crate::claims::{Issuance, Token};
use crate::error::{AuthError, Result};
use crate::providers::{Clock, SessionAdapter, TokenEncoder};
use crate::state::{SessionRecord, SessionToken};
use chrono::{DateTime, Duration, Utc};
use serde::Serialize;

/// External session identifier produced by a sign-in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "strategy", rename_all = "snake_case")]
pub enum IssuedToken {
    /// Opaque token backed by a stored session.
    Session(SessionRecord),

    /// Self-contained token from the stateless encoder.
    Stateless {
        /// Encoded token.
        token: String,
        /// Expiry.
        expires: DateTime<Utc>,
    },
}

impl IssuedToken {
    /// Value to place in the session cookie.
    #[must_use]
    pub fn value(&self) -> &str {
        match self {
            Self::Session(session) => session.session_token.as_str(),
            Self::Stateless { token, .. } => token,
        }
    }

    /// Expiry of the issued token.
    #[must_use]
    pub const fn expires(&self) -> DateTime<Utc> {
        match self {
            Self::Session(session) => session.expires,
            Self::Stateless { expires, .. } => *expires,
        }
    }

    /// Issuance path that produced this token.
    #[must_use]
    pub const fn issuance(&self) -> Issuance {
        match self {
            Self::Session(_) => Issuance::DatabaseBacked,
            Self::Stateless { .. } => Issuance::Delegated,
        }
    }
}

/// Issues tokens on either path.
#[derive(Debug, Clone)]
pub struct TokenIssuer<S, E, C> {
    sessions: S,
    encoder: E,
    clock: C,
    session_max_age: Duration,
}

impl<S, E, C> TokenIssuer<S, E, C>
where
    S: SessionAdapter,
    E: TokenEncoder,
    C: Clock,
{
    /// Create an issuer.
    ///
    /// # Arguments
    ///
    /// * `session_max_age` - Lifetime of database sessions (30 days by default)
    #[must_use]
    pub const fn new(sessions: S, encoder: E, clock: C, session_max_age: Duration) -> Self {
        Self {
            sessions,
            encoder,
            clock,
            session_max_age,
        }
    }

    /// Issue a token.
    ///
    /// # Errors
    ///
    /// - `AuthError::MissingSubject` if a database-backed token has no subject
    /// - `AuthError::SessionNotCreated` if the adapter returned nothing
    /// - `AuthError::Configuration` if the session lifetime is not positive
    ///   or the expiry is out of range
    /// - Adapter or encoder errors, unchanged
    pub async fn issue(&self, token: &Token) -> Result<IssuedToken> {
        match token.issuance {
            Issuance::DatabaseBacked => self.issue_session(token).await,
            Issuance::Delegated => self.issue_stateless(token),
        }
    }

    async fn issue_session(&self, token: &Token) -> Result<IssuedToken> {
        let session_token = SessionToken::generate();

        let Some(user_id) = token.claims.sub else {
            tracing::error!("Database-backed token has no subject");
            return Err(AuthError::MissingSubject);
        };

        let expires = self.session_expiry()?;
        let session = SessionRecord {
            session_token,
            user_id,
            expires,
        };

        let Some(created) = self.sessions.create_session(&session).await? else {
            tracing::error!(user_id = %user_id, "Session adapter returned no session");
            return Err(AuthError::SessionNotCreated);
        };

        tracing::info!(
            user_id = %created.user_id,
            session_expires = %created.expires,
            "Issued database session"
        );

        Ok(IssuedToken::Session(created))
    }

    fn session_expiry(&self) -> Result<DateTime<Utc>> {
        if self.session_max_age <= Duration::zero() {
            return Err(AuthError::Configuration(format!(
                "session max age must be positive, got {}",
                self.session_max_age
            )));
        }

        self.clock
            .now()
            .checked_add_signed(self.session_max_age)
            .ok_or_else(|| {
                AuthError::Configuration(format!(
                    "session max age {} overflows the session expiry",
                    self.session_max_age
                ))
            })
    }

    fn issue_stateless(&self, token: &Token) -> Result<IssuedToken> {
        let (encoded, expires) = self.encoder.encode(&token.claims, self.clock.now())?;

        tracing::info!(
            user_id = ?token.claims.sub.map(|id| id.to_string()),
            token_expires = %expires,
            "Issued stateless token"
        );

        Ok(IssuedToken::Stateless {
            token: encoded,
            expires,
        })
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::panic)]
mod tests {
    use super::*;
    use crate::claims::Claims;
    use crate::mocks::{test_clock, MockSessionAdapter, MockTokenEncoder};
    use crate::state::UserId;

    fn issuer(
        sessions: MockSessionAdapter,
        encoder: MockTokenEncoder,
    ) -> TokenIssuer<MockSessionAdapter, MockTokenEncoder, crate::mocks::FixedClock> {
        TokenIssuer::new(sessions, encoder, test_clock(), Duration::days(30))
    }

    fn marked_token(sub: Option<UserId>) -> Token {
        Token {
            claims: Claims {
                sub,
                ..Claims::default()
            },
            issuance: Issuance::DatabaseBacked,
        }
    }

    #[tokio::test]
    async fn test_database_path_creates_thirty_day_session() {
        let sessions = MockSessionAdapter::new();
        let encoder = MockTokenEncoder::new();
        let issuer = issuer(sessions.clone(), encoder.clone());
        let user_id = UserId::new();

        let issued = issuer.issue(&marked_token(Some(user_id))).await.unwrap();

        let IssuedToken::Session(session) = &issued else {
            panic!("expected a database session");
        };
        assert_eq!(session.user_id, user_id);
        assert_eq!(session.expires, test_clock().now() + Duration::days(30));

        let stored = sessions.get_session(&session.session_token).await.unwrap();
        assert_eq!(stored.as_ref(), Some(session));
        assert_eq!(issued.value(), session.session_token.as_str());
        assert_eq!(encoder.encode_count(), 0);
    }

    #[tokio::test]
    async fn test_missing_subject_is_fatal() {
        let sessions = MockSessionAdapter::new();
        let issuer = issuer(sessions.clone(), MockTokenEncoder::new());

        let err = issuer.issue(&marked_token(None)).await.unwrap_err();

        assert_eq!(err, AuthError::MissingSubject);
        assert_eq!(sessions.session_count().unwrap(), 0);
    }

    #[tokio::test]
    async fn test_adapter_returning_nothing_is_fatal() {
        let sessions = MockSessionAdapter::new();
        sessions.reject_creates(true);
        let issuer = issuer(sessions, MockTokenEncoder::new());

        let err = issuer
            .issue(&marked_token(Some(UserId::new())))
            .await
            .unwrap_err();

        assert_eq!(err, AuthError::SessionNotCreated);
    }

    #[tokio::test]
    async fn test_delegated_path_never_creates_session() {
        let sessions = MockSessionAdapter::new();
        let encoder = MockTokenEncoder::new();
        let issuer = issuer(sessions.clone(), encoder.clone());

        let token = Token::new(Claims {
            sub: Some(UserId::new()),
            ..Claims::default()
        });
        let issued = issuer.issue(&token).await.unwrap();

        assert_eq!(issued.issuance(), Issuance::Delegated);
        assert_eq!(encoder.encode_count(), 1);
        assert_eq!(sessions.session_count().unwrap(), 0);
    }

    #[tokio::test]
    async fn test_each_issue_mints_fresh_token() {
        let issuer = issuer(MockSessionAdapter::new(), MockTokenEncoder::new());
        let token = marked_token(Some(UserId::new()));

        let first = issuer.issue(&token).await.unwrap();
        let second = issuer.issue(&token).await.unwrap();

        assert_ne!(first.value(), second.value());
    }

    #[tokio::test]
    async fn test_unrepresentable_session_lifetime_is_an_error() {
        let sessions = MockSessionAdapter::new();
        let issuer = TokenIssuer::new(
            sessions.clone(),
            MockTokenEncoder::new(),
            test_clock(),
            Duration::days(1_000_000_000),
        );

        let err = issuer
            .issue(&marked_token(Some(UserId::new())))
            .await
            .unwrap_err();

        assert!(matches!(err, AuthError::Configuration(_)));
        assert_eq!(sessions.session_count().unwrap(), 0);
    }

    #[tokio::test]
    async fn test_non_positive_session_lifetime_is_an_error() {
        for max_age in [Duration::zero(), Duration::days(-5)] {
            let sessions = MockSessionAdapter::new();
            let issuer =
                TokenIssuer::new(sessions.clone(), MockTokenEncoder::new(), test_clock(), max_age);

            let err = issuer
                .issue(&marked_token(Some(UserId::new())))
                .await
                .unwrap_err();

            assert!(matches!(err, AuthError::Configuration(_)));
            assert_eq!(sessions.session_count().unwrap(), 0);
        }
    }
}
