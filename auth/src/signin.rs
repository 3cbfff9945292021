//! Sign-in orchestration.
//!
//! [`SignIn`] composes the authorizer, claim marking and the issuer for one
//! request, and resolves or removes database sessions afterwards.
//!
//! ```text
//! credentials ─▶ authorize ─▶ prepare_token(Credentials) ─▶ issue ─▶ SessionRecord
//! federated   ─────────────▶ prepare_token(GitHub|Google) ─▶ issue ─▶ JWT
//! ```

use crate::authorizer::CredentialAuthorizer;
use crate::claims::prepare_token;
use crate::config::AuthConfig;
use crate::environment::AuthEnvironment;
use crate::error::{AuthError, Result};
use crate::issuance::{IssuedToken, TokenIssuer};
use crate::providers::{Clock, PasswordVerifier, SessionAdapter, TokenEncoder, UserStore};
use crate::state::{AuthProvider, Credentials, SessionRecord, SessionToken, UserIdentity};

/// Request-scoped sign-in operations over an [`AuthEnvironment`].
#[derive(Clone)]
pub struct SignIn<U, S, P, E, C>
where
    U: UserStore + Clone,
    S: SessionAdapter + Clone,
    P: PasswordVerifier + Clone + 'static,
    E: TokenEncoder + Clone,
    C: Clock + Clone,
{
    env: AuthEnvironment<U, S, P, E, C>,
    config: AuthConfig,
    authorizer: CredentialAuthorizer<U, P>,
    issuer: TokenIssuer<S, E, C>,
}

impl<U, S, P, E, C> SignIn<U, S, P, E, C>
where
    U: UserStore + Clone,
    S: SessionAdapter + Clone,
    P: PasswordVerifier + Clone + 'static,
    E: TokenEncoder + Clone,
    C: Clock + Clone,
{
    /// Create the sign-in service.
    #[must_use]
    pub fn new(env: AuthEnvironment<U, S, P, E, C>, config: AuthConfig) -> Self {
        let authorizer = CredentialAuthorizer::new(env.users.clone(), env.passwords.clone());
        let issuer = TokenIssuer::new(
            env.sessions.clone(),
            env.encoder.clone(),
            env.clock.clone(),
            config.session.max_age,
        );

        Self {
            env,
            config,
            authorizer,
            issuer,
        }
    }

    /// Configuration in use.
    #[must_use]
    pub const fn config(&self) -> &AuthConfig {
        &self.config
    }

    /// Sign in with email and password.
    ///
    /// # Errors
    ///
    /// - `AuthError::ProviderNotEnabled` if credentials sign-in is disabled
    /// - `AuthError::InvalidCredentials` on any rejection
    /// - Issuance invariant errors (`MissingSubject`, `SessionNotCreated`)
    /// - Store errors
    pub async fn sign_in_with_credentials(&self, credentials: &Credentials) -> Result<IssuedToken> {
        self.config.require_enabled(AuthProvider::Credentials)?;

        let Some(user) = self.authorizer.authorize(credentials).await? else {
            tracing::info!(provider = %AuthProvider::Credentials, "Sign-in rejected");
            return Err(AuthError::InvalidCredentials);
        };

        let token = prepare_token(&user.identity(), AuthProvider::Credentials);
        self.issuer.issue(&token).await
    }

    /// Sign in a user already verified by an external identity provider.
    ///
    /// # Errors
    ///
    /// - `AuthError::ProviderNotEnabled` if `provider` is not a configured
    ///   federated provider
    /// - Encoder errors
    pub async fn sign_in_federated(
        &self,
        provider: AuthProvider,
        user: &UserIdentity,
    ) -> Result<IssuedToken> {
        if !provider.is_federated() {
            return Err(AuthError::ProviderNotEnabled {
                provider: provider.as_str().to_string(),
            });
        }
        self.config.require_enabled(provider)?;

        let token = prepare_token(user, provider);
        self.issuer.issue(&token).await
    }

    /// Resolve a database session and its user.
    ///
    /// An expired session is deleted before reporting `SessionExpired`.
    ///
    /// # Errors
    ///
    /// - `AuthError::SessionNotFound` if the token is unknown or its user is gone
    /// - `AuthError::SessionExpired` if the session has expired
    /// - Store errors
    pub async fn session(&self, session_token: &SessionToken) -> Result<(SessionRecord, UserIdentity)> {
        let session = self
            .env
            .sessions
            .get_session(session_token)
            .await?
            .ok_or(AuthError::SessionNotFound)?;

        if session.is_expired(self.env.clock.now()) {
            self.env.sessions.delete_session(session_token).await?;
            tracing::debug!(user_id = %session.user_id, "Removed expired session");
            return Err(AuthError::SessionExpired);
        }

        let user = self
            .env
            .users
            .get_user(session.user_id)
            .await?
            .ok_or(AuthError::SessionNotFound)?;

        Ok((session, user.identity()))
    }

    /// Sign out: delete the session. Unknown tokens are ignored.
    ///
    /// # Errors
    ///
    /// Returns error if the session adapter fails.
    pub async fn sign_out(&self, session_token: &SessionToken) -> Result<()> {
        if let Some(session) = self.env.sessions.delete_session(session_token).await? {
            tracing::info!(user_id = %session.user_id, "Signed out");
        }
        Ok(())
    }
}
