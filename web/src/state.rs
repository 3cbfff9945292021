//! Application state shared by the handlers.

use crate::extractors::SessionCookieName;
use axum::extract::FromRef;
use hybrid_auth::providers::{Clock, PasswordVerifier, SessionAdapter, TokenEncoder, UserStore};
use hybrid_auth::SignIn;
use std::sync::Arc;

/// Shared application state.
///
/// Generic over the same collaborators as [`SignIn`]; the server picks
/// concrete stores at startup and tests plug in mocks.
pub struct AppState<U, S, P, E, C>
where
    U: UserStore + Clone,
    S: SessionAdapter + Clone,
    P: PasswordVerifier + Clone + 'static,
    E: TokenEncoder + Clone,
    C: Clock + Clone,
{
    /// Sign-in service.
    pub signin: Arc<SignIn<U, S, P, E, C>>,

    /// Add `Secure` to session cookies (HTTPS deployments).
    pub secure_cookies: bool,
}

impl<U, S, P, E, C> AppState<U, S, P, E, C>
where
    U: UserStore + Clone,
    S: SessionAdapter + Clone,
    P: PasswordVerifier + Clone + 'static,
    E: TokenEncoder + Clone,
    C: Clock + Clone,
{
    /// Create application state.
    #[must_use]
    pub fn new(signin: SignIn<U, S, P, E, C>) -> Self {
        Self {
            signin: Arc::new(signin),
            secure_cookies: false,
        }
    }

    /// Mark session cookies `Secure`.
    #[must_use]
    pub const fn with_secure_cookies(mut self, secure: bool) -> Self {
        self.secure_cookies = secure;
        self
    }
}

impl<U, S, P, E, C> Clone for AppState<U, S, P, E, C>
where
    U: UserStore + Clone,
    S: SessionAdapter + Clone,
    P: PasswordVerifier + Clone + 'static,
    E: TokenEncoder + Clone,
    C: Clock + Clone,
{
    fn clone(&self) -> Self {
        Self {
            signin: Arc::clone(&self.signin),
            secure_cookies: self.secure_cookies,
        }
    }
}

impl<U, S, P, E, C> FromRef<AppState<U, S, P, E, C>> for SessionCookieName
where
    U: UserStore + Clone,
    S: SessionAdapter + Clone,
    P: PasswordVerifier + Clone + 'static,
    E: TokenEncoder + Clone,
    C: Clock + Clone,
{
    fn from_ref(state: &AppState<U, S, P, E, C>) -> Self {
        Self(state.signin.config().session.cookie_name.clone())
    }
}
