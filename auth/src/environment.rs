//! Authentication environment.
//!
//! This module defines the environment type for dependency injection
//! into the sign-in flow.

use crate::providers::{Clock, PasswordVerifier, SessionAdapter, TokenEncoder, UserStore};

/// Authentication environment.
///
/// Contains all external collaborators needed by the sign-in flow.
///
/// # Type Parameters
///
/// - `U`: User store
/// - `S`: Session adapter
/// - `P`: Password verifier
/// - `E`: Stateless token encoder
/// - `C`: Clock
#[derive(Clone)]
pub struct AuthEnvironment<U, S, P, E, C>
where
    U: UserStore + Clone,
    S: SessionAdapter + Clone,
    P: PasswordVerifier + Clone,
    E: TokenEncoder + Clone,
    C: Clock + Clone,
{
    /// User store (`PostgreSQL`, read-only).
    pub users: U,

    /// Session adapter (`PostgreSQL` or `Redis`).
    pub sessions: S,

    /// Password verifier.
    pub passwords: P,

    /// Default stateless encoder (federated sign-ins).
    pub encoder: E,

    /// Time source.
    pub clock: C,
}

impl<U, S, P, E, C> AuthEnvironment<U, S, P, E, C>
where
    U: UserStore + Clone,
    S: SessionAdapter + Clone,
    P: PasswordVerifier + Clone,
    E: TokenEncoder + Clone,
    C: Clock + Clone,
{
    /// Create a new authentication environment.
    #[must_use]
    pub const fn new(users: U, sessions: S, passwords: P, encoder: E, clock: C) -> Self {
        Self {
            users,
            sessions,
            passwords,
            encoder,
            clock,
        }
    }
}
