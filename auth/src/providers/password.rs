//! Password verifier trait.

/// One-way password hash comparison.
pub trait PasswordVerifier: Send + Sync {
    /// Check `password` against a stored hash.
    ///
    /// A malformed hash never matches.
    fn verify(&self, password: &str, password_hash: &str) -> bool;

    /// Run a verification whose outcome is discarded.
    ///
    /// Called when the email matched no user, so that rejection costs the
    /// same hash work whether or not the account exists.
    fn verify_decoy(&self, password: &str);
}
