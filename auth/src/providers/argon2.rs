//! Argon2id password verifier.
//!
//! Stored hashes are PHC strings (`$argon2id$v=19$m=19456,t=2,p=1$...`).
//! Verification reads the parameters from the stored string, so hashes
//! created with older parameters keep verifying after a parameter change.

use crate::error::{AuthError, Result};
use crate::providers::PasswordVerifier;
use argon2::password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, SaltString};
use argon2::{Algorithm, Argon2, Params, Version};

/// Argon2id password verifier.
///
/// Holds a decoy hash created at construction so that lookups for unknown
/// emails still perform one full verification.
#[derive(Clone)]
pub struct Argon2PasswordVerifier {
    argon2: Argon2<'static>,
    decoy_hash: String,
}

impl Argon2PasswordVerifier {
    /// Create a verifier with the default Argon2id parameters.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::PasswordHash` if the decoy hash cannot be created.
    pub fn new() -> Result<Self> {
        Self::with_params(Params::default())
    }

    /// Create a verifier with explicit cost parameters.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::PasswordHash` if the decoy hash cannot be created.
    pub fn with_params(params: Params) -> Result<Self> {
        let argon2 = Argon2::new(Algorithm::Argon2id, Version::V0x13, params);
        let decoy_hash = hash_with(&argon2, &uuid::Uuid::new_v4().to_string())?;
        Ok(Self { argon2, decoy_hash })
    }

    /// Hash a password into a PHC string.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::PasswordHash` if hashing fails.
    pub fn hash_password(&self, password: &str) -> Result<String> {
        hash_with(&self.argon2, password)
    }
}

impl std::fmt::Debug for Argon2PasswordVerifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Argon2PasswordVerifier").finish_non_exhaustive()
    }
}

impl PasswordVerifier for Argon2PasswordVerifier {
    fn verify(&self, password: &str, password_hash: &str) -> bool {
        let Ok(parsed) = PasswordHash::new(password_hash) else {
            tracing::warn!("Stored password hash is not a valid PHC string");
            return false;
        };

        parsed
            .verify_password(&[&self.argon2], password.as_bytes())
            .is_ok()
    }

    fn verify_decoy(&self, password: &str) {
        let _ = self.verify(password, &self.decoy_hash);
    }
}

fn hash_with(argon2: &Argon2<'_>, password: &str) -> Result<String> {
    let salt = SaltString::generate(&mut OsRng);

    argon2
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| AuthError::PasswordHash(e.to_string()))
}
