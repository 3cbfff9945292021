//! Mock password verifier for testing.

use crate::providers::PasswordVerifier;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

const PREFIX: &str = "mock$";

/// Mock password verifier.
///
/// Hashes are `mock$<password>`. Every verification, decoy included, is counted.
#[derive(Debug, Clone, Default)]
pub struct MockPasswordVerifier {
    verifications: Arc<AtomicUsize>,
}

impl MockPasswordVerifier {
    /// Create a new mock verifier.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Mock hash for `password`.
    #[must_use]
    pub fn hash(password: &str) -> String {
        format!("{PREFIX}{password}")
    }

    /// Number of verifications performed.
    #[must_use]
    pub fn verification_count(&self) -> usize {
        self.verifications.load(Ordering::SeqCst)
    }
}

impl PasswordVerifier for MockPasswordVerifier {
    fn verify(&self, password: &str, password_hash: &str) -> bool {
        self.verifications.fetch_add(1, Ordering::SeqCst);
        password_hash.strip_prefix(PREFIX) == Some(password)
    }

    fn verify_decoy(&self, _password: &str) {
        self.verifications.fetch_add(1, Ordering::SeqCst);
    }
}
