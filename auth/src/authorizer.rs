//! Credential authorizer.
//!
//! Validates an email/password pair against the user store. The outcome is
//! either the stored user record or a rejection; rejections carry no reason
//! so callers cannot enumerate accounts.
//!
//! Hash verification runs on the blocking pool.

use crate::error::{AuthError, Result};
use crate::providers::{PasswordVerifier, UserStore};
use crate::state::{Credentials, UserRecord};

/// Validates credentials against a [`UserStore`] through a [`PasswordVerifier`].
#[derive(Debug, Clone)]
pub struct CredentialAuthorizer<U, P> {
    users: U,
    passwords: P,
}

impl<U, P> CredentialAuthorizer<U, P>
where
    U: UserStore,
    P: PasswordVerifier + Clone + 'static,
{
    /// Create an authorizer.
    #[must_use]
    pub const fn new(users: U, passwords: P) -> Self {
        Self { users, passwords }
    }

    /// Authorize a credentials pair.
    ///
    /// # Returns
    ///
    /// - `Some(record)` when the email matches a user and the password matches
    ///   its hash; the record is returned unchanged
    /// - `None` when a field is missing (the store is not queried), the email
    ///   is unknown, or the password does not match
    ///
    /// # Errors
    ///
    /// Returns error if the user store fails or the hashing task panics.
    pub async fn authorize(&self, credentials: &Credentials) -> Result<Option<UserRecord>> {
        let (Some(email), Some(password)) = (credentials.email(), credentials.password()) else {
            tracing::debug!("Credentials rejected: missing field");
            return Ok(None);
        };

        let password = password.to_string();
        let passwords = self.passwords.clone();

        let Some(user) = self.users.find_user_by_email(email).await? else {
            tokio::task::spawn_blocking(move || passwords.verify_decoy(&password))
                .await
                .map_err(|e| AuthError::InternalError(format!("Password task failed: {e}")))?;
            tracing::debug!("Credentials rejected: no matching user");
            return Ok(None);
        };

        let password_hash = user.password_hash.clone();
        let matches =
            tokio::task::spawn_blocking(move || passwords.verify(&password, &password_hash))
                .await
                .map_err(|e| AuthError::InternalError(format!("Password task failed: {e}")))?;

        if !matches {
            tracing::debug!(user_id = %user.id, "Credentials rejected: password mismatch");
            return Ok(None);
        }

        Ok(Some(user))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::mocks::{MockPasswordVerifier, MockUserStore};
    use crate::state::UserId;

    fn store_with_user() -> (MockUserStore, UserRecord) {
        let user = UserRecord {
            id: UserId::new(),
            email: "a@x.com".to_string(),
            name: "A".to_string(),
            image: None,
            password_hash: MockPasswordVerifier::hash("correct"),
        };
        let store = MockUserStore::new();
        store.insert(user.clone()).unwrap();
        (store, user)
    }

    #[tokio::test]
    async fn test_correct_password_returns_record() {
        let (store, user) = store_with_user();
        let authorizer = CredentialAuthorizer::new(store, MockPasswordVerifier::new());

        let result = authorizer
            .authorize(&Credentials::new("a@x.com", "correct"))
            .await
            .unwrap();

        assert_eq!(result, Some(user));
    }

    #[tokio::test]
    async fn test_wrong_password_rejected() {
        let (store, _) = store_with_user();
        let authorizer = CredentialAuthorizer::new(store, MockPasswordVerifier::new());

        let result = authorizer
            .authorize(&Credentials::new("a@x.com", "wrong"))
            .await
            .unwrap();

        assert!(result.is_none());
    }

    #[tokio::test]
    async fn test_unknown_email_runs_decoy_verification() {
        let (store, _) = store_with_user();
        let passwords = MockPasswordVerifier::new();
        let authorizer = CredentialAuthorizer::new(store, passwords.clone());

        let result = authorizer
            .authorize(&Credentials::new("nobody@x.com", "correct"))
            .await
            .unwrap();

        assert!(result.is_none());
        assert_eq!(passwords.verification_count(), 1);
    }

    #[tokio::test]
    async fn test_missing_password_skips_lookup() {
        let (store, _) = store_with_user();
        let authorizer = CredentialAuthorizer::new(store.clone(), MockPasswordVerifier::new());

        let credentials = Credentials {
            email: Some("a@x.com".to_string()),
            password: None,
        };
        assert!(authorizer.authorize(&credentials).await.unwrap().is_none());
        assert_eq!(store.lookup_count(), 0);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 2)]
    async fn test_verification_runs_off_the_async_worker() {
        #[derive(Clone)]
        struct ThreadRecorder(std::sync::Arc<std::sync::Mutex<Vec<std::thread::ThreadId>>>);

        impl PasswordVerifier for ThreadRecorder {
            fn verify(&self, _password: &str, _password_hash: &str) -> bool {
                self.0.lock().unwrap().push(std::thread::current().id());
                false
            }

            fn verify_decoy(&self, _password: &str) {
                self.0.lock().unwrap().push(std::thread::current().id());
            }
        }

        let (store, _) = store_with_user();
        let recorder = ThreadRecorder(std::sync::Arc::default());
        let authorizer = CredentialAuthorizer::new(store, recorder.clone());

        authorizer
            .authorize(&Credentials::new("a@x.com", "wrong"))
            .await
            .unwrap();
        authorizer
            .authorize(&Credentials::new("nobody@x.com", "wrong"))
            .await
            .unwrap();

        let caller = std::thread::current().id();
        let threads = recorder.0.lock().unwrap().clone();
        assert_eq!(threads.len(), 2);
        assert!(threads.iter().all(|id| *id != caller));
    }
}
