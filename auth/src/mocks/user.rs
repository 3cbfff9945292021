//! Mock user store for testing.

use crate::error::{AuthError, Result};
use crate::providers::UserStore;
use crate::state::{UserId, UserRecord};
use std::collections::HashMap;
use std::future::Future;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

/// Mock user store.
///
/// Uses in-memory storage keyed by email, and counts email lookups.
#[derive(Debug, Clone)]
pub struct MockUserStore {
    users_by_email: Arc<Mutex<HashMap<String, UserRecord>>>,
    lookups: Arc<AtomicUsize>,
}

impl MockUserStore {
    /// Create an empty mock user store.
    #[must_use]
    pub fn new() -> Self {
        Self {
            users_by_email: Arc::new(Mutex::new(HashMap::new())),
            lookups: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Insert a user record.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::DatabaseError` if the email is already taken.
    pub fn insert(&self, user: UserRecord) -> Result<()> {
        let mut users = self
            .users_by_email
            .lock()
            .map_err(|_| AuthError::InternalError("user store lock poisoned".to_string()))?;

        if users.contains_key(&user.email) {
            return Err(AuthError::DatabaseError("Email already exists".to_string()));
        }

        users.insert(user.email.clone(), user);
        Ok(())
    }

    /// Number of `find_user_by_email` calls so far.
    #[must_use]
    pub fn lookup_count(&self) -> usize {
        self.lookups.load(Ordering::SeqCst)
    }
}

impl Default for MockUserStore {
    fn default() -> Self {
        Self::new()
    }
}

impl UserStore for MockUserStore {
    fn find_user_by_email(
        &self,
        email: &str,
    ) -> impl Future<Output = Result<Option<UserRecord>>> + Send {
        let users_by_email = Arc::clone(&self.users_by_email);
        let lookups = Arc::clone(&self.lookups);
        let email = email.to_string();

        async move {
            lookups.fetch_add(1, Ordering::SeqCst);
            Ok(users_by_email
                .lock()
                .map_err(|_| AuthError::InternalError("user store lock poisoned".to_string()))?
                .get(&email)
                .cloned())
        }
    }

    fn get_user(&self, user_id: UserId) -> impl Future<Output = Result<Option<UserRecord>>> + Send {
        let users_by_email = Arc::clone(&self.users_by_email);

        async move {
            Ok(users_by_email
                .lock()
                .map_err(|_| AuthError::InternalError("user store lock poisoned".to_string()))?
                .values()
                .find(|user| user.id == user_id)
                .cloned())
        }
    }
}
