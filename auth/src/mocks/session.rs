//! Mock session adapter for testing.

use crate::error::{AuthError, Result};
use crate::providers::SessionAdapter;
use crate::state::{SessionRecord, SessionToken};
use std::collections::HashMap;
use std::future::Future;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

/// Mock session adapter.
///
/// Uses in-memory storage. `reject_creates(true)` makes `create_session`
/// return nothing, like an adapter that silently failed to persist.
#[derive(Debug, Clone)]
pub struct MockSessionAdapter {
    sessions: Arc<Mutex<HashMap<SessionToken, SessionRecord>>>,
    reject: Arc<AtomicBool>,
}

impl MockSessionAdapter {
    /// Create a new mock session adapter.
    #[must_use]
    pub fn new() -> Self {
        Self {
            sessions: Arc::new(Mutex::new(HashMap::new())),
            reject: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Make subsequent `create_session` calls return `None`.
    pub fn reject_creates(&self, reject: bool) {
        self.reject.store(reject, Ordering::SeqCst);
    }

    /// Number of stored sessions.
    ///
    /// # Errors
    ///
    /// Returns error if the lock is poisoned.
    pub fn session_count(&self) -> Result<usize> {
        Ok(self
            .sessions
            .lock()
            .map_err(|_| AuthError::InternalError("session lock poisoned".to_string()))?
            .len())
    }
}

impl Default for MockSessionAdapter {
    fn default() -> Self {
        Self::new()
    }
}

impl SessionAdapter for MockSessionAdapter {
    fn create_session(
        &self,
        session: &SessionRecord,
    ) -> impl Future<Output = Result<Option<SessionRecord>>> + Send {
        let sessions = Arc::clone(&self.sessions);
        let reject = self.reject.load(Ordering::SeqCst);
        let session = session.clone();

        async move {
            if reject {
                return Ok(None);
            }

            let mut sessions = sessions
                .lock()
                .map_err(|_| AuthError::InternalError("session lock poisoned".to_string()))?;

            if sessions.contains_key(&session.session_token) {
                return Ok(None);
            }

            sessions.insert(session.session_token.clone(), session.clone());
            Ok(Some(session))
        }
    }

    fn get_session(
        &self,
        session_token: &SessionToken,
    ) -> impl Future<Output = Result<Option<SessionRecord>>> + Send {
        let sessions = Arc::clone(&self.sessions);
        let session_token = session_token.clone();

        async move {
            Ok(sessions
                .lock()
                .map_err(|_| AuthError::InternalError("session lock poisoned".to_string()))?
                .get(&session_token)
                .cloned())
        }
    }

    fn delete_session(
        &self,
        session_token: &SessionToken,
    ) -> impl Future<Output = Result<Option<SessionRecord>>> + Send {
        let sessions = Arc::clone(&self.sessions);
        let session_token = session_token.clone();

        async move {
            Ok(sessions
                .lock()
                .map_err(|_| AuthError::InternalError("session lock poisoned".to_string()))?
                .remove(&session_token))
        }
    }
}
