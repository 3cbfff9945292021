//! Session adapter trait.

use crate::error::Result;
use crate::state::{SessionRecord, SessionToken};
use std::future::Future;

/// Session adapter.
///
/// This trait abstracts over session storage (`PostgreSQL` or Redis).
///
/// # Implementation Notes
///
/// - Session tokens are unique; the backing store enforces it
/// - Creation has insert-and-return-or-null semantics
/// - Expiry checks belong to the caller, which owns the clock
pub trait SessionAdapter: Send + Sync {
    /// Create session.
    ///
    /// # Returns
    ///
    /// The stored record, or `None` if nothing was stored (e.g. the token
    /// already exists).
    ///
    /// # Errors
    ///
    /// Returns error if the backing store is unreachable.
    fn create_session(
        &self,
        session: &SessionRecord,
    ) -> impl Future<Output = Result<Option<SessionRecord>>> + Send;

    /// Get session by token.
    ///
    /// # Errors
    ///
    /// Returns error if the backing store is unreachable.
    fn get_session(
        &self,
        session_token: &SessionToken,
    ) -> impl Future<Output = Result<Option<SessionRecord>>> + Send;

    /// Delete session.
    ///
    /// # Returns
    ///
    /// The deleted record, or `None` if no session had this token.
    ///
    /// # Errors
    ///
    /// Returns error if the backing store is unreachable.
    fn delete_session(
        &self,
        session_token: &SessionToken,
    ) -> impl Future<Output = Result<Option<SessionRecord>>> + Send;
}
