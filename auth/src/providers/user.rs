//! User store trait.

use crate::error::Result;
use crate::state::{UserId, UserRecord};
use std::future::Future;

/// User store.
///
/// This trait abstracts over the relational user table (`PostgreSQL`).
/// Read-only: users are created by a registration flow elsewhere.
pub trait UserStore: Send + Sync {
    /// Find the user with exactly this email.
    ///
    /// # Returns
    ///
    /// `None` when no row matches. The email column is unique, so at most
    /// one row can match.
    ///
    /// # Errors
    ///
    /// Returns error if the database query fails.
    fn find_user_by_email(
        &self,
        email: &str,
    ) -> impl Future<Output = Result<Option<UserRecord>>> + Send;

    /// Get user by ID.
    ///
    /// # Errors
    ///
    /// Returns error if the database query fails.
    fn get_user(
        &self,
        user_id: UserId,
    ) -> impl Future<Output = Result<Option<UserRecord>>> + Send;
}
