//! Stateless token encoder trait.

use crate::claims::Claims;
use crate::error::Result;
use chrono::{DateTime, Utc};

/// Default encoder for federated sign-ins.
///
/// Produces a self-contained token from the claims; no store is touched.
pub trait TokenEncoder: Send + Sync {
    /// Encode claims issued at `issued_at`.
    ///
    /// # Returns
    ///
    /// The encoded token and its expiry.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::TokenEncoding` if the claims cannot be encoded.
    fn encode(&self, claims: &Claims, issued_at: DateTime<Utc>) -> Result<(String, DateTime<Utc>)>;
}
