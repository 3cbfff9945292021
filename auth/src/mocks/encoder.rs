//! Mock stateless token encoder for testing.

use crate::claims::Claims;
use crate::error::Result;
use crate::providers::TokenEncoder;
use chrono::{DateTime, Duration, Utc};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

/// Mock token encoder.
///
/// Produces `stateless.<n>.<sub>` tokens valid for 30 days.
#[derive(Debug, Clone, Default)]
pub struct MockTokenEncoder {
    encodes: Arc<AtomicUsize>,
}

impl MockTokenEncoder {
    /// Create a new mock encoder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of tokens encoded.
    #[must_use]
    pub fn encode_count(&self) -> usize {
        self.encodes.load(Ordering::SeqCst)
    }
}

impl TokenEncoder for MockTokenEncoder {
    fn encode(&self, claims: &Claims, issued_at: DateTime<Utc>) -> Result<(String, DateTime<Utc>)> {
        let n = self.encodes.fetch_add(1, Ordering::SeqCst);
        let sub = claims.sub.map(|id| id.to_string()).unwrap_or_default();
        Ok((format!("stateless.{n}.{sub}"), issued_at + Duration::days(30)))
    }
}
