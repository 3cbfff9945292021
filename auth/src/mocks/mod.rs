//! Mock provider implementations for testing.
//!
//! This module provides simple, in-memory implementations of all provider traits
//! for use in unit and integration tests.

pub mod clock;
pub mod encoder;
pub mod password;
pub mod session;
pub mod user;

pub use clock::{test_clock, FixedClock};
pub use encoder::MockTokenEncoder;
pub use password::MockPasswordVerifier;
pub use session::MockSessionAdapter;
pub use user::MockUserStore;
