//! `Set-Cookie` values for the session cookie.

use axum::http::HeaderValue;
use chrono::{DateTime, Utc};

/// Cookie carrying a freshly issued token until `expires`.
pub(crate) fn session_cookie(
    name: &str,
    value: &str,
    expires: DateTime<Utc>,
    secure: bool,
) -> Option<HeaderValue> {
    let max_age = (expires - Utc::now()).num_seconds().max(0);
    HeaderValue::from_str(&format!(
        "{name}={value}; Path=/; HttpOnly; SameSite=Lax; Max-Age={max_age}{}",
        if secure { "; Secure" } else { "" }
    ))
    .ok()
}

/// Cookie that removes the session cookie.
pub(crate) fn clear_cookie(name: &str, secure: bool) -> Option<HeaderValue> {
    HeaderValue::from_str(&format!(
        "{name}=; Path=/; HttpOnly; SameSite=Lax; Max-Age=0{}",
        if secure { "; Secure" } else { "" }
    ))
    .ok()
}
