//! Health check handler.

use axum::http::StatusCode;

/// Liveness probe.
#[allow(clippy::unused_async)]
pub async fn health_check() -> (StatusCode, &'static str) {
    (StatusCode::OK, "ok")
}
