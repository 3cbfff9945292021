//! Router assembly.

use crate::handlers::{credentials, health, providers, session};
use crate::middleware::correlation_id_layer;
use crate::state::AppState;
use axum::{
    routing::{get, post},
    Router,
};
use hybrid_auth::providers::{Clock, PasswordVerifier, SessionAdapter, TokenEncoder, UserStore};
use tower_http::trace::TraceLayer;

/// Mount point of the auth routes.
pub const AUTH_BASE_PATH: &str = "/api/auth";

/// Auth routes, relative to [`AUTH_BASE_PATH`].
///
/// - `POST /callback/credentials`
/// - `GET /session`
/// - `POST /signout`
/// - `GET /providers`
/// - `GET /health`
pub fn auth_router<U, S, P, E, C>(state: AppState<U, S, P, E, C>) -> Router
where
    U: UserStore + Clone + 'static,
    S: SessionAdapter + Clone + 'static,
    P: PasswordVerifier + Clone + 'static,
    E: TokenEncoder + Clone + 'static,
    C: Clock + Clone + 'static,
{
    Router::new()
        .route(
            "/callback/credentials",
            post(credentials::credentials_callback::<U, S, P, E, C>),
        )
        .route("/session", get(session::get_session::<U, S, P, E, C>))
        .route("/signout", post(session::sign_out::<U, S, P, E, C>))
        .route("/providers", get(providers::list_providers::<U, S, P, E, C>))
        .route("/health", get(health::health_check))
        .with_state(state)
}

/// Complete application: auth routes under [`AUTH_BASE_PATH`] with
/// request tracing and correlation IDs.
pub fn app<U, S, P, E, C>(state: AppState<U, S, P, E, C>) -> Router
where
    U: UserStore + Clone + 'static,
    S: SessionAdapter + Clone + 'static,
    P: PasswordVerifier + Clone + 'static,
    E: TokenEncoder + Clone + 'static,
    C: Clock + Clone + 'static,
{
    Router::new()
        .nest(AUTH_BASE_PATH, auth_router(state))
        .layer(TraceLayer::new_for_http())
        .layer(correlation_id_layer())
}
