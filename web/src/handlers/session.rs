//! Session lookup and sign-out.

use super::cookie::clear_cookie;
use crate::error::AppError;
use crate::WebResult;
use crate::extractors::{CorrelationId, SessionCookie};
use crate::state::AppState;
use axum::{
    extract::State,
    http::{header, HeaderMap},
    Json,
};
use chrono::{DateTime, Utc};
use hybrid_auth::providers::{Clock, PasswordVerifier, SessionAdapter, TokenEncoder, UserStore};
use hybrid_auth::UserIdentity;
use serde::Serialize;

/// Current session.
#[derive(Debug, Clone, Serialize)]
pub struct SessionResponse {
    /// Signed-in user.
    pub user: UserIdentity,

    /// Session expiry.
    pub expires: DateTime<Utc>,
}

/// Sign-out result.
#[derive(Debug, Clone, Serialize)]
pub struct SignOutResponse {
    /// Page the client should navigate to.
    pub redirect: String,
}

/// `GET /api/auth/session`
///
/// # Errors
///
/// 401 if the token is missing, unknown or expired.
pub async fn get_session<U, S, P, E, C>(
    State(state): State<AppState<U, S, P, E, C>>,
    SessionCookie(token): SessionCookie,
) -> WebResult<Json<SessionResponse>>
where
    U: UserStore + Clone + 'static,
    S: SessionAdapter + Clone + 'static,
    P: PasswordVerifier + Clone + 'static,
    E: TokenEncoder + Clone + 'static,
    C: Clock + Clone + 'static,
{
    let (session, user) = state.signin.session(&token).await?;

    Ok(Json(SessionResponse {
        user,
        expires: session.expires,
    }))
}

/// `POST /api/auth/signout`
///
/// Succeeds without a session too; the cookie is cleared either way.
///
/// # Errors
///
/// 500 if the session store fails.
pub async fn sign_out<U, S, P, E, C>(
    State(state): State<AppState<U, S, P, E, C>>,
    correlation_id: CorrelationId,
    token: Option<SessionCookie>,
) -> Result<(HeaderMap, Json<SignOutResponse>), AppError>
where
    U: UserStore + Clone + 'static,
    S: SessionAdapter + Clone + 'static,
    P: PasswordVerifier + Clone + 'static,
    E: TokenEncoder + Clone + 'static,
    C: Clock + Clone + 'static,
{
    let config = state.signin.config();

    if let Some(SessionCookie(token)) = token {
        state.signin.sign_out(&token).await?;
    } else {
        tracing::debug!(correlation_id = %correlation_id.0, "Sign-out without a session");
    }

    let mut headers = HeaderMap::new();
    if let Some(cookie) = clear_cookie(&config.session.cookie_name, state.secure_cookies) {
        headers.insert(header::SET_COOKIE, cookie);
    }

    Ok((
        headers,
        Json(SignOutResponse {
            redirect: config.pages.sign_out.clone(),
        }),
    ))
}
