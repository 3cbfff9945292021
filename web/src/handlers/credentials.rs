//! Credentials sign-in callback.

use super::cookie::session_cookie;
use crate::error::AppError;
use crate::extractors::{CorrelationId, CredentialsInput};
use crate::state::AppState;
use axum::{
    extract::State,
    http::{header, HeaderMap},
    Json,
};
use chrono::{DateTime, Utc};
use hybrid_auth::constants::CREDENTIALS_SIGNIN_ERROR;
use hybrid_auth::providers::{Clock, PasswordVerifier, SessionAdapter, TokenEncoder, UserStore};
use hybrid_auth::AuthError;
use serde::Serialize;

/// Successful sign-in.
#[derive(Debug, Clone, Serialize)]
pub struct SignInResponse {
    /// Value of the session cookie.
    pub token: String,

    /// `"database"` or `"jwt"`.
    pub strategy: &'static str,

    /// Expiry of the token.
    pub expires: DateTime<Utc>,
}

/// `POST /api/auth/callback/credentials`
///
/// # Errors
///
/// - 401 `CredentialsSignin` with the sign-in page as `redirect` on rejection
/// - 500 if issuance fails
pub async fn credentials_callback<U, S, P, E, C>(
    State(state): State<AppState<U, S, P, E, C>>,
    correlation_id: CorrelationId,
    CredentialsInput(credentials): CredentialsInput,
) -> Result<(HeaderMap, Json<SignInResponse>), AppError>
where
    U: UserStore + Clone + 'static,
    S: SessionAdapter + Clone + 'static,
    P: PasswordVerifier + Clone + 'static,
    E: TokenEncoder + Clone + 'static,
    C: Clock + Clone + 'static,
{
    let config = state.signin.config();

    let issued = match state.signin.sign_in_with_credentials(&credentials).await {
        Ok(issued) => issued,
        Err(AuthError::InvalidCredentials) => {
            tracing::info!(correlation_id = %correlation_id.0, "Credentials sign-in rejected");
            return Err(AppError::credentials_signin().with_redirect(format!(
                "{}?error={CREDENTIALS_SIGNIN_ERROR}",
                config.pages.sign_in
            )));
        }
        Err(e) => return Err(e.into()),
    };

    let mut headers = HeaderMap::new();
    if let Some(cookie) = session_cookie(
        &config.session.cookie_name,
        issued.value(),
        issued.expires(),
        state.secure_cookies,
    ) {
        headers.insert(header::SET_COOKIE, cookie);
    }

    tracing::info!(
        correlation_id = %correlation_id.0,
        strategy = issued.issuance().as_str(),
        "Credentials sign-in succeeded"
    );

    Ok((
        headers,
        Json(SignInResponse {
            token: issued.value().to_string(),
            strategy: issued.issuance().as_str(),
            expires: issued.expires(),
        }),
    ))
}
