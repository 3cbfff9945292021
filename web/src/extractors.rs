//! Custom Axum extractors.
//!
//! - `CorrelationId`: correlation ID set by the middleware (or from the header)
//! - `SessionCookie`: session token from the session cookie or a bearer header
//! - `CredentialsInput`: sign-in form, URL-encoded or JSON

use crate::error::AppError;
use axum::{
    async_trait,
    extract::{FromRef, FromRequest, FromRequestParts, Request},
    http::{header, request::Parts, HeaderMap},
    Form, Json,
};
use hybrid_auth::{Credentials, SessionToken};
use uuid::Uuid;

/// Correlation ID for the current request.
#[derive(Debug, Clone, Copy)]
pub struct CorrelationId(pub Uuid);

#[async_trait]
impl<S> FromRequestParts<S> for CorrelationId
where
    S: Send + Sync,
{
    type Rejection = std::convert::Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        // Prefer the ID the middleware already chose
        let correlation_id = parts
            .extensions
            .get::<Uuid>()
            .copied()
            .or_else(|| {
                parts
                    .headers
                    .get(crate::middleware::CORRELATION_ID_HEADER)
                    .and_then(|v| v.to_str().ok())
                    .and_then(|s| Uuid::parse_str(s).ok())
            })
            .unwrap_or_else(Uuid::new_v4);

        Ok(Self(correlation_id))
    }
}

/// Name of the session cookie, taken from application state.
#[derive(Debug, Clone)]
pub struct SessionCookieName(pub String);

/// Session token presented by the client.
///
/// Read from the session cookie first, then from `Authorization: Bearer`.
/// Rejects with 401 when neither is present; use `Option<SessionCookie>`
/// where a missing token is acceptable.
#[derive(Debug, Clone)]
pub struct SessionCookie(pub SessionToken);

#[async_trait]
impl<S> FromRequestParts<S> for SessionCookie
where
    S: Send + Sync,
    SessionCookieName: FromRef<S>,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let SessionCookieName(name) = SessionCookieName::from_ref(state);

        find_cookie(&parts.headers, &name)
            .or_else(|| bearer_token(&parts.headers))
            .map(|token| Self(SessionToken::from_string(token)))
            .ok_or_else(|| AppError::unauthorized("No session"))
    }
}

fn find_cookie(headers: &HeaderMap, name: &str) -> Option<String> {
    headers
        .get_all(header::COOKIE)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .flat_map(|cookies| cookies.split(';'))
        .find_map(|cookie| {
            let (key, value) = cookie.trim().split_once('=')?;
            (key == name && !value.is_empty()).then(|| value.to_string())
        })
}

fn bearer_token(headers: &HeaderMap) -> Option<String> {
    headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .map(ToString::to_string)
}

/// Sign-in form body.
///
/// `application/json` is read as JSON; anything else as a URL-encoded form.
#[derive(Debug, Clone)]
pub struct CredentialsInput(pub Credentials);

#[async_trait]
impl<S> FromRequest<S> for CredentialsInput
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let is_json = req
            .headers()
            .get(header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .is_some_and(|ct| ct.starts_with("application/json"));

        let credentials = if is_json {
            Json::<Credentials>::from_request(req, state)
                .await
                .map_err(|e| AppError::bad_request(e.body_text()))?
                .0
        } else {
            Form::<Credentials>::from_request(req, state)
                .await
                .map_err(|e| AppError::bad_request(e.body_text()))?
                .0
        };

        Ok(Self(credentials))
    }
}
