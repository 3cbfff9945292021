//! JWT token encoder (HS256).
//!
//! The stateless default used for federated sign-ins. Tokens carry the
//! sign-in claims plus `iat`, `exp` and a random `jti`.

use crate::claims::Claims;
use crate::config::JwtConfig;
use crate::error::{AuthError, Result};
use crate::providers::TokenEncoder;
use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

/// Claims as they appear inside an encoded JWT.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JwtClaims {
    /// Sign-in claims.
    #[serde(flatten)]
    pub claims: Claims,

    /// Issued at (seconds since epoch).
    pub iat: i64,

    /// Expiry (seconds since epoch).
    pub exp: i64,

    /// Unique token id.
    pub jti: String,
}

/// HS256 JWT encoder.
#[derive(Clone)]
pub struct JwtTokenEncoder {
    encoding: EncodingKey,
    decoding: DecodingKey,
    max_age: Duration,
}

impl JwtTokenEncoder {
    /// Create an encoder from a shared secret.
    #[must_use]
    pub fn new(secret: &[u8], max_age: Duration) -> Self {
        Self {
            encoding: EncodingKey::from_secret(secret),
            decoding: DecodingKey::from_secret(secret),
            max_age,
        }
    }

    /// Create an encoder from the JWT section of the configuration.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::Configuration` if the secret is empty.
    pub fn from_config(config: &JwtConfig) -> Result<Self> {
        if config.secret.is_empty() {
            return Err(AuthError::Configuration("JWT secret must not be empty".to_string()));
        }
        Ok(Self::new(config.secret.as_bytes(), config.max_age))
    }

    /// Decode and validate a token against the current time.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::TokenEncoding` if the signature is invalid or the
    /// token has expired.
    pub fn decode(&self, token: &str) -> Result<JwtClaims> {
        jsonwebtoken::decode::<JwtClaims>(token, &self.decoding, &Validation::new(Algorithm::HS256))
            .map(|data| data.claims)
            .map_err(|e| AuthError::TokenEncoding(e.to_string()))
    }
}

impl std::fmt::Debug for JwtTokenEncoder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtTokenEncoder")
            .field("max_age", &self.max_age)
            .finish_non_exhaustive()
    }
}

impl TokenEncoder for JwtTokenEncoder {
    fn encode(&self, claims: &Claims, issued_at: DateTime<Utc>) -> Result<(String, DateTime<Utc>)> {
        let expires = issued_at + self.max_age;
        let jwt_claims = JwtClaims {
            claims: claims.clone(),
            iat: issued_at.timestamp(),
            exp: expires.timestamp(),
            jti: uuid::Uuid::new_v4().to_string(),
        };

        let token = jsonwebtoken::encode(&Header::new(Algorithm::HS256), &jwt_claims, &self.encoding)
            .map_err(|e| AuthError::TokenEncoding(e.to_string()))?;

        Ok((token, expires))
    }
}
