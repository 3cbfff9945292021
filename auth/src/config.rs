//! Authentication configuration.
//!
//! Configuration is an explicit value built at startup and handed to
//! [`SignIn`](crate::signin::SignIn); nothing is read from module-level
//! constants at request time. Values come from the application, or from
//! the environment via [`AuthConfig::from_env`].

use crate::constants::{
    DEFAULT_JWT_MAX_AGE_DAYS, DEFAULT_SESSION_COOKIE, DEFAULT_SESSION_MAX_AGE_DAYS,
    MAX_SESSION_MAX_AGE_DAYS,
};
use crate::error::{AuthError, Result};
use crate::state::AuthProvider;
use chrono::Duration;
use serde::Serialize;
use std::env;
use std::fmt;

/// Root authentication configuration.
#[derive(Debug, Clone)]
pub struct AuthConfig {
    /// Enabled sign-in providers.
    pub providers: Vec<ProviderConfig>,

    /// Application pages the flow redirects to.
    pub pages: PageRoutes,

    /// Database session settings.
    pub session: SessionConfig,

    /// Stateless token settings.
    pub jwt: JwtConfig,
}

impl AuthConfig {
    /// Create a configuration with only the credentials provider enabled.
    ///
    /// # Arguments
    ///
    /// * `secret` - Secret used to sign stateless tokens
    #[must_use]
    pub fn new(secret: String) -> Self {
        Self {
            providers: vec![ProviderConfig::Credentials(CredentialsProviderConfig::default())],
            pages: PageRoutes::default(),
            session: SessionConfig::default(),
            jwt: JwtConfig::new(secret),
        }
    }

    /// Enable an additional provider.
    #[must_use]
    pub fn with_provider(mut self, provider: ProviderConfig) -> Self {
        self.providers.retain(|p| p.provider() != provider.provider());
        self.providers.push(provider);
        self
    }

    /// Set page routes.
    #[must_use]
    pub fn with_pages(mut self, pages: PageRoutes) -> Self {
        self.pages = pages;
        self
    }

    /// Set database session duration.
    ///
    /// Not validated here; a non-positive or unrepresentable lifetime makes
    /// credentials sign-in fail with `AuthError::Configuration`.
    #[must_use]
    pub const fn with_session_max_age(mut self, max_age: Duration) -> Self {
        self.session.max_age = max_age;
        self
    }

    /// Set stateless token duration.
    #[must_use]
    pub const fn with_jwt_max_age(mut self, max_age: Duration) -> Self {
        self.jwt.max_age = max_age;
        self
    }

    /// Returns `true` if the provider is enabled.
    #[must_use]
    pub fn is_enabled(&self, provider: AuthProvider) -> bool {
        self.providers.iter().any(|p| p.provider() == provider)
    }

    /// Require a provider to be enabled.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::ProviderNotEnabled` otherwise.
    pub fn require_enabled(&self, provider: AuthProvider) -> Result<()> {
        if self.is_enabled(provider) {
            Ok(())
        } else {
            Err(AuthError::ProviderNotEnabled {
                provider: provider.as_str().to_string(),
            })
        }
    }

    /// Load configuration from environment variables (and `.env`).
    ///
    /// | Variable | Meaning |
    /// |---|---|
    /// | `AUTH_SECRET` | JWT signing secret (required) |
    /// | `AUTH_GITHUB_ID`, `AUTH_GITHUB_SECRET` | enable GitHub |
    /// | `AUTH_GOOGLE_ID`, `AUTH_GOOGLE_SECRET` | enable Google |
    /// | `AUTH_SESSION_MAX_AGE_DAYS` | session lifetime (default 30) |
    /// | `AUTH_PAGE_NEW_USER`, `AUTH_PAGE_SIGN_IN`, `AUTH_PAGE_SIGN_OUT` | page routes |
    ///
    /// # Errors
    ///
    /// Returns `AuthError::Configuration` if `AUTH_SECRET` is missing or
    /// `AUTH_SESSION_MAX_AGE_DAYS` is not a valid session lifetime.
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Build configuration from a variable lookup.
    ///
    /// Same variables and rules as [`AuthConfig::from_env`].
    ///
    /// # Errors
    ///
    /// See [`AuthConfig::from_env`].
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let secret = lookup("AUTH_SECRET")
            .ok_or_else(|| AuthError::Configuration("AUTH_SECRET not set".to_string()))?;

        let mut config = Self::new(secret);

        if let Some(raw) = lookup("AUTH_SESSION_MAX_AGE_DAYS") {
            let days = raw.parse::<i64>().map_err(|_| {
                AuthError::Configuration(format!(
                    "AUTH_SESSION_MAX_AGE_DAYS is not a valid number: {raw}"
                ))
            })?;
            config.session.max_age = session_max_age_from_days(days)?;
        }

        let defaults = PageRoutes::default();
        config.pages = PageRoutes {
            new_user: lookup("AUTH_PAGE_NEW_USER").unwrap_or(defaults.new_user),
            sign_in: lookup("AUTH_PAGE_SIGN_IN").unwrap_or(defaults.sign_in),
            sign_out: lookup("AUTH_PAGE_SIGN_OUT").unwrap_or(defaults.sign_out),
        };

        for (provider, id_var, secret_var) in [
            (AuthProvider::GitHub, "AUTH_GITHUB_ID", "AUTH_GITHUB_SECRET"),
            (AuthProvider::Google, "AUTH_GOOGLE_ID", "AUTH_GOOGLE_SECRET"),
        ] {
            if let (Some(client_id), Some(client_secret)) = (lookup(id_var), lookup(secret_var)) {
                config = config.with_provider(ProviderConfig::OAuth(OAuthProviderConfig::new(
                    provider,
                    client_id,
                    client_secret,
                )));
            } else {
                tracing::debug!(provider = %provider, "OAuth provider not configured");
            }
        }

        Ok(config)
    }
}

/// Session lifetime for a number of days.
///
/// # Errors
///
/// Returns `AuthError::Configuration` unless `days` is in
/// `1..=MAX_SESSION_MAX_AGE_DAYS`.
pub fn session_max_age_from_days(days: i64) -> Result<Duration> {
    if !(1..=MAX_SESSION_MAX_AGE_DAYS).contains(&days) {
        return Err(AuthError::Configuration(format!(
            "session max age must be between 1 and {MAX_SESSION_MAX_AGE_DAYS} days, got {days}"
        )));
    }

    Duration::try_days(days).ok_or_else(|| {
        AuthError::Configuration(format!("session max age out of range: {days} days"))
    })
}

// ═══════════════════════════════════════════════════════════════════════
// Providers
// ═══════════════════════════════════════════════════════════════════════

/// Configuration of one sign-in provider.
#[derive(Debug, Clone)]
pub enum ProviderConfig {
    /// Local email/password sign-in.
    Credentials(CredentialsProviderConfig),

    /// Federated sign-in through an `OAuth` provider.
    OAuth(OAuthProviderConfig),
}

impl ProviderConfig {
    /// Provider this entry configures.
    #[must_use]
    pub const fn provider(&self) -> AuthProvider {
        match self {
            Self::Credentials(_) => AuthProvider::Credentials,
            Self::OAuth(oauth) => oauth.provider,
        }
    }

    /// Display name.
    #[must_use]
    pub fn name(&self) -> &str {
        match self {
            Self::Credentials(credentials) => &credentials.name,
            Self::OAuth(oauth) => oauth.provider.display_name(),
        }
    }
}

/// Credentials provider: the fields of the sign-in form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CredentialsProviderConfig {
    /// Display name.
    pub name: String,

    /// Form fields.
    pub fields: Vec<CredentialField>,
}

impl Default for CredentialsProviderConfig {
    fn default() -> Self {
        Self {
            name: "Credentials".to_string(),
            fields: vec![
                CredentialField::new("email", "Email", "email"),
                CredentialField::new("password", "Password", "password"),
            ],
        }
    }
}

/// One input of the credentials form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CredentialField {
    /// Field key in the submitted form.
    pub name: String,

    /// Label shown next to the input.
    pub label: String,

    /// HTML input type.
    #[serde(rename = "type")]
    pub input_type: String,
}

impl CredentialField {
    /// Create a field descriptor.
    #[must_use]
    pub fn new(name: &str, label: &str, input_type: &str) -> Self {
        Self {
            name: name.to_string(),
            label: label.to_string(),
            input_type: input_type.to_string(),
        }
    }
}

/// `OAuth` provider client registration.
#[derive(Clone)]
pub struct OAuthProviderConfig {
    /// Provider.
    pub provider: AuthProvider,

    /// `OAuth` client ID.
    pub client_id: String,

    /// `OAuth` client secret (keep confidential).
    pub client_secret: String,
}

impl OAuthProviderConfig {
    /// Create a client registration.
    #[must_use]
    pub const fn new(provider: AuthProvider, client_id: String, client_secret: String) -> Self {
        Self {
            provider,
            client_id,
            client_secret,
        }
    }
}

impl fmt::Debug for OAuthProviderConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OAuthProviderConfig")
            .field("provider", &self.provider)
            .field("client_id", &self.client_id)
            .field("client_secret", &"[redacted]")
            .finish()
    }
}

// ═══════════════════════════════════════════════════════════════════════
// Pages, sessions, tokens
// ═══════════════════════════════════════════════════════════════════════

/// Application pages used as redirect targets.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PageRoutes {
    /// Where newly created users land.
    pub new_user: String,

    /// Sign-in page (also the target after a rejected sign-in).
    pub sign_in: String,

    /// Where the user lands after signing out.
    pub sign_out: String,
}

impl Default for PageRoutes {
    fn default() -> Self {
        Self {
            new_user: "/sign-up".to_string(),
            sign_in: "/sign-in".to_string(),
            sign_out: "/dashboard".to_string(),
        }
    }
}

/// Database session settings.
#[derive(Debug, Clone)]
pub struct SessionConfig {
    /// Session lifetime.
    ///
    /// Default: 30 days
    pub max_age: Duration,

    /// Cookie carrying the session token.
    pub cookie_name: String,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            max_age: Duration::days(DEFAULT_SESSION_MAX_AGE_DAYS),
            cookie_name: DEFAULT_SESSION_COOKIE.to_string(),
        }
    }
}

/// Stateless token settings.
#[derive(Clone)]
pub struct JwtConfig {
    /// HS256 signing secret.
    pub secret: String,

    /// Token lifetime.
    ///
    /// Default: 30 days
    pub max_age: Duration,
}

impl JwtConfig {
    /// Create JWT settings with the default lifetime.
    #[must_use]
    pub const fn new(secret: String) -> Self {
        Self {
            secret,
            max_age: Duration::days(DEFAULT_JWT_MAX_AGE_DAYS),
        }
    }
}

impl fmt::Debug for JwtConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("JwtConfig")
            .field("secret", &"[redacted]")
            .field("max_age", &self.max_age)
            .finish()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        move |name| vars.get(name).cloned()
    }

    #[test]
    fn test_default_config() {
        let config = AuthConfig::new("secret".to_string());

        assert!(config.is_enabled(AuthProvider::Credentials));
        assert!(!config.is_enabled(AuthProvider::GitHub));
        assert_eq!(config.session.max_age, Duration::days(30));
        assert_eq!(config.jwt.max_age, Duration::days(30));
        assert_eq!(config.session.cookie_name, "authjs.session-token");
        assert_eq!(config.pages.new_user, "/sign-up");
        assert_eq!(config.pages.sign_in, "/sign-in");
        assert_eq!(config.pages.sign_out, "/dashboard");
    }

    #[test]
    fn test_config_builder() {
        let config = AuthConfig::new("secret".to_string())
            .with_provider(ProviderConfig::OAuth(OAuthProviderConfig::new(
                AuthProvider::GitHub,
                "id".to_string(),
                "shh".to_string(),
            )))
            .with_session_max_age(Duration::days(7))
            .with_jwt_max_age(Duration::hours(1));

        assert!(config.is_enabled(AuthProvider::GitHub));
        assert!(config.require_enabled(AuthProvider::Google).is_err());
        assert_eq!(config.session.max_age, Duration::days(7));
        assert_eq!(config.jwt.max_age, Duration::hours(1));
    }

    #[test]
    fn test_with_provider_replaces_existing_entry() {
        let github = |id: &str| {
            ProviderConfig::OAuth(OAuthProviderConfig::new(
                AuthProvider::GitHub,
                id.to_string(),
                "s".to_string(),
            ))
        };
        let config = AuthConfig::new("secret".to_string())
            .with_provider(github("one"))
            .with_provider(github("two"));

        assert_eq!(config.providers.len(), 2);
        let github = config
            .providers
            .iter()
            .find_map(|p| match p {
                ProviderConfig::OAuth(oauth) if oauth.provider == AuthProvider::GitHub => {
                    Some(oauth)
                }
                _ => None,
            })
            .unwrap();
        assert_eq!(github.client_id, "two");
    }

    #[test]
    fn test_credentials_form_fields() {
        let fields = CredentialsProviderConfig::default().fields;
        assert_eq!(fields[0], CredentialField::new("email", "Email", "email"));
        assert_eq!(fields[1], CredentialField::new("password", "Password", "password"));
    }

    #[test]
    fn test_secrets_redacted_in_debug() {
        let config = AuthConfig::new("top-secret".to_string()).with_provider(ProviderConfig::OAuth(
            OAuthProviderConfig::new(AuthProvider::Google, "cid".to_string(), "csecret".to_string()),
        ));
        let debug = format!("{config:?}");

        assert!(!debug.contains("top-secret"));
        assert!(!debug.contains("csecret"));
        assert!(debug.contains("cid"));
    }

    #[test]
    fn test_from_lookup_requires_secret() {
        let err = AuthConfig::from_lookup(lookup(&[])).unwrap_err();
        assert!(matches!(err, AuthError::Configuration(_)));
    }

    #[test]
    fn test_from_lookup_defaults() {
        let config = AuthConfig::from_lookup(lookup(&[("AUTH_SECRET", "s")])).unwrap();

        assert_eq!(config.jwt.secret, "s");
        assert_eq!(config.providers.len(), 1);
        assert!(config.is_enabled(AuthProvider::Credentials));
        assert_eq!(config.pages, PageRoutes::default());
        assert_eq!(config.session.max_age, Duration::days(30));
    }

    #[test]
    fn test_oauth_provider_needs_id_and_secret() {
        let config = AuthConfig::from_lookup(lookup(&[
            ("AUTH_SECRET", "s"),
            ("AUTH_GITHUB_ID", "gh-id"),
            ("AUTH_GOOGLE_ID", "g-id"),
            ("AUTH_GOOGLE_SECRET", "g-secret"),
        ]))
        .unwrap();

        assert!(!config.is_enabled(AuthProvider::GitHub));
        assert!(config.is_enabled(AuthProvider::Google));
        assert!(config.is_enabled(AuthProvider::Credentials));
    }

    #[test]
    fn test_from_lookup_overrides() {
        let config = AuthConfig::from_lookup(lookup(&[
            ("AUTH_SECRET", "s"),
            ("AUTH_SESSION_MAX_AGE_DAYS", "7"),
            ("AUTH_PAGE_NEW_USER", "/welcome"),
            ("AUTH_PAGE_SIGN_IN", "/login"),
            ("AUTH_PAGE_SIGN_OUT", "/"),
        ]))
        .unwrap();

        assert_eq!(config.session.max_age, Duration::days(7));
        assert_eq!(config.pages.new_user, "/welcome");
        assert_eq!(config.pages.sign_in, "/login");
        assert_eq!(config.pages.sign_out, "/");
    }

    #[test]
    fn test_session_max_age_rejects_bad_values() {
        for raw in ["-5", "0", "999999999999999", "3651", "thirty"] {
            let err = AuthConfig::from_lookup(lookup(&[
                ("AUTH_SECRET", "s"),
                ("AUTH_SESSION_MAX_AGE_DAYS", raw),
            ]))
            .unwrap_err();
            assert!(matches!(err, AuthError::Configuration(_)), "{raw}");
        }
    }

    #[test]
    fn test_session_max_age_bounds() {
        assert_eq!(session_max_age_from_days(1).unwrap(), Duration::days(1));
        assert_eq!(
            session_max_age_from_days(MAX_SESSION_MAX_AGE_DAYS).unwrap(),
            Duration::days(MAX_SESSION_MAX_AGE_DAYS)
        );
        assert!(session_max_age_from_days(i64::MAX).is_err());
        assert!(session_max_age_from_days(i64::MIN).is_err());
    }
}
