//! Enabled providers listing.
//!
//! Only URLs served by [`auth_router`](crate::router::auth_router) are
//! listed. `OAuth` entries carry none: their redirect flow runs outside
//! this server.

use crate::state::AppState;
use axum::{extract::State, Json};
use hybrid_auth::providers::{Clock, PasswordVerifier, SessionAdapter, TokenEncoder, UserStore};
use hybrid_auth::ProviderConfig;
use serde::Serialize;
use std::collections::BTreeMap;

/// One enabled provider.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProviderInfo {
    /// Provider id (`credentials`, `github`, `google`).
    pub id: &'static str,

    /// Display name.
    pub name: String,

    /// `"credentials"` or `"oauth"`.
    #[serde(rename = "type")]
    pub kind: &'static str,

    /// URL the sign-in form posts to.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub callback_url: Option<String>,
}

impl ProviderInfo {
    fn from_config(config: &ProviderConfig, base_path: &str) -> Self {
        let id = config.provider().as_str();
        let (kind, callback_url) = match config {
            ProviderConfig::Credentials(_) => {
                ("credentials", Some(format!("{base_path}/callback/{id}")))
            }
            ProviderConfig::OAuth(_) => ("oauth", None),
        };

        Self {
            id,
            name: config.name().to_string(),
            kind,
            callback_url,
        }
    }
}

/// `GET /api/auth/providers`
#[allow(clippy::unused_async)]
pub async fn list_providers<U, S, P, E, C>(
    State(state): State<AppState<U, S, P, E, C>>,
) -> Json<BTreeMap<&'static str, ProviderInfo>>
where
    U: UserStore + Clone + 'static,
    S: SessionAdapter + Clone + 'static,
    P: PasswordVerifier + Clone + 'static,
    E: TokenEncoder + Clone + 'static,
    C: Clock + Clone + 'static,
{
    let providers = state
        .signin
        .config()
        .providers
        .iter()
        .map(|p| {
            let info = ProviderInfo::from_config(p, crate::router::AUTH_BASE_PATH);
            (info.id, info)
        })
        .collect();

    Json(providers)
}
