//! HTTP tests for the `/api/auth` routes, backed by in-memory stores.

#![allow(clippy::unwrap_used)]

use axum::http::{header, HeaderValue, StatusCode};
use axum_test::TestServer;
use hybrid_auth::mocks::{
    test_clock, FixedClock, MockPasswordVerifier, MockSessionAdapter, MockTokenEncoder,
    MockUserStore,
};
use hybrid_auth::providers::Clock;
use hybrid_auth::config::OAuthProviderConfig;
use hybrid_auth::{
    AuthConfig, AuthEnvironment, AuthProvider, ProviderConfig, SignIn, UserId, UserRecord,
};
use hybrid_auth_web::{router, AppState, CORRELATION_ID_HEADER};
use serde_json::{json, Value};

const COOKIE_NAME: &str = "authjs.session-token";

fn server_with_clock(clock: FixedClock) -> (TestServer, MockSessionAdapter) {
    server_with(clock, AuthConfig::new("secret".to_string()))
}

fn server_with(clock: FixedClock, config: AuthConfig) -> (TestServer, MockSessionAdapter) {
    let users = MockUserStore::new();
    users
        .insert(UserRecord {
            id: UserId::new(),
            email: "a@x.com".to_string(),
            name: "A".to_string(),
            image: None,
            password_hash: MockPasswordVerifier::hash("correct"),
        })
        .unwrap();

    let sessions = MockSessionAdapter::new();
    let env = AuthEnvironment::new(
        users,
        sessions.clone(),
        MockPasswordVerifier::new(),
        MockTokenEncoder::new(),
        clock,
    );
    let state = AppState::new(SignIn::new(env, config));

    (TestServer::new(router::app(state)).unwrap(), sessions)
}

fn server() -> (TestServer, MockSessionAdapter) {
    // Cookie Max-Age is computed against wall-clock time
    server_with_clock(FixedClock::new(chrono::Utc::now()))
}

async fn sign_in(server: &TestServer) -> String {
    let response = server
        .post("/api/auth/callback/credentials")
        .json(&json!({ "email": "a@x.com", "password": "correct" }))
        .await;
    response.assert_status_ok();
    response.json::<Value>()["token"].as_str().unwrap().to_string()
}

fn cookie(token: &str) -> HeaderValue {
    HeaderValue::from_str(&format!("{COOKIE_NAME}={token}")).unwrap()
}

#[tokio::test]
async fn credentials_sign_in_sets_session_cookie() {
    let (server, sessions) = server();

    let response = server
        .post("/api/auth/callback/credentials")
        .json(&json!({ "email": "a@x.com", "password": "correct" }))
        .await;

    response.assert_status_ok();
    let body = response.json::<Value>();
    assert_eq!(body["strategy"], "database");

    let set_cookie = response.headers().get(header::SET_COOKIE).unwrap();
    let set_cookie = set_cookie.to_str().unwrap();
    let token = body["token"].as_str().unwrap();
    assert!(set_cookie.starts_with(&format!("{COOKIE_NAME}={token};")));
    assert!(set_cookie.contains("HttpOnly"));
    assert_eq!(sessions.session_count().unwrap(), 1);
}

#[tokio::test]
async fn form_encoded_sign_in_is_accepted() {
    let (server, _) = server();

    let response = server
        .post("/api/auth/callback/credentials")
        .form(&[("email", "a@x.com"), ("password", "correct")])
        .await;

    response.assert_status_ok();
}

#[tokio::test]
async fn rejected_sign_in_redirects_to_sign_in_page() {
    let (server, sessions) = server();

    let response = server
        .post("/api/auth/callback/credentials")
        .json(&json!({ "email": "a@x.com", "password": "wrong" }))
        .await;

    response.assert_status(StatusCode::UNAUTHORIZED);
    let body = response.json::<Value>();
    assert_eq!(body["code"], "CredentialsSignin");
    assert_eq!(body["redirect"], "/sign-in?error=CredentialsSignin");
    assert_eq!(sessions.session_count().unwrap(), 0);
}

#[tokio::test]
async fn missing_password_is_rejected_like_wrong_password() {
    let (server, _) = server();

    let missing = server
        .post("/api/auth/callback/credentials")
        .json(&json!({ "email": "a@x.com" }))
        .await;
    let wrong = server
        .post("/api/auth/callback/credentials")
        .json(&json!({ "email": "a@x.com", "password": "wrong" }))
        .await;

    missing.assert_status(StatusCode::UNAUTHORIZED);
    assert_eq!(missing.json::<Value>(), wrong.json::<Value>());
}

#[tokio::test]
async fn session_from_cookie_and_bearer() {
    let (server, _) = server();
    let token = sign_in(&server).await;

    let by_cookie = server
        .get("/api/auth/session")
        .add_header(header::COOKIE, cookie(&token))
        .await;
    by_cookie.assert_status_ok();
    assert_eq!(by_cookie.json::<Value>()["user"]["email"], "a@x.com");
    assert!(by_cookie.json::<Value>()["user"].get("password_hash").is_none());

    let by_bearer = server
        .get("/api/auth/session")
        .add_header(
            header::AUTHORIZATION,
            HeaderValue::from_str(&format!("Bearer {token}")).unwrap(),
        )
        .await;
    by_bearer.assert_status_ok();
}

#[tokio::test]
async fn session_without_token_is_unauthorized() {
    let (server, _) = server();

    server
        .get("/api/auth/session")
        .await
        .assert_status(StatusCode::UNAUTHORIZED);
    server
        .get("/api/auth/session")
        .add_header(header::COOKIE, cookie("unknown"))
        .await
        .assert_status(StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn expired_session_is_unauthorized() {
    let (server, sessions) = server_with_clock(test_clock());
    let token = sign_in(&server).await;

    // Second server over the same sessions, a year later
    let users = MockUserStore::new();
    let env = AuthEnvironment::new(
        users,
        sessions.clone(),
        MockPasswordVerifier::new(),
        MockTokenEncoder::new(),
        FixedClock::new(test_clock().now() + chrono::Duration::days(365)),
    );
    let later = TestServer::new(router::app(AppState::new(SignIn::new(
        env,
        AuthConfig::new("secret".to_string()),
    ))))
    .unwrap();

    later
        .get("/api/auth/session")
        .add_header(header::COOKIE, cookie(&token))
        .await
        .assert_status(StatusCode::UNAUTHORIZED);
    assert_eq!(sessions.session_count().unwrap(), 0);
}

#[tokio::test]
async fn sign_out_clears_session_and_cookie() {
    let (server, sessions) = server();
    let token = sign_in(&server).await;

    let response = server
        .post("/api/auth/signout")
        .add_header(header::COOKIE, cookie(&token))
        .await;

    response.assert_status_ok();
    assert_eq!(response.json::<Value>()["redirect"], "/dashboard");
    assert!(response
        .headers()
        .get(header::SET_COOKIE)
        .unwrap()
        .to_str()
        .unwrap()
        .contains("Max-Age=0"));
    assert_eq!(sessions.session_count().unwrap(), 0);

    // Without a session it still succeeds
    server.post("/api/auth/signout").await.assert_status_ok();
}

#[tokio::test]
async fn providers_lists_credentials() {
    let (server, _) = server();

    let response = server.get("/api/auth/providers").await;

    response.assert_status_ok();
    let body = response.json::<Value>();
    assert_eq!(body["credentials"]["type"], "credentials");
    assert_eq!(
        body["credentials"]["callbackUrl"],
        "/api/auth/callback/credentials"
    );
    assert!(body.get("github").is_none());
}

#[tokio::test]
async fn every_advertised_provider_url_is_served() {
    let config = AuthConfig::new("secret".to_string())
        .with_provider(ProviderConfig::OAuth(OAuthProviderConfig::new(
            AuthProvider::GitHub,
            "id".to_string(),
            "s".to_string(),
        )))
        .with_provider(ProviderConfig::OAuth(OAuthProviderConfig::new(
            AuthProvider::Google,
            "id".to_string(),
            "s".to_string(),
        )));
    let (server, _) = server_with(FixedClock::new(chrono::Utc::now()), config);

    let body = server.get("/api/auth/providers").await.json::<Value>();
    let providers = body.as_object().unwrap();
    assert_eq!(providers.len(), 3);

    let urls: Vec<String> = providers
        .values()
        .flat_map(|entry| entry.as_object().unwrap().iter())
        .filter(|(key, _)| key.ends_with("Url"))
        .map(|(_, url)| url.as_str().unwrap().to_string())
        .collect();
    assert_eq!(urls, ["/api/auth/callback/credentials"]);

    for url in urls {
        let response = server
            .post(&url)
            .json(&json!({ "email": "a@x.com", "password": "correct" }))
            .await;
        response.assert_status_ok();
    }
}

#[tokio::test]
async fn health_echoes_correlation_id() {
    let (server, _) = server();

    let response = server.get("/api/auth/health").await;

    response.assert_status_ok();
    response.assert_text("ok");
    assert!(response.headers().contains_key(CORRELATION_ID_HEADER));
}
