//! Auth server.
//!
//! # Usage
//!
//! ```bash
//! # Start infrastructure
//! docker compose up -d
//!
//! # Run server
//! AUTH_SECRET=... cargo run --bin server
//! ```

use anyhow::Context;
use hybrid_auth::providers::{
    Argon2PasswordVerifier, JwtTokenEncoder, SessionAdapter, SystemClock,
};
use hybrid_auth::stores::postgres::{self, PostgresSessionAdapter, PostgresUserStore};
use hybrid_auth::stores::RedisSessionAdapter;
use hybrid_auth::{AuthConfig, AuthEnvironment, SignIn};
use hybrid_auth_web::{router, AppState, ServerConfig, SessionBackend};
use sqlx::postgres::PgPoolOptions;
use tokio::signal;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file
    let _ = dotenvy::dotenv();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                "hybrid_auth=info,hybrid_auth_web=info,tower_http=debug".into()
            }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let server_config = ServerConfig::from_env()?;
    let auth_config = AuthConfig::from_env()?;
    info!(
        backend = ?server_config.session_backend,
        providers = auth_config.providers.len(),
        "Configuration loaded"
    );

    let pool = PgPoolOptions::new()
        .max_connections(server_config.database_max_connections)
        .connect(&server_config.database_url)
        .await
        .context("Failed to connect to PostgreSQL")?;
    postgres::migrate(&pool).await?;
    info!("Migrations applied");

    let users = PostgresUserStore::new(pool.clone());
    let passwords = Argon2PasswordVerifier::new()?;
    let encoder = JwtTokenEncoder::from_config(&auth_config.jwt)?;

    let app = match server_config.session_backend {
        SessionBackend::Postgres => build_app(
            &server_config,
            auth_config,
            users,
            PostgresSessionAdapter::new(pool),
            passwords,
            encoder,
        ),
        SessionBackend::Redis => {
            let sessions = RedisSessionAdapter::new(&server_config.redis_url).await?;
            build_app(&server_config, auth_config, users, sessions, passwords, encoder)
        }
    };

    let addr = server_config.bind_address();
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!(address = %addr, "Server listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server stopped");
    Ok(())
}

fn build_app<S>(
    server_config: &ServerConfig,
    auth_config: AuthConfig,
    users: PostgresUserStore,
    sessions: S,
    passwords: Argon2PasswordVerifier,
    encoder: JwtTokenEncoder,
) -> axum::Router
where
    S: SessionAdapter + Clone + 'static,
{
    let env = AuthEnvironment::new(users, sessions, passwords, encoder, SystemClock);
    let state = AppState::new(SignIn::new(env, auth_config))
        .with_secure_cookies(server_config.secure_cookies);

    router::app(state)
}

/// Wait for Ctrl+C or SIGTERM.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => info!("Received Ctrl+C, shutting down"),
        () = terminate => info!("Received SIGTERM, shutting down"),
    }
}
