//! HTTP server initialization and runtime setup.

use crate::application::services::DeepLinkService;
use crate::config::Config;
use crate::routes::app_router;
use crate::state::AppState;
use crate::web::auth::SessionCookieAuthenticator;

use anyhow::{Context, Result};
use std::net::SocketAddr;

/// Validates the deep link options described by `config`.
///
/// # Errors
///
/// Returns an error if the options are rejected by the validator.
pub fn deep_link_service(config: &Config) -> Result<DeepLinkService> {
    let authenticator = SessionCookieAuthenticator::new(&config.session_cookie);

    DeepLinkService::new(config.deep_link_options(authenticator))
        .context("Invalid deep link configuration")
}

/// Runs the HTTP server with the given configuration.
///
/// Initializes:
/// - Deep link middleware (options validated before binding)
/// - Axum HTTP server with graceful shutdown on Ctrl+C
///
/// # Errors
///
/// Returns an error if:
/// - Deep link options are invalid
/// - Server bind fails
/// - Server runtime error occurs
pub async fn run(config: Config) -> Result<()> {
    let deep_link = deep_link_service(&config)?;
    tracing::info!(login = %config.login, "Deep link middleware configured");

    let state = AppState::new(deep_link, config.session_cookie.as_str());

    let app = app_router(state);

    let addr: SocketAddr = config
        .listen_addr
        .parse()
        .with_context(|| format!("Invalid listen address '{}'", config.listen_addr))?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("Listening on http://{addr}");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server stopped");

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}
