// SPDX-FileCopyrightText: 2026 pwvault Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Gateway HTTP server built on axum.

use std::sync::Arc;

use axum::extract::DefaultBodyLimit;
use axum::routing::{get, post};
use axum::Router;
use pwvault_config::model::GatewayConfig;
use pwvault_core::VaultError;
use pwvault_vault::VaultRouter;
use tokio_util::sync::CancellationToken;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::handlers;

/// Shared state for axum request handlers.
#[derive(Clone)]
pub struct GatewayState {
    pub router: Arc<VaultRouter>,
}

impl GatewayState {
    pub fn new(router: Arc<VaultRouter>) -> Self {
        Self { router }
    }
}

/// Listener and request-limit settings.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub max_body_bytes: usize,
}

impl From<&GatewayConfig> for ServerConfig {
    fn from(config: &GatewayConfig) -> Self {
        Self {
            host: config.host.clone(),
            port: config.port,
            max_body_bytes: config.max_body_bytes,
        }
    }
}

/// Assemble the route table and middleware.
///
/// - POST / and POST /v1/vault: request envelope
/// - GET /health: store health
pub fn build_app(state: GatewayState, max_body_bytes: usize) -> Router {
    let vault_routes = Router::new()
        .route("/", post(handlers::post_vault))
        .route("/v1/vault", post(handlers::post_vault))
        .layer(DefaultBodyLimit::max(max_body_bytes))
        .with_state(state.clone());

    let public_routes = Router::new()
        .route("/health", get(handlers::get_health))
        .with_state(state);

    Router::new()
        .merge(vault_routes)
        .merge(public_routes)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
}

/// Bind to `host:port` and serve until `shutdown` is cancelled.
///
/// In-flight requests are allowed to finish before this returns.
pub async fn start_server(
    config: &ServerConfig,
    state: GatewayState,
    shutdown: CancellationToken,
) -> Result<(), VaultError> {
    let app = build_app(state, config.max_body_bytes);

    let addr = format!("{}:{}", config.host, config.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| VaultError::store(format!("failed to bind gateway to {addr}"), e))?;

    tracing::info!("gateway listening on {addr}");

    axum::serve(listener, app)
        .with_graceful_shutdown(async move { shutdown.cancelled().await })
        .await
        .map_err(|e| VaultError::Internal(format!("gateway server error: {e}")))?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn server_config_from_gateway_section() {
        let gateway = GatewayConfig {
            host: "0.0.0.0".into(),
            port: 9000,
            max_body_bytes: 4096,
        };
        let config = ServerConfig::from(&gateway);
        assert_eq!(config.port, 9000);
        assert_eq!(config.max_body_bytes, 4096);
        assert!(format!("{config:?}").contains("0.0.0.0"));
    }

    #[tokio::test]
    async fn server_stops_when_shutdown_is_cancelled() {
        let store = Arc::new(pwvault_storage::MemoryBlobStore::new());
        let state = GatewayState::new(Arc::new(VaultRouter::new(store, "master_pw")));
        let config = ServerConfig {
            host: "127.0.0.1".into(),
            port: 0,
            max_body_bytes: 1024,
        };

        let shutdown = CancellationToken::new();
        shutdown.cancel();
        start_server(&config, state, shutdown).await.unwrap();
    }

    #[tokio::test]
    async fn bind_failure_is_reported() {
        let store = Arc::new(pwvault_storage::MemoryBlobStore::new());
        let state = GatewayState::new(Arc::new(VaultRouter::new(store, "master_pw")));
        let taken = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let config = ServerConfig {
            host: "127.0.0.1".into(),
            port: taken.local_addr().unwrap().port(),
            max_body_bytes: 1024,
        };

        let err = start_server(&config, state, CancellationToken::new()).await.unwrap_err();
        assert!(err.to_string().contains("failed to bind gateway"));
    }
}
