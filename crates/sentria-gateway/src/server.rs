// SPDX-FileCopyrightText: 2026 Sentria Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! HTTP server built on axum.
//!
//! Sets up routes, CORS, and shared state for the report service.

use std::sync::Arc;

use axum::{
    Router,
    http::{HeaderValue, Method},
    routing::{get, post},
};
use sentria_config::model::ServerConfig;
use sentria_core::{ResultStore, SentriaError, TextGenerator};
use sentria_report::ReportGenerator;
use sentria_session::SessionSigner;
use tower_http::cors::{Any, CorsLayer};

use crate::{chat, handlers, orchestrator};

/// Shared state for axum request handlers.
#[derive(Clone)]
pub struct GatewayState {
    /// Durable result persistence.
    pub store: Arc<dyn ResultStore>,
    /// Report generation pipeline (prompt assembly + provider call).
    pub generator: ReportGenerator,
    /// Raw provider handle, used directly by the chat streamer.
    pub provider: Arc<dyn TextGenerator>,
    /// Session token issuer/verifier.
    pub signer: SessionSigner,
    /// When true, report lookups are keyed by request id alone, so a second
    /// user submitting an existing request id observes the cached result.
    /// When false, lookups are scoped to `(request_id, user_id)`.
    pub shared_request_cache: bool,
}

impl GatewayState {
    /// Lookup scope for the configured cache policy.
    pub fn lookup_scope(&self, user_id: i64) -> Option<i64> {
        if self.shared_request_cache {
            None
        } else {
            Some(user_id)
        }
    }
}

/// Builds the service router with all routes and CORS applied.
pub fn build_router(state: GatewayState, allowed_origins: &[String]) -> Router {
    Router::new()
        .route("/health", get(handlers::get_health))
        .route("/start", post(orchestrator::post_start))
        .route("/start_sync", post(orchestrator::post_start_sync))
        .route("/result", post(handlers::post_result))
        .route("/session", post(handlers::post_session))
        .route("/chat", post(chat::post_chat))
        .layer(cors_layer(allowed_origins))
        .with_state(state)
}

/// Start the HTTP server, serving until the process is stopped.
pub async fn start_server(config: &ServerConfig, state: GatewayState) -> Result<(), SentriaError> {
    let app = build_router(state, &config.allowed_origins);

    let addr = format!("{}:{}", config.host, config.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| SentriaError::Internal(format!("failed to bind to {addr}: {e}")))?;

    tracing::info!("listening on {addr}");

    axum::serve(listener, app)
        .await
        .map_err(|e| SentriaError::Internal(format!("server error: {e}")))
}

fn cors_layer(allowed_origins: &[String]) -> CorsLayer {
    let layer = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST])
        .allow_headers(Any);

    if allowed_origins.iter().any(|o| o == "*") {
        return layer.allow_origin(Any);
    }
    let origins: Vec<HeaderValue> = allowed_origins
        .iter()
        .filter_map(|o| o.parse().ok())
        .collect();
    layer.allow_origin(origins)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testutil;

    #[test]
    fn lookup_scope_follows_cache_policy() {
        let shared = testutil::state(testutil::StubProvider::fixed("x"), true);
        assert_eq!(shared.lookup_scope(7), None);

        let scoped = testutil::state(testutil::StubProvider::fixed("x"), false);
        assert_eq!(scoped.lookup_scope(7), Some(7));
    }

    #[test]
    fn wildcard_and_explicit_origins_both_build() {
        let _any = cors_layer(&["*".to_string()]);
        let _explicit = cors_layer(&["https://app.example.com".to_string()]);
    }
}
