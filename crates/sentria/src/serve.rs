// SPDX-FileCopyrightText: 2026 Sentria Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `sentria serve` command implementation.
//!
//! Wires the SQLite result store, OpenAI provider, session signer, and HTTP
//! gateway together and serves until the process is stopped.

use std::sync::Arc;

use sentria_config::model::SentriaConfig;
use sentria_core::{ResultStore, SentriaError, TextGenerator};
use sentria_gateway::GatewayState;
use sentria_openai::OpenAiClient;
use sentria_report::ReportGenerator;
use sentria_session::SessionSigner;
use sentria_storage::SqliteStore;
use tracing::info;

/// Runs the `sentria serve` command.
///
/// Fails fast when the signing secret or API key is absent; there is no
/// random-secret fallback, so tokens stay verifiable across restarts.
pub async fn run_serve(config: SentriaConfig) -> Result<(), SentriaError> {
    init_tracing(&config.service.log_level);

    if let Err(errors) = sentria_config::validate_for_serve(&config) {
        sentria_config::render_errors(&errors);
        return Err(SentriaError::Config(
            "configuration is missing required secrets".to_string(),
        ));
    }

    info!(
        mode = %config.report.mode,
        shared_request_cache = config.report.shared_request_cache,
        "starting sentria serve"
    );

    let store: Arc<dyn ResultStore> = Arc::new(SqliteStore::open(&config.storage).await?);

    let provider: Arc<dyn TextGenerator> = Arc::new(OpenAiClient::new(&config.openai)?);

    // validate_for_serve guarantees the secret is present and non-blank.
    let secret = config
        .session
        .signing_secret
        .as_deref()
        .ok_or_else(|| SentriaError::Config("session.signing_secret is required".to_string()))?;
    let signer = SessionSigner::new(secret.as_bytes().to_vec(), config.session.ttl_secs);

    let state = GatewayState {
        store,
        generator: ReportGenerator::new(provider.clone(), config.report.mode),
        provider,
        signer,
        shared_request_cache: config.report.shared_request_cache,
    };

    sentria_gateway::start_server(&config.server, state).await
}

fn init_tracing(log_level: &str) {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("sentria={log_level},warn")));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_thread_names(false)
        .init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn serve_refuses_secretless_config() {
        let config = SentriaConfig::default();
        let err = run_serve(config).await.unwrap_err();
        assert!(matches!(err, SentriaError::Config(_)));
    }
}
