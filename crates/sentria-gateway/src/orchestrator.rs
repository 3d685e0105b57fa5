// SPDX-FileCopyrightText: 2026 Sentria Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Job orchestration for POST /start and POST /start_sync.
//!
//! Both endpoints share the same front half: validate ids, then check the
//! store for a cached result and short-circuit on a hit. On a miss, /start
//! spawns generation in the background and reports `processing`; /start_sync
//! runs it inline and reports the outcome. Every generation outcome, success
//! or failure, reaches the store exactly once: failures are persisted as a
//! diagnostic string in the result field so subsequent polls resolve instead
//! of spinning forever.

use axum::{
    Json,
    extract::State,
    response::{IntoResponse, Response},
};
use sentria_core::CrisisInput;
use serde::Deserialize;
use tracing::{error, info};

use crate::handlers::{JobStatus, validation_error};
use crate::server::GatewayState;

/// Request body for POST /start and POST /start_sync.
#[derive(Debug, Deserialize)]
pub struct StartRequest {
    pub request_id: i64,
    pub user_id: i64,
    /// Structured crisis description; takes priority over `data_raw`.
    #[serde(default)]
    pub data: Option<CrisisInput>,
    /// Free-text fallback when no structured description is available.
    #[serde(default)]
    pub data_raw: Option<String>,
}

impl StartRequest {
    fn validate(&self) -> Result<(), Response> {
        if self.request_id <= 0 {
            return Err(validation_error("request_id must be a positive integer"));
        }
        if self.user_id <= 0 {
            return Err(validation_error("user_id must be a positive integer"));
        }
        Ok(())
    }
}

/// Cached-result short circuit shared by both start variants.
///
/// A persisted-but-blank record does not count as a hit; it is regenerated.
async fn cached_result(state: &GatewayState, body: &StartRequest) -> Option<String> {
    let scope = state.lookup_scope(body.user_id);
    match state.store.fetch_latest(body.request_id, scope).await {
        Ok(Some(record)) => record.display_text().map(str::to_string),
        Ok(None) => None,
        Err(e) => {
            // Lookup failure degrades to a cache miss: generation still runs.
            error!(request_id = body.request_id, error = %e, "cache lookup failed");
            None
        }
    }
}

/// Runs generation and persists the outcome, returning the generated text.
///
/// A failed generation is persisted as its diagnostic string and returned as
/// the error. A failed save is logged and swallowed: the generated text is
/// lost, but the caller (or poller) is not crashed over it.
async fn generate_and_store(
    state: &GatewayState,
    request_id: i64,
    user_id: i64,
    data: Option<CrisisInput>,
    data_raw: Option<String>,
) -> Result<String, sentria_core::SentriaError> {
    let outcome = state.generator.generate(data, data_raw.as_deref()).await;

    let (text, result) = match outcome {
        Ok(text) => (text.clone(), Ok(text)),
        Err(e) => {
            error!(request_id, user_id, error = %e, "report generation failed");
            (e.as_stored_diagnostic(), Err(e))
        }
    };

    if let Err(save_err) = state.store.save(request_id, user_id, &text).await {
        error!(request_id, user_id, error = %save_err, "persisting result failed");
    }
    result
}

/// POST /start
///
/// Fire-and-forget: on a cache miss the response is sent before generation
/// begins, and the caller polls /result for completion.
pub async fn post_start(
    State(state): State<GatewayState>,
    Json(body): Json<StartRequest>,
) -> Response {
    if let Err(response) = body.validate() {
        return response;
    }

    if let Some(text) = cached_result(&state, &body).await {
        return Json(JobStatus::done(text)).into_response();
    }

    info!(
        request_id = body.request_id,
        user_id = body.user_id,
        "starting background report generation"
    );
    let StartRequest {
        request_id,
        user_id,
        data,
        data_raw,
    } = body;
    tokio::spawn(async move {
        // Failures are already persisted as diagnostics; nothing to notify.
        let _ = generate_and_store(&state, request_id, user_id, data, data_raw).await;
    });

    Json(JobStatus::processing()).into_response()
}

/// POST /start_sync
///
/// Runs generation inline. Generator failures never propagate as transport
/// faults: they are persisted and reported as an `error` status.
pub async fn post_start_sync(
    State(state): State<GatewayState>,
    Json(body): Json<StartRequest>,
) -> Response {
    if let Err(response) = body.validate() {
        return response;
    }

    if let Some(text) = cached_result(&state, &body).await {
        return Json(JobStatus::done(text)).into_response();
    }

    let StartRequest {
        request_id,
        user_id,
        data,
        data_raw,
    } = body;
    match generate_and_store(&state, request_id, user_id, data, data_raw).await {
        Ok(text) => Json(JobStatus::done(text)).into_response(),
        Err(e) => Json(JobStatus::error(e.to_string())).into_response(),
    }
}
