// SPDX-FileCopyrightText: 2026 Sentria Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Request handlers for the non-streaming endpoints: health, result
//! polling, and session issuance.

use axum::{
    Json,
    extract::State,
    http::{StatusCode, header},
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};

use crate::server::GatewayState;

/// Error response body.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

/// Client-error response for a failed field constraint.
pub fn validation_error(message: &str) -> Response {
    (
        StatusCode::UNPROCESSABLE_ENTITY,
        Json(ErrorResponse {
            error: message.to_string(),
        }),
    )
        .into_response()
}

/// Job status payload shared by the start and poll endpoints.
#[derive(Debug, Serialize, Deserialize)]
pub struct JobStatus {
    pub status: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub result: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl JobStatus {
    pub fn processing() -> Self {
        Self {
            status: "processing".to_string(),
            result: None,
            message: None,
        }
    }

    pub fn done(result: String) -> Self {
        Self {
            status: "done".to_string(),
            result: Some(result),
            message: None,
        }
    }

    pub fn error(message: String) -> Self {
        Self {
            status: "error".to_string(),
            result: None,
            message: Some(message),
        }
    }
}

/// GET /health
pub async fn get_health() -> Json<serde_json::Value> {
    Json(serde_json::json!({"ok": true}))
}

/// Request body for POST /result.
#[derive(Debug, Deserialize)]
pub struct ResultRequest {
    pub request_id: i64,
    /// Used for scoping only when the shared request cache is disabled.
    #[serde(default)]
    pub user_id: Option<i64>,
}

/// POST /result
///
/// Read-only projection over the result store. An unknown request id and a
/// persisted-but-blank record both report `processing`, never an error.
/// Responses carry no-store headers so intermediaries cannot cache a poll.
pub async fn post_result(
    State(state): State<GatewayState>,
    Json(body): Json<ResultRequest>,
) -> Response {
    if body.request_id <= 0 {
        return validation_error("request_id must be a positive integer");
    }

    let scope = if state.shared_request_cache {
        None
    } else {
        body.user_id
    };
    let status = match state.store.fetch_latest(body.request_id, scope).await {
        Ok(Some(record)) => match record.display_text() {
            Some(text) => JobStatus::done(text.to_string()),
            None => JobStatus::processing(),
        },
        Ok(None) => JobStatus::processing(),
        Err(e) => {
            tracing::error!(request_id = body.request_id, error = %e, "result lookup failed");
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse {
                    error: "result store unavailable".to_string(),
                }),
            )
                .into_response();
        }
    };

    (
        [
            (header::CACHE_CONTROL, "no-store, no-cache, must-revalidate"),
            (header::PRAGMA, "no-cache"),
            (header::EXPIRES, "0"),
        ],
        Json(status),
    )
        .into_response()
}

/// Request body for POST /session.
#[derive(Debug, Deserialize)]
pub struct SessionRequest {
    pub user_id: i64,
}

/// Response body for POST /session.
#[derive(Debug, Serialize, Deserialize)]
pub struct SessionResponse {
    pub session_id: String,
    pub token: String,
}

/// POST /session
///
/// Issues a signed short-lived chat token. Stateless: nothing is stored
/// server-side, the token is the session.
pub async fn post_session(
    State(state): State<GatewayState>,
    Json(body): Json<SessionRequest>,
) -> Response {
    if body.user_id <= 0 {
        return validation_error("user_id must be a positive integer");
    }

    match state.signer.issue(body.user_id) {
        Ok((session_id, token)) => Json(SessionResponse { session_id, token }).into_response(),
        Err(e) => {
            tracing::error!(error = %e, "session issuance failed");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse {
                    error: "could not issue session".to_string(),
                }),
            )
                .into_response()
        }
    }
}
