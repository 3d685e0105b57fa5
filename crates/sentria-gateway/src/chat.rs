// SPDX-FileCopyrightText: 2026 Sentria Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Streamed chat over Server-Sent Events for POST /chat.
//!
//! Event protocol:
//! ```text
//! event: delta
//! data: <text fragment>
//!
//! event: error
//! data: <diagnostic, at most one, terminates the deltas>
//!
//! event: done
//! data:
//! ```
//! The stream always ends with `done`, so consumers can distinguish a
//! mid-generation failure (error then done) from normal completion without
//! parsing diagnostics out of the text channel. Nothing from the exchange is
//! persisted.

use std::convert::Infallible;

use axum::{
    Json,
    extract::State,
    http::{HeaderMap, StatusCode, header},
    response::{
        IntoResponse, Response,
        sse::{Event, Sse},
    },
};
use futures::{StreamExt, future, stream};
use sentria_core::{GenerationRequest, SentriaError, VisibleValue};
use sentria_report::{chat_system_prompt, visible_context};
use serde::Deserialize;

use crate::handlers::{ErrorResponse, validation_error};
use crate::server::GatewayState;

/// Sampling temperature for chat replies.
pub const CHAT_TEMPERATURE: f32 = 0.2;

/// Request body for POST /chat.
#[derive(Debug, Deserialize)]
pub struct ChatRequest {
    /// Session id from /session; informational, the token is authoritative.
    #[serde(default)]
    pub session_id: Option<String>,
    pub user_id: i64,
    pub message: String,
    /// Snapshot of the crisis fields currently on the caller's screen.
    #[serde(default)]
    pub visible_values: Vec<VisibleValue>,
}

fn unauthorized(message: String) -> Response {
    (
        StatusCode::UNAUTHORIZED,
        Json(ErrorResponse { error: message }),
    )
        .into_response()
}

/// POST /chat
///
/// Requires a valid bearer token whose embedded user id matches the request
/// body; rejected requests never reach the generator. Replies are grounded
/// in the caller-supplied visible values, not the result store.
pub async fn post_chat(
    State(state): State<GatewayState>,
    headers: HeaderMap,
    Json(body): Json<ChatRequest>,
) -> Response {
    let Some(auth_header) = headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
    else {
        return unauthorized("missing authorization header".to_string());
    };
    let claims = match state.signer.verify_bearer(auth_header) {
        Ok(claims) => claims,
        Err(e) => return unauthorized(e.to_string()),
    };
    if claims.uid != body.user_id {
        return unauthorized("token does not authorize this user".to_string());
    }
    if body.message.trim().is_empty() {
        return validation_error("message must not be empty");
    }

    let context = visible_context(&body.visible_values);
    let request = GenerationRequest {
        system: chat_system_prompt(&context),
        user: body.message,
        temperature: Some(CHAT_TEMPERATURE),
    };

    tracing::debug!(user_id = claims.uid, session_id = ?body.session_id, "chat stream opening");

    match state.provider.stream(request).await {
        Ok(inner) => Sse::new(tagged_events(inner)).into_response(),
        Err(e) => {
            // The call failed before any fragment arrived; deliver the
            // failure over the same protocol the client is already reading.
            tracing::error!(error = %e, "chat stream could not start");
            Sse::new(stream::iter([
                Ok::<_, Infallible>(error_event(&e)),
                Ok(done_event()),
            ]))
            .into_response()
        }
    }
}

fn error_event(e: &SentriaError) -> Event {
    Event::default().event("error").data(e.to_string())
}

fn done_event() -> Event {
    Event::default().event("done").data("")
}

/// Maps generator fragments to tagged SSE events.
///
/// The first failed item becomes an `error` event and ends the deltas; a
/// trailing `done` event is always appended.
fn tagged_events(
    inner: sentria_core::TextStream,
) -> impl futures::Stream<Item = Result<Event, Infallible>> {
    inner
        .scan(false, |failed, item| {
            if *failed {
                return future::ready(None);
            }
            let event = match item {
                Ok(text) => Event::default().event("delta").data(text),
                Err(e) => {
                    *failed = true;
                    error_event(&e)
                }
            };
            future::ready(Some(Ok(event)))
        })
        .chain(stream::iter([Ok(done_event())]))
}
