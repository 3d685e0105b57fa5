// SPDX-FileCopyrightText: 2026 Sentria Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! SSE stream parser for OpenAI Chat Completions streaming responses.
//!
//! Converts a reqwest response byte stream into plain text fragments using
//! the `eventsource-stream` crate for SSE protocol compliance. OpenAI sends
//! unnamed `data:` events carrying JSON chunks, terminated by a literal
//! `[DONE]` sentinel.

use futures::stream::StreamExt;
use sentria_core::{SentriaError, TextStream};

use crate::types::StreamChunk;
use eventsource_stream::Eventsource;

/// Parses a streaming response into a stream of text fragments.
///
/// Chunks without a content delta (role preludes, finish markers) and the
/// `[DONE]` sentinel are skipped; only non-empty content fragments are
/// yielded, in arrival order.
pub fn parse_text_stream(response: reqwest::Response) -> TextStream {
    let event_stream = response.bytes_stream().eventsource();

    let mapped = event_stream.filter_map(|result| async move {
        match result {
            Ok(event) => {
                if event.data.trim() == "[DONE]" {
                    return None;
                }
                match serde_json::from_str::<StreamChunk>(&event.data) {
                    Ok(chunk) => chunk
                        .choices
                        .into_iter()
                        .next()
                        .and_then(|choice| choice.delta.content)
                        .filter(|text| !text.is_empty())
                        .map(Ok),
                    Err(e) => Some(Err(SentriaError::Provider {
                        message: format!("failed to parse stream chunk: {e}"),
                        source: Some(Box::new(e)),
                    })),
                }
            }
            Err(e) => Some(Err(SentriaError::Provider {
                message: format!("SSE stream error: {e}"),
                source: None,
            })),
        }
    });

    Box::pin(mapped)
}
