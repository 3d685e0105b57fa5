// SPDX-FileCopyrightText: 2026 Sentria Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Structured-mode output normalization.
//!
//! The generator is instructed to emit a single JSON document, but it is not
//! guaranteed to comply: output may arrive wrapped in a fenced code block or
//! not parse at all. What gets persisted is always the canonical
//! re-serialization, never the generator's raw text.

use sentria_core::SentriaError;

/// Strips a leading/trailing fenced-code-block wrapper, if present.
///
/// Handles an optional language tag on the opening fence (```json). Text
/// without a fence is returned trimmed and otherwise unchanged.
pub fn strip_code_fence(raw: &str) -> &str {
    let trimmed = raw.trim();
    let Some(rest) = trimmed.strip_prefix("```") else {
        return trimmed;
    };
    // Drop the rest of the opening fence line (an optional language tag).
    let body = match rest.find('\n') {
        Some(newline) => &rest[newline + 1..],
        None => return trimmed,
    };
    match body.trim_end().strip_suffix("```") {
        Some(inner) => inner.trim(),
        None => body.trim(),
    }
}

/// Normalizes raw generator output into canonical JSON text.
///
/// Strips any code fence, parses the remainder as a single JSON value
/// (object or array), and re-serializes deterministically: key order as
/// received, full Unicode preserved, no ASCII escaping. A parse failure is a
/// [`SentriaError::MalformedOutput`], which flows into the orchestrator's
/// failure path like any other generation failure.
pub fn normalize_output(raw: &str) -> Result<String, SentriaError> {
    let body = strip_code_fence(raw);
    let value: serde_json::Value = serde_json::from_str(body)
        .map_err(|e| SentriaError::MalformedOutput(format!("{e}")))?;
    if !value.is_object() && !value.is_array() {
        return Err(SentriaError::MalformedOutput(format!(
            "expected a JSON object or array, got {}",
            json_type_name(&value)
        )));
    }
    serde_json::to_string(&value).map_err(|e| SentriaError::MalformedOutput(format!("{e}")))
}

fn json_type_name(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "a boolean",
        serde_json::Value::Number(_) => "a number",
        serde_json::Value::String(_) => "a string",
        serde_json::Value::Array(_) => "an array",
        serde_json::Value::Object(_) => "an object",
    }
}
