// SPDX-FileCopyrightText: 2026 Sentria Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Error types for the Sentria crisis report service.

use thiserror::Error;

/// The primary error type used across all Sentria crates.
#[derive(Debug, Error)]
pub enum SentriaError {
    /// Configuration errors (invalid TOML, missing required fields, type mismatches).
    #[error("configuration error: {0}")]
    Config(String),

    /// Storage backend errors (database open, query failure).
    #[error("storage error: {source}")]
    Storage {
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// Text generator errors (API failure, quota, malformed request).
    #[error("provider error: {message}")]
    Provider {
        message: String,
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Structured-mode generator output did not parse as a single JSON value.
    #[error("malformed generator output: {0}")]
    MalformedOutput(String),

    /// A generator call exceeded its configured deadline.
    #[error("operation timed out after {duration:?}")]
    Timeout { duration: std::time::Duration },

    /// Session token missing, malformed, expired, or signature mismatch.
    #[error("unauthorized: {0}")]
    Unauthorized(String),

    /// Internal or unexpected errors.
    #[error("internal error: {0}")]
    Internal(String),
}

impl SentriaError {
    /// Diagnostic text persisted in place of a result when a job fails.
    ///
    /// The polling contract has no separate error channel, so failures are
    /// stored as text in the normal result field with a recognizable prefix.
    pub fn as_stored_diagnostic(&self) -> String {
        let kind = match self {
            SentriaError::Config(_) => "Config",
            SentriaError::Storage { .. } => "Storage",
            SentriaError::Provider { .. } => "Provider",
            SentriaError::MalformedOutput(_) => "MalformedOutput",
            SentriaError::Timeout { .. } => "Timeout",
            SentriaError::Unauthorized(_) => "Unauthorized",
            SentriaError::Internal(_) => "Internal",
        };
        format!("ERROR: {kind}: {self}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn all_variants_construct() {
        let _config = SentriaError::Config("test".into());
        let _storage = SentriaError::Storage {
            source: Box::new(std::io::Error::other("test")),
        };
        let _provider = SentriaError::Provider {
            message: "test".into(),
            source: None,
        };
        let _malformed = SentriaError::MalformedOutput("not json".into());
        let _timeout = SentriaError::Timeout {
            duration: std::time::Duration::from_secs(30),
        };
        let _unauthorized = SentriaError::Unauthorized("expired".into());
        let _internal = SentriaError::Internal("test".into());
    }

    #[test]
    fn stored_diagnostic_has_error_prefix() {
        let err = SentriaError::Provider {
            message: "quota exceeded".into(),
            source: None,
        };
        let text = err.as_stored_diagnostic();
        assert!(text.starts_with("ERROR: Provider:"), "got: {text}");
        assert!(text.contains("quota exceeded"));
    }

    #[test]
    fn timeout_diagnostic_names_the_kind() {
        let err = SentriaError::Timeout {
            duration: std::time::Duration::from_secs(120),
        };
        assert!(err.as_stored_diagnostic().starts_with("ERROR: Timeout:"));
    }
}
