// SPDX-FileCopyrightText: 2026 Sentria Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Post-deserialization validation for configuration values.
//!
//! Validates semantic constraints that cannot be expressed via serde
//! attributes, such as valid bind addresses and positive durations.

use crate::diagnostic::ConfigError;
use crate::model::SentriaConfig;

/// Validate a deserialized configuration for semantic correctness.
///
/// Returns `Ok(())` if all validations pass, or `Err(Vec<ConfigError>)` with
/// all collected validation errors (does not fail fast).
///
/// The signing secret and API key are checked separately by
/// [`validate_for_serve`], so a secretless config can still be inspected
/// with `sentria config`.
pub fn validate_config(config: &SentriaConfig) -> Result<(), Vec<ConfigError>> {
    let mut errors = Vec::new();

    let host = config.server.host.trim();
    if host.is_empty() {
        errors.push(ConfigError::Validation {
            message: "server.host must not be empty".to_string(),
        });
    } else {
        let is_valid_ip = host.parse::<std::net::IpAddr>().is_ok();
        let is_valid_hostname = host
            .chars()
            .all(|c| c.is_alphanumeric() || c == '.' || c == '-' || c == ':');
        if !is_valid_ip && !is_valid_hostname {
            errors.push(ConfigError::Validation {
                message: format!("server.host `{host}` is not a valid IP address or hostname"),
            });
        }
    }

    if config.storage.database_path.trim().is_empty() {
        errors.push(ConfigError::Validation {
            message: "storage.database_path must not be empty".to_string(),
        });
    }

    if config.session.ttl_secs == 0 {
        errors.push(ConfigError::Validation {
            message: "session.ttl_secs must be greater than zero".to_string(),
        });
    }

    if config.openai.timeout_secs == 0 {
        errors.push(ConfigError::Validation {
            message: "openai.timeout_secs must be greater than zero".to_string(),
        });
    }

    if config.server.allowed_origins.is_empty() {
        errors.push(ConfigError::Validation {
            message: "server.allowed_origins must not be empty (use \"*\" to allow any origin)"
                .to_string(),
        });
    }

    if errors.is_empty() { Ok(()) } else { Err(errors) }
}

/// Additional checks required before the server can start.
///
/// `serve` fails fast when the signing secret or API key is absent rather
/// than falling back to a random secret that would invalidate every issued
/// token on restart.
pub fn validate_for_serve(config: &SentriaConfig) -> Result<(), Vec<ConfigError>> {
    let mut errors = Vec::new();

    match &config.session.signing_secret {
        None => errors.push(ConfigError::MissingKey {
            key: "session.signing_secret".to_string(),
        }),
        Some(secret) if secret.trim().is_empty() => errors.push(ConfigError::Validation {
            message: "session.signing_secret must not be empty".to_string(),
        }),
        Some(_) => {}
    }

    match &config.openai.api_key {
        None => errors.push(ConfigError::MissingKey {
            key: "openai.api_key".to_string(),
        }),
        Some(key) if key.trim().is_empty() => errors.push(ConfigError::Validation {
            message: "openai.api_key must not be empty".to_string(),
        }),
        Some(_) => {}
    }

    if errors.is_empty() { Ok(()) } else { Err(errors) }
}
