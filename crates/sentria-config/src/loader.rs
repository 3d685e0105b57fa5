// SPDX-FileCopyrightText: 2026 Sentria Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration loader using Figment for layered config merging.
//!
//! Supports XDG hierarchy: `./sentria.toml` > `~/.config/sentria/sentria.toml`
//! > `/etc/sentria/sentria.toml` with environment variable overrides via the
//! `SENTRIA_` prefix.

#![allow(clippy::result_large_err)] // figment::Error is external and cannot be boxed without wrapper

use std::path::Path;

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};

use crate::model::SentriaConfig;

/// Load configuration from the standard XDG hierarchy with env var overrides.
///
/// Merge order (later overrides earlier):
/// 1. Compiled defaults
/// 2. `/etc/sentria/sentria.toml` (system-wide)
/// 3. `~/.config/sentria/sentria.toml` (user XDG config)
/// 4. `./sentria.toml` (local directory)
/// 5. `SENTRIA_*` environment variables
pub fn load_config() -> Result<SentriaConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(SentriaConfig::default()))
        .merge(Toml::file("/etc/sentria/sentria.toml"))
        .merge(Toml::file(
            dirs::config_dir()
                .map(|d| d.join("sentria/sentria.toml"))
                .unwrap_or_default(),
        ))
        .merge(Toml::file("sentria.toml"))
        .merge(env_provider())
        .extract()
}

/// Load configuration from a TOML string only (no XDG lookup, no env vars).
///
/// Used for testing and explicit config specification.
pub fn load_config_from_str(toml_content: &str) -> Result<SentriaConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(SentriaConfig::default()))
        .merge(Toml::string(toml_content))
        .extract()
}

/// Load configuration from a specific file path with env var overrides.
pub fn load_config_from_path(path: &Path) -> Result<SentriaConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(SentriaConfig::default()))
        .merge(Toml::file(path))
        .merge(env_provider())
        .extract()
}

/// Create the environment variable provider using explicit `map()` for
/// section-to-dot mapping.
///
/// Uses `Env::map()` NOT `Env::split("_")` to avoid ambiguity with
/// underscore-containing key names: `SENTRIA_SESSION_SIGNING_SECRET` must map
/// to `session.signing_secret`, not `session.signing.secret`.
fn env_provider() -> Env {
    Env::prefixed("SENTRIA_").map(|key| {
        // `key` is the lowercased env var name with prefix stripped.
        // Example: SENTRIA_OPENAI_API_KEY -> "openai_api_key"
        let key_str = key.as_str();
        let mapped = key_str
            .replacen("service_", "service.", 1)
            .replacen("server_", "server.", 1)
            .replacen("openai_", "openai.", 1)
            .replacen("storage_", "storage.", 1)
            .replacen("session_", "session.", 1)
            .replacen("report_", "report.", 1);
        mapped.into()
    })
}
