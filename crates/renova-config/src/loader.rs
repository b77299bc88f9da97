// SPDX-FileCopyrightText: 2026 Renova Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration loader using Figment for layered config merging.
//!
//! Supports the XDG hierarchy: `./renova.toml` > `~/.config/renova/renova.toml`
//! > `/etc/renova/renova.toml`, with environment variable overrides via the
//! `RENOVA_` prefix.

#![allow(clippy::result_large_err)] // figment::Error is external and cannot be boxed without wrapper

use std::path::Path;

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};

use crate::model::RenovaConfig;

/// Load configuration from the standard XDG hierarchy with env var overrides.
///
/// Merge order (later overrides earlier):
/// 1. Compiled defaults
/// 2. `/etc/renova/renova.toml` (system-wide)
/// 3. `~/.config/renova/renova.toml` (user XDG config)
/// 4. `./renova.toml` (local directory)
/// 5. `RENOVA_*` environment variables
pub fn load_config() -> Result<RenovaConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(RenovaConfig::default()))
        .merge(Toml::file("/etc/renova/renova.toml"))
        .merge(Toml::file(
            dirs::config_dir()
                .map(|d| d.join("renova/renova.toml"))
                .unwrap_or_default(),
        ))
        .merge(Toml::file("renova.toml"))
        .merge(env_provider())
        .extract()
}

/// Load configuration from a TOML string only (no XDG lookup).
///
/// Used for testing and explicit config specification.
pub fn load_config_from_str(toml_content: &str) -> Result<RenovaConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(RenovaConfig::default()))
        .merge(Toml::string(toml_content))
        .extract()
}

/// Load configuration from a specific file path with env var overrides.
pub fn load_config_from_path(path: &Path) -> Result<RenovaConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(RenovaConfig::default()))
        .merge(Toml::file(path))
        .merge(env_provider())
        .extract()
}

/// Create the environment variable provider using explicit `map()` for
/// section-to-dot mapping.
///
/// Uses `Env::map()` NOT `Env::split("_")` to avoid ambiguity with
/// underscore-containing key names: `RENOVA_ENGINE_NEAR_DUE_WINDOW_DAYS`
/// must map to `engine.near_due_window_days`, not `engine.near.due...`.
fn env_provider() -> Env {
    Env::prefixed("RENOVA_").map(|key| {
        let key_str = key.as_str();
        let mapped = key_str
            .replacen("engine_", "engine.", 1)
            .replacen("storage_", "storage.", 1)
            .replacen("log_", "log.", 1);
        mapped.into()
    })
}
