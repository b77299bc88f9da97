// SPDX-FileCopyrightText: 2026 Renova Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Post-deserialization validation for configuration values.
//!
//! Validates semantic constraints that cannot be expressed via serde
//! attributes. Collects every problem instead of failing fast.

use crate::diagnostic::ConfigError;
use crate::model::RenovaConfig;

const LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];

/// Validate a deserialized configuration for semantic correctness.
pub fn validate_config(config: &RenovaConfig) -> Result<(), Vec<ConfigError>> {
    let mut errors = Vec::new();

    if config.engine.near_due_window_days < 1 {
        errors.push(ConfigError::Validation {
            message: format!(
                "engine.near_due_window_days must be at least 1, got {}",
                config.engine.near_due_window_days
            ),
        });
    }

    // A quiet period above a minute means the check effectively never runs.
    if config.engine.sequence_debounce_ms > 60_000 {
        errors.push(ConfigError::Validation {
            message: format!(
                "engine.sequence_debounce_ms must be at most 60000, got {}",
                config.engine.sequence_debounce_ms
            ),
        });
    }

    if config.storage.database_path.trim().is_empty() {
        errors.push(ConfigError::Validation {
            message: "storage.database_path must not be empty".to_string(),
        });
    }

    if !LOG_LEVELS.contains(&config.log.level.as_str()) {
        errors.push(ConfigError::Validation {
            message: format!(
                "log.level must be one of {LOG_LEVELS:?}, got `{}`",
                config.log.level
            ),
        });
    }

    if errors.is_empty() { Ok(()) } else { Err(errors) }
}
