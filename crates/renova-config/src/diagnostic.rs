// SPDX-FileCopyrightText: 2026 Renova Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Diagnostic error types and rendering for configuration failures.

use miette::Diagnostic;
use thiserror::Error;

/// A configuration problem, either at parse time or during validation.
#[derive(Debug, Error, Diagnostic)]
pub enum ConfigError {
    /// The TOML/env input could not be parsed or deserialized.
    #[error("{message}")]
    #[diagnostic(help("check renova.toml against the documented keys; unknown keys are rejected"))]
    Parse { message: String },

    /// A deserialized value failed a semantic check.
    #[error("{message}")]
    #[diagnostic(help("fix the value in renova.toml or the RENOVA_* environment override"))]
    Validation { message: String },
}

/// Convert a figment extraction error into per-problem diagnostics.
pub fn figment_to_config_errors(err: figment::Error) -> Vec<ConfigError> {
    err.into_iter()
        .map(|e| ConfigError::Parse {
            message: e.to_string(),
        })
        .collect()
}

/// Print all collected configuration errors to stderr.
pub fn render_errors(errors: &[ConfigError]) {
    for err in errors {
        eprintln!("config error: {err}");
        if let Some(help) = err.help() {
            eprintln!("  help: {help}");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn figment_errors_become_parse_diagnostics() {
        let err = crate::loader::load_config_from_str("engine = 3\n").unwrap_err();
        let errors = figment_to_config_errors(err);
        assert!(!errors.is_empty());
        assert!(matches!(errors[0], ConfigError::Parse { .. }));
    }

    #[test]
    fn diagnostics_carry_help_text() {
        let err = ConfigError::Validation {
            message: "engine.near_due_window_days must be at least 1".to_string(),
        };
        assert!(err.help().is_some());
    }
}
