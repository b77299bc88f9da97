// SPDX-FileCopyrightText: 2026 Renova Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Error types for the Renova scheduling engine.

use thiserror::Error;

/// The primary error type used across all Renova crates.
///
/// Every failure here is scoped to a single in-progress record or form;
/// nothing in the engine is fatal to the process.
#[derive(Debug, Error)]
pub enum RenovaError {
    /// A field failed local validation before any network or storage call
    /// (missing start date, empty message, non-positive interval).
    #[error("invalid {field}: {message}")]
    Validation { field: &'static str, message: String },

    /// A candidate sequence is already in use under the given parent.
    /// Surfaced inline; submission stays blocked, no automatic retry.
    #[error("sequence {candidate} already exists under parent {parent}")]
    SequenceConflict { parent: String, candidate: u32 },

    /// The remote uniqueness check failed for a reason other than a defined
    /// conflict signal. Retryable; never treated as valid.
    #[error("uniqueness check failed: {message}")]
    ProbeFailed {
        message: String,
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Storage backend errors (database connection, query failure, migration).
    #[error("storage error: {source}")]
    Storage {
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// Configuration errors (invalid TOML, missing required fields).
    #[error("configuration error: {0}")]
    Config(String),

    /// Internal or unexpected errors.
    #[error("internal error: {0}")]
    Internal(String),
}

impl RenovaError {
    /// Whether the caller may retry the failed operation as-is.
    ///
    /// Only transient probe failures qualify; conflicts and validation
    /// errors require the user to change their input first.
    pub fn is_retryable(&self) -> bool {
        matches!(self, RenovaError::ProbeFailed { .. })
    }
}
