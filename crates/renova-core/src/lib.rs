// SPDX-FileCopyrightText: 2026 Renova Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Core library for the Renova scheduling engine.
//!
//! This crate provides the foundational error type, shared domain
//! identifiers, and the adapter traits (clock, uniqueness probe) that the
//! engine crates depend on. It holds no scheduling logic itself.

pub mod error;
pub mod traits;
pub mod types;

// Re-export key items at crate root for ergonomic imports.
pub use error::RenovaError;
pub use traits::{Clock, SystemClock, UniquenessProbe};
pub use types::{BusinessModule, BusinessRef, ParentId, UniquenessSignal};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn renova_error_has_all_variants() {
        let _validation = RenovaError::Validation {
            field: "start_date",
            message: "missing".into(),
        };
        let _conflict = RenovaError::SequenceConflict {
            parent: "amc-1".into(),
            candidate: 3,
        };
        let _probe = RenovaError::ProbeFailed {
            message: "timeout".into(),
            source: None,
        };
        let _storage = RenovaError::Storage {
            source: Box::new(std::io::Error::other("test")),
        };
        let _config = RenovaError::Config("test".into());
        let _internal = RenovaError::Internal("test".into());
    }

    #[test]
    fn only_probe_failures_are_retryable() {
        let probe = RenovaError::ProbeFailed {
            message: "503".into(),
            source: None,
        };
        assert!(probe.is_retryable());

        let conflict = RenovaError::SequenceConflict {
            parent: "amc-1".into(),
            candidate: 3,
        };
        assert!(!conflict.is_retryable());

        let validation = RenovaError::Validation {
            field: "message",
            message: "empty".into(),
        };
        assert!(!validation.is_retryable());
    }

    #[test]
    fn trait_objects_are_constructible() {
        fn _assert_clock<T: Clock>() {}
        fn _assert_probe<T: UniquenessProbe>() {}
        let clock: Box<dyn Clock> = Box::new(SystemClock);
        let _ = clock.now();
    }
}
