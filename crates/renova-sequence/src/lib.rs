// SPDX-FileCopyrightText: 2026 Renova Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Per-parent sequence allocation for renewal records.
//!
//! Guarantees a best-effort unique ordinal for a new child record despite
//! the authoritative check being a remote round-trip and the user being
//! free to type arbitrary candidates. The server stays the final arbiter;
//! this crate's job is to make rejected submissions rare.

pub mod allocator;
pub mod claim;
pub mod normalize;

pub use allocator::{DEFAULT_DEBOUNCE, SequenceAllocator, suggest_next};
pub use claim::SequenceClaim;
pub use normalize::sequence_is_available;
