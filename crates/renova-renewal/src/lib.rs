// SPDX-FileCopyrightText: 2026 Renova Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Renewal-date resolution and due-status classification.
//!
//! One parametrized resolver covers the contract, domain, and workspace
//! cycle vocabularies (tables as data, not per-domain code), and one
//! classifier answers "how urgent is this date" for every caller.

pub mod cycle;
pub mod due;
pub mod record;
pub mod resolve;

pub use cycle::{
    CONTRACT_CYCLES, CycleOffset, CycleTable, DOMAIN_CYCLES, FALLBACK_OFFSET, Vocabulary,
    WORKSPACE_CYCLES,
};
pub use due::{DueStatus, DueStatusKind, NEAR_DUE_WINDOW_DAYS, classify, classify_with_window};
pub use record::RenewalRecord;
pub use resolve::{ResolvedRenewal, resolve_renewal_date};
