// SPDX-FileCopyrightText: 2026 Renova Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Renewal cycle vocabularies as data.
//!
//! Each business domain (contracts, domain registrations, workspace
//! licenses) carries its own closed set of cycle labels. The labels map to
//! fixed calendar offsets; one lookup table per domain, one resolver for
//! all of them.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

/// Calendar offset a cycle label resolves to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CycleOffset {
    pub months: u32,
    pub years: u32,
}

/// Offset applied when a stored cycle label is not in the vocabulary.
///
/// Rows written under older vocabularies still resolve; callers surface
/// the fallback as a data-quality warning, not a failure.
pub const FALLBACK_OFFSET: CycleOffset = CycleOffset { months: 0, years: 1 };

/// A domain's cycle vocabulary: label → offset, lookup by label.
#[derive(Debug)]
pub struct CycleTable {
    pub name: &'static str,
    entries: &'static [(&'static str, CycleOffset)],
}

impl CycleTable {
    /// Look up the offset for a cycle label. Case-insensitive.
    pub fn offset_for(&self, label: &str) -> Option<CycleOffset> {
        self.entries
            .iter()
            .find(|(l, _)| l.eq_ignore_ascii_case(label))
            .map(|(_, offset)| *offset)
    }

    /// All labels in this vocabulary, in declaration order.
    pub fn labels(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.entries.iter().map(|(l, _)| *l)
    }

    /// Closest known label to an unrecognized one, if any is plausible.
    ///
    /// Used to enrich the fallback warning with a "did you mean" hint for
    /// stale data from older vocabularies.
    pub fn nearest_label(&self, label: &str) -> Option<&'static str> {
        let lowered = label.to_ascii_lowercase();
        self.entries
            .iter()
            .map(|(l, _)| (*l, strsim::jaro_winkler(&lowered, l)))
            .filter(|(_, score)| *score >= 0.8)
            .max_by(|(_, a), (_, b)| a.total_cmp(b))
            .map(|(l, _)| l)
    }
}

const MONTHLY: CycleOffset = CycleOffset { months: 1, years: 0 };
const QUARTERLY: CycleOffset = CycleOffset { months: 3, years: 0 };
const HALF_YEARLY: CycleOffset = CycleOffset { months: 6, years: 0 };
const ONE_YEAR: CycleOffset = CycleOffset { months: 0, years: 1 };
const TWO_YEARS: CycleOffset = CycleOffset { months: 0, years: 2 };
const THREE_YEARS: CycleOffset = CycleOffset { months: 0, years: 3 };

/// AMC/contract renewal cycles.
pub const CONTRACT_CYCLES: CycleTable = CycleTable {
    name: "contract",
    entries: &[
        ("monthly", MONTHLY),
        ("quarterly", QUARTERLY),
        ("half-yearly", HALF_YEARLY),
        ("yearly", ONE_YEAR),
        ("2-years", TWO_YEARS),
    ],
};

/// Domain-registration renewal cycles.
pub const DOMAIN_CYCLES: CycleTable = CycleTable {
    name: "domain",
    entries: &[
        ("monthly", MONTHLY),
        ("quarterly", QUARTERLY),
        ("half-yearly", HALF_YEARLY),
        ("1-year", ONE_YEAR),
        ("2-years", TWO_YEARS),
        ("3-years", THREE_YEARS),
    ],
};

/// Workspace-license renewal cycles.
pub const WORKSPACE_CYCLES: CycleTable = CycleTable {
    name: "workspace",
    entries: &[
        ("monthly", MONTHLY),
        ("quarterly", QUARTERLY),
        ("yearly", ONE_YEAR),
        ("2-years", TWO_YEARS),
        ("3-years", THREE_YEARS),
    ],
};

/// Tag selecting which vocabulary a record resolves against.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, Serialize, Deserialize,
)]
#[strum(serialize_all = "kebab-case")]
#[serde(rename_all = "kebab-case")]
pub enum Vocabulary {
    Contract,
    Domain,
    Workspace,
}

impl Vocabulary {
    pub fn table(&self) -> &'static CycleTable {
        match self {
            Vocabulary::Contract => &CONTRACT_CYCLES,
            Vocabulary::Domain => &DOMAIN_CYCLES,
            Vocabulary::Workspace => &WORKSPACE_CYCLES,
        }
    }
}
