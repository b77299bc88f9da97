// SPDX-FileCopyrightText: 2026 Renova Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Renewal line records owned by a parent contract entity.
//!
//! The renewal date is a derived value: it is recomputed every time the
//! start date or cycle changes and has no public setter, so it can never
//! drift from its inputs. Records are soft-deleted only.

use chrono::NaiveDate;
use renova_core::{ParentId, RenovaError};
use serde::Serialize;

use crate::cycle::Vocabulary;
use crate::due::{DueStatus, classify};
use crate::resolve::resolve_renewal_date;

/// One renewal line (AMC year, domain renewal, license term) under a parent.
#[derive(Debug, Clone, Serialize)]
pub struct RenewalRecord {
    pub parent: ParentId,
    /// Per-parent unique ordinal, allocated before submission.
    pub sequence: u32,
    start_date: Option<NaiveDate>,
    cycle: String,
    vocabulary: Vocabulary,
    /// Derived from `start_date` + `cycle`; recomputed on every mutation.
    renewal_date: Option<NaiveDate>,
    /// Whether the last resolution applied the unknown-cycle fallback.
    #[serde(skip)]
    cycle_fallback: bool,
    pub amount: f64,
    pub paid: bool,
    deleted: bool,
}

impl RenewalRecord {
    /// Create a new renewal line, deriving the renewal date immediately.
    pub fn new(
        parent: ParentId,
        sequence: u32,
        vocabulary: Vocabulary,
        cycle: impl Into<String>,
        start_date: Option<NaiveDate>,
        amount: f64,
    ) -> Result<Self, RenovaError> {
        if sequence == 0 {
            return Err(RenovaError::Validation {
                field: "sequence",
                message: "sequence must be a positive integer".to_string(),
            });
        }
        let cycle = cycle.into();
        let resolved = resolve_renewal_date(start_date, &cycle, vocabulary.table());
        Ok(Self {
            parent,
            sequence,
            start_date,
            cycle,
            vocabulary,
            renewal_date: resolved.date,
            cycle_fallback: resolved.used_fallback,
            amount,
            paid: false,
            deleted: false,
        })
    }

    /// Rebuild a record from stored fields, re-deriving the renewal date.
    ///
    /// The stored renewal date is intentionally ignored: deriving from the
    /// stored start/cycle guarantees the invariant holds even for rows
    /// written before a vocabulary change.
    #[allow(clippy::too_many_arguments)]
    pub fn from_stored(
        parent: ParentId,
        sequence: u32,
        vocabulary: Vocabulary,
        cycle: String,
        start_date: Option<NaiveDate>,
        amount: f64,
        paid: bool,
        deleted: bool,
    ) -> Result<Self, RenovaError> {
        let mut record = Self::new(parent, sequence, vocabulary, cycle, start_date, amount)?;
        record.paid = paid;
        record.deleted = deleted;
        Ok(record)
    }

    pub fn start_date(&self) -> Option<NaiveDate> {
        self.start_date
    }

    pub fn cycle(&self) -> &str {
        &self.cycle
    }

    pub fn vocabulary(&self) -> Vocabulary {
        self.vocabulary
    }

    /// The derived renewal date. Read-only by construction.
    pub fn renewal_date(&self) -> Option<NaiveDate> {
        self.renewal_date
    }

    /// Whether the current cycle label resolved via the one-year fallback.
    pub fn cycle_fallback(&self) -> bool {
        self.cycle_fallback
    }

    /// Change the start date and recompute the renewal date.
    pub fn set_start_date(&mut self, start_date: Option<NaiveDate>) {
        self.start_date = start_date;
        self.recompute();
    }

    /// Change the cycle label and recompute the renewal date.
    pub fn set_cycle(&mut self, cycle: impl Into<String>) {
        self.cycle = cycle.into();
        self.recompute();
    }

    fn recompute(&mut self) {
        let resolved =
            resolve_renewal_date(self.start_date, &self.cycle, self.vocabulary.table());
        self.renewal_date = resolved.date;
        self.cycle_fallback = resolved.used_fallback;
    }

    /// Urgency of this line's renewal date relative to today.
    pub fn due(&self, today: NaiveDate) -> DueStatus {
        classify(self.renewal_date, today)
    }

    /// Flag the record as deleted. Records are never physically removed.
    pub fn soft_delete(&mut self) {
        self.deleted = true;
    }

    pub fn is_deleted(&self) -> bool {
        self.deleted
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::due::DueStatusKind;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn record() -> RenewalRecord {
        RenewalRecord::new(
            ParentId("amc-1".into()),
            1,
            Vocabulary::Contract,
            "yearly",
            Some(date(2026, 1, 1)),
            12_000.0,
        )
        .unwrap()
    }

    #[test]
    fn new_record_derives_renewal_date() {
        let rec = record();
        assert_eq!(rec.renewal_date(), Some(date(2027, 1, 1)));
        assert!(!rec.cycle_fallback());
        assert!(!rec.paid);
        assert!(!rec.is_deleted());
    }

    #[test]
    fn zero_sequence_is_rejected() {
        let err = RenewalRecord::new(
            ParentId("amc-1".into()),
            0,
            Vocabulary::Contract,
            "yearly",
            None,
            0.0,
        )
        .unwrap_err();
        assert!(matches!(err, RenovaError::Validation { field: "sequence", .. }));
    }

    #[test]
    fn changing_start_date_recomputes() {
        let mut rec = record();
        rec.set_start_date(Some(date(2026, 6, 15)));
        assert_eq!(rec.renewal_date(), Some(date(2027, 6, 15)));
    }

    #[test]
    fn changing_cycle_recomputes() {
        let mut rec = record();
        rec.set_cycle("quarterly");
        assert_eq!(rec.renewal_date(), Some(date(2026, 4, 1)));
    }

    #[test]
    fn clearing_start_date_unsets_renewal_date() {
        let mut rec = record();
        rec.set_start_date(None);
        assert_eq!(rec.renewal_date(), None);
        assert_eq!(rec.due(date(2026, 8, 1)).kind, DueStatusKind::Unknown);
    }

    #[test]
    fn unknown_cycle_flags_fallback() {
        let mut rec = record();
        rec.set_cycle("weekly");
        assert!(rec.cycle_fallback());
        // Fallback is one year from the start date.
        assert_eq!(rec.renewal_date(), Some(date(2027, 1, 1)));
    }

    #[test]
    fn due_delegates_to_shared_classifier() {
        let rec = record();
        let status = rec.due(date(2026, 12, 15));
        assert_eq!(status.kind, DueStatusKind::NearDue);
        assert_eq!(status.days_remaining, Some(17));
    }

    #[test]
    fn soft_delete_only_flags() {
        let mut rec = record();
        rec.soft_delete();
        assert!(rec.is_deleted());
        // The data survives deletion.
        assert_eq!(rec.renewal_date(), Some(date(2027, 1, 1)));
    }

    #[test]
    fn from_stored_rederives_renewal_date() {
        let rec = RenewalRecord::from_stored(
            ParentId("dom-3".into()),
            2,
            Vocabulary::Domain,
            "2-years".into(),
            Some(date(2025, 3, 10)),
            900.0,
            true,
            false,
        )
        .unwrap();
        assert_eq!(rec.renewal_date(), Some(date(2027, 3, 10)));
        assert!(rec.paid);
    }
}
