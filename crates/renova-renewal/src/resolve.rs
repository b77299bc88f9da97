// SPDX-FileCopyrightText: 2026 Renova Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Renewal-date resolution from a start date and a cycle label.

use chrono::{Months, NaiveDate};
use tracing::warn;

use crate::cycle::{CycleOffset, CycleTable, FALLBACK_OFFSET};

/// Outcome of resolving a renewal date.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResolvedRenewal {
    /// The computed renewal date; `None` when no start date was given.
    pub date: Option<NaiveDate>,
    /// Whether the one-year fallback was applied for an unknown label.
    pub used_fallback: bool,
}

/// Resolve the renewal date for a start date and cycle label.
///
/// A missing start date yields `date: None`; the record simply has no
/// renewal date yet. An unknown cycle label resolves with the one-year
/// fallback and flags `used_fallback` so the caller can surface a
/// data-quality warning. Pure and idempotent; the result is never earlier
/// than the start date.
pub fn resolve_renewal_date(
    start: Option<NaiveDate>,
    cycle: &str,
    table: &CycleTable,
) -> ResolvedRenewal {
    let Some(start) = start else {
        return ResolvedRenewal {
            date: None,
            used_fallback: false,
        };
    };

    let (offset, used_fallback) = match table.offset_for(cycle) {
        Some(offset) => (offset, false),
        None => {
            match table.nearest_label(cycle) {
                Some(suggestion) => warn!(
                    cycle,
                    table = table.name,
                    suggestion,
                    "unknown renewal cycle, falling back to one year"
                ),
                None => warn!(
                    cycle,
                    table = table.name,
                    "unknown renewal cycle, falling back to one year"
                ),
            }
            (FALLBACK_OFFSET, true)
        }
    };

    ResolvedRenewal {
        date: apply_offset(start, offset),
        used_fallback,
    }
}

/// Add years first, then months. End-of-month dates clamp (Feb 29 + one
/// year lands on Feb 28) rather than overflowing into the next month.
fn apply_offset(start: NaiveDate, offset: CycleOffset) -> Option<NaiveDate> {
    start
        .checked_add_months(Months::new(offset.years * 12))
        .and_then(|d| d.checked_add_months(Months::new(offset.months)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cycle::{CONTRACT_CYCLES, DOMAIN_CYCLES, WORKSPACE_CYCLES};
    use tracing_test::traced_test;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn every_contract_cycle_advances_by_its_offset() {
        let start = date(2026, 1, 15);
        let cases = [
            ("monthly", date(2026, 2, 15)),
            ("quarterly", date(2026, 4, 15)),
            ("half-yearly", date(2026, 7, 15)),
            ("yearly", date(2027, 1, 15)),
            ("2-years", date(2028, 1, 15)),
        ];
        for (cycle, expected) in cases {
            let resolved = resolve_renewal_date(Some(start), cycle, &CONTRACT_CYCLES);
            assert_eq!(resolved.date, Some(expected), "cycle {cycle}");
            assert!(!resolved.used_fallback);
        }
    }

    #[test]
    fn three_year_domain_cycle() {
        let resolved = resolve_renewal_date(Some(date(2026, 3, 1)), "3-years", &DOMAIN_CYCLES);
        assert_eq!(resolved.date, Some(date(2029, 3, 1)));
    }

    #[test]
    fn missing_start_date_is_unset_not_error() {
        let resolved = resolve_renewal_date(None, "yearly", &CONTRACT_CYCLES);
        assert_eq!(resolved.date, None);
        assert!(!resolved.used_fallback);
    }

    #[test]
    fn leap_day_plus_yearly_clamps_to_feb_28() {
        let resolved =
            resolve_renewal_date(Some(date(2024, 2, 29)), "yearly", &CONTRACT_CYCLES);
        assert_eq!(resolved.date, Some(date(2025, 2, 28)));
    }

    #[test]
    fn end_of_month_monthly_clamps() {
        // Jan 31 + 1 month has no Feb 31; chrono clamps to the month end.
        let resolved =
            resolve_renewal_date(Some(date(2026, 1, 31)), "monthly", &CONTRACT_CYCLES);
        assert_eq!(resolved.date, Some(date(2026, 2, 28)));
    }

    #[test]
    fn resolution_is_idempotent() {
        let start = Some(date(2026, 5, 10));
        let first = resolve_renewal_date(start, "quarterly", &WORKSPACE_CYCLES);
        let second = resolve_renewal_date(start, "quarterly", &WORKSPACE_CYCLES);
        assert_eq!(first, second);
    }

    #[test]
    fn result_is_never_before_start() {
        let start = date(2026, 6, 1);
        for table in [&CONTRACT_CYCLES, &DOMAIN_CYCLES, &WORKSPACE_CYCLES] {
            for label in table.labels() {
                let resolved = resolve_renewal_date(Some(start), label, table);
                assert!(resolved.date.unwrap() >= start, "{label}");
            }
        }
    }

    #[traced_test]
    #[test]
    fn unknown_cycle_falls_back_to_one_year_and_warns() {
        let resolved =
            resolve_renewal_date(Some(date(2026, 4, 1)), "fortnightly", &CONTRACT_CYCLES);
        assert_eq!(resolved.date, Some(date(2027, 4, 1)));
        assert!(resolved.used_fallback);
        assert!(logs_contain("unknown renewal cycle"));
    }

    #[traced_test]
    #[test]
    fn stale_label_from_other_vocabulary_falls_back() {
        // "1-year" is a domain label; contracts spell it "yearly".
        let resolved =
            resolve_renewal_date(Some(date(2026, 4, 1)), "1-year", &CONTRACT_CYCLES);
        assert!(resolved.used_fallback);
        assert_eq!(resolved.date, Some(date(2027, 4, 1)));
    }
}
