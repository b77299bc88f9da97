// SPDX-FileCopyrightText: 2026 Renova Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `next-date` and `classify` subcommands: pure engine queries, no store.

use chrono::{NaiveDate, Utc};
use renova_core::RenovaError;
use renova_renewal::{
    DueStatus, DueStatusKind, Vocabulary, classify_with_window, resolve_renewal_date,
};

/// Resolve and print the renewal date for a start date and cycle.
pub fn next_date(start: NaiveDate, cycle: &str, vocab: Vocabulary) -> Result<(), RenovaError> {
    let resolved = resolve_renewal_date(Some(start), cycle, vocab.table());
    match resolved.date {
        Some(date) => {
            println!("{date}");
            if resolved.used_fallback {
                eprintln!(
                    "warning: `{cycle}` is not a {vocab} cycle; applied the one-year fallback"
                );
            }
            Ok(())
        }
        None => Err(RenovaError::Internal(
            "renewal date could not be computed".to_string(),
        )),
    }
}

/// Classify and print the urgency of a stored renewal date.
pub fn classify(
    target: NaiveDate,
    today: Option<NaiveDate>,
    window_days: i64,
) -> Result<(), RenovaError> {
    let today = today.unwrap_or_else(|| Utc::now().date_naive());
    let status = classify_with_window(Some(target), today, window_days);
    println!("{}", describe(&status));
    Ok(())
}

fn describe(status: &DueStatus) -> String {
    match (status.kind, status.days_remaining) {
        (DueStatusKind::PastDue, Some(days)) => format!("past-due: {days} day(s) overdue"),
        (DueStatusKind::NearDue, Some(days)) => format!("near-due: {days} day(s) remaining"),
        (DueStatusKind::Normal, Some(days)) => format!("normal: {days} day(s) remaining"),
        _ => "unknown: no renewal date".to_string(),
    }
}
