// SPDX-FileCopyrightText: 2026 Renova Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Due-status classification shared by every renewal domain.
//!
//! Contract, domain, and workspace renewals and reminder overdue checks
//! all classify through this one function, so the near-due threshold
//! cannot drift between call sites.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

/// Days before the target date at which a record counts as near-due.
pub const NEAR_DUE_WINDOW_DAYS: i64 = 30;

/// Urgency classification of a target date relative to today.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Display, EnumString, Serialize, Deserialize,
)]
#[strum(serialize_all = "kebab-case")]
#[serde(rename_all = "kebab-case")]
pub enum DueStatusKind {
    PastDue,
    NearDue,
    Normal,
    /// No target date stored on the record.
    Unknown,
}

/// Derived urgency of a stored renewal or trigger date. Never persisted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DueStatus {
    pub kind: DueStatusKind,
    /// Days until the target, or days overdue when past due. `None` when
    /// there is no target date.
    pub days_remaining: Option<i64>,
    pub is_past_due: bool,
}

/// Classify a target date against today with the default 30-day window.
pub fn classify(target: Option<NaiveDate>, today: NaiveDate) -> DueStatus {
    classify_with_window(target, today, NEAR_DUE_WINDOW_DAYS)
}

/// Classify with an explicit near-due window (day granularity).
pub fn classify_with_window(
    target: Option<NaiveDate>,
    today: NaiveDate,
    window_days: i64,
) -> DueStatus {
    let Some(target) = target else {
        return DueStatus {
            kind: DueStatusKind::Unknown,
            days_remaining: None,
            is_past_due: false,
        };
    };

    let days = (target - today).num_days();
    if days < 0 {
        DueStatus {
            kind: DueStatusKind::PastDue,
            days_remaining: Some(-days),
            is_past_due: true,
        }
    } else if days <= window_days {
        DueStatus {
            kind: DueStatusKind::NearDue,
            days_remaining: Some(days),
            is_past_due: false,
        }
    } else {
        DueStatus {
            kind: DueStatusKind::Normal,
            days_remaining: Some(days),
            is_past_due: false,
        }
    }
}
