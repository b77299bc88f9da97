// SPDX-FileCopyrightText: 2026 Renova Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Injectable time source.

use chrono::{DateTime, NaiveDate, Utc};

/// Source of "now" for every component that reasons about time.
///
/// Production code uses [`SystemClock`]; tests inject a manual clock so
/// due-status boundaries and trigger instants are deterministic.
pub trait Clock: Send + Sync {
    /// The current instant in UTC.
    fn now(&self) -> DateTime<Utc>;

    /// Today's calendar date, derived from [`now`](Clock::now).
    fn today(&self) -> NaiveDate {
        self.now().date_naive()
    }
}

/// Wall-clock implementation backed by `chrono::Utc`.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}
