// SPDX-FileCopyrightText: 2026 Renova Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Manually-controlled clock for deterministic time-based tests.

use std::sync::Mutex;

use chrono::{DateTime, Duration, Utc};
use renova_core::Clock;

/// A [`Clock`] that only moves when the test says so.
pub struct ManualClock {
    now: Mutex<DateTime<Utc>>,
}

impl ManualClock {
    /// Clock frozen at the given instant.
    pub fn at(now: DateTime<Utc>) -> Self {
        Self { now: Mutex::new(now) }
    }

    /// Clock frozen at an RFC 3339 instant. Panics on a malformed literal.
    pub fn at_rfc3339(s: &str) -> Self {
        let now = DateTime::parse_from_rfc3339(s)
            .expect("valid RFC 3339 literal")
            .with_timezone(&Utc);
        Self::at(now)
    }

    /// Move the clock forward.
    pub fn advance(&self, delta: Duration) {
        let mut now = self.now.lock().unwrap();
        *now += delta;
    }

    /// Move the clock forward by whole days.
    pub fn advance_days(&self, days: i64) {
        self.advance(Duration::days(days));
    }

    /// Jump the clock to an absolute instant.
    pub fn set(&self, instant: DateTime<Utc>) {
        *self.now.lock().unwrap() = instant;
    }
}

impl Clock for ManualClock {
    fn now(&self) -> DateTime<Utc> {
        *self.now.lock().unwrap()
    }
}
