// SPDX-FileCopyrightText: 2026 Renova Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Recurrence engine: trigger derivation, overdue detection, and the
//! firing transition applied by the external dispatcher.

use chrono::{DateTime, Duration, NaiveDate, Utc};
use renova_renewal::{DueStatus, classify};
use strum::Display;
use tracing::info;

use crate::schedule::{Recurrence, ReminderSchedule};

/// Lifecycle state of a schedule, derived from its counters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
#[strum(serialize_all = "kebab-case")]
pub enum ScheduleState {
    /// At least one occurrence is still ahead.
    Pending,
    /// One-shot schedules that fired, or recurring schedules that
    /// exhausted their repeat limit. Terminal.
    Completed,
}

impl ReminderSchedule {
    /// The instant the next occurrence is due, or `None` once the
    /// schedule is exhausted.
    pub fn next_trigger_time(&self) -> Option<DateTime<Utc>> {
        match self.recurrence() {
            Recurrence::OneShot => (!self.sent()).then_some(self.first_trigger),
            Recurrence::Recurring {
                interval_days,
                limit,
            } => {
                let fired = self.occurrences_fired();
                limit.allows(fired).then(|| {
                    self.first_trigger
                        + Duration::days(i64::from(fired) * i64::from(interval_days))
                })
            }
        }
    }

    /// Derived lifecycle state.
    pub fn state(&self) -> ScheduleState {
        if self.next_trigger_time().is_some() {
            ScheduleState::Pending
        } else {
            ScheduleState::Completed
        }
    }

    /// True iff the current occurrence has not fired and its trigger
    /// instant is already behind `now`.
    pub fn is_overdue(&self, now: DateTime<Utc>) -> bool {
        !self.sent()
            && self
                .next_trigger_time()
                .is_some_and(|trigger| trigger < now)
    }

    /// All future trigger instants, in order.
    ///
    /// Unlimited recurring schedules yield an endless sequence; callers
    /// bound it with `take`.
    pub fn trigger_times(&self) -> Box<dyn Iterator<Item = DateTime<Utc>> + '_> {
        match self.recurrence() {
            Recurrence::OneShot => {
                let next = (!self.sent()).then_some(self.first_trigger);
                Box::new(next.into_iter())
            }
            Recurrence::Recurring {
                interval_days,
                limit,
            } => {
                let first = self.first_trigger;
                Box::new(
                    (self.occurrences_fired()..)
                        .take_while(move |i| limit.allows(*i))
                        .map(move |i| {
                            first + Duration::days(i64::from(i) * i64::from(interval_days))
                        }),
                )
            }
        }
    }

    /// Day-granularity urgency of the next occurrence, through the same
    /// classifier renewal records use. An exhausted schedule classifies
    /// as unknown.
    pub fn due_status(&self, today: NaiveDate) -> DueStatus {
        classify(self.next_trigger_time().map(|t| t.date_naive()), today)
    }

    /// Apply the firing transition.
    ///
    /// The dispatcher calls this when an occurrence fires: the firing
    /// count advances and `sent` flips on; if another occurrence remains
    /// the schedule returns to `Pending` with `sent` cleared for the new
    /// target instant, otherwise it completes.
    pub fn fire(&mut self) -> ScheduleState {
        self.advance_fired();
        self.set_sent(true);

        let state = if self.next_trigger_time().is_some() {
            self.set_sent(false);
            ScheduleState::Pending
        } else {
            ScheduleState::Completed
        };

        info!(
            id = %self.id,
            occurrences_fired = self.occurrences_fired(),
            state = %state,
            "reminder fired"
        );
        state
    }
}
