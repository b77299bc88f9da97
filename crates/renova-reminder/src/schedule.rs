// SPDX-FileCopyrightText: 2026 Renova Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Reminder schedule model and creation-time validation.
//!
//! A one-shot schedule structurally carries no recurrence parameters:
//! `Recurrence` is a tagged union, so interval and repeat limit cannot
//! linger on a schedule that was switched back to one-shot. The wire
//! payload flattens this back to the backend's field layout, with `0` as
//! the documented "unlimited"/"not recurring" sentinel.

use chrono::{DateTime, Utc};
use renova_core::{BusinessRef, RenovaError};
use serde::Serialize;
use tracing::debug;

/// Upper bound on reminder message length, in characters.
pub const MAX_MESSAGE_LEN: usize = 500;

/// How many times a recurring schedule may fire.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RepeatLimit {
    /// Fires until explicitly stopped.
    Unlimited,
    /// Fires exactly this many times, then completes.
    Count(u32),
}

impl RepeatLimit {
    /// Whether another occurrence remains after `fired` firings.
    pub fn allows(&self, fired: u32) -> bool {
        match self {
            RepeatLimit::Unlimited => true,
            RepeatLimit::Count(n) => fired < *n,
        }
    }

    /// Wire encoding: `0` means unlimited.
    pub fn as_wire(&self) -> u32 {
        match self {
            RepeatLimit::Unlimited => 0,
            RepeatLimit::Count(n) => *n,
        }
    }

    /// Decode the wire sentinel.
    pub fn from_wire(value: u32) -> Self {
        if value == 0 {
            RepeatLimit::Unlimited
        } else {
            RepeatLimit::Count(value)
        }
    }
}

/// Recurrence behavior of a schedule.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Recurrence {
    /// Fires once at the first trigger time.
    OneShot,
    /// Fires every `interval_days` days, bounded by `limit`.
    Recurring {
        interval_days: u32,
        limit: RepeatLimit,
    },
}

/// Raw form input for creating or editing a reminder.
///
/// Carries the backend's flat field layout; [`ReminderSchedule::create`]
/// validates it and folds the recurrence fields into [`Recurrence`].
#[derive(Debug, Clone)]
pub struct ReminderDraft {
    pub message: String,
    pub first_trigger: DateTime<Utc>,
    pub is_recurring: bool,
    pub interval_days: u32,
    pub repeat_limit: RepeatLimit,
    pub link: Option<BusinessRef>,
    pub assignee: Option<String>,
}

/// A validated reminder schedule.
#[derive(Debug, Clone, PartialEq)]
pub struct ReminderSchedule {
    pub id: String,
    pub message: String,
    pub first_trigger: DateTime<Utc>,
    recurrence: Recurrence,
    occurrences_fired: u32,
    sent: bool,
    pub link: Option<BusinessRef>,
    pub assignee: Option<String>,
}

impl ReminderSchedule {
    /// Validate a draft and build the schedule.
    ///
    /// Rejects locally, before any network call: an empty or over-long
    /// message, a first trigger in the past, a zero interval or zero
    /// repeat count on a recurring draft. A non-recurring draft's
    /// interval and limit are ignored entirely.
    pub fn create(draft: ReminderDraft, now: DateTime<Utc>) -> Result<Self, RenovaError> {
        let message = draft.message.trim().to_string();
        if message.is_empty() {
            return Err(RenovaError::Validation {
                field: "message",
                message: "reminder message must not be empty".to_string(),
            });
        }
        if message.chars().count() > MAX_MESSAGE_LEN {
            return Err(RenovaError::Validation {
                field: "message",
                message: format!("reminder message exceeds {MAX_MESSAGE_LEN} characters"),
            });
        }
        if draft.first_trigger < now {
            return Err(RenovaError::Validation {
                field: "first_trigger",
                message: "trigger time must not be in the past".to_string(),
            });
        }

        let recurrence = Self::fold_recurrence(
            draft.is_recurring,
            draft.interval_days,
            draft.repeat_limit,
        )?;

        Ok(Self {
            id: uuid::Uuid::new_v4().to_string(),
            message,
            first_trigger: draft.first_trigger,
            recurrence,
            occurrences_fired: 0,
            sent: false,
            link: draft.link,
            assignee: draft.assignee,
        })
    }

    /// Rebuild a schedule from stored fields (wire sentinels decoded).
    #[allow(clippy::too_many_arguments)]
    pub fn from_stored(
        id: String,
        message: String,
        first_trigger: DateTime<Utc>,
        is_recurring: bool,
        interval_days: u32,
        repeat_limit_wire: u32,
        occurrences_fired: u32,
        sent: bool,
        link: Option<BusinessRef>,
        assignee: Option<String>,
    ) -> Result<Self, RenovaError> {
        let recurrence = Self::fold_recurrence(
            is_recurring,
            interval_days,
            RepeatLimit::from_wire(repeat_limit_wire),
        )?;
        Ok(Self {
            id,
            message,
            first_trigger,
            recurrence,
            occurrences_fired,
            sent,
            link,
            assignee,
        })
    }

    fn fold_recurrence(
        is_recurring: bool,
        interval_days: u32,
        limit: RepeatLimit,
    ) -> Result<Recurrence, RenovaError> {
        if !is_recurring {
            return Ok(Recurrence::OneShot);
        }
        if interval_days == 0 {
            return Err(RenovaError::Validation {
                field: "interval_days",
                message: "recurring reminders need an interval of at least one day".to_string(),
            });
        }
        if let RepeatLimit::Count(0) = limit {
            return Err(RenovaError::Validation {
                field: "repeat_limit",
                message: "repeat limit must be at least 1, or unlimited".to_string(),
            });
        }
        Ok(Recurrence::Recurring {
            interval_days,
            limit,
        })
    }

    pub fn recurrence(&self) -> Recurrence {
        self.recurrence
    }

    /// Replace the recurrence behavior (edit flow), with the same
    /// validation as creation.
    pub fn set_recurrence(
        &mut self,
        is_recurring: bool,
        interval_days: u32,
        limit: RepeatLimit,
    ) -> Result<(), RenovaError> {
        self.recurrence = Self::fold_recurrence(is_recurring, interval_days, limit)?;
        debug!(id = %self.id, recurrence = ?self.recurrence, "reminder recurrence updated");
        Ok(())
    }

    pub fn occurrences_fired(&self) -> u32 {
        self.occurrences_fired
    }

    /// Whether the current occurrence has already fired.
    pub fn sent(&self) -> bool {
        self.sent
    }

    /// The flat submission representation the backend expects.
    ///
    /// A one-shot schedule always submits `interval_days = 0` and
    /// `repeat_limit = 0`; switching a schedule from recurring back to
    /// one-shot therefore cannot leave orphaned recurrence parameters in
    /// the persisted row.
    pub fn payload(&self) -> ReminderPayload {
        let (is_recurring, interval_days, repeat_limit) = match self.recurrence {
            Recurrence::OneShot => (false, 0, 0),
            Recurrence::Recurring {
                interval_days,
                limit,
            } => (true, interval_days, limit.as_wire()),
        };
        ReminderPayload {
            id: self.id.clone(),
            message: self.message.clone(),
            first_trigger: self.first_trigger,
            is_recurring,
            interval_days,
            repeat_limit,
            link: self.link.clone(),
            assignee: self.assignee.clone(),
        }
    }

    pub(crate) fn advance_fired(&mut self) {
        self.occurrences_fired += 1;
    }

    pub(crate) fn set_sent(&mut self, sent: bool) {
        self.sent = sent;
    }
}

/// Flat create/update payload for the persistence API.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReminderPayload {
    pub id: String,
    pub message: String,
    pub first_trigger: DateTime<Utc>,
    pub is_recurring: bool,
    /// Days between occurrences; `0` on one-shot schedules.
    pub interval_days: u32,
    /// Maximum firings; `0` means unlimited (or not recurring).
    pub repeat_limit: u32,
    #[serde(flatten)]
    pub link: Option<BusinessRef>,
    pub assignee: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn instant(s: &str) -> DateTime<Utc> {
        DateTime::parse_from_rfc3339(s).unwrap().with_timezone(&Utc)
    }

    fn draft() -> ReminderDraft {
        ReminderDraft {
            message: "Renew the office AMC".to_string(),
            first_trigger: instant("2026-09-01T09:00:00Z"),
            is_recurring: false,
            interval_days: 0,
            repeat_limit: RepeatLimit::Unlimited,
            link: None,
            assignee: None,
        }
    }

    const NOW: &str = "2026-08-06T12:00:00Z";

    #[test]
    fn valid_one_shot_draft_creates() {
        let schedule = ReminderSchedule::create(draft(), instant(NOW)).unwrap();
        assert_eq!(schedule.recurrence(), Recurrence::OneShot);
        assert_eq!(schedule.occurrences_fired(), 0);
        assert!(!schedule.sent());
        assert!(!schedule.id.is_empty());
    }

    #[test]
    fn empty_message_is_rejected() {
        let mut d = draft();
        d.message = "   ".to_string();
        let err = ReminderSchedule::create(d, instant(NOW)).unwrap_err();
        assert!(matches!(err, RenovaError::Validation { field: "message", .. }));
    }

    #[test]
    fn over_long_message_is_rejected() {
        let mut d = draft();
        d.message = "x".repeat(MAX_MESSAGE_LEN + 1);
        let err = ReminderSchedule::create(d, instant(NOW)).unwrap_err();
        assert!(matches!(err, RenovaError::Validation { field: "message", .. }));
    }

    #[test]
    fn past_trigger_time_is_rejected() {
        let mut d = draft();
        d.first_trigger = instant("2026-08-01T09:00:00Z");
        let err = ReminderSchedule::create(d, instant(NOW)).unwrap_err();
        assert!(matches!(
            err,
            RenovaError::Validation { field: "first_trigger", .. }
        ));
    }

    #[test]
    fn recurring_needs_positive_interval() {
        let mut d = draft();
        d.is_recurring = true;
        d.interval_days = 0;
        d.repeat_limit = RepeatLimit::Count(3);
        let err = ReminderSchedule::create(d, instant(NOW)).unwrap_err();
        assert!(matches!(
            err,
            RenovaError::Validation { field: "interval_days", .. }
        ));
    }

    #[test]
    fn recurring_rejects_zero_count_limit() {
        let mut d = draft();
        d.is_recurring = true;
        d.interval_days = 7;
        d.repeat_limit = RepeatLimit::Count(0);
        let err = ReminderSchedule::create(d, instant(NOW)).unwrap_err();
        assert!(matches!(
            err,
            RenovaError::Validation { field: "repeat_limit", .. }
        ));
    }

    #[test]
    fn one_shot_ignores_stray_recurrence_fields() {
        let mut d = draft();
        d.is_recurring = false;
        d.interval_days = 14;
        d.repeat_limit = RepeatLimit::Count(5);
        let schedule = ReminderSchedule::create(d, instant(NOW)).unwrap();
        assert_eq!(schedule.recurrence(), Recurrence::OneShot);
    }

    #[test]
    fn payload_zeroes_recurrence_for_one_shot() {
        let mut d = draft();
        d.is_recurring = true;
        d.interval_days = 7;
        d.repeat_limit = RepeatLimit::Count(3);
        let mut schedule = ReminderSchedule::create(d, instant(NOW)).unwrap();

        // Toggle back to one-shot in the edit flow.
        schedule
            .set_recurrence(false, 7, RepeatLimit::Count(3))
            .unwrap();

        let payload = schedule.payload();
        assert!(!payload.is_recurring);
        assert_eq!(payload.interval_days, 0);
        assert_eq!(payload.repeat_limit, 0);
    }

    #[test]
    fn payload_encodes_unlimited_as_zero() {
        let mut d = draft();
        d.is_recurring = true;
        d.interval_days = 30;
        d.repeat_limit = RepeatLimit::Unlimited;
        let schedule = ReminderSchedule::create(d, instant(NOW)).unwrap();

        let payload = schedule.payload();
        assert!(payload.is_recurring);
        assert_eq!(payload.interval_days, 30);
        assert_eq!(payload.repeat_limit, 0);
    }

    #[test]
    fn repeat_limit_wire_roundtrip() {
        assert_eq!(RepeatLimit::from_wire(0), RepeatLimit::Unlimited);
        assert_eq!(RepeatLimit::from_wire(4), RepeatLimit::Count(4));
        assert_eq!(RepeatLimit::Count(4).as_wire(), 4);
        assert_eq!(RepeatLimit::Unlimited.as_wire(), 0);
    }

    #[test]
    fn payload_serializes_link_fields_flat() {
        use renova_core::{BusinessModule, BusinessRef};

        let mut d = draft();
        d.link = Some(BusinessRef {
            module: BusinessModule::Amc,
            reference_id: "amc-7".to_string(),
        });
        let schedule = ReminderSchedule::create(d, instant(NOW)).unwrap();
        let json = serde_json::to_value(schedule.payload()).unwrap();
        assert_eq!(json["module"], "amc");
        assert_eq!(json["reference_id"], "amc-7");
        assert_eq!(json["repeat_limit"], 0);
        assert_eq!(json["is_recurring"], false);
    }

    #[test]
    fn message_is_trimmed_on_create() {
        let mut d = draft();
        d.message = "  follow up on proposal  ".to_string();
        let schedule = ReminderSchedule::create(d, instant(NOW)).unwrap();
        assert_eq!(schedule.message, "follow up on proposal");
    }
}
