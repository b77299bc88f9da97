// SPDX-FileCopyrightText: 2026 Renova Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Row representations and conversions to the domain types.
//!
//! Dates are stored as ISO-8601 TEXT: `YYYY-MM-DD` for day-granularity
//! renewal dates, full instants for reminder triggers. The stored
//! renewal date is written for reporting queries but re-derived from
//! start date + cycle when a row is loaded, so it can never drift.

use std::str::FromStr;

use chrono::{DateTime, NaiveDate, SecondsFormat, Utc};
use renova_core::{BusinessModule, BusinessRef, ParentId, RenovaError};
use renova_renewal::{RenewalRecord, Vocabulary};
use renova_reminder::ReminderSchedule;

const DATE_FORMAT: &str = "%Y-%m-%d";

pub(crate) fn format_date(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}

pub(crate) fn parse_date(s: &str) -> Result<NaiveDate, RenovaError> {
    NaiveDate::parse_from_str(s, DATE_FORMAT).map_err(|e| RenovaError::Storage {
        source: Box::new(e),
    })
}

pub(crate) fn format_instant(instant: DateTime<Utc>) -> String {
    instant.to_rfc3339_opts(SecondsFormat::Millis, true)
}

pub(crate) fn parse_instant(s: &str) -> Result<DateTime<Utc>, RenovaError> {
    DateTime::parse_from_rfc3339(s)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| RenovaError::Storage {
            source: Box::new(e),
        })
}

/// A `renewal_records` row.
#[derive(Debug, Clone)]
pub struct RenewalRow {
    pub parent_id: String,
    pub sequence: u32,
    pub vocabulary: String,
    pub cycle: String,
    pub start_date: Option<String>,
    pub renewal_date: Option<String>,
    pub amount: f64,
    pub paid: bool,
    pub deleted: bool,
}

impl RenewalRow {
    pub fn from_record(record: &RenewalRecord) -> Self {
        Self {
            parent_id: record.parent.0.clone(),
            sequence: record.sequence,
            vocabulary: record.vocabulary().to_string(),
            cycle: record.cycle().to_string(),
            start_date: record.start_date().map(format_date),
            renewal_date: record.renewal_date().map(format_date),
            amount: record.amount,
            paid: record.paid,
            deleted: record.is_deleted(),
        }
    }

    pub fn into_record(self) -> Result<RenewalRecord, RenovaError> {
        let vocabulary =
            Vocabulary::from_str(&self.vocabulary).map_err(|e| RenovaError::Storage {
                source: Box::new(e),
            })?;
        let start_date = self.start_date.as_deref().map(parse_date).transpose()?;
        RenewalRecord::from_stored(
            ParentId(self.parent_id),
            self.sequence,
            vocabulary,
            self.cycle,
            start_date,
            self.amount,
            self.paid,
            self.deleted,
        )
    }
}

/// A `reminder_schedules` row.
#[derive(Debug, Clone)]
pub struct ReminderRow {
    pub id: String,
    pub message: String,
    pub first_trigger: String,
    pub is_recurring: bool,
    pub interval_days: u32,
    pub repeat_limit: u32,
    pub occurrences_fired: u32,
    pub sent: bool,
    pub module: Option<String>,
    pub reference_id: Option<String>,
    pub assignee: Option<String>,
}

impl ReminderRow {
    pub fn from_schedule(schedule: &ReminderSchedule) -> Self {
        let payload = schedule.payload();
        Self {
            id: payload.id,
            message: payload.message,
            first_trigger: format_instant(payload.first_trigger),
            is_recurring: payload.is_recurring,
            interval_days: payload.interval_days,
            repeat_limit: payload.repeat_limit,
            occurrences_fired: schedule.occurrences_fired(),
            sent: schedule.sent(),
            module: payload.link.as_ref().map(|l| l.module.to_string()),
            reference_id: payload.link.map(|l| l.reference_id),
            assignee: payload.assignee,
        }
    }

    pub fn into_schedule(self) -> Result<ReminderSchedule, RenovaError> {
        let link = match (self.module, self.reference_id) {
            (Some(module), Some(reference_id)) => Some(BusinessRef {
                module: BusinessModule::from_str(&module).map_err(|e| RenovaError::Storage {
                    source: Box::new(e),
                })?,
                reference_id,
            }),
            _ => None,
        };
        ReminderSchedule::from_stored(
            self.id,
            self.message,
            parse_instant(&self.first_trigger)?,
            self.is_recurring,
            self.interval_days,
            self.repeat_limit,
            self.occurrences_fired,
            self.sent,
            link,
            self.assignee,
        )
    }
}
