// SPDX-FileCopyrightText: 2026 Renova Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! CRUD and dispatcher queries for reminder schedules.

use chrono::{DateTime, Utc};
use renova_core::RenovaError;
use renova_reminder::ReminderSchedule;
use rusqlite::params;

use crate::database::{Database, map_tr_err};
use crate::models::ReminderRow;

const ROW_COLUMNS: &str = "id, message, first_trigger, is_recurring, interval_days, \
                           repeat_limit, occurrences_fired, sent, module, reference_id, assignee";

fn row_from(row: &rusqlite::Row<'_>) -> Result<ReminderRow, rusqlite::Error> {
    Ok(ReminderRow {
        id: row.get(0)?,
        message: row.get(1)?,
        first_trigger: row.get(2)?,
        is_recurring: row.get(3)?,
        interval_days: row.get(4)?,
        repeat_limit: row.get(5)?,
        occurrences_fired: row.get(6)?,
        sent: row.get(7)?,
        module: row.get(8)?,
        reference_id: row.get(9)?,
        assignee: row.get(10)?,
    })
}

/// Insert a new reminder schedule.
pub async fn create_reminder(
    db: &Database,
    schedule: &ReminderSchedule,
) -> Result<(), RenovaError> {
    let row = ReminderRow::from_schedule(schedule);
    db.connection()
        .call(move |conn| {
            conn.execute(
                "INSERT INTO reminder_schedules \
                 (id, message, first_trigger, is_recurring, interval_days, repeat_limit, \
                  occurrences_fired, sent, module, reference_id, assignee) \
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11)",
                params![
                    row.id,
                    row.message,
                    row.first_trigger,
                    row.is_recurring,
                    row.interval_days,
                    row.repeat_limit,
                    row.occurrences_fired,
                    row.sent,
                    row.module,
                    row.reference_id,
                    row.assignee,
                ],
            )?;
            Ok(())
        })
        .await
        .map_err(map_tr_err)
}

/// Get a schedule by id.
pub async fn get_reminder(
    db: &Database,
    id: &str,
) -> Result<Option<ReminderSchedule>, RenovaError> {
    let id = id.to_string();
    let row = db
        .connection()
        .call(move |conn| {
            let mut stmt = conn.prepare(&format!(
                "SELECT {ROW_COLUMNS} FROM reminder_schedules WHERE id = ?1"
            ))?;
            let result = stmt.query_row(params![id], row_from);
            match result {
                Ok(row) => Ok(Some(row)),
                Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
                Err(e) => Err(e),
            }
        })
        .await
        .map_err(map_tr_err)?;

    row.map(ReminderRow::into_schedule).transpose()
}

/// All schedules, ordered by first trigger.
pub async fn list_reminders(db: &Database) -> Result<Vec<ReminderSchedule>, RenovaError> {
    let rows = db
        .connection()
        .call(move |conn| {
            let mut stmt = conn.prepare(&format!(
                "SELECT {ROW_COLUMNS} FROM reminder_schedules ORDER BY first_trigger"
            ))?;
            let mapped = stmt.query_map([], row_from)?;
            let mut rows = Vec::new();
            for row in mapped {
                rows.push(row?);
            }
            Ok(rows)
        })
        .await
        .map_err(map_tr_err)?;

    rows.into_iter().map(ReminderRow::into_schedule).collect()
}

/// Schedules whose current occurrence is overdue at `now`.
///
/// This is the dispatcher's scan: unsent schedules with a pending
/// trigger instant behind `now`. The trigger arithmetic lives in the
/// engine, so the scan loads candidates and filters in memory.
pub async fn list_due(
    db: &Database,
    now: DateTime<Utc>,
) -> Result<Vec<ReminderSchedule>, RenovaError> {
    let all = list_reminders(db).await?;
    Ok(all
        .into_iter()
        .filter(|schedule| schedule.is_overdue(now))
        .collect())
}

/// Persist a schedule's post-firing counters (`occurrences_fired`, `sent`).
pub async fn record_firing(
    db: &Database,
    schedule: &ReminderSchedule,
) -> Result<(), RenovaError> {
    let id = schedule.id.clone();
    let occurrences_fired = schedule.occurrences_fired();
    let sent = schedule.sent();
    db.connection()
        .call(move |conn| {
            conn.execute(
                "UPDATE reminder_schedules SET occurrences_fired = ?2, sent = ?3 WHERE id = ?1",
                params![id, occurrences_fired, sent],
            )?;
            Ok(())
        })
        .await
        .map_err(map_tr_err)
}

/// Overwrite an edited schedule's descriptor fields.
///
/// Writes go through the flat payload, so a schedule switched from
/// recurring to one-shot persists zeroed recurrence columns.
pub async fn update_reminder(
    db: &Database,
    schedule: &ReminderSchedule,
) -> Result<(), RenovaError> {
    let row = ReminderRow::from_schedule(schedule);
    db.connection()
        .call(move |conn| {
            conn.execute(
                "UPDATE reminder_schedules SET message = ?2, first_trigger = ?3, \
                 is_recurring = ?4, interval_days = ?5, repeat_limit = ?6, \
                 module = ?7, reference_id = ?8, assignee = ?9 \
                 WHERE id = ?1",
                params![
                    row.id,
                    row.message,
                    row.first_trigger,
                    row.is_recurring,
                    row.interval_days,
                    row.repeat_limit,
                    row.module,
                    row.reference_id,
                    row.assignee,
                ],
            )?;
            Ok(())
        })
        .await
        .map_err(map_tr_err)
}
