// SPDX-FileCopyrightText: 2026 Renova Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `due` subcommand: read-only dispatcher scan over the local store.

use chrono::{DateTime, Utc};
use renova_config::RenovaConfig;
use renova_core::{Clock, RenovaError, SystemClock};
use renova_reminder::ReminderSchedule;
use renova_storage::{Database, queries::reminders};

/// List schedules whose current occurrence is overdue.
pub async fn due(config: &RenovaConfig) -> Result<(), RenovaError> {
    let db = Database::open_with_options(
        &config.storage.database_path,
        config.storage.wal_mode,
    )
    .await?;

    let now = SystemClock.now();
    let overdue = reminders::list_due(&db, now).await?;

    if overdue.is_empty() {
        println!("no overdue reminders");
    } else {
        for schedule in &overdue {
            println!("{}", describe(schedule, now));
        }
    }

    db.close().await
}

fn describe(schedule: &ReminderSchedule, now: DateTime<Utc>) -> String {
    let trigger = schedule
        .next_trigger_time()
        .map(|t| t.to_rfc3339())
        .unwrap_or_else(|| "-".to_string());
    let overdue_hours = schedule
        .next_trigger_time()
        .map(|t| (now - t).num_hours())
        .unwrap_or(0);
    format!(
        "{}  due {}  ({}h overdue)  {}",
        schedule.id, trigger, overdue_hours, schedule.message
    )
}
