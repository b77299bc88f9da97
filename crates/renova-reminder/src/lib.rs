// SPDX-FileCopyrightText: 2026 Renova Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Reminder schedules: one-shot or repeating triggers described by a
//! first trigger instant, an interval in days, and a repeat bound.
//!
//! The engine derives future trigger instants and answers pending /
//! overdue / completed questions; the firing transition itself is driven
//! by an external dispatcher that scans for due schedules.

pub mod engine;
pub mod schedule;

pub use engine::ScheduleState;
pub use schedule::{
    MAX_MESSAGE_LEN, Recurrence, ReminderDraft, ReminderPayload, ReminderSchedule, RepeatLimit,
};
