// SPDX-FileCopyrightText: 2026 Renova Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Query modules, one per table family.

pub mod reminders;
pub mod renewals;
