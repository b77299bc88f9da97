// SPDX-FileCopyrightText: 2026 Renova Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! SQLite persistence for renewal records and reminder schedules.
//!
//! The engine crates never depend on this one; persistence stays behind
//! the core traits and these query modules. A single tokio-rusqlite
//! connection serializes all writes, and refinery applies embedded SQL
//! migrations on open.

pub mod adapter;
pub mod database;
pub mod migrations;
pub mod models;
pub mod queries;

pub use adapter::SqliteUniquenessProbe;
pub use database::Database;
