// SPDX-FileCopyrightText: 2026 Renova Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! CRUD operations for renewal lines.

use std::collections::BTreeSet;

use renova_core::{ParentId, RenovaError};
use renova_renewal::RenewalRecord;
use rusqlite::params;

use crate::database::{Database, map_tr_err};
use crate::models::RenewalRow;

const ROW_COLUMNS: &str = "parent_id, sequence, vocabulary, cycle, start_date, renewal_date, \
                           amount, paid, deleted";

fn row_from(row: &rusqlite::Row<'_>) -> Result<RenewalRow, rusqlite::Error> {
    Ok(RenewalRow {
        parent_id: row.get(0)?,
        sequence: row.get(1)?,
        vocabulary: row.get(2)?,
        cycle: row.get(3)?,
        start_date: row.get(4)?,
        renewal_date: row.get(5)?,
        amount: row.get(6)?,
        paid: row.get(7)?,
        deleted: row.get(8)?,
    })
}

/// Insert a new renewal line.
///
/// The (parent, sequence) pair is the primary key; a duplicate surfaces
/// as [`RenovaError::SequenceConflict`]. This is the server-side arbiter
/// the allocator only approximates.
pub async fn create_renewal(db: &Database, record: &RenewalRecord) -> Result<(), RenovaError> {
    let row = RenewalRow::from_record(record);
    let parent = row.parent_id.clone();
    let sequence = row.sequence;

    let inserted = db
        .connection()
        .call(move |conn| {
            let exists: bool = conn.query_row(
                "SELECT EXISTS(SELECT 1 FROM renewal_records WHERE parent_id = ?1 AND sequence = ?2)",
                params![row.parent_id, row.sequence],
                |r| r.get(0),
            )?;
            if exists {
                return Ok(false);
            }
            conn.execute(
                "INSERT INTO renewal_records \
                 (parent_id, sequence, vocabulary, cycle, start_date, renewal_date, amount, paid, deleted) \
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)",
                params![
                    row.parent_id,
                    row.sequence,
                    row.vocabulary,
                    row.cycle,
                    row.start_date,
                    row.renewal_date,
                    row.amount,
                    row.paid,
                    row.deleted,
                ],
            )?;
            Ok(true)
        })
        .await
        .map_err(map_tr_err)?;

    if !inserted {
        return Err(RenovaError::SequenceConflict {
            parent,
            candidate: sequence,
        });
    }
    Ok(())
}

/// Get one renewal line by parent and sequence.
pub async fn get_renewal(
    db: &Database,
    parent: &ParentId,
    sequence: u32,
) -> Result<Option<RenewalRecord>, RenovaError> {
    let parent = parent.0.clone();
    let row = db
        .connection()
        .call(move |conn| {
            let mut stmt = conn.prepare(&format!(
                "SELECT {ROW_COLUMNS} FROM renewal_records WHERE parent_id = ?1 AND sequence = ?2"
            ))?;
            let result = stmt.query_row(params![parent, sequence], row_from);
            match result {
                Ok(row) => Ok(Some(row)),
                Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
                Err(e) => Err(e),
            }
        })
        .await
        .map_err(map_tr_err)?;

    row.map(RenewalRow::into_record).transpose()
}

/// List a parent's renewal lines in sequence order, excluding
/// soft-deleted rows unless asked for.
pub async fn list_renewals(
    db: &Database,
    parent: &ParentId,
    include_deleted: bool,
) -> Result<Vec<RenewalRecord>, RenovaError> {
    let parent = parent.0.clone();
    let rows = db
        .connection()
        .call(move |conn| {
            let sql = if include_deleted {
                format!(
                    "SELECT {ROW_COLUMNS} FROM renewal_records WHERE parent_id = ?1 \
                     ORDER BY sequence"
                )
            } else {
                format!(
                    "SELECT {ROW_COLUMNS} FROM renewal_records WHERE parent_id = ?1 \
                     AND deleted = 0 ORDER BY sequence"
                )
            };
            let mut stmt = conn.prepare(&sql)?;
            let mapped = stmt.query_map(params![parent], row_from)?;
            let mut rows = Vec::new();
            for row in mapped {
                rows.push(row?);
            }
            Ok(rows)
        })
        .await
        .map_err(map_tr_err)?;

    rows.into_iter().map(RenewalRow::into_record).collect()
}

/// All sequences ever used under a parent, soft-deleted rows included
/// (a deleted line still occupies its ordinal).
pub async fn existing_sequences(
    db: &Database,
    parent: &ParentId,
) -> Result<BTreeSet<u32>, RenovaError> {
    let parent = parent.0.clone();
    db.connection()
        .call(move |conn| {
            let mut stmt = conn
                .prepare("SELECT sequence FROM renewal_records WHERE parent_id = ?1")?;
            let mapped = stmt.query_map(params![parent], |row| row.get(0))?;
            let mut sequences = BTreeSet::new();
            for seq in mapped {
                sequences.insert(seq?);
            }
            Ok(sequences)
        })
        .await
        .map_err(map_tr_err)
}

/// Whether a candidate sequence is already used under a parent.
pub async fn sequence_exists(
    db: &Database,
    parent: &ParentId,
    candidate: u32,
) -> Result<bool, RenovaError> {
    let parent = parent.0.clone();
    db.connection()
        .call(move |conn| {
            conn.query_row(
                "SELECT EXISTS(SELECT 1 FROM renewal_records WHERE parent_id = ?1 AND sequence = ?2)",
                params![parent, candidate],
                |row| row.get(0),
            )
        })
        .await
        .map_err(map_tr_err)
}

/// Overwrite a line's mutable fields (start date, cycle, derived renewal
/// date, amount, paid) and bump `updated_at`.
pub async fn update_renewal(db: &Database, record: &RenewalRecord) -> Result<(), RenovaError> {
    let row = RenewalRow::from_record(record);
    db.connection()
        .call(move |conn| {
            conn.execute(
                "UPDATE renewal_records SET cycle = ?3, start_date = ?4, renewal_date = ?5, \
                 amount = ?6, paid = ?7, updated_at = strftime('%Y-%m-%dT%H:%M:%fZ', 'now') \
                 WHERE parent_id = ?1 AND sequence = ?2",
                params![
                    row.parent_id,
                    row.sequence,
                    row.cycle,
                    row.start_date,
                    row.renewal_date,
                    row.amount,
                    row.paid,
                ],
            )?;
            Ok(())
        })
        .await
        .map_err(map_tr_err)
}

/// Flag a line as deleted. Rows are never physically removed.
pub async fn soft_delete_renewal(
    db: &Database,
    parent: &ParentId,
    sequence: u32,
) -> Result<(), RenovaError> {
    let parent = parent.0.clone();
    db.connection()
        .call(move |conn| {
            conn.execute(
                "UPDATE renewal_records SET deleted = 1, \
                 updated_at = strftime('%Y-%m-%dT%H:%M:%fZ', 'now') \
                 WHERE parent_id = ?1 AND sequence = ?2",
                params![parent, sequence],
            )?;
            Ok(())
        })
        .await
        .map_err(map_tr_err)
}
