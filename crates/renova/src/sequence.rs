// SPDX-FileCopyrightText: 2026 Renova Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `suggest` subcommand: next free sequence for a parent, from the store.

use renova_config::RenovaConfig;
use renova_core::{ParentId, RenovaError};
use renova_sequence::suggest_next;
use renova_storage::{Database, queries::renewals};

/// Print the suggested next sequence for `parent`.
pub async fn suggest(config: &RenovaConfig, parent: &str) -> Result<(), RenovaError> {
    let db = Database::open_with_options(
        &config.storage.database_path,
        config.storage.wal_mode,
    )
    .await?;

    let parent = ParentId(parent.to_string());
    let existing = renewals::existing_sequences(&db, &parent).await?;
    let suggestion = suggest_next(&existing);

    if existing.is_empty() {
        println!("{suggestion} (no existing lines under {parent})");
    } else {
        println!("{suggestion}");
    }

    db.close().await
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use renova_renewal::{RenewalRecord, Vocabulary};
    use tempfile::tempdir;

    #[tokio::test]
    async fn suggestion_follows_stored_sequences() {
        let dir = tempdir().unwrap();
        let db_path = dir.path().join("test.db");
        let db = Database::open(db_path.to_str().unwrap()).await.unwrap();

        let parent = ParentId("amc-1".into());
        for seq in [1, 4] {
            let record = RenewalRecord::new(
                parent.clone(),
                seq,
                Vocabulary::Contract,
                "yearly",
                NaiveDate::from_ymd_opt(2026, 1, 1),
                1_000.0,
            )
            .unwrap();
            renewals::create_renewal(&db, &record).await.unwrap();
        }

        let existing = renewals::existing_sequences(&db, &parent).await.unwrap();
        assert_eq!(suggest_next(&existing), 5);
        db.close().await.unwrap();
    }
}
