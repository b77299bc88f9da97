// SPDX-FileCopyrightText: 2026 Renova Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Core-trait adapters backed by the SQLite store.

use async_trait::async_trait;
use renova_core::{ParentId, RenovaError, UniquenessProbe, UniquenessSignal};

use crate::database::Database;
use crate::queries::renewals;

/// [`UniquenessProbe`] answering from the local `renewal_records` table.
///
/// Returns the `exists` response shape; the allocator's normalizer
/// handles it like any other backend. Storage failures surface as
/// retryable probe failures, never as a valid signal.
#[derive(Clone)]
pub struct SqliteUniquenessProbe {
    db: Database,
}

impl SqliteUniquenessProbe {
    pub fn new(db: Database) -> Self {
        Self { db }
    }
}

#[async_trait]
impl UniquenessProbe for SqliteUniquenessProbe {
    async fn check_sequence(
        &self,
        parent: &ParentId,
        candidate: u32,
    ) -> Result<UniquenessSignal, RenovaError> {
        let exists = renewals::sequence_exists(&self.db, parent, candidate)
            .await
            .map_err(|e| RenovaError::ProbeFailed {
                message: "sequence lookup failed".to_string(),
                source: Some(Box::new(e)),
            })?;
        Ok(UniquenessSignal::Exists(exists))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use renova_renewal::{RenewalRecord, Vocabulary};
    use tempfile::tempdir;

    #[tokio::test]
    async fn probe_reports_taken_and_free_sequences() {
        let dir = tempdir().unwrap();
        let db_path = dir.path().join("test.db");
        let db = Database::open(db_path.to_str().unwrap()).await.unwrap();

        let parent = ParentId("amc-1".into());
        let record = RenewalRecord::new(
            parent.clone(),
            1,
            Vocabulary::Contract,
            "yearly",
            NaiveDate::from_ymd_opt(2026, 1, 1),
            5_000.0,
        )
        .unwrap();
        renewals::create_renewal(&db, &record).await.unwrap();

        let probe = SqliteUniquenessProbe::new(db.clone());
        assert_eq!(
            probe.check_sequence(&parent, 1).await.unwrap(),
            UniquenessSignal::Exists(true)
        );
        assert_eq!(
            probe.check_sequence(&parent, 2).await.unwrap(),
            UniquenessSignal::Exists(false)
        );

        db.close().await.unwrap();
    }
}
