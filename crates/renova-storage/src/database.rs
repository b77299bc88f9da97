// SPDX-FileCopyrightText: 2026 Renova Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Database connection management with PRAGMA setup, WAL mode, and
//! lifecycle.
//!
//! All writes are serialized through tokio-rusqlite's single background
//! thread: `Database` wraps one `tokio_rusqlite::Connection`, query
//! modules accept `&Database` and go through `connection().call()`.
//! Do NOT create additional connections for writes.

use renova_core::RenovaError;
use tracing::debug;

/// Convert a tokio-rusqlite error into `RenovaError::Storage`.
pub(crate) fn map_tr_err(e: tokio_rusqlite::Error<rusqlite::Error>) -> RenovaError {
    RenovaError::Storage {
        source: Box::new(e),
    }
}

/// Handle to the SQLite store. Cheap to clone; all clones share the one
/// background writer thread.
#[derive(Clone)]
pub struct Database {
    conn: tokio_rusqlite::Connection,
}

impl Database {
    /// Open (or create) the database at `path` with WAL mode enabled and
    /// migrations applied.
    pub async fn open(path: &str) -> Result<Self, RenovaError> {
        Self::open_with_options(path, true).await
    }

    /// Open with explicit control over WAL mode.
    pub async fn open_with_options(path: &str, wal_mode: bool) -> Result<Self, RenovaError> {
        let conn = tokio_rusqlite::Connection::open(path)
            .await
            .map_err(|e| RenovaError::Storage {
                source: Box::new(e),
            })?;

        conn.call(move |conn| {
            if wal_mode {
                let _mode: String =
                    conn.query_row("PRAGMA journal_mode=WAL", [], |row| row.get(0))?;
            }
            conn.pragma_update(None, "foreign_keys", "ON")?;
            conn.pragma_update(None, "busy_timeout", 5000)?;
            Ok(())
        })
        .await
        .map_err(map_tr_err)?;

        conn.call(|conn| crate::migrations::run_migrations(conn))
            .await
            .map_err(|e| RenovaError::Storage {
                source: Box::new(e),
            })?;

        debug!(path, wal_mode, "database opened");
        Ok(Self { conn })
    }

    /// The underlying tokio-rusqlite connection, for query modules.
    pub fn connection(&self) -> &tokio_rusqlite::Connection {
        &self.conn
    }

    /// Close the database, flushing pending writes.
    pub async fn close(self) -> Result<(), RenovaError> {
        self.conn.close().await.map_err(|e| RenovaError::Storage {
            source: Box::new(e),
        })
    }
}
