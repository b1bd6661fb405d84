// SPDX-FileCopyrightText: 2025 colmap-inject contributors
// SPDX-License-Identifier: MIT

//! Database connection management.

use std::cell::OnceCell;
use std::path::Path;

use rusqlite::{Connection, OpenFlags, Transaction};
use tracing::debug;

use crate::error::{Error, Result};
use crate::prior::PosePriorStorage;
use crate::schema::SCHEMA_SQL;

/// Database open mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OpenMode {
    /// Read-only access (for inspection)
    ReadOnly,
    /// Read-write access to an existing database
    ReadWrite,
    /// Create a new database if it doesn't exist
    Create,
}

/// SQLite connection to a COLMAP reconstruction database.
///
/// Carries the lazily resolved pose-prior storage layout as session state;
/// the layout is probed at most once and never re-evaluated for the
/// lifetime of the connection. Callers are responsible for serializing
/// access to one database file.
pub struct ColmapDb {
    pub(crate) conn: Connection,
    pub(crate) prior_storage: OnceCell<PosePriorStorage>,
}

impl ColmapDb {
    /// Open a database at a custom path.
    pub fn open<P: AsRef<Path>>(path: P, mode: OpenMode) -> Result<Self> {
        let path = path.as_ref();
        let flags = match mode {
            OpenMode::ReadOnly => {
                if !path.exists() {
                    return Err(Error::DatabaseNotFound(path.to_owned()));
                }
                OpenFlags::SQLITE_OPEN_READ_ONLY
            }
            OpenMode::ReadWrite => {
                if !path.exists() {
                    return Err(Error::DatabaseNotFound(path.to_owned()));
                }
                OpenFlags::SQLITE_OPEN_READ_WRITE
            }
            OpenMode::Create => OpenFlags::SQLITE_OPEN_READ_WRITE | OpenFlags::SQLITE_OPEN_CREATE,
        };

        let conn = Connection::open_with_flags(path, flags).map_err(|e| Error::DatabaseOpen {
            path: path.to_owned(),
            source: e,
        })?;
        let db = Self::from_connection(conn);

        if mode == OpenMode::Create {
            db.configure_pragmas()?;
        }

        debug!("Opened database at {} ({:?})", path.display(), mode);
        Ok(db)
    }

    /// Create an in-memory database (for testing).
    ///
    /// The database is initialized with the full schema.
    pub fn open_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        let db = Self::from_connection(conn);
        db.configure_pragmas()?;
        db.create_schema()?;
        debug!("Created in-memory database");
        Ok(db)
    }

    fn from_connection(conn: Connection) -> Self {
        Self {
            conn,
            prior_storage: OnceCell::new(),
        }
    }

    /// Configure SQLite pragmas for batch-write performance.
    ///
    /// Foreign key enforcement stays off: calibration rows are injected
    /// before their referents exist, as upstream tooling does.
    fn configure_pragmas(&self) -> Result<()> {
        self.conn.execute_batch(
            r#"
            PRAGMA foreign_keys = OFF;
            PRAGMA synchronous = NORMAL;
            PRAGMA temp_store = MEMORY;
            "#,
        )?;
        Ok(())
    }

    /// Create the database schema (idempotent).
    pub fn create_schema(&self) -> Result<()> {
        self.conn.execute_batch(SCHEMA_SQL)?;
        debug!("Created database schema");
        Ok(())
    }

    /// Begin a deferred transaction covering one ingestion pass.
    ///
    /// All writes issued through this connection while the transaction is
    /// live are released together by a single commit; dropping it
    /// uncommitted discards the pass.
    pub fn transaction(&self) -> Result<Transaction<'_>> {
        Ok(self.conn.unchecked_transaction()?)
    }

    /// Get raw connection (for advanced usage).
    pub fn connection(&self) -> &Connection {
        &self.conn
    }

    /// Get mutable raw connection.
    pub fn connection_mut(&mut self) -> &mut Connection {
        &mut self.conn
    }

    /// Check if the database has the expected schema tables.
    pub fn has_schema(&self) -> Result<bool> {
        let count: i32 = self.conn.query_row(
            "SELECT COUNT(*) FROM sqlite_master WHERE type='table' AND name='cameras'",
            [],
            |row| row.get(0),
        )?;
        Ok(count > 0)
    }
}
