//! SQLite-backed key-value store over the `kv_entries` table.
//!
//! # Invariants
//! - Connections handed out by `open_db`/`open_db_in_memory` already carry the
//!   latest `kv_entries` layout.
//! - The layout version lives in `PRAGMA user_version`; the project blob
//!   stored inside a row carries no version of its own.

mod open;
mod schema;

use super::{KeyValueStore, StorageResult};
use rusqlite::{params, Connection, OptionalExtension};

pub use open::{open_db, open_db_in_memory};
pub use schema::{latest_schema_version, schema_version};

/// Key-value store borrowing an already-opened connection.
pub struct SqliteKeyValueStore<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteKeyValueStore<'conn> {
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }
}

impl KeyValueStore for SqliteKeyValueStore<'_> {
    fn get(&self, key: &str) -> StorageResult<Option<String>> {
        let value = self
            .conn
            .query_row(
                "SELECT value FROM kv_entries WHERE key = ?1;",
                [key],
                |row| row.get::<_, String>(0),
            )
            .optional()?;
        Ok(value)
    }

    fn set(&self, key: &str, value: &str) -> StorageResult<()> {
        self.conn.execute(
            "INSERT INTO kv_entries (key, value) VALUES (?1, ?2)
             ON CONFLICT(key) DO UPDATE SET
                value = excluded.value,
                updated_at = (strftime('%s', 'now') * 1000);",
            params![key, value],
        )?;
        Ok(())
    }
}
