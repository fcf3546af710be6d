//! `kv_entries` layout steps.

use crate::storage::{StorageError, StorageResult};
use rusqlite::Connection;

/// Layout steps in order; step `n` (1-based) upgrades version `n - 1` to `n`.
const STEPS: [&str; 1] = [include_str!("0001_kv_entries.sql")];

/// Layout version written by this build.
pub fn latest_schema_version() -> u32 {
    STEPS.len() as u32
}

/// Layout version recorded in an open database.
pub fn schema_version(conn: &Connection) -> StorageResult<u32> {
    Ok(conn.pragma_query_value(None, "user_version", |row| row.get::<_, u32>(0))?)
}

/// Brings `conn` to the latest layout and returns the version it started at.
///
/// All pending steps run in one transaction; files from a newer build are
/// refused rather than touched.
pub(super) fn upgrade(conn: &mut Connection) -> StorageResult<u32> {
    let found = schema_version(conn)?;
    let latest = latest_schema_version();
    if found > latest {
        return Err(StorageError::UnsupportedSchemaVersion {
            db_version: found,
            latest_supported: latest,
        });
    }
    if found == latest {
        return Ok(found);
    }

    let tx = conn.transaction()?;
    for step in &STEPS[found as usize..] {
        tx.execute_batch(step)?;
    }
    tx.pragma_update(None, "user_version", latest)?;
    tx.commit()?;
    Ok(found)
}
