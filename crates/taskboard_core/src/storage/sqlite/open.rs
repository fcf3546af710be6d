//! Connection bootstrap for the SQLite backend.
//!
//! Every open attempt emits one `db_open` start event and one terminal event.

use super::schema::upgrade;
use crate::storage::{StorageError, StorageResult};
use log::{error, info};
use rusqlite::Connection;
use std::path::Path;
use std::time::{Duration, Instant};

const BUSY_TIMEOUT: Duration = Duration::from_secs(5);

/// Opens (or creates) the dashboard database at `path`.
///
/// Missing parent directories are created first; failure to do so is
/// returned as `StorageError::Io`.
pub fn open_db(path: impl AsRef<Path>) -> StorageResult<Connection> {
    let path = path.as_ref();
    let started_at = Instant::now();
    info!("event=db_open module=storage status=start mode=file");

    if let Some(parent) = path.parent().filter(|dir| !dir.as_os_str().is_empty()) {
        if let Err(err) = std::fs::create_dir_all(parent) {
            return Err(fail("file", started_at, "db_dir_create_failed", err.into()));
        }
    }
    finish("file", started_at, Connection::open(path))
}

/// Opens a private in-memory database with the same layout as `open_db`.
pub fn open_db_in_memory() -> StorageResult<Connection> {
    let started_at = Instant::now();
    info!("event=db_open module=storage status=start mode=memory");
    finish("memory", started_at, Connection::open_in_memory())
}

fn finish(
    mode: &'static str,
    started_at: Instant,
    opened: rusqlite::Result<Connection>,
) -> StorageResult<Connection> {
    let mut conn = match opened {
        Ok(conn) => conn,
        Err(err) => return Err(fail(mode, started_at, "db_open_failed", err.into())),
    };

    let upgraded = conn
        .busy_timeout(BUSY_TIMEOUT)
        .map_err(StorageError::from)
        .and_then(|()| upgrade(&mut conn));
    match upgraded {
        Ok(from_version) => {
            info!(
                "event=db_open module=storage status=ok mode={} duration_ms={} schema_from={} schema_to={}",
                mode,
                started_at.elapsed().as_millis(),
                from_version,
                super::latest_schema_version()
            );
            Ok(conn)
        }
        Err(err) => Err(fail(mode, started_at, "db_bootstrap_failed", err)),
    }
}

fn fail(
    mode: &'static str,
    started_at: Instant,
    error_code: &'static str,
    err: StorageError,
) -> StorageError {
    error!(
        "event=db_open module=storage status=error mode={} duration_ms={} error_code={} error={}",
        mode,
        started_at.elapsed().as_millis(),
        error_code,
        err
    );
    err
}
