//! Connection bootstrap utilities for SQLite.
//!
//! # Responsibility
//! - Open file or in-memory SQLite connections.
//! - Configure connection pragmas required by entity behavior.
//!
//! # Invariants
//! - Returned connections have `foreign_keys=ON`.

use super::DbResult;
use log::{error, info};
use rusqlite::Connection;
use std::path::Path;
use std::time::{Duration, Instant};

/// Opens a SQLite database file with foreign-key enforcement enabled.
///
/// # Side effects
/// - Creates the file when it does not exist yet.
/// - Emits `db_open` logging events with duration and status.
pub fn open_db(path: impl AsRef<Path>) -> DbResult<Connection> {
    open_with("file", || Connection::open(path))
}

/// Opens an in-memory SQLite database with foreign-key enforcement enabled.
pub fn open_db_in_memory() -> DbResult<Connection> {
    open_with("memory", Connection::open_in_memory)
}

/// Reports whether `PRAGMA foreign_keys` is active on the connection.
pub fn foreign_keys_enabled(conn: &Connection) -> DbResult<bool> {
    let enabled = conn.query_row("PRAGMA foreign_keys;", [], |row| row.get::<_, i64>(0))?;
    Ok(enabled == 1)
}

fn open_with<F>(mode: &str, open: F) -> DbResult<Connection>
where
    F: FnOnce() -> rusqlite::Result<Connection>,
{
    let started_at = Instant::now();
    info!("event=db_open module=db status=start mode={mode}");

    let conn = match open() {
        Ok(conn) => conn,
        Err(err) => {
            error!(
                "event=db_open module=db status=error mode={mode} duration_ms={} error_code=db_open_failed error={}",
                started_at.elapsed().as_millis(),
                err
            );
            return Err(err.into());
        }
    };

    match configure_connection(&conn) {
        Ok(()) => {
            info!(
                "event=db_open module=db status=ok mode={mode} duration_ms={}",
                started_at.elapsed().as_millis()
            );
            Ok(conn)
        }
        Err(err) => {
            error!(
                "event=db_open module=db status=error mode={mode} duration_ms={} error_code=db_configure_failed error={}",
                started_at.elapsed().as_millis(),
                err
            );
            Err(err)
        }
    }
}

fn configure_connection(conn: &Connection) -> DbResult<()> {
    conn.execute_batch("PRAGMA foreign_keys = ON;")?;
    conn.busy_timeout(Duration::from_secs(5))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::{foreign_keys_enabled, open_db_in_memory};
    use rusqlite::Connection;

    #[test]
    fn in_memory_connection_enforces_foreign_keys() {
        let conn = open_db_in_memory().unwrap();
        assert!(foreign_keys_enabled(&conn).unwrap());
    }

    #[test]
    fn raw_connection_reports_foreign_keys_off() {
        let conn = Connection::open_in_memory().unwrap();
        assert!(!foreign_keys_enabled(&conn).unwrap());
    }
}
