//! SQLite connection bootstrap and schema migrations.
//!
//! Migration state is tracked in `PRAGMA user_version`. Nothing reads or
//! writes todos before `apply_migrations` has succeeded on the connection.

use std::path::Path;
use std::time::Duration;

use rusqlite::Connection;

use crate::error::{StoreError, StoreResult};

struct Migration {
    version: u32,
    sql: &'static str,
}

const MIGRATIONS: &[Migration] = &[Migration {
    version: 1,
    sql: include_str!("migrations/0001_init.sql"),
}];

const BUSY_TIMEOUT: Duration = Duration::from_secs(5);

/// Latest schema version this build knows how to create.
pub fn latest_version() -> u32 {
    MIGRATIONS.last().map_or(0, |migration| migration.version)
}

/// Opens (creating if needed) a database file and migrates it.
pub fn open(path: impl AsRef<Path>) -> StoreResult<Connection> {
    let path = path.as_ref();
    let mut conn = Connection::open(path)?;
    bootstrap(&mut conn)?;
    tracing::info!(path = %path.display(), "opened todo database");
    Ok(conn)
}

/// Opens a private in-memory database and migrates it.
pub fn open_in_memory() -> StoreResult<Connection> {
    let mut conn = Connection::open_in_memory()?;
    bootstrap(&mut conn)?;
    tracing::debug!("opened in-memory todo database");
    Ok(conn)
}

fn bootstrap(conn: &mut Connection) -> StoreResult<()> {
    conn.busy_timeout(BUSY_TIMEOUT)?;
    apply_migrations(conn)
}

/// Applies every pending migration in one transaction.
///
/// Fails with `UnsupportedSchemaVersion` when the file was written by a newer
/// build, rather than touching a schema it does not understand.
pub fn apply_migrations(conn: &mut Connection) -> StoreResult<()> {
    let current = user_version(conn)?;
    let latest = latest_version();

    if current > latest {
        return Err(StoreError::UnsupportedSchemaVersion {
            db_version: current,
            latest_supported: latest,
        });
    }
    if current == latest {
        return Ok(());
    }

    let tx = conn.transaction()?;
    for migration in MIGRATIONS.iter().filter(|m| m.version > current) {
        tx.execute_batch(migration.sql)?;
        tx.execute_batch(&format!("PRAGMA user_version = {};", migration.version))?;
    }
    tx.commit()?;

    tracing::info!(from = current, to = latest, "applied schema migrations");
    Ok(())
}

/// Schema version recorded in the database.
pub fn user_version(conn: &Connection) -> StoreResult<u32> {
    Ok(conn.query_row("PRAGMA user_version;", [], |row| row.get(0))?)
}
