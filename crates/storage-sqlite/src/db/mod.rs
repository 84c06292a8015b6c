//! Connection setup and schema migrations.

use log::{debug, info};
use rusqlite::Connection;

use crate::errors::StorageError;

/// Path that opens a private in-memory database.
pub const IN_MEMORY_DB_PATH: &str = ":memory:";

/// Ordered schema migrations. Entry `i` moves the schema from version `i` to `i + 1`.
const MIGRATIONS: &[&str] = &[
    "CREATE TABLE IF NOT EXISTS world_state (
        key TEXT PRIMARY KEY NOT NULL,
        doc_type TEXT,
        value BLOB NOT NULL
    );
    CREATE INDEX IF NOT EXISTS idx_world_state_doc_type ON world_state(doc_type);",
];

/// Opens the database at `db_path` and brings its schema up to date.
pub fn open_connection(db_path: &str) -> Result<Connection, StorageError> {
    let mut conn = if db_path == IN_MEMORY_DB_PATH {
        Connection::open_in_memory()
    } else {
        Connection::open(db_path)
    }
    .map_err(|e| StorageError::ConnectionFailed(format!("{}: {}", db_path, e)))?;

    if db_path != IN_MEMORY_DB_PATH {
        conn.pragma_update_and_check(None, "journal_mode", "WAL", |_| Ok(()))?;
    }
    conn.pragma_update(None, "synchronous", "NORMAL")?;

    run_migrations(&mut conn)?;
    debug!("Opened world state database at {}", db_path);
    Ok(conn)
}

/// Applies every migration newer than the schema's `user_version`.
pub fn run_migrations(conn: &mut Connection) -> Result<(), StorageError> {
    let current: usize = conn
        .query_row("PRAGMA user_version", [], |row| row.get::<_, i64>(0))
        .map(|v| v.max(0) as usize)?;

    if current >= MIGRATIONS.len() {
        return Ok(());
    }

    let tx = conn.transaction()?;
    for (index, sql) in MIGRATIONS.iter().enumerate().skip(current) {
        tx.execute_batch(sql)
            .map_err(|e| StorageError::MigrationFailed(format!("migration {}: {}", index + 1, e)))?;
    }
    tx.pragma_update(None, "user_version", MIGRATIONS.len() as i64)?;
    tx.commit()?;

    info!(
        "Migrated world state schema from version {} to {}",
        current,
        MIGRATIONS.len()
    );
    Ok(())
}
