use log::debug;
use rusqlite::{params, Connection, OptionalExtension};
use serde_json::Value;
use std::sync::{Mutex, MutexGuard};

use super::model::WorldStateRecordDB;
use crate::db::{open_connection, IN_MEMORY_DB_PATH};
use crate::errors::{IntoCore, StorageError};
use fundledger_core::constants::DOC_TYPE_FIELD;
use fundledger_core::errors::Result;
use fundledger_core::state::{Selector, StateEntry, WorldStateTrait};

const UPSERT_SQL: &str = "INSERT INTO world_state (key, doc_type, value) VALUES (?1, ?2, ?3)
     ON CONFLICT(key) DO UPDATE SET doc_type = excluded.doc_type, value = excluded.value";

/// World state persisted in one SQLite table.
///
/// A single connection is shared behind a mutex, so every call sees the state
/// left by the last committed write set.
pub struct SqliteWorldState {
    conn: Mutex<Connection>,
}

impl SqliteWorldState {
    pub fn open(db_path: &str) -> Result<Self> {
        let conn = open_connection(db_path).into_core()?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    pub fn open_in_memory() -> Result<Self> {
        Self::open(IN_MEMORY_DB_PATH)
    }

    fn connection(&self) -> Result<MutexGuard<'_, Connection>> {
        self.conn
            .lock()
            .map_err(|e| StorageError::LockPoisoned(e.to_string()))
            .into_core()
    }

    /// Number of stored records.
    pub fn count(&self) -> Result<usize> {
        let conn = self.connection()?;
        let count: i64 = conn
            .query_row("SELECT COUNT(*) FROM world_state", [], |row| row.get(0))
            .into_core()?;
        Ok(count.max(0) as usize)
    }
}

fn row_to_entry(row: &rusqlite::Row<'_>) -> rusqlite::Result<StateEntry> {
    Ok(StateEntry::new(row.get::<_, String>(0)?, row.get(1)?))
}

fn upsert(conn: &Connection, record: &WorldStateRecordDB) -> rusqlite::Result<usize> {
    conn.execute(
        UPSERT_SQL,
        params![record.key, record.doc_type, record.value],
    )
}

impl WorldStateTrait for SqliteWorldState {
    fn get_state(&self, key: &str) -> Result<Option<Vec<u8>>> {
        let conn = self.connection()?;
        conn.query_row(
            "SELECT value FROM world_state WHERE key = ?1",
            params![key],
            |row| row.get(0),
        )
        .optional()
        .into_core()
    }

    fn put_state(&self, key: &str, value: Vec<u8>) -> Result<()> {
        let conn = self.connection()?;
        upsert(&conn, &WorldStateRecordDB::new(key.to_string(), value)).into_core()?;
        Ok(())
    }

    fn query(&self, selector: &Selector) -> Result<Vec<StateEntry>> {
        let conn = self.connection()?;
        let doc_type = selector.get(DOC_TYPE_FIELD).and_then(Value::as_str);

        let rows = match doc_type {
            Some(doc_type) => {
                let mut stmt = conn
                    .prepare("SELECT key, value FROM world_state WHERE doc_type = ?1 ORDER BY key")
                    .into_core()?;
                let rows = stmt
                    .query_map(params![doc_type], row_to_entry)
                    .into_core()?
                    .collect::<rusqlite::Result<Vec<_>>>()
                    .into_core()?;
                rows
            }
            None => {
                let mut stmt = conn
                    .prepare("SELECT key, value FROM world_state ORDER BY key")
                    .into_core()?;
                let rows = stmt
                    .query_map([], row_to_entry)
                    .into_core()?
                    .collect::<rusqlite::Result<Vec<_>>>()
                    .into_core()?;
                rows
            }
        };

        let matched: Vec<StateEntry> = rows
            .into_iter()
            .filter(|entry| selector.matches_bytes(&entry.value))
            .collect();
        debug!("Selector {} matched {} records", selector, matched.len());
        Ok(matched)
    }

    fn commit(&self, writes: Vec<StateEntry>) -> Result<()> {
        let mut conn = self.connection()?;
        let tx = conn.transaction().into_core()?;
        let count = writes.len();
        for entry in writes {
            upsert(&tx, &WorldStateRecordDB::from(entry)).into_core()?;
        }
        tx.commit().into_core()?;
        debug!("Committed {} world state records", count);
        Ok(())
    }
}
