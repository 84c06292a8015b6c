//! In-memory world state.

use std::collections::BTreeMap;
use std::sync::RwLock;

use super::selector::Selector;
use super::state_traits::{StateEntry, WorldStateTrait};
use crate::errors::{Result, StateError};

/// World state held in a sorted map behind a lock.
///
/// Commits take the write lock once, so a write set is applied as a unit.
#[derive(Debug, Default)]
pub struct MemoryWorldState {
    records: RwLock<BTreeMap<String, Vec<u8>>>,
}

impl MemoryWorldState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Copy of every stored record, for comparing states before and after a call.
    pub fn snapshot(&self) -> Result<BTreeMap<String, Vec<u8>>> {
        let records = self
            .records
            .read()
            .map_err(|e| StateError::QueryFailed(e.to_string()))?;
        Ok(records.clone())
    }

    pub fn len(&self) -> usize {
        self.records.read().map(|r| r.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl WorldStateTrait for MemoryWorldState {
    fn get_state(&self, key: &str) -> Result<Option<Vec<u8>>> {
        let records = self.records.read().map_err(|e| StateError::ReadFailed {
            key: key.to_string(),
            message: e.to_string(),
        })?;
        Ok(records.get(key).cloned())
    }

    fn put_state(&self, key: &str, value: Vec<u8>) -> Result<()> {
        let mut records = self.records.write().map_err(|e| StateError::WriteFailed {
            key: key.to_string(),
            message: e.to_string(),
        })?;
        records.insert(key.to_string(), value);
        Ok(())
    }

    fn query(&self, selector: &Selector) -> Result<Vec<StateEntry>> {
        let records = self
            .records
            .read()
            .map_err(|e| StateError::QueryFailed(e.to_string()))?;
        Ok(records
            .iter()
            .filter(|(_, value)| selector.matches_bytes(value))
            .map(|(key, value)| StateEntry::new(key.clone(), value.clone()))
            .collect())
    }

    fn commit(&self, writes: Vec<StateEntry>) -> Result<()> {
        let mut records = self
            .records
            .write()
            .map_err(|e| StateError::CommitFailed(e.to_string()))?;
        for entry in writes {
            records.insert(entry.key, entry.value);
        }
        Ok(())
    }
}
