//! Per-invocation write set over the world state.

use std::collections::{BTreeMap, BTreeSet};

use log::debug;

use super::codec::{decode, encode, Document};
use super::selector::Selector;
use super::state_traits::{StateEntry, WorldStateTrait};
use crate::errors::{Error, Result, StateError};

/// Staged view of the world state for one engine invocation.
///
/// Reads and queries observe the invocation's own writes. Nothing reaches the
/// underlying store until [`StateTransaction::commit`]; dropping the
/// transaction discards the write set.
pub struct StateTransaction<'a> {
    state: &'a dyn WorldStateTrait,
    writes: BTreeMap<String, Vec<u8>>,
}

impl<'a> StateTransaction<'a> {
    pub fn new(state: &'a dyn WorldStateTrait) -> Self {
        Self {
            state,
            writes: BTreeMap::new(),
        }
    }

    pub fn get_state(&self, key: &str) -> Result<Option<Vec<u8>>> {
        if let Some(staged) = self.writes.get(key) {
            return Ok(Some(staged.clone()));
        }
        self.state.get_state(key)
    }

    pub fn exists(&self, key: &str) -> Result<bool> {
        Ok(self.get_state(key)?.is_some())
    }

    pub fn put_state(&mut self, key: &str, value: Vec<u8>) {
        self.writes.insert(key.to_string(), value);
    }

    /// Runs a selector against the store merged with the staged writes.
    ///
    /// Staged documents replace their stored versions; results are ordered by key.
    pub fn query(&self, selector: &Selector) -> Result<Vec<StateEntry>> {
        let mut merged: BTreeMap<String, Vec<u8>> = self
            .state
            .query(selector)?
            .into_iter()
            .filter(|entry| !self.writes.contains_key(&entry.key))
            .map(|entry| (entry.key, entry.value))
            .collect();

        for (key, value) in &self.writes {
            if selector.matches_bytes(value) {
                merged.insert(key.clone(), value.clone());
            }
        }

        Ok(merged
            .into_iter()
            .map(|(key, value)| StateEntry { key, value })
            .collect())
    }

    /// Loads the document of kind `T` at `key`. A record of another kind reads as absent.
    pub fn load<T: Document>(&self, key: &str) -> Result<Option<T>> {
        let Some(bytes) = self.get_state(key)? else {
            return Ok(None);
        };
        match decode(key, &bytes) {
            Ok(document) => Ok(Some(document)),
            Err(Error::State(StateError::DocTypeMismatch { .. })) => Ok(None),
            Err(e) => Err(e),
        }
    }

    pub fn save<T: Document>(&mut self, document: &T) -> Result<()> {
        let bytes = encode(document)?;
        self.put_state(document.id(), bytes);
        Ok(())
    }

    /// Decodes every document of kind `T` matching `selector`, ordered by id.
    pub fn query_documents<T: Document>(&self, selector: Selector) -> Result<Vec<T>> {
        let selector = selector.field(crate::constants::DOC_TYPE_FIELD, T::DOC_TYPE);
        self.query(&selector)?
            .into_iter()
            .map(|entry| decode(&entry.key, &entry.value))
            .collect()
    }

    pub fn pending_keys(&self) -> BTreeSet<&str> {
        self.writes.keys().map(String::as_str).collect()
    }

    pub fn commit(self) -> Result<()> {
        if self.writes.is_empty() {
            return Ok(());
        }
        debug!("Committing world state write set of {} keys", self.writes.len());
        let entries = self
            .writes
            .into_iter()
            .map(|(key, value)| StateEntry { key, value })
            .collect();
        self.state.commit(entries)
    }
}

/// Runs `operation` inside a fresh transaction and commits its write set only
/// when it succeeds.
pub fn execute<T, F>(state: &dyn WorldStateTrait, operation: F) -> Result<T>
where
    F: FnOnce(&mut StateTransaction<'_>) -> Result<T>,
{
    let mut tx = StateTransaction::new(state);
    let result = operation(&mut tx)?;
    tx.commit()?;
    Ok(result)
}
