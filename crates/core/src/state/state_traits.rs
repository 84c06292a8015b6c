//! World-state port.
//!
//! This trait is the engine's only contract with the ledger substrate. It is
//! storage-agnostic: the in-memory map in this crate and the SQLite backend in
//! `fundledger-storage-sqlite` both implement it.

use serde::{Deserialize, Serialize};

use super::selector::Selector;
use crate::errors::Result;

/// One stored record: the entity id and its encoded document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StateEntry {
    pub key: String,
    pub value: Vec<u8>,
}

impl StateEntry {
    pub fn new(key: impl Into<String>, value: Vec<u8>) -> Self {
        Self {
            key: key.into(),
            value,
        }
    }
}

/// Trait defining the key-value world-state store consumed by the engine.
///
/// Implementations must be transactionally consistent per invocation: the
/// engine assumes that what it reads during one entry point is a stable
/// snapshot and that [`WorldStateTrait::commit`] applies a write set entirely
/// or not at all.
pub trait WorldStateTrait: Send + Sync {
    /// Reads the document stored at `key`, or `None` when absent.
    fn get_state(&self, key: &str) -> Result<Option<Vec<u8>>>;

    /// Writes a single document.
    fn put_state(&self, key: &str, value: Vec<u8>) -> Result<()>;

    /// Returns every stored record matching the equality selector.
    ///
    /// No ordering is guaranteed.
    fn query(&self, selector: &Selector) -> Result<Vec<StateEntry>>;

    /// Applies a staged write set.
    ///
    /// The default applies the entries one by one; backends with native
    /// transactions override it so a failure leaves nothing applied.
    fn commit(&self, writes: Vec<StateEntry>) -> Result<()> {
        for entry in writes {
            self.put_state(&entry.key, entry.value)?;
        }
        Ok(())
    }
}
