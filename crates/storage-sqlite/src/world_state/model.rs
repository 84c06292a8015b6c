//! Database model for world-state records.

use fundledger_core::constants::DOC_TYPE_FIELD;
use fundledger_core::state::StateEntry;
use serde_json::Value;

/// One row of the `world_state` table.
///
/// `doc_type` is copied out of the document on write so queries can narrow by
/// entity kind with an index before the selector is applied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorldStateRecordDB {
    pub key: String,
    pub doc_type: Option<String>,
    pub value: Vec<u8>,
}

impl WorldStateRecordDB {
    pub fn new(key: String, value: Vec<u8>) -> Self {
        let doc_type = serde_json::from_slice::<Value>(&value)
            .ok()
            .and_then(|doc| doc.get(DOC_TYPE_FIELD)?.as_str().map(str::to_string));
        Self {
            key,
            doc_type,
            value,
        }
    }
}

impl From<StateEntry> for WorldStateRecordDB {
    fn from(entry: StateEntry) -> Self {
        Self::new(entry.key, entry.value)
    }
}

impl From<WorldStateRecordDB> for StateEntry {
    fn from(record: WorldStateRecordDB) -> Self {
        StateEntry::new(record.key, record.value)
    }
}
