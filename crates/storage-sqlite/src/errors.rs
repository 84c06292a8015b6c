//! Storage-specific error types for SQLite operations.
//!
//! These wrap rusqlite errors and convert them to the store-agnostic
//! [`StateError`] defined in `fundledger_core`.

use fundledger_core::errors::{Error, StateError};
use thiserror::Error;

/// Storage-specific errors.
///
/// Internal to the storage layer; converted to `fundledger_core::Error` before
/// being returned to the engine.
#[derive(Error, Debug)]
pub enum StorageError {
    #[error("Database connection failed: {0}")]
    ConnectionFailed(String),

    #[error("Query execution failed: {0}")]
    QueryFailed(#[from] rusqlite::Error),

    #[error("Migration failed: {0}")]
    MigrationFailed(String),

    #[error("Connection lock poisoned: {0}")]
    LockPoisoned(String),
}

impl From<StorageError> for Error {
    fn from(err: StorageError) -> Self {
        match err {
            StorageError::ConnectionFailed(e) | StorageError::MigrationFailed(e) => {
                Error::State(StateError::CommitFailed(e))
            }
            StorageError::QueryFailed(e) => Error::State(StateError::QueryFailed(e.to_string())),
            StorageError::LockPoisoned(e) => Error::State(StateError::QueryFailed(e)),
        }
    }
}

/// Extension trait for converting rusqlite results to core results.
///
/// Orphan rules forbid `From<rusqlite::Error> for fundledger_core::Error`, so
/// the conversion goes through [`StorageError`].
pub trait IntoCore<T> {
    fn into_core(self) -> fundledger_core::Result<T>;
}

impl<T> IntoCore<T> for std::result::Result<T, rusqlite::Error> {
    fn into_core(self) -> fundledger_core::Result<T> {
        self.map_err(|e| StorageError::from(e).into())
    }
}

impl<T> IntoCore<T> for std::result::Result<T, StorageError> {
    fn into_core(self) -> fundledger_core::Result<T> {
        self.map_err(Error::from)
    }
}
