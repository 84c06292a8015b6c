//! SQLite storage implementation for the fund ledger.
//!
//! The engine in `fundledger-core` only needs a key-value world state with
//! equality queries. This crate provides one on top of a single SQLite table:
//! - Connection setup and schema migrations
//! - [`SqliteWorldState`], implementing `WorldStateTrait`, with write sets
//!   committed inside one SQLite transaction
//!
//! ```text
//! fundledger-core (engine, WorldStateTrait)
//!                  │
//!                  ▼
//!      storage-sqlite (this crate)
//!                  │
//!                  ▼
//!              SQLite DB
//! ```

pub mod db;
pub mod errors;
pub mod world_state;

pub use db::{open_connection, run_migrations, IN_MEMORY_DB_PATH};
pub use errors::{IntoCore, StorageError};
pub use world_state::SqliteWorldState;

// Re-export from fundledger-core for convenience
pub use fundledger_core::errors::{Error, Result, StateError};
