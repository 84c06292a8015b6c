//! SQLite storage implementation for the world state.

mod model;
mod repository;


pub use model::WorldStateRecordDB;
pub use repository::SqliteWorldState;

// Re-export trait from core for convenience
pub use fundledger_core::state::WorldStateTrait;
