//! World state module - store port, selectors, entity codec and write sets.

mod codec;
mod memory;
mod selector;
mod state_traits;
mod transaction;


pub use codec::{decode, encode, Document};
pub use memory::MemoryWorldState;
pub use selector::Selector;
pub use state_traits::{StateEntry, WorldStateTrait};
pub use transaction::{execute, StateTransaction};
