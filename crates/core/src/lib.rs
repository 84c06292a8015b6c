//! Fund Ledger Core - Domain entities, services, and traits.
//!
//! This crate contains the fund accounting engine: funds, investors, capital
//! accounts, portfolios and the period engine that ties them together. It is
//! storage-agnostic; every service reads and writes through
//! [`state::WorldStateTrait`], which the `storage-sqlite` crate implements.

pub mod actions;
pub mod benchmarks;
pub mod capital_accounts;
pub mod constants;
pub mod errors;
pub mod funds;
pub mod investors;
pub mod ledger;
pub mod portfolios;
pub mod settings;
pub mod state;
pub mod utils;

#[cfg(test)]
mod test_fixtures;

/// Accounting period number. Period 0 is the pre-bootstrap period.
pub type Period = u32;

pub use ledger::FundLedger;

// Re-export error types
pub use errors::Error;
pub use errors::Result;
