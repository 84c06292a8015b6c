//! Funds module - fund lifecycle and the period engine.

mod funds_model;
mod funds_service;
mod funds_store;
mod funds_traits;
mod performance_fee;
mod period_engine;


pub use funds_model::{Fund, FundPeriodResult, MidYearActivityKind, NewFund};
pub use funds_service::FundService;
pub(crate) use funds_store::load_fund;
pub use funds_traits::FundServiceTrait;
pub use performance_fee::{HighWaterMarkFee, PerformanceFeeCalculator};
pub use period_engine::{bootstrap_fund, step_fund};
