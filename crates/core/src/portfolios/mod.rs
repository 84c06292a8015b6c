//! Portfolios module - positions, valuations, buy/sell application and NAV.

mod nav_calculator;
mod portfolios_model;
mod portfolios_service;
mod portfolios_store;
mod portfolios_traits;
mod position_ledger;

#[cfg(test)]
mod nav_calculator_tests;
#[cfg(test)]
mod portfolios_service_tests;
#[cfg(test)]
mod position_ledger_tests;

pub use nav_calculator::calculate_nav;
pub use portfolios_model::{
    NewPortfolio, NewPortfolioAction, Portfolio, Position, PositionSnapshot, ValuationSnapshot,
    ValuedPosition,
};
pub use portfolios_service::PortfolioService;
pub(crate) use portfolios_store::portfolios_by_fund;
pub use portfolios_traits::PortfolioServiceTrait;
pub use position_ledger::{apply_buy, apply_sell};
