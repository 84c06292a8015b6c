use chrono::NaiveDate;
use rust_decimal::Decimal;
use std::collections::BTreeMap;

use super::portfolios_model::{NewPortfolio, NewPortfolioAction, Portfolio};
use crate::actions::PortfolioAction;
use crate::errors::Result;
use crate::Period;

/// Trait for portfolio service operations
pub trait PortfolioServiceTrait: Send + Sync {
    fn create_portfolio(&self, new_portfolio: NewPortfolio) -> Result<Portfolio>;

    /// Applies a buy or sell to the portfolio and logs it, in one write set.
    fn record_portfolio_action(&self, new_action: NewPortfolioAction) -> Result<PortfolioAction>;

    /// Records an external mark for one asset held on `date`.
    fn update_portfolio_valuation(
        &self,
        portfolio_id: &str,
        date: NaiveDate,
        asset_name: &str,
        price: Decimal,
    ) -> Result<Portfolio>;

    /// Records several marks for `date` at once; either all land or none do.
    fn update_portfolio_valuations(
        &self,
        portfolio_id: &str,
        date: NaiveDate,
        prices: &BTreeMap<String, Decimal>,
    ) -> Result<Portfolio>;

    fn get_portfolio(&self, portfolio_id: &str) -> Result<Option<Portfolio>>;
    fn get_portfolios_by_fund(&self, fund_id: &str) -> Result<Vec<Portfolio>>;
    fn get_portfolio_action(&self, action_id: &str) -> Result<Option<PortfolioAction>>;
    fn get_portfolio_actions_by_portfolio(&self, portfolio_id: &str) -> Result<Vec<PortfolioAction>>;
    fn get_portfolio_actions_by_portfolio_period(
        &self,
        portfolio_id: &str,
        period: Period,
    ) -> Result<Vec<PortfolioAction>>;
    fn get_portfolio_nav(&self, portfolio_id: &str) -> Result<Decimal>;
}
