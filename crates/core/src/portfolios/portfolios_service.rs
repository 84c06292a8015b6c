use chrono::NaiveDate;
use log::debug;
use rust_decimal::Decimal;
use std::collections::BTreeMap;
use std::sync::Arc;

use super::nav_calculator::calculate_nav;
use super::portfolios_model::{NewPortfolio, NewPortfolioAction, Portfolio, ValuedPosition};
use super::portfolios_store::{load_portfolio, portfolios_by_fund};
use super::portfolios_traits::PortfolioServiceTrait;
use super::position_ledger::{apply_buy, apply_sell};
use crate::actions::{
    portfolio_actions_by_portfolio, portfolio_actions_by_portfolio_period, ActionStatus,
    PortfolioAction, PortfolioActionType,
};
use crate::errors::{Error, NotFoundError, Result};
use crate::funds::load_fund;
use crate::state::{execute, StateTransaction, WorldStateTrait};
use crate::utils::decimal_utils::ensure_non_negative;
use crate::Period;

/// Service for managing portfolios and their trades
pub struct PortfolioService {
    state: Arc<dyn WorldStateTrait>,
}

impl PortfolioService {
    pub fn new(state: Arc<dyn WorldStateTrait>) -> Self {
        Self { state }
    }

    fn reader(&self) -> StateTransaction<'_> {
        StateTransaction::new(self.state.as_ref())
    }
}

/// Writes `price` for every named asset held in the snapshot at `date`.
fn mark_positions(
    portfolio: &mut Portfolio,
    date: NaiveDate,
    prices: &BTreeMap<String, Decimal>,
) -> Result<()> {
    let snapshot = portfolio
        .assets
        .get(&date)
        .ok_or_else(|| NotFoundError::PositionSnapshot {
            portfolio_id: portfolio.id.clone(),
            date,
        })?;

    let mut marked = Vec::with_capacity(prices.len());
    for (asset, price) in prices {
        ensure_non_negative("price", *price)?;
        let position = snapshot
            .get(asset)
            .ok_or_else(|| NotFoundError::Position {
                portfolio_id: portfolio.id.clone(),
                asset: asset.clone(),
                date,
            })?;
        marked.push(ValuedPosition::from_position(position, price.normalize()));
    }

    let valuations = portfolio.valuations.entry(date).or_default();
    for valued in marked {
        valuations.insert(valued.name.clone(), valued);
    }
    Ok(())
}

impl PortfolioServiceTrait for PortfolioService {
    fn create_portfolio(&self, new_portfolio: NewPortfolio) -> Result<Portfolio> {
        debug!(
            "Creating portfolio {} for fund {}",
            new_portfolio.id, new_portfolio.fund_id
        );
        new_portfolio.validate()?;

        execute(self.state.as_ref(), |tx| {
            if tx.exists(&new_portfolio.id)? {
                return Err(Error::IdAlreadyInUse(new_portfolio.id.clone()));
            }
            load_fund(tx, &new_portfolio.fund_id)?;

            let portfolio = Portfolio::new(
                new_portfolio.id.clone(),
                new_portfolio.fund_id.clone(),
                new_portfolio.name.trim().to_string(),
            );
            tx.save(&portfolio)?;
            Ok(portfolio)
        })
    }

    fn record_portfolio_action(&self, new_action: NewPortfolioAction) -> Result<PortfolioAction> {
        let action_type: PortfolioActionType = new_action.action_type.parse()?;
        debug!(
            "Recording portfolio action {} ({}) on {}",
            new_action.id, action_type, new_action.portfolio_id
        );

        execute(self.state.as_ref(), |tx| {
            if tx.exists(&new_action.id)? {
                return Err(Error::IdAlreadyInUse(new_action.id.clone()));
            }
            let mut portfolio = load_portfolio(tx, &new_action.portfolio_id)?;
            new_action.validate()?;

            let security = new_action.security();
            match action_type {
                PortfolioActionType::Buy => apply_buy(&mut portfolio, new_action.date, &security)?,
                PortfolioActionType::Sell => {
                    apply_sell(&mut portfolio, new_action.date, &security)?
                }
            }

            let action = PortfolioAction {
                id: new_action.id.clone(),
                portfolio: portfolio.id.clone(),
                fund: portfolio.fund.clone(),
                action_type,
                security,
                date: new_action.date,
                period: new_action.period,
                status: ActionStatus::Completed,
                description: new_action.description.clone().unwrap_or_default(),
            };
            tx.save(&portfolio)?;
            tx.save(&action)?;
            Ok(action)
        })
    }

    fn update_portfolio_valuation(
        &self,
        portfolio_id: &str,
        date: NaiveDate,
        asset_name: &str,
        price: Decimal,
    ) -> Result<Portfolio> {
        let prices = BTreeMap::from([(asset_name.to_string(), price)]);
        self.update_portfolio_valuations(portfolio_id, date, &prices)
    }

    fn update_portfolio_valuations(
        &self,
        portfolio_id: &str,
        date: NaiveDate,
        prices: &BTreeMap<String, Decimal>,
    ) -> Result<Portfolio> {
        debug!(
            "Marking {} positions of portfolio {} on {}",
            prices.len(),
            portfolio_id,
            date
        );
        execute(self.state.as_ref(), |tx| {
            let mut portfolio = load_portfolio(tx, portfolio_id)?;
            mark_positions(&mut portfolio, date, prices)?;
            tx.save(&portfolio)?;
            Ok(portfolio)
        })
    }

    fn get_portfolio(&self, portfolio_id: &str) -> Result<Option<Portfolio>> {
        self.reader().load(portfolio_id)
    }

    fn get_portfolios_by_fund(&self, fund_id: &str) -> Result<Vec<Portfolio>> {
        portfolios_by_fund(&self.reader(), fund_id)
    }

    fn get_portfolio_action(&self, action_id: &str) -> Result<Option<PortfolioAction>> {
        self.reader().load(action_id)
    }

    fn get_portfolio_actions_by_portfolio(&self, portfolio_id: &str) -> Result<Vec<PortfolioAction>> {
        portfolio_actions_by_portfolio(&self.reader(), portfolio_id)
    }

    fn get_portfolio_actions_by_portfolio_period(
        &self,
        portfolio_id: &str,
        period: Period,
    ) -> Result<Vec<PortfolioAction>> {
        portfolio_actions_by_portfolio_period(&self.reader(), portfolio_id, period)
    }

    fn get_portfolio_nav(&self, portfolio_id: &str) -> Result<Decimal> {
        let portfolio = load_portfolio(&self.reader(), portfolio_id)?;
        calculate_nav(&portfolio)
    }
}
