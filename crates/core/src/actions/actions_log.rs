//! Selector queries over the action log.
//!
//! Every list is ordered by action id; the store itself guarantees no order.

use rust_decimal::Decimal;

use super::actions_model::{CapitalAccountAction, PortfolioAction};
use crate::errors::Result;
use crate::state::{Selector, StateTransaction};
use crate::utils::decimal_utils::checked_sum;
use crate::Period;

pub fn capital_account_actions_by_fund(
    tx: &StateTransaction<'_>,
    fund_id: &str,
) -> Result<Vec<CapitalAccountAction>> {
    tx.query_documents(Selector::new().field("fund", fund_id))
}

pub fn capital_account_actions_by_fund_period(
    tx: &StateTransaction<'_>,
    fund_id: &str,
    period: Period,
) -> Result<Vec<CapitalAccountAction>> {
    tx.query_documents(
        Selector::new()
            .field("fund", fund_id)
            .field("period", period),
    )
}

pub fn capital_account_actions_by_account_period(
    tx: &StateTransaction<'_>,
    capital_account_id: &str,
    period: Period,
) -> Result<Vec<CapitalAccountAction>> {
    tx.query_documents(
        Selector::new()
            .field("capitalAccount", capital_account_id)
            .field("period", period),
    )
}

pub fn portfolio_actions_by_portfolio(
    tx: &StateTransaction<'_>,
    portfolio_id: &str,
) -> Result<Vec<PortfolioAction>> {
    tx.query_documents(Selector::new().field("portfolio", portfolio_id))
}

pub fn portfolio_actions_by_portfolio_period(
    tx: &StateTransaction<'_>,
    portfolio_id: &str,
    period: Period,
) -> Result<Vec<PortfolioAction>> {
    tx.query_documents(
        Selector::new()
            .field("portfolio", portfolio_id)
            .field("period", period),
    )
}

/// Deposits minus withdrawals.
pub fn net_activity<'a>(
    actions: impl IntoIterator<Item = &'a CapitalAccountAction>,
) -> Result<Decimal> {
    checked_sum(
        "net capital account activity",
        actions.into_iter().map(CapitalAccountAction::signed_amount),
    )
}
