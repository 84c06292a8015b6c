//! Buy/sell application with copy-forward snapshots.
//!
//! A trade dated D works on the snapshot already stored at D when there is
//! one, otherwise on a deep copy of the most recent snapshot. Earlier dates are
//! never touched, so every historical snapshot stays as it was recorded.

use chrono::NaiveDate;
use log::debug;
use rust_decimal::Decimal;

use super::portfolios_model::{Portfolio, Position, PositionSnapshot};
use crate::errors::{InvariantError, Result, ValidationError};
use crate::utils::decimal_utils::{checked_add, checked_sub};

fn ensure_in_order(portfolio: &Portfolio, date: NaiveDate) -> Result<()> {
    match portfolio.most_recent_date {
        Some(most_recent) if date < most_recent => {
            Err(ValidationError::OutOfOrderPortfolioAction {
                portfolio_id: portfolio.id.clone(),
                date,
                most_recent,
            }
            .into())
        }
        _ => Ok(()),
    }
}

/// Snapshot the trade at `date` starts from.
fn working_snapshot(portfolio: &Portfolio, date: NaiveDate) -> Result<PositionSnapshot> {
    if let Some(existing) = portfolio.assets.get(&date) {
        return Ok(existing.clone());
    }
    portfolio.current_positions().cloned().ok_or_else(|| {
        InvariantError::NoMostRecentDateForPortfolio(portfolio.id.clone()).into()
    })
}

/// Keeps a mark already recorded for the same date in step with the new amount.
fn refresh_valuation(portfolio: &mut Portfolio, date: NaiveDate, asset: &str, amount: Decimal) {
    if let Some(valued) = portfolio
        .valuations
        .get_mut(&date)
        .and_then(|snapshot| snapshot.get_mut(asset))
    {
        valued.amount = amount;
    }
}

pub fn apply_buy(portfolio: &mut Portfolio, date: NaiveDate, security: &Position) -> Result<()> {
    ensure_in_order(portfolio, date)?;

    let mut snapshot = if portfolio.most_recent_date.is_none() {
        PositionSnapshot::new()
    } else {
        working_snapshot(portfolio, date)?
    };

    let amount = match snapshot.get_mut(&security.name) {
        Some(held) => {
            held.amount = checked_add(
                &format!("the '{}' position of portfolio '{}'", security.name, portfolio.id),
                held.amount,
                security.amount,
            )?
            .normalize();
            held.amount
        }
        None => {
            snapshot.insert(security.name.clone(), security.clone());
            security.amount
        }
    };
    debug!(
        "Portfolio {} buys {} {} on {}, now holds {}",
        portfolio.id, security.amount, security.name, date, amount
    );

    portfolio.assets.insert(date, snapshot);
    portfolio.most_recent_date = Some(date);
    refresh_valuation(portfolio, date, &security.name, amount);
    Ok(())
}

pub fn apply_sell(portfolio: &mut Portfolio, date: NaiveDate, security: &Position) -> Result<()> {
    if portfolio.most_recent_date.is_none() {
        return Err(InvariantError::EmptyPortfolio(portfolio.id.clone()).into());
    }
    ensure_in_order(portfolio, date)?;

    let mut snapshot = working_snapshot(portfolio, date)?;
    let held = snapshot.get_mut(&security.name).ok_or_else(|| {
        InvariantError::NegativeSecurityAmount {
            portfolio_id: portfolio.id.clone(),
            asset: security.name.clone(),
            amount: -security.amount,
        }
    })?;

    let remaining = checked_sub(
        &format!("the '{}' position of portfolio '{}'", security.name, portfolio.id),
        held.amount,
        security.amount,
    )?;
    if remaining < Decimal::ZERO {
        return Err(InvariantError::NegativeSecurityAmount {
            portfolio_id: portfolio.id.clone(),
            asset: security.name.clone(),
            amount: remaining,
        }
        .into());
    }
    held.amount = remaining.normalize();
    let amount = held.amount;
    debug!(
        "Portfolio {} sells {} {} on {}, now holds {}",
        portfolio.id, security.amount, security.name, date, amount
    );

    portfolio.assets.insert(date, snapshot);
    portfolio.most_recent_date = Some(date);
    refresh_valuation(portfolio, date, &security.name, amount);
    Ok(())
}
