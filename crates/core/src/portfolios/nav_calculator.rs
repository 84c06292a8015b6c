use rust_decimal::Decimal;

use super::portfolios_model::Portfolio;
use crate::errors::{InvariantError, Result};
use crate::utils::decimal_utils::checked_add;

/// Net asset value of a portfolio at its most recent date.
///
/// Sums `amount * price` over the valuation snapshot recorded for that date.
/// Positions that were never marked on that date do not contribute.
pub fn calculate_nav(portfolio: &Portfolio) -> Result<Decimal> {
    let date = portfolio
        .most_recent_date
        .ok_or_else(|| InvariantError::NoMostRecentDateForPortfolio(portfolio.id.clone()))?;
    let valuations =
        portfolio
            .valuations
            .get(&date)
            .ok_or_else(|| InvariantError::NoValuationsFoundForDate {
                portfolio_id: portfolio.id.clone(),
                date,
            })?;

    let mut nav = Decimal::ZERO;
    for valued in valuations.values() {
        nav = checked_add(
            &format!("the NAV of portfolio '{}'", portfolio.id),
            nav,
            valued.market_value()?,
        )?;
    }
    Ok(nav.normalize())
}
