//! Per-account period arithmetic.
//!
//! These functions mutate one in-memory [`CapitalAccount`]; persisting the
//! result is left to the caller's write set.

use log::debug;
use rust_decimal::Decimal;

use super::capital_accounts_model::CapitalAccount;
use crate::actions::{net_activity, CapitalAccountAction};
use crate::constants::{OWNERSHIP_PRECISION, VALUE_PRECISION};
use crate::errors::{InvariantError, LifecycleError, Result};
use crate::utils::decimal_utils::{checked_add, checked_mul, round_to};
use crate::Period;

fn previous_period(account: &CapitalAccount) -> Result<Period> {
    account.current_period.checked_sub(1).ok_or_else(|| {
        InvariantError::PreviousOwnershipPercentageNotFound {
            account_id: account.id.clone(),
            period: 0,
        }
        .into()
    })
}

/// Folds the period-0 actions into the account's opening balance and moves it
/// to period 1.
pub fn bootstrap_capital_account(
    account: &mut CapitalAccount,
    actions: &[CapitalAccountAction],
) -> Result<()> {
    if account.current_period != 0 {
        return Err(LifecycleError::CannotBootstrapCapitalAccount {
            account_id: account.id.clone(),
            period: account.current_period,
        }
        .into());
    }

    let total = net_activity(actions)?;
    let opening = checked_add("a bootstrap opening value", account.closing_value(0), total)?
        .normalize();
    if opening < Decimal::ZERO {
        return Err(InvariantError::NegativeCapitalAccountBalance {
            account_id: account.id.clone(),
            period: 0,
            balance: opening,
        }
        .into());
    }

    debug!(
        "Bootstrapping capital account {} with opening value {}",
        account.id, opening
    );
    account.deposits.insert(0, opening);
    account.opening_values.insert(0, opening);
    account.current_period = 1;
    Ok(())
}

/// Sets the closing value of the current period from last period's ownership.
pub fn update_closing_value(account: &mut CapitalAccount, fund_closing: Decimal) -> Result<Decimal> {
    let previous = previous_period(account)?;
    let ownership = account
        .ownership_percentages
        .get(&previous)
        .copied()
        .ok_or_else(|| InvariantError::PreviousOwnershipPercentageNotFound {
            account_id: account.id.clone(),
            period: previous,
        })?;

    let closing = round_to(
        checked_mul("a capital account closing value", ownership, fund_closing)?,
        VALUE_PRECISION,
    );
    account.closing_values.insert(account.current_period, closing);
    Ok(closing)
}

/// Fixed fee owed on the current period's closing value. The general partner pays none.
pub fn calculate_fixed_fees(account: &CapitalAccount) -> Result<Decimal> {
    if account.is_general_partner() {
        return Ok(Decimal::ZERO);
    }
    let closing = account.closing_value(account.current_period);
    Ok(checked_mul("a fixed fee", closing, account.fixed_fee)?.normalize())
}

/// Records the share of the fund this account held at the start of the
/// period it just left.
pub fn update_ownership(account: &mut CapitalAccount, fund_opening: Decimal) -> Result<Decimal> {
    let previous = previous_period(account)?;
    if fund_opening.is_zero() {
        return Err(InvariantError::ZeroFundOpeningValue {
            fund_id: account.fund.clone(),
            period: previous,
        }
        .into());
    }

    let ownership = round_to(account.opening_value(previous) / fund_opening, OWNERSHIP_PRECISION);
    account.ownership_percentages.insert(previous, ownership);
    Ok(ownership)
}
