//! Fund period engine.
//!
//! Bootstrap moves a fund and all of its capital accounts from period 0 to 1.
//! Each step closes period N and opens N+1. Both work entirely inside the
//! caller's [`StateTransaction`], so any error leaves the store untouched.

use log::{debug, info, warn};
use rust_decimal::Decimal;

use super::funds_model::{Fund, FundPeriodResult};
use super::funds_store::load_fund;
use super::performance_fee::PerformanceFeeCalculator;
use crate::actions::{capital_account_actions_by_account_period, net_activity};
use crate::capital_accounts::{
    bootstrap_capital_account, calculate_fixed_fees, capital_accounts_by_fund,
    update_closing_value, update_ownership, CapitalAccount, HighWaterMark,
};
use crate::errors::{InvariantError, LifecycleError, NotFoundError, Result};
use crate::portfolios::{calculate_nav, portfolios_by_fund};
use crate::state::StateTransaction;
use crate::utils::decimal_utils::{checked_add, checked_sub, checked_sum};
use crate::Period;

fn save_all(
    tx: &mut StateTransaction<'_>,
    fund: &Fund,
    accounts: &[CapitalAccount],
) -> Result<()> {
    tx.save(fund)?;
    for account in accounts {
        tx.save(account)?;
    }
    Ok(())
}

pub fn bootstrap_fund(tx: &mut StateTransaction<'_>, fund_id: &str) -> Result<FundPeriodResult> {
    let mut fund = load_fund(tx, fund_id)?;
    if fund.current_period != 0 {
        return Err(LifecycleError::CannotBootstrapFund {
            fund_id: fund.id.clone(),
            period: fund.current_period,
        }
        .into());
    }

    let mut accounts = capital_accounts_by_fund(tx, fund_id)?;
    let mut total_deposits = Decimal::ZERO;
    for account in accounts.iter_mut() {
        let actions = capital_account_actions_by_account_period(tx, &account.id, 0)?;
        bootstrap_capital_account(account, &actions)?;
        total_deposits = checked_add("fund deposits", total_deposits, account.deposit(0))?;
    }
    let opening_fund_value = total_deposits.normalize();

    for account in accounts.iter_mut() {
        update_ownership(account, opening_fund_value)?;
        account.high_water_mark = HighWaterMark {
            amount: account.closing_value(0),
            period: 0,
        };
    }

    fund.deposits.insert(0, total_deposits.normalize());
    fund.opening_values.insert(0, opening_fund_value);
    fund.current_period = 1;

    save_all(tx, &fund, &accounts)?;
    info!(
        "Bootstrapped fund {} with {} capital accounts and opening value {}",
        fund.id,
        accounts.len(),
        opening_fund_value
    );
    Ok(FundPeriodResult {
        fund,
        capital_accounts: accounts,
    })
}

/// Deposits credited to an account in period `period`, before the fixed-fee sweep.
///
/// A performance-fee account only takes on new capital at assessment periods
/// unless it was cleared for mid-year activity; otherwise the net amount is
/// parked in `deferred_deposits` and released at the next assessment.
fn period_activity(
    fund: &Fund,
    account: &mut CapitalAccount,
    net: Decimal,
    period: Period,
) -> Result<Decimal> {
    if !account.has_performance_fees {
        return Ok(net);
    }
    if fund.is_assessment_period(period) {
        let released = checked_add("released deferred activity", net, account.deferred_deposits)?;
        account.deferred_deposits = Decimal::ZERO;
        return Ok(released);
    }
    if fund.has_mid_year_activity(&account.id) {
        return Ok(net);
    }
    debug!(
        "Deferring {} of activity for capital account {} to the next assessment",
        net, account.id
    );
    account.deferred_deposits =
        checked_add("deferred activity", account.deferred_deposits, net)?.normalize();
    Ok(Decimal::ZERO)
}

/// Index of the account that absorbs closing-value rounding: the largest
/// closing value, with the general partner winning ties.
fn residual_holder(accounts: &[CapitalAccount], period: Period) -> Option<usize> {
    accounts
        .iter()
        .enumerate()
        .max_by(|(_, a), (_, b)| {
            a.closing_value(period)
                .cmp(&b.closing_value(period))
                .then_with(|| b.number.cmp(&a.number))
        })
        .map(|(index, _)| index)
}

pub fn step_fund(
    tx: &mut StateTransaction<'_>,
    fund_id: &str,
    performance_fees: &dyn PerformanceFeeCalculator,
) -> Result<FundPeriodResult> {
    let mut fund = load_fund(tx, fund_id)?;
    if fund.current_period == 0 {
        return Err(LifecycleError::CannotStepFund(fund.id.clone()).into());
    }
    let period = fund.current_period;

    let portfolios = portfolios_by_fund(tx, fund_id)?;
    if portfolios.is_empty() {
        return Err(NotFoundError::NoPortfoliosFound(fund.id.clone()).into());
    }
    let mut accounts = capital_accounts_by_fund(tx, fund_id)?;
    if accounts.is_empty() {
        return Err(NotFoundError::NoCapitalAccountsFound(fund.id.clone()).into());
    }
    debug!(
        "Stepping fund {} from period {} with {} portfolios and {} capital accounts",
        fund.id,
        period,
        portfolios.len(),
        accounts.len()
    );

    // Closing values
    let mut fund_closing = Decimal::ZERO;
    for portfolio in &portfolios {
        let nav = calculate_nav(portfolio)?;
        fund_closing = checked_add("the fund closing value", fund_closing, nav)?;
    }
    let fund_closing = fund_closing.normalize();

    for account in accounts.iter_mut() {
        if account.current_period != period {
            return Err(InvariantError::CapitalAccountPeriodMismatch {
                account_id: account.id.clone(),
                account_period: account.current_period,
                fund_period: period,
            }
            .into());
        }
        update_closing_value(account, fund_closing)?;
    }

    let gp_index = accounts
        .iter()
        .position(CapitalAccount::is_general_partner)
        .ok_or_else(|| InvariantError::GeneralPartnerNotFound(fund.id.clone()))?;

    let allocated = checked_sum(
        "allocated closing values",
        accounts.iter().map(|a| a.closing_value(period)),
    )?;
    let residual = checked_sub("the rounding residual", fund_closing, allocated)?;
    if !residual.is_zero() {
        if let Some(holder) = residual_holder(&accounts, period) {
            let account = &mut accounts[holder];
            let adjusted =
                checked_add("an adjusted closing value", account.closing_value(period), residual)?
                    .normalize();
            account.closing_values.insert(period, adjusted);
        }
    }

    // Activity and fixed fees
    let mut activity = Vec::with_capacity(accounts.len());
    for account in accounts.iter_mut() {
        let actions = capital_account_actions_by_account_period(tx, &account.id, period)?;
        let net = net_activity(&actions)?;
        activity.push(period_activity(&fund, account, net, period)?);
    }

    let mut total_fixed_fees = Decimal::ZERO;
    for account in accounts.iter_mut() {
        let fee = calculate_fixed_fees(account)?;
        account.fixed_fees.insert(period, fee);
        total_fixed_fees = checked_add("fund fixed fees", total_fixed_fees, fee)?;
    }
    let total_fixed_fees = total_fixed_fees.normalize();
    activity[gp_index] = checked_add(
        "general partner deposits",
        activity[gp_index],
        total_fixed_fees,
    )?;
    let total_deposits = checked_sum("fund deposits", activity.iter().copied())?.normalize();

    // Opening values
    let mut fund_opening = Decimal::ZERO;
    for (account, deposits) in accounts.iter_mut().zip(activity) {
        let deposits = deposits.normalize();
        let after_fees = checked_sub(
            "a capital account opening value",
            account.closing_value(period),
            account.fixed_fee_for(period),
        )?;
        let opening =
            checked_add("a capital account opening value", after_fees, deposits)?.normalize();
        if opening < Decimal::ZERO {
            warn!(
                "Capital account {} would open period {} at {}",
                account.id, period, opening
            );
            return Err(InvariantError::NegativeCapitalAccountBalance {
                account_id: account.id.clone(),
                period,
                balance: opening,
            }
            .into());
        }
        account.deposits.insert(period, deposits);
        account.opening_values.insert(period, opening);
        fund_opening = checked_add("the fund opening value", fund_opening, opening)?;
    }
    let fund_opening = fund_opening.normalize();

    let expected_opening = checked_add(
        "the expected fund opening value",
        checked_sub("the expected fund opening value", fund_closing, total_fixed_fees)?,
        total_deposits,
    )?;
    if expected_opening != fund_opening {
        warn!(
            "Wealth conservation failed for fund {} in period {}",
            fund.id, period
        );
        return Err(InvariantError::WealthConservation {
            fund_id: fund.id.clone(),
            period,
            closing_value: fund_closing,
            fixed_fees: total_fixed_fees,
            deposits: total_deposits,
            opening_value: fund_opening,
        }
        .into());
    }

    // Performance fees
    let assess = fund.has_performance_fees && fund.is_assessment_period(period);
    let mut total_performance_fees = Decimal::ZERO;
    for account in accounts.iter_mut() {
        let mut fee = Decimal::ZERO;
        if assess && account.has_performance_fees {
            let closing = account.closing_value(period);
            fee = performance_fees
                .calculate(
                    closing,
                    account.high_water_mark.amount,
                    account.performance_fee_rate,
                )
                .normalize();
            if closing > account.high_water_mark.amount {
                account.high_water_mark = HighWaterMark {
                    amount: closing,
                    period,
                };
            }
        }
        account.performance_fees.insert(period, fee);
        total_performance_fees =
            checked_add("fund performance fees", total_performance_fees, fee)?;
    }

    // Commit the period
    fund.closing_values.insert(period, fund_closing);
    fund.fixed_fees.insert(period, total_fixed_fees);
    fund.deposits.insert(period, total_deposits);
    fund.opening_values.insert(period, fund_opening);
    fund.performance_fees
        .insert(period, total_performance_fees.normalize());
    fund.current_period = period + 1;
    fund.mid_year_deposits.clear();
    fund.mid_year_withdrawals.clear();

    for account in accounts.iter_mut() {
        account.current_period = period + 1;
        update_ownership(account, fund_opening)?;
    }

    save_all(tx, &fund, &accounts)?;
    info!(
        "Stepped fund {} to period {}: closing {}, fixed fees {}, deposits {}, opening {}",
        fund.id, fund.current_period, fund_closing, total_fixed_fees, total_deposits, fund_opening
    );
    Ok(FundPeriodResult {
        fund,
        capital_accounts: accounts,
    })
}
