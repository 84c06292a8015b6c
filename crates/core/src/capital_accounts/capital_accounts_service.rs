use log::{debug, warn};
use rust_decimal::Decimal;
use std::collections::BTreeMap;
use std::sync::Arc;

use super::capital_accounts_model::{
    CapitalAccount, HighWaterMark, NewCapitalAccount, NewCapitalAccountAction,
};
use super::capital_accounts_store::{
    capital_accounts_by_fund, capital_accounts_by_investor, load_capital_account,
};
use super::capital_accounts_traits::CapitalAccountServiceTrait;
use crate::actions::{
    capital_account_actions_by_account_period, capital_account_actions_by_fund,
    capital_account_actions_by_fund_period, ActionStatus, CapitalAccountAction,
    CapitalAccountActionType,
};
use crate::errors::{Error, NotFoundError, Result, ValidationError};
use crate::funds::load_fund;
use crate::investors::Investor;
use crate::settings::LedgerSettings;
use crate::state::{execute, StateTransaction, WorldStateTrait};
use crate::Period;

/// Service for opening capital accounts and logging their activity
pub struct CapitalAccountService {
    state: Arc<dyn WorldStateTrait>,
    settings: LedgerSettings,
}

impl CapitalAccountService {
    pub fn new(state: Arc<dyn WorldStateTrait>, settings: LedgerSettings) -> Self {
        Self { state, settings }
    }

    fn reader(&self) -> StateTransaction<'_> {
        StateTransaction::new(self.state.as_ref())
    }
}

fn zeroed_through(period: Period) -> BTreeMap<Period, Decimal> {
    (0..=period).map(|p| (p, Decimal::ZERO)).collect()
}

impl CapitalAccountServiceTrait for CapitalAccountService {
    fn create_capital_account(&self, new_account: NewCapitalAccount) -> Result<CapitalAccount> {
        debug!(
            "Creating capital account {} for investor {} in fund {}",
            new_account.id, new_account.investor_id, new_account.fund_id
        );
        new_account.validate()?;

        execute(self.state.as_ref(), |tx| {
            if tx.exists(&new_account.id)? {
                return Err(Error::IdAlreadyInUse(new_account.id.clone()));
            }
            let mut fund = load_fund(tx, &new_account.fund_id)?;
            if tx.load::<Investor>(&new_account.investor_id)?.is_none() {
                return Err(NotFoundError::Investor(new_account.investor_id.clone()).into());
            }

            let period = fund.current_period;
            let performance_fee_rate = match new_account.performance_fee_rate {
                Some(rate) => rate,
                None if new_account.has_performance_fees => {
                    self.settings.default_performance_fee_rate
                }
                None => Decimal::ZERO,
            };
            let account = CapitalAccount {
                id: new_account.id.clone(),
                fund: fund.id.clone(),
                investor: new_account.investor_id.clone(),
                number: fund.next_investor_number,
                current_period: period,
                closing_values: zeroed_through(period),
                opening_values: zeroed_through(period),
                deposits: zeroed_through(period),
                fixed_fees: zeroed_through(period),
                performance_fees: zeroed_through(period),
                ownership_percentages: zeroed_through(period),
                fixed_fee: new_account
                    .fixed_fee
                    .unwrap_or(self.settings.default_fixed_fee)
                    .normalize(),
                has_performance_fees: new_account.has_performance_fees,
                performance_fee_rate: performance_fee_rate.normalize(),
                high_water_mark: HighWaterMark::default(),
                deferred_deposits: Decimal::ZERO,
            };

            fund.next_investor_number += 1;
            if account.has_performance_fees {
                fund.has_performance_fees = true;
            }
            tx.save(&fund)?;
            tx.save(&account)?;
            Ok(account)
        })
    }

    fn record_capital_account_action(
        &self,
        new_action: NewCapitalAccountAction,
    ) -> Result<CapitalAccountAction> {
        let action_type: CapitalAccountActionType = new_action.action_type.parse()?;
        debug!(
            "Recording {} of {} for capital account {} in period {}",
            action_type, new_action.amount, new_action.capital_account_id, new_action.period
        );

        execute(self.state.as_ref(), |tx| {
            if tx.exists(&new_action.id)? {
                return Err(Error::IdAlreadyInUse(new_action.id.clone()));
            }
            let account = load_capital_account(tx, &new_action.capital_account_id)?;
            new_action.validate()?;

            if new_action.period < account.current_period {
                return Err(ValidationError::ActionPeriodClosed {
                    account_id: account.id.clone(),
                    period: new_action.period,
                    current_period: account.current_period,
                }
                .into());
            }

            let fund = load_fund(tx, &account.fund)?;
            if account.has_performance_fees
                && action_type == CapitalAccountActionType::Deposit
                && !fund.is_assessment_period(new_action.period)
                && !fund.mid_year_deposits.contains(&account.id)
            {
                warn!(
                    "Rejected mid-year deposit for performance-fee account {} in period {}",
                    account.id, new_action.period
                );
                return Err(ValidationError::MidYearDeposit {
                    account_id: account.id.clone(),
                    period: new_action.period,
                }
                .into());
            }

            let action = CapitalAccountAction {
                id: new_action.id.clone(),
                capital_account: account.id.clone(),
                fund: account.fund.clone(),
                action_type,
                amount: new_action.amount.normalize(),
                full: new_action.full,
                status: ActionStatus::Submitted,
                description: new_action.description.clone().unwrap_or_default(),
                date: new_action.date,
                period: new_action.period,
            };
            tx.save(&action)?;
            Ok(action)
        })
    }

    fn get_capital_account(&self, account_id: &str) -> Result<Option<CapitalAccount>> {
        self.reader().load(account_id)
    }

    fn get_capital_accounts_by_fund(&self, fund_id: &str) -> Result<Vec<CapitalAccount>> {
        capital_accounts_by_fund(&self.reader(), fund_id)
    }

    fn get_capital_accounts_by_investor(
        &self,
        fund_id: &str,
        investor_id: &str,
    ) -> Result<Vec<CapitalAccount>> {
        capital_accounts_by_investor(&self.reader(), fund_id, investor_id)
    }

    fn get_capital_account_action(&self, action_id: &str) -> Result<Option<CapitalAccountAction>> {
        self.reader().load(action_id)
    }

    fn get_capital_account_actions_by_fund(&self, fund_id: &str) -> Result<Vec<CapitalAccountAction>> {
        capital_account_actions_by_fund(&self.reader(), fund_id)
    }

    fn get_capital_account_actions_by_fund_period(
        &self,
        fund_id: &str,
        period: Period,
    ) -> Result<Vec<CapitalAccountAction>> {
        capital_account_actions_by_fund_period(&self.reader(), fund_id, period)
    }

    fn get_capital_account_actions_by_account_period(
        &self,
        account_id: &str,
        period: Period,
    ) -> Result<Vec<CapitalAccountAction>> {
        capital_account_actions_by_account_period(&self.reader(), account_id, period)
    }
}
