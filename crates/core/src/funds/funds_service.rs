use log::debug;
use std::sync::Arc;

use super::funds_model::{Fund, FundPeriodResult, MidYearActivityKind, NewFund};
use super::funds_store::{all_funds, load_fund};
use super::funds_traits::FundServiceTrait;
use super::performance_fee::PerformanceFeeCalculator;
use super::period_engine::{bootstrap_fund, step_fund};
use crate::capital_accounts::CapitalAccount;
use crate::errors::{Error, NotFoundError, Result, ValidationError};
use crate::settings::LedgerSettings;
use crate::state::{execute, StateTransaction, WorldStateTrait};

/// Service for fund lifecycle operations
pub struct FundService {
    state: Arc<dyn WorldStateTrait>,
    settings: LedgerSettings,
    performance_fees: Arc<dyn PerformanceFeeCalculator>,
}

impl FundService {
    pub fn new(
        state: Arc<dyn WorldStateTrait>,
        settings: LedgerSettings,
        performance_fees: Arc<dyn PerformanceFeeCalculator>,
    ) -> Self {
        Self {
            state,
            settings,
            performance_fees,
        }
    }
}

impl FundServiceTrait for FundService {
    fn create_fund(&self, new_fund: NewFund) -> Result<Fund> {
        debug!("Creating fund {}", new_fund.id);
        new_fund.validate()?;

        execute(self.state.as_ref(), |tx| {
            if tx.exists(&new_fund.id)? {
                return Err(Error::IdAlreadyInUse(new_fund.id.clone()));
            }
            let fund = Fund::new(
                new_fund.id.clone(),
                new_fund.name.trim().to_string(),
                new_fund.inception_date,
                new_fund.has_performance_fees.unwrap_or(false),
                new_fund
                    .performance_fee_period
                    .unwrap_or(self.settings.performance_fee_period),
            );
            tx.save(&fund)?;
            Ok(fund)
        })
    }

    fn bootstrap_fund(&self, fund_id: &str) -> Result<FundPeriodResult> {
        debug!("Bootstrapping fund {}", fund_id);
        execute(self.state.as_ref(), |tx| bootstrap_fund(tx, fund_id))
    }

    fn step_fund(&self, fund_id: &str) -> Result<FundPeriodResult> {
        debug!("Stepping fund {}", fund_id);
        execute(self.state.as_ref(), |tx| {
            step_fund(tx, fund_id, self.performance_fees.as_ref())
        })
    }

    fn schedule_mid_year_activity(
        &self,
        fund_id: &str,
        capital_account_id: &str,
        kind: MidYearActivityKind,
    ) -> Result<Fund> {
        debug!(
            "Scheduling mid-year {:?} for capital account {} in fund {}",
            kind, capital_account_id, fund_id
        );
        execute(self.state.as_ref(), |tx| {
            let mut fund = load_fund(tx, fund_id)?;
            let account = tx
                .load::<CapitalAccount>(capital_account_id)?
                .ok_or_else(|| NotFoundError::CapitalAccount(capital_account_id.to_string()))?;
            if account.fund != fund.id {
                return Err(ValidationError::CapitalAccountNotInFund {
                    account_id: account.id,
                    fund_id: fund.id,
                }
                .into());
            }

            let list = match kind {
                MidYearActivityKind::Deposit => &mut fund.mid_year_deposits,
                MidYearActivityKind::Withdrawal => &mut fund.mid_year_withdrawals,
            };
            if !list.contains(&account.id) {
                list.push(account.id);
                list.sort();
            }
            tx.save(&fund)?;
            Ok(fund)
        })
    }

    fn get_fund(&self, fund_id: &str) -> Result<Option<Fund>> {
        StateTransaction::new(self.state.as_ref()).load(fund_id)
    }

    fn get_funds(&self) -> Result<Vec<Fund>> {
        all_funds(&StateTransaction::new(self.state.as_ref()))
    }
}
