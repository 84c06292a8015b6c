//! Ledger facade wiring every service over one world state.

use log::debug;
use std::sync::Arc;

use crate::benchmarks::{BenchmarkService, BenchmarkServiceTrait};
use crate::capital_accounts::{CapitalAccountService, CapitalAccountServiceTrait};
use crate::errors::Result;
use crate::funds::{FundService, FundServiceTrait, HighWaterMarkFee, PerformanceFeeCalculator};
use crate::investors::{InvestorService, InvestorServiceTrait};
use crate::portfolios::{PortfolioService, PortfolioServiceTrait};
use crate::settings::LedgerSettings;
use crate::state::WorldStateTrait;

/// Entry point for callers: one service per aggregate, all sharing the same
/// store and settings.
#[derive(Clone)]
pub struct FundLedger {
    state: Arc<dyn WorldStateTrait>,
    settings: LedgerSettings,
    funds: Arc<dyn FundServiceTrait>,
    investors: Arc<dyn InvestorServiceTrait>,
    capital_accounts: Arc<dyn CapitalAccountServiceTrait>,
    portfolios: Arc<dyn PortfolioServiceTrait>,
    benchmarks: Arc<dyn BenchmarkServiceTrait>,
}

impl FundLedger {
    pub fn new(state: Arc<dyn WorldStateTrait>, settings: LedgerSettings) -> Result<Self> {
        Self::with_performance_fee_calculator(state, settings, Arc::new(HighWaterMarkFee))
    }

    /// Builds the ledger with a custom performance fee formula.
    pub fn with_performance_fee_calculator(
        state: Arc<dyn WorldStateTrait>,
        settings: LedgerSettings,
        performance_fees: Arc<dyn PerformanceFeeCalculator>,
    ) -> Result<Self> {
        settings.validate()?;
        debug!("Building fund ledger with settings {:?}", settings);

        Ok(Self {
            funds: Arc::new(FundService::new(
                state.clone(),
                settings.clone(),
                performance_fees,
            )),
            investors: Arc::new(InvestorService::new(state.clone())),
            capital_accounts: Arc::new(CapitalAccountService::new(
                state.clone(),
                settings.clone(),
            )),
            portfolios: Arc::new(PortfolioService::new(state.clone())),
            benchmarks: Arc::new(BenchmarkService::new(state.clone())),
            state,
            settings,
        })
    }

    pub fn funds(&self) -> Arc<dyn FundServiceTrait> {
        self.funds.clone()
    }

    pub fn investors(&self) -> Arc<dyn InvestorServiceTrait> {
        self.investors.clone()
    }

    pub fn capital_accounts(&self) -> Arc<dyn CapitalAccountServiceTrait> {
        self.capital_accounts.clone()
    }

    pub fn portfolios(&self) -> Arc<dyn PortfolioServiceTrait> {
        self.portfolios.clone()
    }

    pub fn benchmarks(&self) -> Arc<dyn BenchmarkServiceTrait> {
        self.benchmarks.clone()
    }

    pub fn settings(&self) -> &LedgerSettings {
        &self.settings
    }

    pub fn world_state(&self) -> Arc<dyn WorldStateTrait> {
        self.state.clone()
    }
}
