//! Shared builders for unit tests.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use std::sync::Arc;

use crate::capital_accounts::{CapitalAccount, NewCapitalAccount, NewCapitalAccountAction};
use crate::funds::NewFund;
use crate::investors::NewInvestor;
use crate::ledger::FundLedger;
use crate::portfolios::NewPortfolioAction;
use crate::settings::LedgerSettings;
use crate::state::{MemoryWorldState, WorldStateTrait};

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

pub fn ledger() -> (Arc<MemoryWorldState>, FundLedger) {
    let state = Arc::new(MemoryWorldState::new());
    let ledger = FundLedger::new(
        state.clone() as Arc<dyn WorldStateTrait>,
        LedgerSettings::default(),
    )
    .unwrap();
    (state, ledger)
}

pub fn new_fund(id: &str) -> NewFund {
    NewFund {
        id: id.to_string(),
        name: format!("{} fund", id),
        inception_date: date(2021, 1, 1),
        has_performance_fees: None,
        performance_fee_period: None,
    }
}

pub fn new_investor(id: &str) -> NewInvestor {
    NewInvestor {
        id: id.to_string(),
        name: format!("Investor {}", id),
    }
}

pub fn new_account(id: &str, fund_id: &str, investor_id: &str) -> NewCapitalAccount {
    NewCapitalAccount {
        id: id.to_string(),
        fund_id: fund_id.to_string(),
        investor_id: investor_id.to_string(),
        has_performance_fees: false,
        performance_fee_rate: None,
        fixed_fee: None,
    }
}

pub fn action(
    id: &str,
    account_id: &str,
    action_type: &str,
    amount: Decimal,
    period: u32,
) -> NewCapitalAccountAction {
    NewCapitalAccountAction {
        id: id.to_string(),
        capital_account_id: account_id.to_string(),
        action_type: action_type.to_string(),
        amount,
        full: false,
        date: date(2021, 1, 1),
        period,
        description: None,
    }
}

pub fn trade(
    id: &str,
    portfolio_id: &str,
    action_type: &str,
    on: NaiveDate,
    asset: &str,
    amount: Decimal,
) -> NewPortfolioAction {
    NewPortfolioAction {
        id: id.to_string(),
        portfolio_id: portfolio_id.to_string(),
        action_type: action_type.to_string(),
        date: on,
        period: 0,
        name: asset.to_string(),
        cusip: format!("{}-cusip", asset),
        amount,
        currency: "USD".to_string(),
        description: None,
    }
}

/// Creates a fund with one investor and capital account per entry in
/// `accounts`, numbered in order (the first is the general partner).
pub fn seed_fund(ledger: &FundLedger, fund_id: &str, accounts: &[&str]) -> Vec<CapitalAccount> {
    ledger.funds().create_fund(new_fund(fund_id)).unwrap();
    accounts
        .iter()
        .map(|account_id| {
            let investor_id = format!("inv-{}", account_id);
            ledger
                .investors()
                .create_investor(new_investor(&investor_id))
                .unwrap();
            ledger
                .capital_accounts()
                .create_capital_account(new_account(account_id, fund_id, &investor_id))
                .unwrap()
        })
        .collect()
}
