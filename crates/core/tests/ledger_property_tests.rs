//! Property-based integration tests for the period engine.
//!
//! Random funds are built through the public ledger API over an in-memory
//! world state and stepped through several periods; the accounting identities
//! must hold after every step.

use chrono::NaiveDate;
use proptest::prelude::*;
use rust_decimal::Decimal;
use std::sync::Arc;

use fundledger_core::capital_accounts::{NewCapitalAccount, NewCapitalAccountAction};
use fundledger_core::funds::{FundPeriodResult, NewFund};
use fundledger_core::investors::NewInvestor;
use fundledger_core::portfolios::{NewPortfolio, NewPortfolioAction};
use fundledger_core::settings::LedgerSettings;
use fundledger_core::state::{MemoryWorldState, WorldStateTrait};
use fundledger_core::FundLedger;

const FUND_ID: &str = "prop-fund";
const PORTFOLIO_ID: &str = "prop-book";

// =============================================================================
// Fixtures
// =============================================================================

fn day(period: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2021, period, 28).unwrap()
}

fn new_ledger() -> (Arc<MemoryWorldState>, FundLedger) {
    let state = Arc::new(MemoryWorldState::new());
    let ledger = FundLedger::new(
        state.clone() as Arc<dyn WorldStateTrait>,
        LedgerSettings::default(),
    )
    .unwrap();
    (state, ledger)
}

fn deposit(id: String, account_id: &str, amount: Decimal, period: u32) -> NewCapitalAccountAction {
    NewCapitalAccountAction {
        id,
        capital_account_id: account_id.to_string(),
        action_type: "deposit".to_string(),
        amount,
        full: false,
        date: day(period.max(1)),
        period,
        description: None,
    }
}

fn cash_trade(id: &str, action_type: &str, period: u32, amount: Decimal) -> NewPortfolioAction {
    NewPortfolioAction {
        id: format!("{}-{}", id, period),
        portfolio_id: PORTFOLIO_ID.to_string(),
        action_type: action_type.to_string(),
        date: day(period),
        period,
        name: "cash".to_string(),
        cusip: "cash".to_string(),
        amount,
        currency: "USD".to_string(),
        description: None,
    }
}

/// Creates the fund and one account per initial deposit, then bootstraps it.
fn bootstrapped_fund(ledger: &FundLedger, initial: &[u32]) -> FundPeriodResult {
    ledger
        .funds()
        .create_fund(NewFund {
            id: FUND_ID.to_string(),
            name: "Property fund".to_string(),
            inception_date: day(1),
            has_performance_fees: None,
            performance_fee_period: None,
        })
        .unwrap();
    for (i, amount) in initial.iter().enumerate() {
        let account_id = format!("acct-{}", i);
        let investor_id = format!("inv-{}", i);
        ledger
            .investors()
            .create_investor(NewInvestor {
                id: investor_id.clone(),
                name: format!("Investor {}", i),
            })
            .unwrap();
        ledger
            .capital_accounts()
            .create_capital_account(NewCapitalAccount {
                id: account_id.clone(),
                fund_id: FUND_ID.to_string(),
                investor_id,
                has_performance_fees: false,
                performance_fee_rate: None,
                fixed_fee: None,
            })
            .unwrap();
        ledger
            .capital_accounts()
            .record_capital_account_action(deposit(
                format!("seed-{}", i),
                &account_id,
                Decimal::from(*amount),
                0,
            ))
            .unwrap();
    }
    ledger
        .portfolios()
        .create_portfolio(NewPortfolio {
            id: PORTFOLIO_ID.to_string(),
            fund_id: FUND_ID.to_string(),
            name: "Book".to_string(),
        })
        .unwrap();
    ledger.funds().bootstrap_fund(FUND_ID).unwrap()
}

/// Moves the portfolio's cash to `nav` on the period's date and marks it at 1.
///
/// Marks need a position snapshot on their date, so an unchanged NAV still
/// books a round trip.
fn set_nav(ledger: &FundLedger, period: u32, nav: Decimal) {
    let portfolios = ledger.portfolios();
    let current = portfolios
        .get_portfolio(PORTFOLIO_ID)
        .unwrap()
        .unwrap()
        .current_positions()
        .and_then(|positions| positions.get("cash").map(|p| p.amount))
        .unwrap_or_default();
    if nav > current {
        portfolios
            .record_portfolio_action(cash_trade("trade", "buy", period, nav - current))
            .unwrap();
    } else if nav < current {
        portfolios
            .record_portfolio_action(cash_trade("trade", "sell", period, current - nav))
            .unwrap();
    } else {
        portfolios
            .record_portfolio_action(cash_trade("trade", "buy", period, Decimal::ONE))
            .unwrap();
        portfolios
            .record_portfolio_action(cash_trade("undo", "sell", period, Decimal::ONE))
            .unwrap();
    }
    portfolios
        .update_portfolio_valuation(PORTFOLIO_ID, day(period), "cash", Decimal::ONE)
        .unwrap();
}

fn assert_period_identities(result: &FundPeriodResult, period: u32) -> Result<(), TestCaseError> {
    let fund = &result.fund;
    let closing = fund.closing_values[&period];
    let fixed_fees = fund.fixed_fees[&period];
    let deposits = fund.deposits[&period];
    let opening = fund.opening_values[&period];

    prop_assert_eq!(closing - fixed_fees + deposits, opening);

    let account_closings: Decimal = result
        .capital_accounts
        .iter()
        .map(|a| a.closing_values[&period])
        .sum();
    let account_openings: Decimal = result
        .capital_accounts
        .iter()
        .map(|a| a.opening_values[&period])
        .sum();
    prop_assert_eq!(account_closings, closing);
    prop_assert_eq!(account_openings, opening);

    let mut ownership = Decimal::ZERO;
    for account in &result.capital_accounts {
        prop_assert!(account.opening_values[&period] >= Decimal::ZERO);
        prop_assert!(account.closing_values[&period] >= Decimal::ZERO);
        prop_assert_eq!(account.current_period, period + 1);
        ownership += account.ownership_percentages[&period];
    }
    prop_assert!((ownership - Decimal::ONE).abs() < Decimal::new(1, 12));
    Ok(())
}

// =============================================================================
// Generators
// =============================================================================

/// Initial deposits of two to six accounts; the first is the general partner.
fn arb_initial_deposits() -> impl Strategy<Value = Vec<u32>> {
    proptest::collection::vec(1u32..1_000_000, 2..=6)
}

/// Per period: NAV as a percentage of the previous opening value, and an
/// optional deposit for one of the limited partners.
fn arb_periods() -> impl Strategy<Value = Vec<(u32, Option<(usize, u32)>)>> {
    proptest::collection::vec(
        (
            40u32..250,
            proptest::option::of((1usize..6, 1u32..100_000)),
        ),
        1..=5,
    )
}

// =============================================================================
// Property Tests
// =============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(48))]

    /// Closing less fees plus deposits equals opening, for the fund and summed
    /// over its accounts, and no account ever opens below zero.
    #[test]
    fn prop_wealth_is_conserved_across_periods(
        initial in arb_initial_deposits(),
        periods in arb_periods(),
    ) {
        let (_, ledger) = new_ledger();
        let bootstrap = bootstrapped_fund(&ledger, &initial);
        let total: u32 = initial.iter().sum();
        prop_assert_eq!(bootstrap.fund.opening_values[&0], Decimal::from(total));

        let mut previous_opening = bootstrap.fund.opening_values[&0];
        for (index, (pct, extra)) in periods.into_iter().enumerate() {
            let period = index as u32 + 1;
            let nav = (previous_opening * Decimal::from(pct) / Decimal::from(100)).round_dp(2);
            set_nav(&ledger, period, nav);

            if let Some((lp, amount)) = extra {
                let account_id = format!("acct-{}", lp % initial.len());
                ledger
                    .capital_accounts()
                    .record_capital_account_action(deposit(
                        format!("extra-{}", period),
                        &account_id,
                        Decimal::from(amount),
                        period,
                    ))
                    .unwrap();
            }

            let result = ledger.funds().step_fund(FUND_ID).unwrap();
            prop_assert_eq!(result.fund.closing_values[&period], nav.normalize());
            assert_period_identities(&result, period)?;
            previous_opening = result.fund.opening_values[&period];
        }
    }

    /// Reads never change the store.
    #[test]
    fn prop_reads_are_idempotent(initial in arb_initial_deposits()) {
        let (state, ledger) = new_ledger();
        bootstrapped_fund(&ledger, &initial);
        let before = state.snapshot().unwrap();

        let first = ledger.funds().get_fund(FUND_ID).unwrap();
        let second = ledger.funds().get_fund(FUND_ID).unwrap();
        prop_assert_eq!(first, second);
        let accounts = ledger.capital_accounts().get_capital_accounts_by_fund(FUND_ID).unwrap();
        prop_assert_eq!(accounts.len(), initial.len());
        ledger.portfolios().get_portfolio_nav(PORTFOLIO_ID).ok();

        prop_assert_eq!(state.snapshot().unwrap(), before);
    }

    /// A trade on a later date leaves earlier position snapshots untouched.
    #[test]
    fn prop_position_snapshots_are_copy_on_write(
        first in 1u32..1_000_000,
        second in 1u32..1_000_000,
    ) {
        let (_, ledger) = new_ledger();
        bootstrapped_fund(&ledger, &[1000, 1000]);
        let portfolios = ledger.portfolios();

        portfolios
            .record_portfolio_action(cash_trade("trade", "buy", 1, Decimal::from(first)))
            .unwrap();
        portfolios
            .record_portfolio_action(cash_trade("trade", "buy", 2, Decimal::from(second)))
            .unwrap();

        let portfolio = portfolios.get_portfolio(PORTFOLIO_ID).unwrap().unwrap();
        prop_assert_eq!(portfolio.assets[&day(1)]["cash"].amount, Decimal::from(first));
        prop_assert_eq!(
            portfolio.assets[&day(2)]["cash"].amount,
            Decimal::from(first) + Decimal::from(second)
        );
        prop_assert_eq!(portfolio.most_recent_date, Some(day(2)));
    }
}
