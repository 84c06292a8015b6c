//! Seeded multi-period fund simulation.
//!
//! Builds a fund with one general partner and `investors - 1` limited partners,
//! invests the opening capital into a small equity book plus cash, then steps
//! the fund through `periods` months of random price moves and investor
//! activity. Amounts and prices come from a seeded [`StdRng`]; record ids are
//! random UUIDs.

use anyhow::Context;
use chrono::{Months, NaiveDate};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rust_decimal::Decimal;
use serde::Serialize;
use std::collections::BTreeMap;
use uuid::Uuid;

use fundledger_core::benchmarks::NewBenchmark;
use fundledger_core::capital_accounts::{CapitalAccount, NewCapitalAccount, NewCapitalAccountAction};
use fundledger_core::funds::{Fund, MidYearActivityKind, NewFund};
use fundledger_core::investors::NewInvestor;
use fundledger_core::portfolios::{NewPortfolio, NewPortfolioAction};
use fundledger_core::FundLedger;

use crate::config::Config;

const CASH: &str = "CASH";
const TICKERS: [&str; 3] = ["AAPL", "AMZN", "TSLA"];

/// Opening trades booked on the first valuation date, as (type, ticker, shares).
const OPENING_TRADES: [(&str, &str, i64); 9] = [
    ("buy", "AAPL", 100),
    ("buy", "AAPL", 25),
    ("sell", "AAPL", 13),
    ("buy", "AMZN", 150),
    ("buy", "AMZN", 64),
    ("sell", "AMZN", 18),
    ("buy", "TSLA", 150),
    ("buy", "TSLA", 64),
    ("sell", "TSLA", 18),
];

/// Every fifth limited partner pays performance fees.
const PERFORMANCE_FEE_EVERY: usize = 5;

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PeriodSummary {
    pub period: u32,
    pub date: NaiveDate,
    pub closing_value: Decimal,
    pub fixed_fees: Decimal,
    pub deposits: Decimal,
    pub opening_value: Decimal,
    pub performance_fees: Decimal,
    pub benchmark_value: Option<Decimal>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SimulationReport {
    pub fund_id: String,
    pub portfolio_id: String,
    pub capital_accounts: usize,
    pub opening_capital: Decimal,
    pub periods: Vec<PeriodSummary>,
    pub general_partner_value: Decimal,
    /// Portfolio NAV at the last valuation; absent when no period was run.
    pub net_asset_value: Option<Decimal>,
}

struct Book {
    fund_id: String,
    portfolio_id: String,
    benchmark_id: String,
    inception: NaiveDate,
    prices: BTreeMap<String, Decimal>,
}

fn new_id() -> String {
    Uuid::new_v4().to_string()
}

fn period_date(inception: NaiveDate, period: u32) -> anyhow::Result<NaiveDate> {
    inception
        .checked_add_months(Months::new(period))
        .with_context(|| format!("no calendar date for period {}", period))
}

/// Applies a move of `bps` basis points.
fn drift(value: Decimal, bps: i64) -> Decimal {
    (value * (Decimal::ONE + Decimal::new(bps, 4))).round_dp(4)
}

fn trade(
    book: &Book,
    action_type: &str,
    date: NaiveDate,
    period: u32,
    asset: &str,
    amount: Decimal,
) -> NewPortfolioAction {
    NewPortfolioAction {
        id: new_id(),
        portfolio_id: book.portfolio_id.clone(),
        action_type: action_type.to_string(),
        date,
        period,
        name: asset.to_string(),
        cusip: "-1".to_string(),
        amount,
        currency: "usd".to_string(),
        description: None,
    }
}

fn cash_action(
    account: &CapitalAccount,
    action_type: &str,
    amount: Decimal,
    date: NaiveDate,
    period: u32,
) -> NewCapitalAccountAction {
    NewCapitalAccountAction {
        id: new_id(),
        capital_account_id: account.id.clone(),
        action_type: action_type.to_string(),
        amount,
        full: false,
        date,
        period,
        description: None,
    }
}

/// Creates the fund, its investors and capital accounts with their opening
/// deposits, and an empty portfolio, then bootstraps the fund.
fn set_up_fund(ledger: &FundLedger, config: &Config, rng: &mut StdRng) -> anyhow::Result<Book> {
    let inception = config.inception_date;
    let fund = ledger.funds().create_fund(NewFund {
        id: new_id(),
        name: "test_fund".to_string(),
        inception_date: inception,
        has_performance_fees: None,
        performance_fee_period: None,
    })?;

    for i in 0..config.investors {
        let investor = ledger.investors().create_investor(NewInvestor {
            id: new_id(),
            name: format!("test_investor_{}", i),
        })?;
        let account = ledger
            .capital_accounts()
            .create_capital_account(NewCapitalAccount {
                id: new_id(),
                fund_id: fund.id.clone(),
                investor_id: investor.id,
                has_performance_fees: i > 0 && i % PERFORMANCE_FEE_EVERY == 0,
                performance_fee_rate: None,
                fixed_fee: None,
            })?;
        let amount = Decimal::from(rng.gen_range(50_000i64..=150_000));
        ledger
            .capital_accounts()
            .record_capital_account_action(cash_action(&account, "deposit", amount, inception, 0))?;
    }

    let portfolio = ledger.portfolios().create_portfolio(NewPortfolio {
        id: new_id(),
        fund_id: fund.id.clone(),
        name: "test portfolio".to_string(),
    })?;
    let benchmark = ledger.benchmarks().create_benchmark(NewBenchmark {
        id: new_id(),
        name: "Equal-weight index".to_string(),
    })?;
    ledger
        .benchmarks()
        .record_benchmark_value(&benchmark.id, inception, Decimal::ONE_HUNDRED)?;

    ledger.funds().bootstrap_fund(&fund.id)?;
    Ok(Book {
        fund_id: fund.id,
        portfolio_id: portfolio.id,
        benchmark_id: benchmark.id,
        inception,
        prices: BTreeMap::new(),
    })
}

/// Books the opening trades so each ticker carries a fifth of the capital and
/// the remainder sits in cash.
fn invest_opening_capital(
    ledger: &FundLedger,
    book: &mut Book,
    date: NaiveDate,
    capital: Decimal,
) -> anyhow::Result<()> {
    let portfolios = ledger.portfolios();
    let mut invested = Decimal::ZERO;
    for ticker in TICKERS {
        let shares: i64 = OPENING_TRADES
            .iter()
            .filter(|(_, name, _)| *name == ticker)
            .map(|(kind, _, n)| if *kind == "sell" { -n } else { *n })
            .sum();
        let price = (capital / Decimal::from(5) / Decimal::from(shares)).round_dp(2);
        invested += price * Decimal::from(shares);
        book.prices.insert(ticker.to_string(), price);
    }
    for (kind, ticker, shares) in OPENING_TRADES {
        portfolios.record_portfolio_action(trade(book, kind, date, 1, ticker, Decimal::from(shares)))?;
    }
    portfolios.record_portfolio_action(trade(book, "buy", date, 1, CASH, capital - invested))?;
    book.prices.insert(CASH.to_string(), Decimal::ONE);
    Ok(())
}

/// Moves net investor flows of the previous period into or out of cash and
/// rotates one share against cash, so every valuation date has a snapshot.
fn rebalance(
    ledger: &FundLedger,
    book: &Book,
    fund: &Fund,
    date: NaiveDate,
    period: u32,
) -> anyhow::Result<()> {
    let portfolios = ledger.portfolios();
    let previous = period - 1;
    let flows = fund.opening_value(previous)
        - fund.closing_values.get(&previous).copied().unwrap_or_default();

    let cash = || -> anyhow::Result<Decimal> {
        Ok(portfolios
            .get_portfolio(&book.portfolio_id)?
            .and_then(|p| p.current_positions().and_then(|s| s.get(CASH)).map(|c| c.amount))
            .unwrap_or_default())
    };

    if flows > Decimal::ZERO {
        portfolios.record_portfolio_action(trade(book, "buy", date, period, CASH, flows))?;
    } else if flows < Decimal::ZERO {
        let amount = (-flows).min(cash()?);
        if amount > Decimal::ZERO {
            portfolios.record_portfolio_action(trade(book, "sell", date, period, CASH, amount))?;
        }
    }

    let ticker = TICKERS[period as usize % TICKERS.len()];
    let price = book.prices.get(ticker).copied().unwrap_or_default();
    if cash()? >= price {
        portfolios.record_portfolio_action(trade(book, "buy", date, period, ticker, Decimal::ONE))?;
        portfolios.record_portfolio_action(trade(book, "sell", date, period, CASH, price))?;
    } else {
        portfolios.record_portfolio_action(trade(book, "sell", date, period, ticker, Decimal::ONE))?;
        portfolios.record_portfolio_action(trade(book, "buy", date, period, CASH, price))?;
    }
    Ok(())
}

/// Marks every held asset at the book's current prices.
fn mark_to_market(ledger: &FundLedger, book: &Book, date: NaiveDate) -> anyhow::Result<()> {
    let portfolio = ledger
        .portfolios()
        .get_portfolio(&book.portfolio_id)?
        .context("simulation portfolio disappeared")?;
    let held = portfolio.current_positions().cloned().unwrap_or_default();
    let prices: BTreeMap<String, Decimal> = book
        .prices
        .iter()
        .filter(|(asset, _)| held.contains_key(*asset))
        .map(|(asset, price)| (asset.clone(), *price))
        .collect();
    ledger
        .portfolios()
        .update_portfolio_valuations(&book.portfolio_id, date, &prices)?;
    Ok(())
}

/// Random deposits and withdrawals by limited partners for `period`.
///
/// Performance-fee accounts only deposit at assessment periods unless they
/// are cleared for a mid-year deposit first.
fn record_investor_activity(
    ledger: &FundLedger,
    fund: &Fund,
    date: NaiveDate,
    period: u32,
    rng: &mut StdRng,
) -> anyhow::Result<usize> {
    let mut accounts = ledger
        .capital_accounts()
        .get_capital_accounts_by_fund(&fund.id)?;
    // Ids are random; draw in investor-number order so a seed replays exactly.
    accounts.sort_by_key(|a| a.number);
    let mut recorded = 0;
    for account in accounts.iter().filter(|a| !a.is_general_partner()) {
        let roll = rng.gen_range(0..100);
        if roll < 15 {
            if account.has_performance_fees && !fund.is_assessment_period(period) {
                if !rng.gen_bool(0.5) {
                    continue;
                }
                ledger.funds().schedule_mid_year_activity(
                    &fund.id,
                    &account.id,
                    MidYearActivityKind::Deposit,
                )?;
            }
            let amount = Decimal::from(rng.gen_range(1_000i64..=10_000));
            ledger
                .capital_accounts()
                .record_capital_account_action(cash_action(account, "deposit", amount, date, period))?;
            recorded += 1;
        } else if roll < 20 {
            let amount = (account.opening_value(period - 1) / Decimal::ONE_HUNDRED).round_dp(2);
            if amount > Decimal::ZERO {
                ledger.capital_accounts().record_capital_account_action(cash_action(
                    account,
                    "withdrawal",
                    amount,
                    date,
                    period,
                ))?;
                recorded += 1;
            }
        }
    }
    Ok(recorded)
}

pub fn run_simulation(ledger: &FundLedger, config: &Config) -> anyhow::Result<SimulationReport> {
    let mut rng = StdRng::seed_from_u64(config.seed);
    let mut book = set_up_fund(ledger, config, &mut rng)?;

    let mut fund = ledger
        .funds()
        .get_fund(&book.fund_id)?
        .context("simulation fund disappeared")?;
    let opening_capital = fund.opening_value(0);
    let mut benchmark_level = Decimal::ONE_HUNDRED;
    let mut periods = Vec::with_capacity(config.periods as usize);

    for period in 1..=config.periods {
        let date = period_date(book.inception, period)?;
        if period == 1 {
            invest_opening_capital(ledger, &mut book, date, opening_capital)?;
        } else {
            for ticker in TICKERS {
                let bps = rng.gen_range(-500..=800);
                if let Some(price) = book.prices.get_mut(ticker) {
                    *price = drift(*price, bps);
                }
            }
            rebalance(ledger, &book, &fund, date, period)?;
        }
        mark_to_market(ledger, &book, date)?;

        benchmark_level = drift(benchmark_level, rng.gen_range(-400..=600));
        let benchmark = ledger
            .benchmarks()
            .record_benchmark_value(&book.benchmark_id, date, benchmark_level)?;

        let actions = record_investor_activity(ledger, &fund, date, period, &mut rng)?;
        let result = ledger.funds().step_fund(&book.fund_id)?;
        fund = result.fund;
        tracing::debug!(
            "Period {} stepped with {} investor actions, opening value {}",
            period,
            actions,
            fund.opening_value(period)
        );

        periods.push(PeriodSummary {
            period,
            date,
            closing_value: fund.closing_values.get(&period).copied().unwrap_or_default(),
            fixed_fees: fund.fixed_fees.get(&period).copied().unwrap_or_default(),
            deposits: fund.deposits.get(&period).copied().unwrap_or_default(),
            opening_value: fund.opening_value(period),
            performance_fees: fund.performance_fees.get(&period).copied().unwrap_or_default(),
            benchmark_value: benchmark.value_as_of(date),
        });
    }

    let accounts = ledger
        .capital_accounts()
        .get_capital_accounts_by_fund(&book.fund_id)?;
    let last = fund.current_period - 1;
    let general_partner_value = accounts
        .iter()
        .find(|a| a.is_general_partner())
        .map(|a| a.opening_value(last))
        .unwrap_or_default();
    let net_asset_value = if periods.is_empty() {
        None
    } else {
        Some(ledger.portfolios().get_portfolio_nav(&book.portfolio_id)?)
    };

    tracing::info!(
        "Simulation finished at period {} with fund value {}",
        fund.current_period,
        fund.opening_value(last)
    );
    Ok(SimulationReport {
        fund_id: book.fund_id,
        portfolio_id: book.portfolio_id,
        capital_accounts: accounts.len(),
        opening_capital,
        periods,
        general_partner_value,
        net_asset_value,
    })
}
