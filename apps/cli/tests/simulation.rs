use rust_decimal::Decimal;
use std::sync::Arc;
use tempfile::tempdir;

use fundledger_cli::{build_ledger, run_simulation, Config};
use fundledger_core::state::WorldStateTrait;
use fundledger_core::FundLedger;
use fundledger_storage_sqlite::SqliteWorldState;

fn small_config() -> Config {
    Config {
        investors: 7,
        periods: 7,
        seed: 42,
        performance_fee_period: Some(3),
        ..Config::default()
    }
}

#[test]
fn simulation_conserves_wealth_every_period() {
    let config = small_config();
    let ledger = build_ledger(&config).unwrap();
    let report = run_simulation(&ledger, &config).unwrap();

    assert_eq!(report.capital_accounts, 7);
    assert_eq!(report.periods.len(), 7);
    assert!(report.opening_capital >= Decimal::from(7 * 50_000));
    assert_eq!(report.periods[0].closing_value, report.opening_capital);

    for summary in &report.periods {
        assert_eq!(
            summary.closing_value - summary.fixed_fees + summary.deposits,
            summary.opening_value,
            "period {}",
            summary.period
        );
        assert!(summary.benchmark_value.is_some());
        if summary.period % 3 != 0 {
            assert_eq!(summary.performance_fees, Decimal::ZERO);
        }
    }
    assert!(report.general_partner_value > Decimal::ZERO);
    assert!(report.net_asset_value.is_some());

    let fund = ledger.funds().get_fund(&report.fund_id).unwrap().unwrap();
    assert_eq!(fund.current_period, 8);
    assert!(fund.has_performance_fees);
}

#[test]
fn simulation_amounts_follow_the_seed() {
    let config = small_config();
    let first = run_simulation(&build_ledger(&config).unwrap(), &config).unwrap();
    let second = run_simulation(&build_ledger(&config).unwrap(), &config).unwrap();

    assert_ne!(first.fund_id, second.fund_id);
    assert_eq!(first.opening_capital, second.opening_capital);
    let closings = |r: &fundledger_cli::SimulationReport| -> Vec<Decimal> {
        r.periods.iter().map(|p| p.closing_value).collect()
    };
    assert_eq!(closings(&first), closings(&second));
}

#[test]
fn simulation_without_periods_only_bootstraps() {
    let config = Config {
        investors: 2,
        periods: 0,
        ..Config::default()
    };
    let report = run_simulation(&build_ledger(&config).unwrap(), &config).unwrap();
    assert!(report.periods.is_empty());
    assert_eq!(report.net_asset_value, None);
    assert!(report.general_partner_value >= Decimal::from(50_000));
}

#[test]
fn simulation_persists_to_sqlite() {
    let dir = tempdir().unwrap();
    let config = Config {
        db_path: dir.path().join("sim.db").to_string_lossy().to_string(),
        investors: 3,
        periods: 2,
        ..Config::default()
    };
    let report = run_simulation(&build_ledger(&config).unwrap(), &config).unwrap();

    let state = Arc::new(SqliteWorldState::open(&config.db_path).unwrap());
    let ledger = FundLedger::new(state as Arc<dyn WorldStateTrait>, config.ledger_settings()).unwrap();
    let fund = ledger.funds().get_fund(&report.fund_id).unwrap().unwrap();
    assert_eq!(fund.current_period, 3);
    assert_eq!(fund.opening_value(2), report.periods[1].opening_value);
}

#[test]
fn config_overrides_ledger_settings() {
    let config = Config {
        fixed_fee: Some(Decimal::new(15, 3)),
        performance_fee_period: Some(4),
        ..Config::default()
    };
    let settings = config.ledger_settings();
    assert_eq!(settings.default_fixed_fee, Decimal::new(15, 3));
    assert_eq!(settings.performance_fee_period, 4);
    assert!(config.is_in_memory());
}
