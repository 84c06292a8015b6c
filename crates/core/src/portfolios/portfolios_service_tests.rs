use rust_decimal_macros::dec;
use std::collections::BTreeMap;

use super::*;
use crate::actions::{ActionStatus, PortfolioActionType};
use crate::errors::{Error, InvariantError, NotFoundError, ValidationError};
use crate::test_fixtures::*;

fn new_portfolio(id: &str, fund_id: &str) -> NewPortfolio {
    NewPortfolio {
        id: id.to_string(),
        fund_id: fund_id.to_string(),
        name: "Main book".to_string(),
    }
}

fn setup() -> (std::sync::Arc<crate::state::MemoryWorldState>, crate::FundLedger) {
    let (state, ledger) = ledger();
    ledger.funds().create_fund(new_fund("fund-1")).unwrap();
    ledger
        .portfolios()
        .create_portfolio(new_portfolio("p1", "fund-1"))
        .unwrap();
    (state, ledger)
}

#[test]
fn test_create_portfolio() {
    let (_, ledger) = setup();
    let portfolio = ledger.portfolios().get_portfolio("p1").unwrap().unwrap();
    assert_eq!(portfolio.fund, "fund-1");
    assert_eq!(portfolio.most_recent_date, None);
    assert!(portfolio.assets.is_empty());

    let err = ledger
        .portfolios()
        .create_portfolio(new_portfolio("p1", "fund-1"))
        .unwrap_err();
    assert!(matches!(err, Error::IdAlreadyInUse(_)));

    let err = ledger
        .portfolios()
        .create_portfolio(new_portfolio("p2", "nope"))
        .unwrap_err();
    assert!(matches!(err, Error::NotFound(NotFoundError::Fund(_))));
}

#[test]
fn test_record_portfolio_action_applies_and_logs() {
    let (_, ledger) = setup();
    let service = ledger.portfolios();

    let action = service
        .record_portfolio_action(trade("t1", "p1", "buy", date(2021, 1, 4), "AAPL", dec!(300)))
        .unwrap();
    assert_eq!(action.action_type, PortfolioActionType::Buy);
    assert_eq!(action.status, ActionStatus::Completed);
    assert_eq!(action.fund, "fund-1");

    let portfolio = service.get_portfolio("p1").unwrap().unwrap();
    assert_eq!(portfolio.current_positions().unwrap()["AAPL"].amount, dec!(300));
    assert_eq!(service.get_portfolio_action("t1").unwrap(), Some(action));
}

#[test]
fn test_record_portfolio_action_errors_leave_state_unchanged() {
    let (state, ledger) = setup();
    let service = ledger.portfolios();
    let before = state.snapshot().unwrap();

    let err = service
        .record_portfolio_action(trade("t1", "p1", "short", date(2021, 1, 4), "AAPL", dec!(1)))
        .unwrap_err();
    assert!(matches!(
        err,
        Error::Validation(ValidationError::InvalidPortfolioActionType(_))
    ));

    let err = service
        .record_portfolio_action(trade("t1", "missing", "buy", date(2021, 1, 4), "AAPL", dec!(1)))
        .unwrap_err();
    assert!(matches!(err, Error::NotFound(NotFoundError::Portfolio(_))));

    let err = service
        .record_portfolio_action(trade("t1", "p1", "sell", date(2021, 1, 4), "AAPL", dec!(1)))
        .unwrap_err();
    assert!(matches!(err, Error::Invariant(InvariantError::EmptyPortfolio(_))));

    let err = service
        .record_portfolio_action(trade("t1", "p1", "buy", date(2021, 1, 4), "AAPL", dec!(-5)))
        .unwrap_err();
    assert!(matches!(err, Error::Validation(ValidationError::InvalidInput(_))));

    assert_eq!(state.snapshot().unwrap(), before);
}

#[test]
fn test_valuation_updates() {
    let (_, ledger) = setup();
    let service = ledger.portfolios();
    let day = date(2021, 1, 4);
    service
        .record_portfolio_action(trade("t1", "p1", "buy", day, "cash", dec!(100000)))
        .unwrap();
    service
        .record_portfolio_action(trade("t2", "p1", "buy", day, "AAPL", dec!(300)))
        .unwrap();

    let err = service.get_portfolio_nav("p1").unwrap_err();
    assert!(matches!(
        err,
        Error::Invariant(InvariantError::NoValuationsFoundForDate { .. })
    ));

    service
        .update_portfolio_valuation("p1", day, "cash", dec!(1))
        .unwrap();
    let portfolio = service
        .update_portfolio_valuation("p1", day, "AAPL", dec!(148.88))
        .unwrap();
    assert_eq!(portfolio.valuations[&day]["AAPL"].amount, dec!(300));
    assert_eq!(service.get_portfolio_nav("p1").unwrap(), dec!(144664));

    // Re-marking overwrites the price
    service
        .update_portfolio_valuation("p1", day, "AAPL", dec!(150))
        .unwrap();
    assert_eq!(service.get_portfolio_nav("p1").unwrap(), dec!(145000));
}

#[test]
fn test_valuation_errors() {
    let (_, ledger) = setup();
    let service = ledger.portfolios();
    let day = date(2021, 1, 4);
    service
        .record_portfolio_action(trade("t1", "p1", "buy", day, "cash", dec!(10)))
        .unwrap();

    let err = service
        .update_portfolio_valuation("p1", date(2021, 1, 5), "cash", dec!(1))
        .unwrap_err();
    assert!(matches!(err, Error::NotFound(NotFoundError::PositionSnapshot { .. })));

    let err = service
        .update_portfolio_valuation("p1", day, "AAPL", dec!(1))
        .unwrap_err();
    assert!(matches!(err, Error::NotFound(NotFoundError::Position { .. })));

    let err = service
        .update_portfolio_valuation("p1", day, "cash", dec!(-1))
        .unwrap_err();
    assert!(matches!(err, Error::Validation(ValidationError::InvalidInput(_))));

    let err = service
        .update_portfolio_valuation("nope", day, "cash", dec!(1))
        .unwrap_err();
    assert!(matches!(err, Error::NotFound(NotFoundError::Portfolio(_))));
}

#[test]
fn test_bulk_valuation_is_all_or_nothing() {
    let (_, ledger) = setup();
    let service = ledger.portfolios();
    let day = date(2021, 1, 4);
    service
        .record_portfolio_action(trade("t1", "p1", "buy", day, "cash", dec!(10)))
        .unwrap();

    let prices = BTreeMap::from([
        ("cash".to_string(), dec!(1)),
        ("ghost".to_string(), dec!(2)),
    ]);
    assert!(service.update_portfolio_valuations("p1", day, &prices).is_err());
    assert!(service.get_portfolio("p1").unwrap().unwrap().valuations.is_empty());
}

#[test]
fn test_oversized_amounts_return_overflow_errors() {
    let (state, ledger) = setup();
    let service = ledger.portfolios();
    let day = date(2021, 1, 4);
    let huge = rust_decimal::Decimal::from(1_000_000_000_000_000i64);
    service
        .record_portfolio_action(trade("t1", "p1", "buy", day, "AAPL", huge))
        .unwrap();
    service
        .update_portfolio_valuation("p1", day, "AAPL", huge)
        .unwrap();

    let err = service.get_portfolio_nav("p1").unwrap_err();
    assert!(matches!(
        err,
        Error::Invariant(InvariantError::ArithmeticOverflow(_))
    ));

    service
        .record_portfolio_action(trade("t2", "p1", "buy", day, "cash", rust_decimal::Decimal::MAX))
        .unwrap();
    let before = state.snapshot().unwrap();
    let err = service
        .record_portfolio_action(trade("t3", "p1", "buy", day, "cash", rust_decimal::Decimal::MAX))
        .unwrap_err();
    assert!(matches!(
        err,
        Error::Invariant(InvariantError::ArithmeticOverflow(_))
    ));
    assert_eq!(state.snapshot().unwrap(), before);
    assert_eq!(service.get_portfolio_action("t3").unwrap(), None);
}

#[test]
fn test_portfolio_queries() {
    let (_, ledger) = setup();
    let service = ledger.portfolios();
    service
        .create_portfolio(new_portfolio("p0", "fund-1"))
        .unwrap();

    let ids: Vec<String> = service
        .get_portfolios_by_fund("fund-1")
        .unwrap()
        .into_iter()
        .map(|p| p.id)
        .collect();
    assert_eq!(ids, vec!["p0", "p1"]);

    let mut second = trade("t2", "p1", "buy", date(2021, 2, 1), "AAPL", dec!(1));
    second.period = 1;
    service
        .record_portfolio_action(trade("t1", "p1", "buy", date(2021, 1, 4), "AAPL", dec!(1)))
        .unwrap();
    service.record_portfolio_action(second).unwrap();

    assert_eq!(service.get_portfolio_actions_by_portfolio("p1").unwrap().len(), 2);
    let period_one = service
        .get_portfolio_actions_by_portfolio_period("p1", 1)
        .unwrap();
    assert_eq!(period_one.len(), 1);
    assert_eq!(period_one[0].id, "t2");
    assert!(service.get_portfolio_actions_by_portfolio("p0").unwrap().is_empty());
}
