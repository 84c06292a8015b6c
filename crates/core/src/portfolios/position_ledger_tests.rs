use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use super::*;
use crate::errors::{Error, InvariantError, ValidationError};
use crate::test_fixtures::date;

fn security(name: &str, amount: Decimal) -> Position {
    Position {
        name: name.to_string(),
        cusip: format!("{}-cusip", name),
        amount,
        currency: "USD".to_string(),
    }
}

fn empty() -> Portfolio {
    Portfolio::new("p1".into(), "fund-1".into(), "Main".into())
}

#[test]
fn test_first_buy_creates_snapshot() {
    let mut portfolio = empty();
    apply_buy(&mut portfolio, date(2021, 1, 4), &security("AAPL", dec!(300))).unwrap();

    assert_eq!(portfolio.most_recent_date, Some(date(2021, 1, 4)));
    assert_eq!(portfolio.assets[&date(2021, 1, 4)]["AAPL"].amount, dec!(300));
}

#[test]
fn test_buy_copies_forward_without_aliasing() {
    let mut portfolio = empty();
    let d1 = date(2021, 1, 4);
    let d2 = date(2021, 2, 1);
    apply_buy(&mut portfolio, d1, &security("AAPL", dec!(300))).unwrap();
    apply_buy(&mut portfolio, d2, &security("AAPL", dec!(50))).unwrap();
    apply_buy(&mut portfolio, d2, &security("cash", dec!(1000))).unwrap();

    assert_eq!(portfolio.assets[&d1].len(), 1);
    assert_eq!(portfolio.assets[&d1]["AAPL"].amount, dec!(300));
    assert_eq!(portfolio.assets[&d2]["AAPL"].amount, dec!(350));
    assert_eq!(portfolio.assets[&d2]["cash"].amount, dec!(1000));
    assert_eq!(portfolio.most_recent_date, Some(d2));
}

#[test]
fn test_sell_from_empty_portfolio() {
    let mut portfolio = empty();
    let err = apply_sell(&mut portfolio, date(2021, 1, 4), &security("AAPL", dec!(1))).unwrap_err();
    assert!(matches!(err, Error::Invariant(InvariantError::EmptyPortfolio(_))));
}

#[test]
fn test_sell_cannot_go_short() {
    let mut portfolio = empty();
    let d1 = date(2021, 1, 4);
    apply_buy(&mut portfolio, d1, &security("AAPL", dec!(10))).unwrap();
    let before = portfolio.clone();

    let err = apply_sell(&mut portfolio, date(2021, 1, 5), &security("AAPL", dec!(11))).unwrap_err();
    assert!(matches!(
        err,
        Error::Invariant(InvariantError::NegativeSecurityAmount { amount, .. }) if amount == dec!(-1)
    ));

    let err = apply_sell(&mut portfolio, date(2021, 1, 5), &security("MSFT", dec!(1))).unwrap_err();
    assert!(matches!(
        err,
        Error::Invariant(InvariantError::NegativeSecurityAmount { .. })
    ));
    assert_eq!(portfolio, before);
}

#[test]
fn test_sell_to_zero_keeps_entry() {
    let mut portfolio = empty();
    apply_buy(&mut portfolio, date(2021, 1, 4), &security("AAPL", dec!(10))).unwrap();
    apply_sell(&mut portfolio, date(2021, 1, 5), &security("AAPL", dec!(10))).unwrap();

    assert_eq!(portfolio.assets[&date(2021, 1, 5)]["AAPL"].amount, Decimal::ZERO);
    assert_eq!(portfolio.assets[&date(2021, 1, 4)]["AAPL"].amount, dec!(10));
}

#[test]
fn test_out_of_order_trade_is_rejected() {
    let mut portfolio = empty();
    apply_buy(&mut portfolio, date(2021, 2, 1), &security("AAPL", dec!(10))).unwrap();

    let err = apply_buy(&mut portfolio, date(2021, 1, 1), &security("AAPL", dec!(1))).unwrap_err();
    assert!(matches!(
        err,
        Error::Validation(ValidationError::OutOfOrderPortfolioAction { .. })
    ));
}

#[test]
fn test_trade_refreshes_same_day_mark() {
    let mut portfolio = empty();
    let d1 = date(2021, 1, 4);
    apply_buy(&mut portfolio, d1, &security("AAPL", dec!(10))).unwrap();
    let held = portfolio.assets[&d1]["AAPL"].clone();
    portfolio
        .valuations
        .entry(d1)
        .or_default()
        .insert("AAPL".into(), ValuedPosition::from_position(&held, dec!(148.88)));

    apply_buy(&mut portfolio, d1, &security("AAPL", dec!(5))).unwrap();

    let valued = &portfolio.valuations[&d1]["AAPL"];
    assert_eq!(valued.amount, dec!(15));
    assert_eq!(valued.price, dec!(148.88));
}

#[test]
fn test_buy_reports_overflow_and_keeps_position() {
    let mut portfolio = empty();
    let day = date(2021, 1, 4);
    apply_buy(&mut portfolio, day, &security("AAPL", Decimal::MAX)).unwrap();

    let err = apply_buy(&mut portfolio, day, &security("AAPL", Decimal::MAX)).unwrap_err();
    assert!(matches!(
        err,
        Error::Invariant(InvariantError::ArithmeticOverflow(_))
    ));
    assert_eq!(portfolio.assets[&day]["AAPL"].amount, Decimal::MAX);
}
