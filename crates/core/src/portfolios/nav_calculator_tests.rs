use rust_decimal_macros::dec;

use super::*;
use crate::errors::{Error, InvariantError};
use crate::test_fixtures::date;

fn valued(name: &str, amount: rust_decimal::Decimal, price: rust_decimal::Decimal) -> ValuedPosition {
    ValuedPosition {
        name: name.to_string(),
        cusip: String::new(),
        amount,
        currency: "USD".to_string(),
        price,
    }
}

#[test]
fn test_nav_sums_marked_positions() {
    let day = date(1996, 12, 27);
    let mut portfolio = Portfolio::new("p1".into(), "fund-1".into(), "Main".into());
    portfolio.most_recent_date = Some(day);
    let marks = portfolio.valuations.entry(day).or_default();
    marks.insert("cash".into(), valued("cash", dec!(100000), dec!(1)));
    marks.insert("AAPL".into(), valued("AAPL", dec!(300), dec!(148.88)));

    let nav = calculate_nav(&portfolio).unwrap();
    assert_eq!(nav.to_string(), "144664");
}

#[test]
fn test_nav_of_empty_portfolio() {
    let portfolio = Portfolio::new("p1".into(), "fund-1".into(), "Main".into());
    let err = calculate_nav(&portfolio).unwrap_err();
    assert!(matches!(
        err,
        Error::Invariant(InvariantError::NoMostRecentDateForPortfolio(_))
    ));
}

#[test]
fn test_nav_requires_marks_on_most_recent_date() {
    let mut portfolio = Portfolio::new("p1".into(), "fund-1".into(), "Main".into());
    portfolio.most_recent_date = Some(date(2021, 2, 1));
    portfolio
        .valuations
        .entry(date(2021, 1, 1))
        .or_default()
        .insert("cash".into(), valued("cash", dec!(1), dec!(1)));

    let err = calculate_nav(&portfolio).unwrap_err();
    assert!(matches!(
        err,
        Error::Invariant(InvariantError::NoValuationsFoundForDate { .. })
    ));
}

#[test]
fn test_nav_reports_overflow() {
    let day = date(2021, 1, 4);
    let huge = rust_decimal::Decimal::from(1_000_000_000_000_000i64);
    let mut portfolio = Portfolio::new("p1".into(), "fund-1".into(), "Main".into());
    portfolio.most_recent_date = Some(day);
    portfolio
        .valuations
        .entry(day)
        .or_default()
        .insert("AAPL".into(), valued("AAPL", huge, huge));

    let err = calculate_nav(&portfolio).unwrap_err();
    assert!(matches!(
        err,
        Error::Invariant(InvariantError::ArithmeticOverflow(_))
    ));
}
