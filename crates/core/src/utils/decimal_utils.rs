use rust_decimal::{Decimal, RoundingStrategy};
use std::str::FromStr;

use crate::errors::{Error, InvariantError, Result, ValidationError};

/// Parses a boundary decimal string.
pub fn parse_decimal(input: &str) -> Result<Decimal> {
    Ok(Decimal::from_str(input.trim()).map_err(ValidationError::DecimalParse)?)
}

/// Rounds half-even to `dp` places and strips trailing zeros.
pub fn round_to(value: Decimal, dp: u32) -> Decimal {
    value
        .round_dp_with_strategy(dp, RoundingStrategy::MidpointNearestEven)
        .normalize()
}

fn overflow(what: &str) -> Error {
    InvariantError::ArithmeticOverflow(what.to_string()).into()
}

// Overflow-checked arithmetic. `what` names the quantity in the error.

pub fn checked_add(what: &str, lhs: Decimal, rhs: Decimal) -> Result<Decimal> {
    lhs.checked_add(rhs).ok_or_else(|| overflow(what))
}

pub fn checked_sub(what: &str, lhs: Decimal, rhs: Decimal) -> Result<Decimal> {
    lhs.checked_sub(rhs).ok_or_else(|| overflow(what))
}

pub fn checked_mul(what: &str, lhs: Decimal, rhs: Decimal) -> Result<Decimal> {
    lhs.checked_mul(rhs).ok_or_else(|| overflow(what))
}

pub fn checked_sum(what: &str, values: impl IntoIterator<Item = Decimal>) -> Result<Decimal> {
    values
        .into_iter()
        .try_fold(Decimal::ZERO, |total, value| checked_add(what, total, value))
}

pub fn ensure_positive(field: &str, value: Decimal) -> Result<()> {
    if value <= Decimal::ZERO {
        return Err(ValidationError::InvalidInput(format!(
            "{} must be greater than zero, got {}",
            field, value
        ))
        .into());
    }
    Ok(())
}

pub fn ensure_non_negative(field: &str, value: Decimal) -> Result<()> {
    if value < Decimal::ZERO {
        return Err(ValidationError::InvalidInput(format!(
            "{} must not be negative, got {}",
            field, value
        ))
        .into());
    }
    Ok(())
}

/// Rates are fractions: 0.02 is two percent.
pub fn ensure_rate(field: &str, value: Decimal) -> Result<()> {
    if value < Decimal::ZERO || value > Decimal::ONE {
        return Err(ValidationError::InvalidInput(format!(
            "{} must be between 0 and 1, got {}",
            field, value
        ))
        .into());
    }
    Ok(())
}

pub fn ensure_not_blank(field: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(ValidationError::InvalidInput(format!("{} cannot be empty", field)).into());
    }
    Ok(())
}
