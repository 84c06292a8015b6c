//! Performance fee formula.

use rust_decimal::Decimal;

/// Computes the performance fee owed by one capital account at an assessment period.
///
/// `closing_value` is the account's closing value for the period,
/// `high_water_mark` the highest closing value previously assessed, and
/// `rate` the account's performance fee rate. The engine records the result; it
/// does not move value between accounts.
pub trait PerformanceFeeCalculator: Send + Sync {
    fn calculate(&self, closing_value: Decimal, high_water_mark: Decimal, rate: Decimal) -> Decimal;
}

/// Charges `rate` on gains above the high-water mark.
#[derive(Debug, Default, Clone, Copy)]
pub struct HighWaterMarkFee;

impl PerformanceFeeCalculator for HighWaterMarkFee {
    fn calculate(&self, closing_value: Decimal, high_water_mark: Decimal, rate: Decimal) -> Decimal {
        let gain = (closing_value - high_water_mark).max(Decimal::ZERO);
        (gain * rate).normalize()
    }
}
