use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::constants::{
    DEFAULT_FIXED_FEE, DEFAULT_PERFORMANCE_FEE_PERIOD, DEFAULT_PERFORMANCE_FEE_RATE,
};
use crate::errors::{Result, ValidationError};
use crate::utils::decimal_utils::ensure_rate;

/// Defaults applied when a request leaves a fee parameter unset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LedgerSettings {
    pub default_fixed_fee: Decimal,
    pub performance_fee_period: u32,
    pub default_performance_fee_rate: Decimal,
}

impl Default for LedgerSettings {
    fn default() -> Self {
        Self {
            default_fixed_fee: Decimal::from_str(DEFAULT_FIXED_FEE).unwrap_or(Decimal::ZERO),
            performance_fee_period: DEFAULT_PERFORMANCE_FEE_PERIOD,
            default_performance_fee_rate: Decimal::from_str(DEFAULT_PERFORMANCE_FEE_RATE)
                .unwrap_or(Decimal::ZERO),
        }
    }
}

impl LedgerSettings {
    pub fn validate(&self) -> Result<()> {
        ensure_rate("defaultFixedFee", self.default_fixed_fee)?;
        ensure_rate("defaultPerformanceFeeRate", self.default_performance_fee_rate)?;
        if self.performance_fee_period == 0 {
            return Err(ValidationError::InvalidInput(
                "performanceFeePeriod must be at least 1".to_string(),
            )
            .into());
        }
        Ok(())
    }
}
