//! Fund domain models.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::capital_accounts::CapitalAccount;
use crate::constants::doc_types;
use crate::errors::{Result, ValidationError};
use crate::state::Document;
use crate::utils::decimal_utils::ensure_not_blank;
use crate::Period;

/// A pooled investment vehicle and its fund-level totals per period.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Fund {
    pub id: String,
    pub name: String,
    pub inception_date: NaiveDate,
    pub current_period: Period,
    pub next_investor_number: u32,
    pub closing_values: BTreeMap<Period, Decimal>,
    pub opening_values: BTreeMap<Period, Decimal>,
    pub deposits: BTreeMap<Period, Decimal>,
    pub fixed_fees: BTreeMap<Period, Decimal>,
    pub performance_fees: BTreeMap<Period, Decimal>,
    pub has_performance_fees: bool,
    pub performance_fee_period: u32,
    #[serde(default)]
    pub mid_year_deposits: Vec<String>,
    #[serde(default)]
    pub mid_year_withdrawals: Vec<String>,
}

impl Fund {
    pub fn new(
        id: String,
        name: String,
        inception_date: NaiveDate,
        has_performance_fees: bool,
        performance_fee_period: u32,
    ) -> Self {
        let zero = || BTreeMap::from([(0, Decimal::ZERO)]);
        Self {
            id,
            name,
            inception_date,
            current_period: 0,
            next_investor_number: 0,
            closing_values: zero(),
            opening_values: zero(),
            deposits: zero(),
            fixed_fees: zero(),
            performance_fees: zero(),
            has_performance_fees,
            performance_fee_period,
            mid_year_deposits: Vec::new(),
            mid_year_withdrawals: Vec::new(),
        }
    }

    /// Performance fees are assessed, and deferred activity released, on these periods.
    pub fn is_assessment_period(&self, period: Period) -> bool {
        self.performance_fee_period == 0 || period % self.performance_fee_period == 0
    }

    /// Whether the account was cleared for mid-year activity this period.
    pub fn has_mid_year_activity(&self, account_id: &str) -> bool {
        self.mid_year_deposits.iter().any(|id| id == account_id)
            || self.mid_year_withdrawals.iter().any(|id| id == account_id)
    }

    pub fn opening_value(&self, period: Period) -> Decimal {
        self.opening_values.get(&period).copied().unwrap_or_default()
    }
}

impl Document for Fund {
    const DOC_TYPE: &'static str = doc_types::FUND;

    fn id(&self) -> &str {
        &self.id
    }
}

/// Input model for creating a fund. Unset options fall back to the ledger settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewFund {
    pub id: String,
    pub name: String,
    pub inception_date: NaiveDate,
    #[serde(default)]
    pub has_performance_fees: Option<bool>,
    #[serde(default)]
    pub performance_fee_period: Option<u32>,
}

impl NewFund {
    pub fn validate(&self) -> Result<()> {
        ensure_not_blank("id", &self.id)?;
        ensure_not_blank("name", &self.name)?;
        if self.performance_fee_period == Some(0) {
            return Err(ValidationError::InvalidInput(
                "performanceFeePeriod must be at least 1".to_string(),
            )
            .into());
        }
        Ok(())
    }
}

/// Which mid-year list an account is added to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MidYearActivityKind {
    Deposit,
    Withdrawal,
}

/// State of a fund and its capital accounts right after a bootstrap or step.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FundPeriodResult {
    pub fund: Fund,
    pub capital_accounts: Vec<CapitalAccount>,
}
