//! Capital account domain models.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::constants::{doc_types, GENERAL_PARTNER_NUMBER};
use crate::errors::Result;
use crate::state::Document;
use crate::utils::decimal_utils::{ensure_not_blank, ensure_positive, ensure_rate};
use crate::Period;

/// Highest closing value on which a performance fee has been assessed.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HighWaterMark {
    pub amount: Decimal,
    pub period: Period,
}

/// One investor's stake in one fund.
///
/// Every per-period map is keyed by period number. `ownership_percentages[P]`
/// only exists once period P has been bootstrapped or stepped.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CapitalAccount {
    pub id: String,
    pub fund: String,
    pub investor: String,
    pub number: u32,
    pub current_period: Period,
    pub closing_values: BTreeMap<Period, Decimal>,
    pub opening_values: BTreeMap<Period, Decimal>,
    pub deposits: BTreeMap<Period, Decimal>,
    pub fixed_fees: BTreeMap<Period, Decimal>,
    pub performance_fees: BTreeMap<Period, Decimal>,
    pub ownership_percentages: BTreeMap<Period, Decimal>,
    pub fixed_fee: Decimal,
    pub has_performance_fees: bool,
    pub performance_fee_rate: Decimal,
    pub high_water_mark: HighWaterMark,
    /// Net activity held back until the next performance-fee assessment.
    #[serde(default)]
    pub deferred_deposits: Decimal,
}

impl CapitalAccount {
    pub fn is_general_partner(&self) -> bool {
        self.number == GENERAL_PARTNER_NUMBER
    }

    pub fn closing_value(&self, period: Period) -> Decimal {
        self.closing_values.get(&period).copied().unwrap_or_default()
    }

    pub fn opening_value(&self, period: Period) -> Decimal {
        self.opening_values.get(&period).copied().unwrap_or_default()
    }

    pub fn deposit(&self, period: Period) -> Decimal {
        self.deposits.get(&period).copied().unwrap_or_default()
    }

    pub fn fixed_fee_for(&self, period: Period) -> Decimal {
        self.fixed_fees.get(&period).copied().unwrap_or_default()
    }
}

impl Document for CapitalAccount {
    const DOC_TYPE: &'static str = doc_types::CAPITAL_ACCOUNT;

    fn id(&self) -> &str {
        &self.id
    }
}

/// Input model for opening a capital account.
///
/// Unset rates fall back to the ledger settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewCapitalAccount {
    pub id: String,
    pub fund_id: String,
    pub investor_id: String,
    #[serde(default)]
    pub has_performance_fees: bool,
    #[serde(default)]
    pub performance_fee_rate: Option<Decimal>,
    #[serde(default)]
    pub fixed_fee: Option<Decimal>,
}

impl NewCapitalAccount {
    pub fn validate(&self) -> Result<()> {
        ensure_not_blank("id", &self.id)?;
        if let Some(rate) = self.performance_fee_rate {
            ensure_rate("performanceFeeRate", rate)?;
        }
        if let Some(fee) = self.fixed_fee {
            ensure_rate("fixedFee", fee)?;
        }
        Ok(())
    }
}

/// Input model for a deposit or withdrawal. `action_type` is parsed by the service.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewCapitalAccountAction {
    pub id: String,
    pub capital_account_id: String,
    #[serde(rename = "type")]
    pub action_type: String,
    pub amount: Decimal,
    #[serde(default)]
    pub full: bool,
    pub date: NaiveDate,
    pub period: Period,
    #[serde(default)]
    pub description: Option<String>,
}

impl NewCapitalAccountAction {
    pub fn validate(&self) -> Result<()> {
        ensure_not_blank("id", &self.id)?;
        ensure_positive("amount", self.amount)
    }
}
