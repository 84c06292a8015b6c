//! Portfolio domain models.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::constants::doc_types;
use crate::errors::Result;
use crate::state::Document;
use crate::utils::decimal_utils::{checked_mul, ensure_not_blank, ensure_positive};
use crate::Period;

/// Holdings of a portfolio on one date, keyed by asset name.
pub type PositionSnapshot = BTreeMap<String, Position>;

/// Marked holdings of a portfolio on one date, keyed by asset name.
pub type ValuationSnapshot = BTreeMap<String, ValuedPosition>;

/// An amount of one security.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Position {
    pub name: String,
    pub cusip: String,
    pub amount: Decimal,
    pub currency: String,
}

/// A position together with the externally supplied price it was marked at.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValuedPosition {
    pub name: String,
    pub cusip: String,
    pub amount: Decimal,
    pub currency: String,
    pub price: Decimal,
}

impl ValuedPosition {
    pub fn from_position(position: &Position, price: Decimal) -> Self {
        Self {
            name: position.name.clone(),
            cusip: position.cusip.clone(),
            amount: position.amount,
            currency: position.currency.clone(),
            price,
        }
    }

    pub fn market_value(&self) -> Result<Decimal> {
        checked_mul(&format!("the market value of '{}'", self.name), self.amount, self.price)
    }
}

/// A securities portfolio owned by a fund.
///
/// `assets` holds one snapshot per date that saw a buy or sell; each snapshot is
/// an independent copy. `most_recent_date` is the latest of those dates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Portfolio {
    pub id: String,
    pub fund: String,
    pub name: String,
    #[serde(default)]
    pub most_recent_date: Option<NaiveDate>,
    #[serde(default)]
    pub assets: BTreeMap<NaiveDate, PositionSnapshot>,
    #[serde(default)]
    pub valuations: BTreeMap<NaiveDate, ValuationSnapshot>,
}

impl Portfolio {
    pub fn new(id: String, fund: String, name: String) -> Self {
        Self {
            id,
            fund,
            name,
            most_recent_date: None,
            assets: BTreeMap::new(),
            valuations: BTreeMap::new(),
        }
    }

    /// Holdings as of the most recent dated activity.
    pub fn current_positions(&self) -> Option<&PositionSnapshot> {
        self.most_recent_date.and_then(|date| self.assets.get(&date))
    }
}

impl Document for Portfolio {
    const DOC_TYPE: &'static str = doc_types::PORTFOLIO;

    fn id(&self) -> &str {
        &self.id
    }
}

/// Input model for creating a new portfolio
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewPortfolio {
    pub id: String,
    pub fund_id: String,
    pub name: String,
}

impl NewPortfolio {
    pub fn validate(&self) -> Result<()> {
        ensure_not_blank("id", &self.id)?;
        ensure_not_blank("name", &self.name)
    }
}

/// Input model for a buy or sell. `action_type` is parsed by the service.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewPortfolioAction {
    pub id: String,
    pub portfolio_id: String,
    #[serde(rename = "type")]
    pub action_type: String,
    pub date: NaiveDate,
    pub period: Period,
    pub name: String,
    pub cusip: String,
    pub amount: Decimal,
    pub currency: String,
    #[serde(default)]
    pub description: Option<String>,
}

impl NewPortfolioAction {
    pub fn validate(&self) -> Result<()> {
        ensure_not_blank("id", &self.id)?;
        ensure_not_blank("name", &self.name)?;
        ensure_positive("amount", self.amount)
    }

    pub fn security(&self) -> Position {
        Position {
            name: self.name.clone(),
            cusip: self.cusip.clone(),
            amount: self.amount.normalize(),
            currency: self.currency.clone(),
        }
    }
}
