//! Action domain models.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::actions_constants::*;
use crate::constants::doc_types;
use crate::errors::{Error, ValidationError};
use crate::portfolios::Position;
use crate::state::Document;
use crate::Period;

/// Direction of a capital account action.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CapitalAccountActionType {
    Deposit,
    Withdrawal,
}

impl CapitalAccountActionType {
    pub fn as_str(&self) -> &'static str {
        match self {
            CapitalAccountActionType::Deposit => ACTION_TYPE_DEPOSIT,
            CapitalAccountActionType::Withdrawal => ACTION_TYPE_WITHDRAWAL,
        }
    }
}

impl FromStr for CapitalAccountActionType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            ACTION_TYPE_DEPOSIT => Ok(CapitalAccountActionType::Deposit),
            ACTION_TYPE_WITHDRAWAL => Ok(CapitalAccountActionType::Withdrawal),
            other => Err(ValidationError::InvalidCapitalAccountActionType(other.to_string()).into()),
        }
    }
}

impl fmt::Display for CapitalAccountActionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Direction of a portfolio action.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PortfolioActionType {
    Buy,
    Sell,
}

impl PortfolioActionType {
    pub fn as_str(&self) -> &'static str {
        match self {
            PortfolioActionType::Buy => ACTION_TYPE_BUY,
            PortfolioActionType::Sell => ACTION_TYPE_SELL,
        }
    }
}

impl FromStr for PortfolioActionType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            ACTION_TYPE_BUY => Ok(PortfolioActionType::Buy),
            ACTION_TYPE_SELL => Ok(PortfolioActionType::Sell),
            other => Err(ValidationError::InvalidPortfolioActionType(other.to_string()).into()),
        }
    }
}

impl fmt::Display for PortfolioActionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Processing status of a logged action.
///
/// Capital account actions are written `Submitted` and folded into balances by
/// a later bootstrap or step; portfolio actions are applied on arrival and
/// written `Completed`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ActionStatus {
    Submitted,
    Processing,
    Completed,
    Error,
}

/// A deposit into or withdrawal from a capital account for one period.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CapitalAccountAction {
    pub id: String,
    pub capital_account: String,
    pub fund: String,
    #[serde(rename = "type")]
    pub action_type: CapitalAccountActionType,
    pub amount: Decimal,
    /// Whether the investor asked to move the full balance. Carried for the
    /// record only; the amount is always what is applied.
    pub full: bool,
    pub status: ActionStatus,
    #[serde(default)]
    pub description: String,
    pub date: NaiveDate,
    pub period: Period,
}

impl CapitalAccountAction {
    /// Amount with its sign: deposits add, withdrawals subtract.
    pub fn signed_amount(&self) -> Decimal {
        match self.action_type {
            CapitalAccountActionType::Deposit => self.amount,
            CapitalAccountActionType::Withdrawal => -self.amount,
        }
    }
}

impl Document for CapitalAccountAction {
    const DOC_TYPE: &'static str = doc_types::CAPITAL_ACCOUNT_ACTION;

    fn id(&self) -> &str {
        &self.id
    }
}

/// A buy or sell of one security in a portfolio.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PortfolioAction {
    pub id: String,
    pub portfolio: String,
    pub fund: String,
    #[serde(rename = "type")]
    pub action_type: PortfolioActionType,
    pub security: Position,
    pub date: NaiveDate,
    pub period: Period,
    pub status: ActionStatus,
    #[serde(default)]
    pub description: String,
}

impl Document for PortfolioAction {
    const DOC_TYPE: &'static str = doc_types::PORTFOLIO_ACTION;

    fn id(&self) -> &str {
        &self.id
    }
}
