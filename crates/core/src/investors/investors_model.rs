//! Investor domain models.

use serde::{Deserialize, Serialize};

use crate::constants::doc_types;
use crate::state::Document;

/// A named party that may hold capital accounts in one or more funds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Investor {
    pub id: String,
    pub name: String,
}

impl Document for Investor {
    const DOC_TYPE: &'static str = doc_types::INVESTOR;

    fn id(&self) -> &str {
        &self.id
    }
}

/// Input model for creating a new investor
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewInvestor {
    pub id: String,
    pub name: String,
}

impl NewInvestor {
    pub fn validate(&self) -> crate::errors::Result<()> {
        crate::utils::decimal_utils::ensure_not_blank("id", &self.id)?;
        crate::utils::decimal_utils::ensure_not_blank("name", &self.name)
    }
}
