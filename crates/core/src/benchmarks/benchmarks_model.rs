use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::constants::doc_types;
use crate::errors::Result;
use crate::state::Document;
use crate::utils::decimal_utils::ensure_not_blank;

/// A dated series of index values, e.g. a market index level per month end.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Benchmark {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub values: BTreeMap<NaiveDate, Decimal>,
}

impl Benchmark {
    /// Latest recorded value on or before `date`.
    pub fn value_as_of(&self, date: NaiveDate) -> Option<Decimal> {
        self.values.range(..=date).next_back().map(|(_, v)| *v)
    }
}

impl Document for Benchmark {
    const DOC_TYPE: &'static str = doc_types::BENCHMARK;

    fn id(&self) -> &str {
        &self.id
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewBenchmark {
    pub id: String,
    pub name: String,
}

impl NewBenchmark {
    pub fn validate(&self) -> Result<()> {
        ensure_not_blank("id", &self.id)?;
        ensure_not_blank("name", &self.name)
    }
}
