use super::funds_model::Fund;
use crate::errors::{NotFoundError, Result};
use crate::state::{Selector, StateTransaction};

pub(crate) fn load_fund(tx: &StateTransaction<'_>, fund_id: &str) -> Result<Fund> {
    tx.load::<Fund>(fund_id)?
        .ok_or_else(|| NotFoundError::Fund(fund_id.to_string()).into())
}

pub(crate) fn all_funds(tx: &StateTransaction<'_>) -> Result<Vec<Fund>> {
    tx.query_documents(Selector::new())
}
