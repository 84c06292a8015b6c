use super::portfolios_model::Portfolio;
use crate::errors::{NotFoundError, Result};
use crate::state::{Selector, StateTransaction};

pub(crate) fn load_portfolio(tx: &StateTransaction<'_>, portfolio_id: &str) -> Result<Portfolio> {
    tx.load::<Portfolio>(portfolio_id)?
        .ok_or_else(|| NotFoundError::Portfolio(portfolio_id.to_string()).into())
}

pub(crate) fn portfolios_by_fund(tx: &StateTransaction<'_>, fund_id: &str) -> Result<Vec<Portfolio>> {
    tx.query_documents(Selector::new().field("fund", fund_id))
}
