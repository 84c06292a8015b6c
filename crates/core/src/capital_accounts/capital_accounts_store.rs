use super::capital_accounts_model::CapitalAccount;
use crate::errors::{NotFoundError, Result};
use crate::state::{Selector, StateTransaction};

pub(crate) fn load_capital_account(
    tx: &StateTransaction<'_>,
    account_id: &str,
) -> Result<CapitalAccount> {
    tx.load::<CapitalAccount>(account_id)?
        .ok_or_else(|| NotFoundError::CapitalAccount(account_id.to_string()).into())
}

pub(crate) fn capital_accounts_by_fund(
    tx: &StateTransaction<'_>,
    fund_id: &str,
) -> Result<Vec<CapitalAccount>> {
    tx.query_documents(Selector::new().field("fund", fund_id))
}

pub(crate) fn capital_accounts_by_investor(
    tx: &StateTransaction<'_>,
    fund_id: &str,
    investor_id: &str,
) -> Result<Vec<CapitalAccount>> {
    tx.query_documents(
        Selector::new()
            .field("fund", fund_id)
            .field("investor", investor_id),
    )
}
