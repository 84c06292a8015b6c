use super::capital_accounts_model::{CapitalAccount, NewCapitalAccount, NewCapitalAccountAction};
use crate::actions::CapitalAccountAction;
use crate::errors::Result;
use crate::Period;

/// Trait for capital account service operations
pub trait CapitalAccountServiceTrait: Send + Sync {
    fn create_capital_account(&self, new_account: NewCapitalAccount) -> Result<CapitalAccount>;

    /// Logs a deposit or withdrawal. Balances only change at the next bootstrap or step.
    fn record_capital_account_action(
        &self,
        new_action: NewCapitalAccountAction,
    ) -> Result<CapitalAccountAction>;

    fn get_capital_account(&self, account_id: &str) -> Result<Option<CapitalAccount>>;
    fn get_capital_accounts_by_fund(&self, fund_id: &str) -> Result<Vec<CapitalAccount>>;
    fn get_capital_accounts_by_investor(
        &self,
        fund_id: &str,
        investor_id: &str,
    ) -> Result<Vec<CapitalAccount>>;
    fn get_capital_account_action(&self, action_id: &str) -> Result<Option<CapitalAccountAction>>;
    fn get_capital_account_actions_by_fund(&self, fund_id: &str) -> Result<Vec<CapitalAccountAction>>;
    fn get_capital_account_actions_by_fund_period(
        &self,
        fund_id: &str,
        period: Period,
    ) -> Result<Vec<CapitalAccountAction>>;
    fn get_capital_account_actions_by_account_period(
        &self,
        account_id: &str,
        period: Period,
    ) -> Result<Vec<CapitalAccountAction>>;
}
