use super::funds_model::{Fund, FundPeriodResult, MidYearActivityKind, NewFund};
use crate::errors::Result;

/// Trait for fund lifecycle operations
pub trait FundServiceTrait: Send + Sync {
    fn create_fund(&self, new_fund: NewFund) -> Result<Fund>;

    /// Moves the fund and all of its capital accounts from period 0 to period 1.
    fn bootstrap_fund(&self, fund_id: &str) -> Result<FundPeriodResult>;

    /// Closes the fund's current period and opens the next one.
    fn step_fund(&self, fund_id: &str) -> Result<FundPeriodResult>;

    /// Clears a performance-fee account for activity in the fund's current
    /// period even though it is not an assessment period.
    fn schedule_mid_year_activity(
        &self,
        fund_id: &str,
        capital_account_id: &str,
        kind: MidYearActivityKind,
    ) -> Result<Fund>;

    fn get_fund(&self, fund_id: &str) -> Result<Option<Fund>>;
    fn get_funds(&self) -> Result<Vec<Fund>>;
}
