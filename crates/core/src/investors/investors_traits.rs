use super::investors_model::{Investor, NewInvestor};
use crate::errors::Result;

/// Trait for investor service operations
pub trait InvestorServiceTrait: Send + Sync {
    fn create_investor(&self, new_investor: NewInvestor) -> Result<Investor>;
    fn get_investor(&self, investor_id: &str) -> Result<Option<Investor>>;
}
