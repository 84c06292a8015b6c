use log::debug;
use std::sync::Arc;

use super::investors_model::{Investor, NewInvestor};
use super::investors_traits::InvestorServiceTrait;
use crate::errors::{Error, Result};
use crate::state::{execute, StateTransaction, WorldStateTrait};

/// Service for managing investors
pub struct InvestorService {
    state: Arc<dyn WorldStateTrait>,
}

impl InvestorService {
    pub fn new(state: Arc<dyn WorldStateTrait>) -> Self {
        Self { state }
    }
}

impl InvestorServiceTrait for InvestorService {
    fn create_investor(&self, new_investor: NewInvestor) -> Result<Investor> {
        debug!("Creating investor {}", new_investor.id);
        new_investor.validate()?;

        execute(self.state.as_ref(), |tx| {
            if tx.exists(&new_investor.id)? {
                return Err(Error::IdAlreadyInUse(new_investor.id.clone()));
            }
            let investor = Investor {
                id: new_investor.id.clone(),
                name: new_investor.name.trim().to_string(),
            };
            tx.save(&investor)?;
            Ok(investor)
        })
    }

    fn get_investor(&self, investor_id: &str) -> Result<Option<Investor>> {
        StateTransaction::new(self.state.as_ref()).load(investor_id)
    }
}
