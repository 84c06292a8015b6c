//! Capital accounts module - investor stakes in a fund and their per-period math.

mod capital_account_calculator;
mod capital_accounts_model;
mod capital_accounts_service;
mod capital_accounts_store;
mod capital_accounts_traits;


pub use capital_account_calculator::{
    bootstrap_capital_account, calculate_fixed_fees, update_closing_value, update_ownership,
};
pub use capital_accounts_model::{
    CapitalAccount, HighWaterMark, NewCapitalAccount, NewCapitalAccountAction,
};
pub use capital_accounts_service::CapitalAccountService;
pub(crate) use capital_accounts_store::capital_accounts_by_fund;
pub use capital_accounts_traits::CapitalAccountServiceTrait;
