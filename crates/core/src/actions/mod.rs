//! Transaction log - append-only capital account and portfolio actions.

mod actions_constants;
mod actions_log;
mod actions_model;


pub use actions_constants::*;
pub use actions_log::*;
pub use actions_model::{
    ActionStatus, CapitalAccountAction, CapitalAccountActionType, PortfolioAction,
    PortfolioActionType,
};
