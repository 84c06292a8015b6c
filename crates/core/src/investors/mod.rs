//! Investors module - domain models, services, and traits.

mod investors_model;
mod investors_service;
mod investors_traits;


pub use investors_model::{Investor, NewInvestor};
pub use investors_service::InvestorService;
pub use investors_traits::InvestorServiceTrait;
