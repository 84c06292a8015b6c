pub mod config;
pub mod main_lib;
pub mod simulation;

pub use config::Config;
pub use main_lib::{build_ledger, init_tracing};
pub use simulation::{run_simulation, PeriodSummary, SimulationReport};
