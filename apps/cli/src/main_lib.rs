use std::sync::Arc;

use fundledger_core::state::{MemoryWorldState, WorldStateTrait};
use fundledger_core::FundLedger;
use fundledger_storage_sqlite::SqliteWorldState;
use tracing_subscriber::prelude::*;
use tracing_subscriber::{fmt, EnvFilter};

use crate::config::Config;

pub fn init_tracing(log_format: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let registry = tracing_subscriber::registry().with(filter);

    if log_format.eq_ignore_ascii_case("json") {
        registry
            .with(fmt::layer().json().with_current_span(false))
            .init();
    } else {
        registry
            .with(fmt::layer().with_target(true).with_line_number(true))
            .init();
    }
}

pub fn build_ledger(config: &Config) -> anyhow::Result<FundLedger> {
    let state: Arc<dyn WorldStateTrait> = if config.is_in_memory() {
        tracing::info!("Using an in-memory world state");
        Arc::new(MemoryWorldState::new())
    } else {
        tracing::info!("World state database in use: {}", config.db_path);
        Arc::new(SqliteWorldState::open(&config.db_path)?)
    };
    Ok(FundLedger::new(state, config.ledger_settings())?)
}
