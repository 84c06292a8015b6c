use fundledger_cli::{build_ledger, init_tracing, run_simulation, Config};

fn main() -> anyhow::Result<()> {
    let config = Config::from_env()?;
    init_tracing(&config.log_format);
    let ledger = build_ledger(&config)?;

    tracing::info!(
        "Simulating {} investors over {} periods (seed {})",
        config.investors,
        config.periods,
        config.seed
    );
    let report = run_simulation(&ledger, &config)?;
    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}
