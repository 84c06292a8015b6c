use anyhow::Context;
use chrono::NaiveDate;
use rust_decimal::Decimal;
use std::str::FromStr;

use fundledger_core::settings::LedgerSettings;
use fundledger_core::utils::date_utils::parse_date;
use fundledger_core::utils::decimal_utils::parse_decimal;

const DEFAULT_DB_PATH: &str = ":memory:";
const DEFAULT_INVESTORS: usize = 50;
const DEFAULT_PERIODS: u32 = 12;
const DEFAULT_SEED: u64 = 1996;
const DEFAULT_INCEPTION_DATE: &str = "12-27-1996";

#[derive(Debug, Clone)]
pub struct Config {
    /// SQLite file, or `:memory:` for an ephemeral in-process store.
    pub db_path: String,
    pub log_format: String,
    pub investors: usize,
    pub periods: u32,
    pub seed: u64,
    pub inception_date: NaiveDate,
    pub fixed_fee: Option<Decimal>,
    pub performance_fee_period: Option<u32>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            db_path: DEFAULT_DB_PATH.to_string(),
            log_format: "text".to_string(),
            investors: DEFAULT_INVESTORS,
            periods: DEFAULT_PERIODS,
            seed: DEFAULT_SEED,
            inception_date: NaiveDate::from_ymd_opt(1996, 12, 27).unwrap_or_default(),
            fixed_fee: None,
            performance_fee_period: None,
        }
    }
}

fn parse_var<T>(name: &str) -> anyhow::Result<Option<T>>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match std::env::var(name) {
        Ok(raw) if !raw.trim().is_empty() => raw
            .trim()
            .parse::<T>()
            .map(Some)
            .with_context(|| format!("{} has an invalid value '{}'", name, raw)),
        _ => Ok(None),
    }
}

fn env_value(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|raw| !raw.trim().is_empty())
}

impl Config {
    /// Reads `FL_*` variables, loading a `.env` file first when one exists.
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        let defaults = Self::default();

        let config = Self {
            db_path: std::env::var("FL_DB_PATH").unwrap_or(defaults.db_path),
            log_format: std::env::var("FL_LOG_FORMAT").unwrap_or(defaults.log_format),
            investors: parse_var("FL_INVESTORS")?.unwrap_or(defaults.investors),
            periods: parse_var("FL_PERIODS")?.unwrap_or(defaults.periods),
            seed: parse_var("FL_SEED")?.unwrap_or(defaults.seed),
            inception_date: parse_date(
                &env_value("FL_INCEPTION_DATE").unwrap_or_else(|| DEFAULT_INCEPTION_DATE.to_string()),
            )
            .context("FL_INCEPTION_DATE is not a valid date")?,
            fixed_fee: env_value("FL_FIXED_FEE")
                .map(|raw| parse_decimal(&raw))
                .transpose()
                .context("FL_FIXED_FEE is not a valid decimal")?,
            performance_fee_period: parse_var("FL_PERFORMANCE_FEE_PERIOD")?,
        };
        if config.investors == 0 {
            anyhow::bail!("FL_INVESTORS must be at least 1");
        }
        Ok(config)
    }

    /// Ledger settings with any fee overrides from the environment applied.
    pub fn ledger_settings(&self) -> LedgerSettings {
        let mut settings = LedgerSettings::default();
        if let Some(fee) = self.fixed_fee {
            settings.default_fixed_fee = fee;
        }
        if let Some(period) = self.performance_fee_period {
            settings.performance_fee_period = period;
        }
        settings
    }

    pub fn is_in_memory(&self) -> bool {
        self.db_path == DEFAULT_DB_PATH
    }
}
