use chrono::NaiveDate;
use rust_decimal::Decimal;

use super::benchmarks_model::{Benchmark, NewBenchmark};
use crate::errors::Result;

/// Trait for benchmark service operations
pub trait BenchmarkServiceTrait: Send + Sync {
    fn create_benchmark(&self, new_benchmark: NewBenchmark) -> Result<Benchmark>;

    /// Sets the value for `date`, replacing any earlier value for that date.
    fn record_benchmark_value(
        &self,
        benchmark_id: &str,
        date: NaiveDate,
        value: Decimal,
    ) -> Result<Benchmark>;

    fn get_benchmark(&self, benchmark_id: &str) -> Result<Option<Benchmark>>;
}
