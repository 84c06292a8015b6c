use chrono::NaiveDate;
use log::debug;
use rust_decimal::Decimal;
use std::collections::BTreeMap;
use std::sync::Arc;

use super::benchmarks_model::{Benchmark, NewBenchmark};
use super::benchmarks_traits::BenchmarkServiceTrait;
use crate::errors::{Error, NotFoundError, Result};
use crate::state::{execute, StateTransaction, WorldStateTrait};

pub struct BenchmarkService {
    state: Arc<dyn WorldStateTrait>,
}

impl BenchmarkService {
    pub fn new(state: Arc<dyn WorldStateTrait>) -> Self {
        Self { state }
    }
}

impl BenchmarkServiceTrait for BenchmarkService {
    fn create_benchmark(&self, new_benchmark: NewBenchmark) -> Result<Benchmark> {
        debug!("Creating benchmark {}", new_benchmark.id);
        new_benchmark.validate()?;

        execute(self.state.as_ref(), |tx| {
            if tx.exists(&new_benchmark.id)? {
                return Err(Error::IdAlreadyInUse(new_benchmark.id.clone()));
            }
            let benchmark = Benchmark {
                id: new_benchmark.id.clone(),
                name: new_benchmark.name.trim().to_string(),
                values: BTreeMap::new(),
            };
            tx.save(&benchmark)?;
            Ok(benchmark)
        })
    }

    fn record_benchmark_value(
        &self,
        benchmark_id: &str,
        date: NaiveDate,
        value: Decimal,
    ) -> Result<Benchmark> {
        execute(self.state.as_ref(), |tx| {
            let mut benchmark = tx
                .load::<Benchmark>(benchmark_id)?
                .ok_or_else(|| NotFoundError::Benchmark(benchmark_id.to_string()))?;
            benchmark.values.insert(date, value.normalize());
            tx.save(&benchmark)?;
            Ok(benchmark)
        })
    }

    fn get_benchmark(&self, benchmark_id: &str) -> Result<Option<Benchmark>> {
        StateTransaction::new(self.state.as_ref()).load(benchmark_id)
    }
}
