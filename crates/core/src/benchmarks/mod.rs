//! Benchmarks module - named reference series a fund can be compared against.

mod benchmarks_model;
mod benchmarks_service;
mod benchmarks_traits;


pub use benchmarks_model::{Benchmark, NewBenchmark};
pub use benchmarks_service::BenchmarkService;
pub use benchmarks_traits::BenchmarkServiceTrait;
