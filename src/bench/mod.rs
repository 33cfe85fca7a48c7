//! Bench module - sieve kernels and the report-producing benchmark

mod runner;
mod sieve;

pub use runner::run;
