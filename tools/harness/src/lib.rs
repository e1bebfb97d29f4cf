#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]

//! Measurement harness for the collection-initialization suite
//!
//! Runs each selected operation through warmup and measurement iterations of a
//! fixed wall-clock length, in a configurable number of fresh processes
//! ("forks"), and aggregates the per-iteration average times into a mean with a
//! 99.9% confidence error.
//!
//! A fork is the benchmark binary itself, re-executed with the `fork`
//! subcommand. It builds the fixtures, runs the protocol for one operation and
//! writes one JSON record per iteration to stdout.

pub mod config;
pub mod error;
pub mod metrics;
pub mod process;
pub mod report;
pub mod runner;

pub use config::{HarnessConfig, format_duration, parse_duration};
pub use error::{HarnessError, Result};
pub use metrics::{IterationRecord, RecordWriter, Statistics, read_records, student_t_999};
pub use process::{FORK_SUBCOMMAND, ForkProcess};
pub use report::BenchReport;
pub use runner::{
    BenchmarkResult, BenchmarkRunner, DEFAULT_INCLUDE, Phase, run_fork, select_operations,
};
