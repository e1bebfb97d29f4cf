//! CLI command definitions using clap.

#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]

use clap::{Args, Parser, Subcommand, ValueEnum};
use collbench_harness::{DEFAULT_INCLUDE, parse_duration};
use collbench_suite::Operation;
use std::time::Duration;

/// collbench - cost of building one standard collection from another
#[derive(Parser, Debug)]
#[command(name = "collbench")]
#[command(version)]
#[command(about = "Micro-benchmarks for constructing one standard collection from another")]
#[command(
    long_about = "Measures the average time of building a LinkedList, Vec or HashSet from a pre-populated HashSet, LinkedList or Vec, in bulk or element by element. Without arguments every operation runs with 5 warmup and 5 measurement iterations of 1s in each of 5 forks."
)]
#[command(args_conflicts_with_subcommands = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    #[command(flatten)]
    pub run: RunArgs,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run the benchmarks (the default)
    Run(RunArgs),

    /// List the operations a pattern selects
    List {
        /// Regex matched against suite-qualified operation names
        #[arg(default_value = DEFAULT_INCLUDE)]
        pattern: String,
    },

    /// Run one fork of one operation, streaming iteration records to stdout
    #[command(hide = true)]
    Fork(ForkArgs),
}

/// Per-fork iteration parameters
#[derive(Args, Debug, Clone)]
pub struct ProtocolArgs {
    /// Warmup iterations per fork
    #[arg(long, default_value_t = 5)]
    pub warmup_iterations: u32,

    /// Length of one warmup iteration (e.g. 1s, 200ms)
    #[arg(long, default_value = "1s", value_parser = parse_time)]
    pub warmup_time: Duration,

    /// Measurement iterations per fork
    #[arg(long, default_value_t = 5)]
    pub measurement_iterations: u32,

    /// Length of one measurement iteration (e.g. 1s, 200ms)
    #[arg(long, default_value = "1s", value_parser = parse_time)]
    pub measurement_time: Duration,
}

#[derive(Args, Debug, Clone)]
pub struct RunArgs {
    /// Regex matched against suite-qualified operation names
    #[arg(default_value = DEFAULT_INCLUDE)]
    pub pattern: String,

    #[command(flatten)]
    pub protocol: ProtocolArgs,

    /// Forks per operation; 0 measures in this process
    #[arg(short, long, default_value_t = 5)]
    pub forks: u32,

    /// Output format of the results
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,
}

#[derive(Args, Debug, Clone)]
pub struct ForkArgs {
    /// Operation to measure
    #[arg(long)]
    pub operation: Operation,

    #[command(flatten)]
    pub protocol: ProtocolArgs,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// Aligned results table
    Text,
    /// Pretty-printed JSON report
    Json,
}

fn parse_time(text: &str) -> Result<Duration, String> {
    parse_duration(text).map_err(|e| e.to_string())
}
