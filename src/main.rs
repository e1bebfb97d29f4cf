//! # collbench
//!
//! Entry point of the collection-initialization benchmarks.
//!
//! Without arguments every operation is measured with the standard protocol
//! (5 warmup and 5 measurement iterations of 1s, in each of 5 forks) and a
//! results table is printed to stdout. Logs go to stderr, filtered by
//! `RUST_LOG` (default `info`).
//!
//! The hidden `fork` subcommand is what each fork runs: it measures a single
//! operation and streams JSON iteration records to stdout for the parent.

#![forbid(unsafe_code)]
#![deny(clippy::unwrap_used)]
#![deny(clippy::panic)]
#![deny(clippy::expect_used)]

mod cli;

use std::process;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use cli::{Cli, Commands, ForkArgs, OutputFormat, ProtocolArgs, RunArgs};
use collbench_harness::{
    BenchReport, BenchmarkRunner, HarnessConfig, format_duration, run_fork, select_operations,
};

fn main() {
    init_tracing();

    if let Err(e) = run() {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        None => run_benchmarks(&cli.run),
        Some(Commands::Run(args)) => run_benchmarks(&args),
        Some(Commands::List { pattern }) => list_operations(&pattern),
        Some(Commands::Fork(args)) => run_single_fork(&args),
    }
}

/// Initialize tracing subscriber with environment filter, writing to stderr.
fn init_tracing() {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn harness_config(protocol: &ProtocolArgs, forks: u32) -> Result<HarnessConfig> {
    HarnessConfig::new(
        protocol.warmup_iterations,
        protocol.warmup_time,
        protocol.measurement_iterations,
        protocol.measurement_time,
        forks,
    )
    .context("Invalid benchmark parameters")
}

fn run_benchmarks(args: &RunArgs) -> Result<()> {
    let config = harness_config(&args.protocol, args.forks)?;
    let operations = select_operations(&args.pattern).context("Cannot select benchmarks")?;

    info!(
        benchmarks = operations.len(),
        warmup = %format!(
            "{} x {}",
            config.warmup_iterations(),
            format_duration(config.warmup_time())
        ),
        measurement = %format!(
            "{} x {}",
            config.measurement_iterations(),
            format_duration(config.measurement_time())
        ),
        forks = config.forks(),
        "starting run"
    );

    let results = BenchmarkRunner::new(config.clone())
        .run(&operations)
        .context("Benchmark run aborted")?;
    let report = BenchReport::new(config, results);

    match args.format {
        OutputFormat::Text => print!("{}", report.table()),
        OutputFormat::Json => println!("{}", report.to_json()?),
    }
    Ok(())
}

fn list_operations(pattern: &str) -> Result<()> {
    let operations = select_operations(pattern).context("Cannot select benchmarks")?;
    for operation in operations {
        println!("{}", operation.full_name());
    }
    Ok(())
}

fn run_single_fork(args: &ForkArgs) -> Result<()> {
    let config = harness_config(&args.protocol, 0)?;
    let stdout = std::io::stdout().lock();
    run_fork(&config, args.operation, stdout)
        .with_context(|| format!("Fork of {} failed", args.operation))?;
    Ok(())
}
