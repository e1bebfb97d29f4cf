#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]

//! Benchmark runner driving the warmup/measure/fork protocol

use crate::config::HarnessConfig;
use crate::error::{HarnessError, Result};
use crate::metrics::{IterationRecord, RecordWriter, Statistics};
use crate::process::ForkProcess;
use collbench_suite::{Fixtures, Operation};
use itertools::Itertools;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::hint::black_box;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};
use tracing::{debug, info, warn};

/// Include pattern that selects the whole suite
pub const DEFAULT_INCLUDE: &str = ".*collection_initialization.*";

/// Lifecycle of one operation inside one fork
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    /// Process started, fixtures not built yet
    Cold,
    /// Iterations whose results are discarded
    Warmup,
    /// Iterations whose results are recorded
    Measure,
    Done,
}

impl Phase {
    /// Next phase in the lifecycle; `Done` is terminal
    #[must_use]
    pub const fn next(self) -> Self {
        match self {
            Self::Cold => Self::Warmup,
            Self::Warmup => Self::Measure,
            Self::Measure | Self::Done => Self::Done,
        }
    }
}

/// Aggregated result for one operation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BenchmarkResult {
    /// Suite-qualified operation name
    benchmark: String,

    operation: Operation,

    /// Always `avgt` (average time per invocation)
    mode: String,

    /// Always `ns/op`
    unit: String,

    statistics: Statistics,

    /// Every measurement score, fork by fork
    scores: Vec<f64>,
}

impl BenchmarkResult {
    /// Aggregate measurement records collected across all forks
    #[must_use]
    pub fn from_records(operation: Operation, records: &[IterationRecord]) -> Self {
        let scores: Vec<f64> = records.iter().map(IterationRecord::score).collect();
        Self {
            benchmark: operation.full_name(),
            operation,
            mode: "avgt".to_string(),
            unit: "ns/op".to_string(),
            statistics: Statistics::from_samples(&scores),
            scores,
        }
    }

    #[must_use]
    pub fn benchmark(&self) -> &str {
        &self.benchmark
    }

    #[must_use]
    pub const fn operation(&self) -> Operation {
        self.operation
    }

    #[must_use]
    pub fn mode(&self) -> &str {
        &self.mode
    }

    #[must_use]
    pub fn unit(&self) -> &str {
        &self.unit
    }

    #[must_use]
    pub const fn statistics(&self) -> &Statistics {
        &self.statistics
    }

    #[must_use]
    pub fn scores(&self) -> &[f64] {
        &self.scores
    }
}

/// Operations whose suite-qualified name matches `pattern`, in suite order
///
/// # Errors
///
/// Returns error if the pattern is not a valid regex or matches nothing
pub fn select_operations(pattern: &str) -> Result<Vec<Operation>> {
    let regex = Regex::new(pattern).map_err(|e| HarnessError::InvalidPattern {
        pattern: pattern.to_string(),
        reason: e.to_string(),
    })?;

    let selected: Vec<Operation> = Operation::ALL
        .into_iter()
        .filter(|op| regex.is_match(&op.full_name()))
        .collect();

    if selected.is_empty() {
        Err(HarnessError::NoMatchingOperations(pattern.to_string()))
    } else {
        Ok(selected)
    }
}

/// Invoke `operation` back to back until `budget` has elapsed
///
/// Always completes at least one invocation.
fn run_iteration(operation: Operation, fixtures: &Fixtures, budget: Duration) -> (u64, Duration) {
    let start = Instant::now();
    let mut ops = 0_u64;
    loop {
        black_box(operation.execute(black_box(fixtures)));
        ops += 1;
        let elapsed = start.elapsed();
        if elapsed >= budget {
            return (ops, elapsed);
        }
    }
}

/// Run one fork's worth of the protocol in the current process
///
/// Walks COLD → WARMUP → MEASURE → DONE: builds the fixtures, runs the warmup
/// iterations, then the measurement iterations. Every record is written to
/// `sink` as it completes; the measurement records are returned.
///
/// # Errors
///
/// Returns error if writing a record fails
pub fn run_fork<W: Write>(
    config: &HarnessConfig,
    operation: Operation,
    sink: W,
) -> Result<Vec<IterationRecord>> {
    let mut writer = RecordWriter::new(sink);
    let mut measured = Vec::with_capacity(config.measurement_iterations() as usize);

    let mut phase = Phase::Cold;
    let fixtures = Fixtures::setup();
    debug!(%operation, ?phase, "fixtures ready");

    while phase != Phase::Done {
        phase = phase.next();
        let (iterations, budget) = match phase {
            Phase::Warmup => (config.warmup_iterations(), config.warmup_time()),
            Phase::Measure => (config.measurement_iterations(), config.measurement_time()),
            Phase::Cold | Phase::Done => continue,
        };

        for index in 0..iterations {
            let (ops, elapsed) = run_iteration(operation, &fixtures, budget);
            let record = IterationRecord::new(phase, index, ops, elapsed);
            debug!(
                %operation,
                ?phase,
                index,
                ops,
                score = record.score(),
                "iteration complete"
            );
            writer.write(&record)?;
            if phase == Phase::Measure {
                measured.push(record);
            }
        }
    }

    Ok(measured)
}

/// Runs selected operations under a [`HarnessConfig`]
pub struct BenchmarkRunner {
    config: HarnessConfig,
    executable: Option<PathBuf>,
}

impl BenchmarkRunner {
    /// Create a new runner; forks re-execute the current binary
    #[must_use]
    pub const fn new(config: HarnessConfig) -> Self {
        Self {
            config,
            executable: None,
        }
    }

    /// Launch forks from `executable` instead of the current binary
    #[must_use]
    pub fn with_executable(mut self, executable: PathBuf) -> Self {
        self.executable = Some(executable);
        self
    }

    #[must_use]
    pub const fn config(&self) -> &HarnessConfig {
        &self.config
    }

    /// Measure every operation, one after another
    ///
    /// # Errors
    ///
    /// Returns the first failure; remaining operations are not run
    pub fn run(&self, operations: &[Operation]) -> Result<Vec<BenchmarkResult>> {
        operations
            .iter()
            .map(|&operation| self.run_operation(operation))
            .collect()
    }

    /// Measure one operation across all configured forks
    ///
    /// # Errors
    ///
    /// Returns error if a fork cannot be launched, fails, or reports too few
    /// measurement iterations
    pub fn run_operation(&self, operation: Operation) -> Result<BenchmarkResult> {
        info!(
            benchmark = %operation.full_name(),
            forks = self.config.forks(),
            warmup = self.config.warmup_iterations(),
            measurement = self.config.measurement_iterations(),
            "running benchmark"
        );

        let records = if self.config.forks() == 0 {
            warn!(%operation, "forking disabled, results may include warm state from earlier operations");
            run_fork(&self.config, operation, std::io::sink())?
        } else {
            let executable = self.executable()?;
            (1..=self.config.forks())
                .map(|fork| self.run_forked(&executable, operation, fork))
                .flatten_ok()
                .collect::<Result<Vec<_>>>()?
        };

        let result = BenchmarkResult::from_records(operation, &records);
        info!(
            benchmark = %result.benchmark(),
            score = result.statistics().mean(),
            error = result.statistics().error(),
            "benchmark complete"
        );
        Ok(result)
    }

    fn run_forked(
        &self,
        executable: &Path,
        operation: Operation,
        fork: u32,
    ) -> Result<Vec<IterationRecord>> {
        info!(%operation, fork, of = self.config.forks(), "starting fork");

        let records = ForkProcess::spawn(executable, operation, &self.config)?.collect(fork)?;
        check_measurements(
            operation,
            fork,
            self.config.measurement_iterations(),
            records,
        )
    }

    fn executable(&self) -> Result<PathBuf> {
        match &self.executable {
            Some(path) => Ok(path.clone()),
            None => std::env::current_exe().map_err(|e| {
                HarnessError::ForkSpawnFailed(format!("cannot locate current executable: {e}"))
            }),
        }
    }
}

/// Keep the measurement records of one fork, rejecting a short or empty run
fn check_measurements(
    operation: Operation,
    fork: u32,
    expected: u32,
    records: Vec<IterationRecord>,
) -> Result<Vec<IterationRecord>> {
    let measured: Vec<IterationRecord> = records
        .into_iter()
        .filter(|record| record.phase() == Phase::Measure)
        .collect();

    if measured.len() != expected as usize {
        return Err(HarnessError::MissingIterations {
            operation: operation.name().to_string(),
            fork,
            expected,
            actual: measured.len(),
        });
    }

    if let Some(empty) = measured.iter().find(|record| record.ops() == 0) {
        warn!(%operation, fork, index = empty.index(), "iteration completed no invocations");
        return Err(HarnessError::EmptyIteration {
            operation: operation.name().to_string(),
            fork,
            index: empty.index(),
        });
    }

    Ok(measured)
}
