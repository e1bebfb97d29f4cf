#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]

//! Fork processes: fresh copies of the benchmark binary running one operation

use crate::config::HarnessConfig;
use crate::error::{HarnessError, Result};
use crate::metrics::{IterationRecord, read_records};
use collbench_suite::Operation;
use std::io::BufReader;
use std::path::Path;
use std::process::{Child, Command, Stdio};

/// Subcommand a fork is launched with
pub const FORK_SUBCOMMAND: &str = "fork";

/// Wrapper for managing a running fork
pub struct ForkProcess {
    /// The child process handle
    child: Child,

    operation: Operation,
}

impl ForkProcess {
    /// Launch `executable fork --operation <name> <per-fork parameters>`
    ///
    /// The child's stdout is captured for iteration records; stderr is
    /// inherited so its logs reach the user.
    ///
    /// # Errors
    ///
    /// Returns error if the process cannot be spawned
    ///
    /// # Examples
    ///
    /// ```no_run
    /// # use collbench_harness::{ForkProcess, HarnessConfig};
    /// # use collbench_suite::Operation;
    /// # use std::path::Path;
    /// let fork = ForkProcess::spawn(
    ///     Path::new("target/release/collbench"),
    ///     Operation::CreateHashSetFromSet,
    ///     &HarnessConfig::standard(),
    /// );
    /// ```
    pub fn spawn(executable: &Path, operation: Operation, config: &HarnessConfig) -> Result<Self> {
        let mut cmd = Command::new(executable);
        cmd.args(Self::arguments(operation, config))
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::inherit());

        let child = cmd.spawn().map_err(|e| {
            HarnessError::ForkSpawnFailed(format!("failed to spawn {}: {e}", executable.display()))
        })?;

        Ok(Self { child, operation })
    }

    /// Process ID of the fork
    #[must_use]
    pub fn pid(&self) -> u32 {
        self.child.id()
    }

    /// Read every record the fork emits, then wait for it to exit
    ///
    /// `fork` is the 1-based fork number, used in error messages.
    ///
    /// # Errors
    ///
    /// Returns error if:
    /// - the fork exits unsuccessfully
    /// - a line of its output is not an iteration record
    /// - waiting on the process fails
    pub fn collect(mut self, fork: u32) -> Result<Vec<IterationRecord>> {
        let records = match self.child.stdout.take() {
            Some(stdout) => read_records(BufReader::new(stdout)),
            None => Ok(Vec::new()),
        };

        let status = self.child.wait()?;
        if !status.success() {
            return Err(HarnessError::ForkFailed {
                operation: self.operation.name().to_string(),
                fork,
                status: status.to_string(),
            });
        }

        records
    }

    fn arguments(operation: Operation, config: &HarnessConfig) -> Vec<String> {
        let mut args = vec![
            FORK_SUBCOMMAND.to_string(),
            "--operation".to_string(),
            operation.name().to_string(),
        ];
        args.extend(config.to_fork_args());
        args
    }
}
