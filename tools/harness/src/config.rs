#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]

//! Configuration for the measurement protocol

use crate::error::{HarnessError, Result};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Longest accepted warmup or measurement iteration
const MAX_ITERATION_TIME: Duration = Duration::from_secs(3600);

/// Upper bound on forks per operation
const MAX_FORKS: u32 = 100;

/// Warmup/measurement/fork parameters for a run
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HarnessConfig {
    /// Iterations run and discarded before measuring
    warmup_iterations: u32,

    /// Wall-clock length of one warmup iteration
    warmup_time: Duration,

    /// Iterations whose scores are recorded
    measurement_iterations: u32,

    /// Wall-clock length of one measurement iteration
    measurement_time: Duration,

    /// Fresh processes per operation; 0 measures in the current process
    forks: u32,
}

impl HarnessConfig {
    /// Create a new configuration with validation
    ///
    /// # Errors
    ///
    /// Returns error if:
    /// - `measurement_iterations` is 0
    /// - an iteration time that will be used is zero or longer than one hour
    /// - `forks` exceeds 100
    ///
    /// # Examples
    ///
    /// ```
    /// # use collbench_harness::HarnessConfig;
    /// # use std::time::Duration;
    /// let config = HarnessConfig::new(
    ///     3,
    ///     Duration::from_millis(500),
    ///     5,
    ///     Duration::from_secs(1),
    ///     2,
    /// );
    /// assert!(config.is_ok());
    /// ```
    pub fn new(
        warmup_iterations: u32,
        warmup_time: Duration,
        measurement_iterations: u32,
        measurement_time: Duration,
        forks: u32,
    ) -> Result<Self> {
        if measurement_iterations == 0 {
            return Err(HarnessError::InvalidConfig(
                "measurement iterations must be greater than 0".to_string(),
            ));
        }
        if warmup_iterations > 0 {
            Self::validate_iteration_time("warmup", warmup_time)?;
        }
        Self::validate_iteration_time("measurement", measurement_time)?;
        if forks > MAX_FORKS {
            return Err(HarnessError::TooManyForks(forks, MAX_FORKS));
        }

        Ok(Self {
            warmup_iterations,
            warmup_time,
            measurement_iterations,
            measurement_time,
            forks,
        })
    }

    /// The standard protocol
    ///
    /// Uses:
    /// - Warmup: 5 iterations of 1s
    /// - Measurement: 5 iterations of 1s
    /// - Forks: 5
    #[must_use]
    pub const fn standard() -> Self {
        Self {
            warmup_iterations: 5,
            warmup_time: Duration::from_secs(1),
            measurement_iterations: 5,
            measurement_time: Duration::from_secs(1),
            forks: 5,
        }
    }

    #[must_use]
    pub const fn warmup_iterations(&self) -> u32 {
        self.warmup_iterations
    }

    #[must_use]
    pub const fn warmup_time(&self) -> Duration {
        self.warmup_time
    }

    #[must_use]
    pub const fn measurement_iterations(&self) -> u32 {
        self.measurement_iterations
    }

    #[must_use]
    pub const fn measurement_time(&self) -> Duration {
        self.measurement_time
    }

    #[must_use]
    pub const fn forks(&self) -> u32 {
        self.forks
    }

    /// Same parameters with forking disabled, as seen from inside a fork
    #[must_use]
    pub const fn in_process(&self) -> Self {
        Self {
            forks: 0,
            ..*self
        }
    }

    /// Command-line arguments that reproduce the per-fork parameters in a child
    #[must_use]
    pub fn to_fork_args(&self) -> Vec<String> {
        vec![
            "--warmup-iterations".to_string(),
            self.warmup_iterations.to_string(),
            "--warmup-time".to_string(),
            format_duration(self.warmup_time),
            "--measurement-iterations".to_string(),
            self.measurement_iterations.to_string(),
            "--measurement-time".to_string(),
            format_duration(self.measurement_time),
        ]
    }

    fn validate_iteration_time(label: &str, time: Duration) -> Result<()> {
        if time.is_zero() {
            Err(HarnessError::InvalidConfig(format!(
                "{label} time must be greater than 0"
            )))
        } else if time > MAX_ITERATION_TIME {
            Err(HarnessError::IterationTimeTooLong(
                time.as_millis(),
                MAX_ITERATION_TIME.as_millis(),
            ))
        } else {
            Ok(())
        }
    }
}

impl Default for HarnessConfig {
    fn default() -> Self {
        Self::standard()
    }
}

/// Parse an iteration time such as `1s`, `250ms` or `500us`
///
/// # Errors
///
/// Returns [`HarnessError::InvalidDuration`] for a missing or unknown unit or a
/// non-numeric amount.
pub fn parse_duration(text: &str) -> Result<Duration> {
    let text = text.trim();
    let invalid = || HarnessError::InvalidDuration(text.to_string());

    let split = text
        .find(|c: char| !c.is_ascii_digit())
        .ok_or_else(invalid)?;
    let (amount, unit) = text.split_at(split);
    let amount: u64 = amount.parse().map_err(|_| invalid())?;

    match unit {
        "s" => Ok(Duration::from_secs(amount)),
        "ms" => Ok(Duration::from_millis(amount)),
        "us" => Ok(Duration::from_micros(amount)),
        _ => Err(invalid()),
    }
}

/// Render a duration in the coarsest unit [`parse_duration`] reads back exactly
#[must_use]
pub fn format_duration(duration: Duration) -> String {
    if duration.subsec_nanos() == 0 {
        format!("{}s", duration.as_secs())
    } else if duration.subsec_nanos() % 1_000_000 == 0 {
        format!("{}ms", duration.as_millis())
    } else {
        format!("{}us", duration.as_micros())
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    #![allow(clippy::expect_used)]
    #![allow(clippy::panic)]

    use super::*;

    #[test]
    fn test_standard_protocol() {
        let config = HarnessConfig::standard();
        assert_eq!(config.warmup_iterations(), 5);
        assert_eq!(config.warmup_time(), Duration::from_secs(1));
        assert_eq!(config.measurement_iterations(), 5);
        assert_eq!(config.measurement_time(), Duration::from_secs(1));
        assert_eq!(config.forks(), 5);
        assert_eq!(HarnessConfig::default(), config);
    }

    #[test]
    fn test_valid_config() {
        let config = HarnessConfig::new(
            1,
            Duration::from_millis(10),
            2,
            Duration::from_millis(10),
            0,
        );
        assert!(config.is_ok());
    }

    #[test]
    fn test_zero_measurement_iterations() {
        let config = HarnessConfig::new(5, Duration::from_secs(1), 0, Duration::from_secs(1), 5);
        assert!(matches!(config, Err(HarnessError::InvalidConfig(_))));
    }

    #[test]
    fn test_zero_measurement_time() {
        let config = HarnessConfig::new(5, Duration::from_secs(1), 5, Duration::ZERO, 5);
        assert!(matches!(config, Err(HarnessError::InvalidConfig(_))));
    }

    #[test]
    fn test_warmup_time_ignored_without_warmup() {
        let config = HarnessConfig::new(0, Duration::ZERO, 5, Duration::from_secs(1), 5);
        assert!(config.is_ok());
    }

    #[test]
    fn test_iteration_time_too_long() {
        let config = HarnessConfig::new(
            5,
            Duration::from_secs(2 * 3600),
            5,
            Duration::from_secs(1),
            5,
        );
        assert!(matches!(
            config,
            Err(HarnessError::IterationTimeTooLong(_, _))
        ));
    }

    #[test]
    fn test_too_many_forks() {
        let config = HarnessConfig::new(5, Duration::from_secs(1), 5, Duration::from_secs(1), 101);
        assert!(matches!(config, Err(HarnessError::TooManyForks(101, 100))));
    }

    #[test]
    fn test_in_process_keeps_iterations() {
        let config = HarnessConfig::standard().in_process();
        assert_eq!(config.forks(), 0);
        assert_eq!(config.measurement_iterations(), 5);
    }

    #[test]
    fn test_fork_args() {
        let config =
            HarnessConfig::new(2, Duration::from_millis(250), 3, Duration::from_secs(1), 4)
                .unwrap();
        assert_eq!(
            config.to_fork_args(),
            vec![
                "--warmup-iterations",
                "2",
                "--warmup-time",
                "250ms",
                "--measurement-iterations",
                "3",
                "--measurement-time",
                "1s",
            ]
        );
    }

    #[test]
    fn test_parse_duration_units() {
        assert_eq!(parse_duration("1s").unwrap(), Duration::from_secs(1));
        assert_eq!(parse_duration("250ms").unwrap(), Duration::from_millis(250));
        assert_eq!(parse_duration("500us").unwrap(), Duration::from_micros(500));
        assert_eq!(parse_duration(" 2s ").unwrap(), Duration::from_secs(2));
    }

    #[test]
    fn test_parse_duration_rejects_garbage() {
        for text in ["", "10", "s", "1.5s", "10m", "-1s", "1 s"] {
            assert!(
                matches!(parse_duration(text), Err(HarnessError::InvalidDuration(_))),
                "{text}"
            );
        }
    }

    #[test]
    fn test_format_duration_picks_exact_unit() {
        assert_eq!(format_duration(Duration::from_secs(3)), "3s");
        assert_eq!(format_duration(Duration::from_millis(1500)), "1500ms");
        assert_eq!(format_duration(Duration::from_micros(2_500)), "2500us");
    }
}
