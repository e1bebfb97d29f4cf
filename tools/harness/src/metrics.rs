#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]

//! Iteration records and their aggregation

use crate::error::{HarnessError, Result};
use crate::runner::Phase;
use serde::{Deserialize, Serialize};
use std::io::{BufRead, Write};
use std::time::Duration;

/// Outcome of one warmup or measurement iteration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IterationRecord {
    /// Phase the iteration ran in
    phase: Phase,

    /// Zero-based index within the phase
    index: u32,

    /// Completed invocations of the operation
    ops: u64,

    /// Wall-clock time spent on those invocations (nanoseconds)
    elapsed_ns: u64,
}

impl IterationRecord {
    /// Create a new iteration record
    #[must_use]
    #[allow(clippy::cast_possible_truncation)]
    pub fn new(phase: Phase, index: u32, ops: u64, elapsed: Duration) -> Self {
        Self {
            phase,
            index,
            ops,
            elapsed_ns: elapsed.as_nanos().min(u128::from(u64::MAX)) as u64,
        }
    }

    #[must_use]
    pub const fn phase(&self) -> Phase {
        self.phase
    }

    #[must_use]
    pub const fn index(&self) -> u32 {
        self.index
    }

    #[must_use]
    pub const fn ops(&self) -> u64 {
        self.ops
    }

    #[must_use]
    pub const fn elapsed_ns(&self) -> u64 {
        self.elapsed_ns
    }

    /// Average time per invocation in nanoseconds
    ///
    /// NaN when no invocation completed.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn score(&self) -> f64 {
        if self.ops == 0 {
            f64::NAN
        } else {
            self.elapsed_ns as f64 / self.ops as f64
        }
    }
}

/// Writes iteration records as JSON lines
pub struct RecordWriter<W: Write> {
    sink: W,
}

impl<W: Write> RecordWriter<W> {
    /// Create a new record writer
    pub const fn new(sink: W) -> Self {
        Self { sink }
    }

    /// Append one record and flush, so a reading parent sees it immediately
    ///
    /// # Errors
    ///
    /// Returns error if serialization or the write fails
    pub fn write(&mut self, record: &IterationRecord) -> Result<()> {
        let json = serde_json::to_string(record)?;
        writeln!(self.sink, "{json}")?;
        self.sink.flush()?;
        Ok(())
    }
}

/// Read every record from a JSON-lines stream
///
/// Blank lines are skipped.
///
/// # Errors
///
/// Returns error if the stream cannot be read or a line is not a record
pub fn read_records<R: BufRead>(reader: R) -> Result<Vec<IterationRecord>> {
    reader
        .lines()
        .map(|line_result| line_result.map_err(HarnessError::from))
        .filter(|line| line.as_ref().map_or(true, |l| !l.trim().is_empty()))
        .map(|line| {
            let line = line?;
            serde_json::from_str(&line)
                .map_err(|e| HarnessError::MalformedForkOutput(format!("'{line}': {e}")))
        })
        .collect()
}

/// Mean and 99.9% confidence error over a set of scores
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Statistics {
    /// Number of samples
    count: usize,

    /// Arithmetic mean
    mean: f64,

    /// Half-width of the 99.9% Student-t confidence interval; NaN below two samples
    error: f64,

    /// Sample standard deviation
    stdev: f64,

    min: f64,

    max: f64,
}

impl Statistics {
    /// Summarize a slice of scores
    ///
    /// An empty slice yields NaN for every moment.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn from_samples(samples: &[f64]) -> Self {
        let count = samples.len();
        if count == 0 {
            return Self {
                count,
                mean: f64::NAN,
                error: f64::NAN,
                stdev: f64::NAN,
                min: f64::NAN,
                max: f64::NAN,
            };
        }

        let n = count as f64;
        let mean = samples.iter().sum::<f64>() / n;
        let min = samples.iter().copied().fold(f64::INFINITY, f64::min);
        let max = samples.iter().copied().fold(f64::NEG_INFINITY, f64::max);

        let (stdev, error) = if count < 2 {
            (f64::NAN, f64::NAN)
        } else {
            let variance = samples.iter().map(|s| (s - mean).powi(2)).sum::<f64>() / (n - 1.0);
            let stdev = variance.sqrt();
            let error = student_t_999(count - 1) * stdev / n.sqrt();
            (stdev, error)
        };

        Self {
            count,
            mean,
            error,
            stdev,
            min,
            max,
        }
    }

    #[must_use]
    pub const fn count(&self) -> usize {
        self.count
    }

    #[must_use]
    pub const fn mean(&self) -> f64 {
        self.mean
    }

    #[must_use]
    pub const fn error(&self) -> f64 {
        self.error
    }

    #[must_use]
    pub const fn stdev(&self) -> f64 {
        self.stdev
    }

    #[must_use]
    pub const fn min(&self) -> f64 {
        self.min
    }

    #[must_use]
    pub const fn max(&self) -> f64 {
        self.max
    }
}

/// Two-sided 99.9% critical value of Student's t (the 0.9995 quantile)
///
/// Exact table values up to 30 degrees of freedom, interpolated in `1/df`
/// beyond that and converging on the normal quantile.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn student_t_999(degrees_of_freedom: usize) -> f64 {
    const TABLE: [f64; 30] = [
        636.619, 31.599, 12.924, 8.610, 6.869, 5.959, 5.408, 5.041, 4.781, 4.587, 4.437, 4.318,
        4.221, 4.140, 4.073, 4.015, 3.965, 3.922, 3.883, 3.850, 3.819, 3.792, 3.768, 3.745, 3.725,
        3.707, 3.690, 3.674, 3.659, 3.646,
    ];
    const ANCHORS: [(usize, f64); 4] = [(30, 3.646), (40, 3.551), (60, 3.460), (120, 3.373)];
    const NORMAL: f64 = 3.291;

    if degrees_of_freedom == 0 {
        return f64::NAN;
    }
    if let Some(&value) = TABLE.get(degrees_of_freedom - 1) {
        return value;
    }

    let inverse = 1.0 / degrees_of_freedom as f64;
    ANCHORS
        .windows(2)
        .find_map(|pair| match pair {
            [(lo_df, lo_t), (hi_df, hi_t)] if degrees_of_freedom <= *hi_df => {
                let lo_inv = 1.0 / *lo_df as f64;
                let hi_inv = 1.0 / *hi_df as f64;
                let weight = (inverse - hi_inv) / (lo_inv - hi_inv);
                Some(hi_t + weight * (lo_t - hi_t))
            }
            _ => None,
        })
        .unwrap_or_else(|| {
            let (last_df, last_t) = ANCHORS[ANCHORS.len() - 1];
            NORMAL + (last_t - NORMAL) * (last_df as f64 * inverse)
        })
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    #![allow(clippy::expect_used)]
    #![allow(clippy::panic)]

    use super::*;
    use proptest::prelude::*;
    use std::io::Cursor;

    #[test]
    fn test_record_score() {
        let record = IterationRecord::new(Phase::Measure, 0, 4, Duration::from_nanos(2_000));
        assert!((record.score() - 500.0).abs() < f64::EPSILON);
        assert_eq!(record.elapsed_ns(), 2_000);
    }

    #[test]
    fn test_record_without_ops_scores_nan() {
        let record = IterationRecord::new(Phase::Warmup, 0, 0, Duration::from_millis(1));
        assert!(record.score().is_nan());
    }

    #[test]
    fn test_record_wire_format() {
        let record = IterationRecord::new(Phase::Measure, 3, 10, Duration::from_nanos(42));
        let json = serde_json::to_string(&record).unwrap();
        assert_eq!(
            json,
            r#"{"phase":"measure","index":3,"ops":10,"elapsed_ns":42}"#
        );
    }

    #[test]
    fn test_writer_and_reader_agree() {
        let mut buffer = Vec::new();
        let records = vec![
            IterationRecord::new(Phase::Warmup, 0, 7, Duration::from_micros(5)),
            IterationRecord::new(Phase::Measure, 0, 9, Duration::from_micros(6)),
        ];
        {
            let mut writer = RecordWriter::new(&mut buffer);
            for record in &records {
                writer.write(record).unwrap();
            }
        }

        let read = read_records(Cursor::new(buffer)).unwrap();
        assert_eq!(read, records);
    }

    #[test]
    fn test_reader_skips_blank_lines() {
        let input = "\n{\"phase\":\"measure\",\"index\":0,\"ops\":1,\"elapsed_ns\":5}\n\n";
        let read = read_records(Cursor::new(input)).unwrap();
        assert_eq!(read.len(), 1);
    }

    #[test]
    fn test_reader_rejects_garbage() {
        let read = read_records(Cursor::new("fork --operation x\n"));
        assert!(matches!(read, Err(HarnessError::MalformedForkOutput(_))));
    }

    #[test]
    fn test_statistics_known_samples() {
        let samples = [10.0, 12.0, 14.0, 16.0, 18.0];
        let stats = Statistics::from_samples(&samples);

        assert_eq!(stats.count(), 5);
        assert!((stats.mean() - 14.0).abs() < 1e-9);
        // sample variance = 40 / 4 = 10
        assert!((stats.stdev() - 10.0_f64.sqrt()).abs() < 1e-9);
        let expected_error = 8.610 * 10.0_f64.sqrt() / 5.0_f64.sqrt();
        assert!((stats.error() - expected_error).abs() < 1e-9);
        assert!((stats.min() - 10.0).abs() < f64::EPSILON);
        assert!((stats.max() - 18.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_statistics_single_sample_has_no_error() {
        let stats = Statistics::from_samples(&[3.0]);
        assert!((stats.mean() - 3.0).abs() < f64::EPSILON);
        assert!(stats.error().is_nan());
    }

    #[test]
    fn test_statistics_empty() {
        let stats = Statistics::from_samples(&[]);
        assert_eq!(stats.count(), 0);
        assert!(stats.mean().is_nan());
    }

    #[test]
    fn test_student_t_table() {
        assert!(student_t_999(0).is_nan());
        assert!((student_t_999(1) - 636.619).abs() < 1e-9);
        // 5 forks x 5 iterations
        assert!((student_t_999(24) - 3.745).abs() < 1e-9);
        assert!((student_t_999(30) - 3.646).abs() < 1e-9);
        assert!((student_t_999(40) - 3.551).abs() < 1e-9);
        assert!((student_t_999(120) - 3.373).abs() < 1e-9);
    }

    #[test]
    fn test_student_t_between_anchors() {
        let t = student_t_999(50);
        assert!(t < 3.551 && t > 3.460);
        assert!(student_t_999(10_000) > 3.291);
        assert!(student_t_999(10_000) < 3.3);
    }

    proptest! {
        #[test]
        fn prop_student_t_decreases(df in 1usize..5_000) {
            prop_assert!(student_t_999(df + 1) <= student_t_999(df));
        }

        #[test]
        fn prop_mean_within_bounds(samples in prop::collection::vec(0.0f64..1e9, 1..64)) {
            let stats = Statistics::from_samples(&samples);
            prop_assert!(stats.mean() >= stats.min() - 1e-6);
            prop_assert!(stats.mean() <= stats.max() + 1e-6);
            if samples.len() > 1 {
                prop_assert!(stats.error() >= 0.0);
            }
        }
    }
}
