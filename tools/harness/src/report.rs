//! Benchmark reporting.
//!
//! Produces the human-readable results table and a JSON rendition of the same
//! data.

use crate::config::HarnessConfig;
use crate::error::Result;
use crate::runner::BenchmarkResult;
use chrono::{DateTime, Utc};
use collbench_suite::SUITE_NAME;
use serde::Serialize;

/// Results of one run together with the parameters that produced them.
#[derive(Debug, Clone, Serialize)]
pub struct BenchReport {
    suite_name: String,
    timestamp: DateTime<Utc>,
    config: HarnessConfig,
    results: Vec<BenchmarkResult>,
}

impl BenchReport {
    #[must_use]
    pub fn new(config: HarnessConfig, results: Vec<BenchmarkResult>) -> Self {
        Self {
            suite_name: SUITE_NAME.to_string(),
            timestamp: Utc::now(),
            config,
            results,
        }
    }

    #[must_use]
    pub fn results(&self) -> &[BenchmarkResult] {
        &self.results
    }

    /// Results table, rows sorted by benchmark name.
    ///
    /// ```text
    /// Benchmark                                                Mode  Cnt     Score    Error  Units
    /// collection_initialization.create_hash_set_from_set       avgt   25  31806.459 ± 238.937  ns/op
    /// ```
    #[must_use]
    pub fn table(&self) -> String {
        let mut rows: Vec<Row> = self.results.iter().map(Row::from_result).collect();
        rows.sort_by(|a, b| a.benchmark.cmp(&b.benchmark));

        let header = Row {
            benchmark: "Benchmark".to_string(),
            mode: "Mode".to_string(),
            count: "Cnt".to_string(),
            score: "Score".to_string(),
            error: "Error".to_string(),
            unit: "Units".to_string(),
        };

        let widths = rows.iter().fold(Widths::of(&header), |w, row| w.max(row));

        let mut out = String::new();
        header.render(&mut out, &widths, false);
        for row in &rows {
            let has_error = !row.error.is_empty();
            row.render(&mut out, &widths, has_error);
        }
        out
    }

    /// Serialize the report to pretty JSON.
    ///
    /// # Errors
    ///
    /// Returns error if serialization fails
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

/// One formatted table line.
struct Row {
    benchmark: String,
    mode: String,
    count: String,
    score: String,
    error: String,
    unit: String,
}

impl Row {
    fn from_result(result: &BenchmarkResult) -> Self {
        let stats = result.statistics();
        Self {
            benchmark: result.benchmark().to_string(),
            mode: result.mode().to_string(),
            count: stats.count().to_string(),
            score: format_number(stats.mean()),
            error: if stats.error().is_nan() {
                String::new()
            } else {
                format_number(stats.error())
            },
            unit: result.unit().to_string(),
        }
    }

    fn render(&self, out: &mut String, widths: &Widths, with_error: bool) {
        let separator = if with_error { "±" } else { " " };
        out.push_str(&format!(
            "{:<bw$}  {:>mw$}  {:>cw$}  {:>sw$} {} {:>ew$}  {}\n",
            self.benchmark,
            self.mode,
            self.count,
            self.score,
            separator,
            self.error,
            self.unit,
            bw = widths.benchmark,
            mw = widths.mode,
            cw = widths.count,
            sw = widths.score,
            ew = widths.error,
        ));
    }
}

#[derive(Clone, Copy)]
struct Widths {
    benchmark: usize,
    mode: usize,
    count: usize,
    score: usize,
    error: usize,
}

impl Widths {
    fn of(row: &Row) -> Self {
        Self {
            benchmark: row.benchmark.len(),
            mode: row.mode.len(),
            count: row.count.len(),
            score: row.score.len(),
            error: row.error.len(),
        }
    }

    fn max(self, row: &Row) -> Self {
        let other = Self::of(row);
        Self {
            benchmark: self.benchmark.max(other.benchmark),
            mode: self.mode.max(other.mode),
            count: self.count.max(other.count),
            score: self.score.max(other.score),
            error: self.error.max(other.error),
        }
    }
}

fn format_number(value: f64) -> String {
    if value.is_nan() {
        "NaN".to_string()
    } else {
        format!("{value:.3}")
    }
}
