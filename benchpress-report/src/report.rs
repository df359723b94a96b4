//! Report Data Structures

use benchpress_stats::SummaryStatistics;
use serde::{Deserialize, Serialize};

/// Summary of one sample distribution, as reported
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Distribution {
    pub mean: f64,
    pub min: f64,
    pub max: f64,
    pub p50: f64,
    pub p75: f64,
    pub p99: f64,
    pub p999: f64,
    pub std_dev: f64,
    pub sem: f64,
    /// Relative margin of error, percent
    pub rme: f64,
}

impl From<&SummaryStatistics> for Distribution {
    fn from(stats: &SummaryStatistics) -> Self {
        Self {
            mean: stats.mean,
            min: stats.min,
            max: stats.max,
            p50: stats.p50,
            p75: stats.p75,
            p99: stats.p99,
            p999: stats.p999,
            std_dev: stats.std_dev,
            sem: stats.sem,
            rme: stats.rme,
        }
    }
}

/// Measurement outcome for one bench
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaskResult {
    /// Bench name
    pub name: String,
    /// Nanoseconds per invocation
    pub latency: Distribution,
    /// Invocations per second
    pub throughput: Distribution,
    /// Measured invocations
    pub samples: usize,
    /// Warm-up invocations
    pub warmup_iterations: u64,
    /// Wall-clock time of the measurement phase
    pub total_time_ns: u64,
}

/// One executed suite
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SuiteReport {
    /// Suite names from the outermost ancestor down to this suite (root excluded)
    pub path: Vec<String>,
    /// Source file the suite was declared in
    pub file: Option<String>,
    /// Results in registration order
    pub results: Vec<TaskResult>,
}

impl SuiteReport {
    /// The suite's own name
    pub fn name(&self) -> &str {
        self.path.last().map(String::as_str).unwrap_or_default()
    }
}

/// Aggregate counters for one run
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunStats {
    pub benches_run: usize,
    pub benches_skipped: usize,
    pub benches_todo: usize,
    pub suites_run: usize,
    pub suites_skipped: usize,
    /// Names of `todo` benches, in tree order
    pub todo: Vec<String>,
}

impl RunStats {
    /// Every bench seen, whatever its outcome
    pub fn total_benches(&self) -> usize {
        self.benches_run + self.benches_skipped + self.benches_todo
    }

    /// Every suite seen (root excluded)
    pub fn total_suites(&self) -> usize {
        self.suites_run + self.suites_skipped
    }
}

/// End-of-run summary
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RunSummary {
    pub stats: RunStats,
    /// Number of benchmark files loaded
    pub files: usize,
    pub total_duration_ms: f64,
}
