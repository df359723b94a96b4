//! JSON Output
//!
//! Collects one bundle per executed suite and writes a single document at
//! the end of the run.

use crate::report::{RunSummary, SuiteReport, TaskResult};
use crate::{ReportError, Reporter};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Schema version of the JSON document
pub const SCHEMA_VERSION: u32 = 1;

/// Complete JSON document
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JsonReport {
    /// Run metadata
    pub meta: ReportMeta,
    /// Per-suite result bundles in execution order
    pub results: Vec<SuiteResultBundle>,
    /// Aggregate counters and timing
    pub summary: RunSummary,
}

/// Report metadata
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportMeta {
    /// Document schema version
    pub schema_version: u32,
    /// When the report was written
    pub timestamp: DateTime<Utc>,
    /// Environment the run happened in
    pub env: EnvInfo,
}

/// Environment information
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnvInfo {
    /// benchpress version
    pub benchpress_version: String,
    /// Target operating system
    pub os: String,
    /// Target architecture
    pub arch: String,
}

impl EnvInfo {
    /// Describe the current process
    pub fn current() -> Self {
        Self {
            benchpress_version: env!("CARGO_PKG_VERSION").to_string(),
            os: std::env::consts::OS.to_string(),
            arch: std::env::consts::ARCH.to_string(),
        }
    }
}

/// Results of one executed suite
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SuiteResultBundle {
    /// Suite name
    pub suite: String,
    /// Ancestor path including the suite itself (root excluded)
    pub path: Vec<String>,
    /// Source file
    pub file: Option<String>,
    /// Task results
    pub tasks: Vec<TaskResult>,
}

/// Generate a prettified JSON document.
pub fn generate_json_report(report: &JsonReport) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(report)
}

/// Reporter writing a [`JsonReport`] to a file when the run finishes
pub struct JsonReporter {
    path: PathBuf,
    bundles: Vec<SuiteResultBundle>,
}

impl JsonReporter {
    /// Reporter writing to `path`
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            bundles: Vec::new(),
        }
    }

    /// Destination path
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Reporter for JsonReporter {
    fn on_suite(&mut self, report: &SuiteReport) -> Result<(), ReportError> {
        if !report.results.is_empty() {
            self.bundles.push(SuiteResultBundle {
                suite: report.name().to_string(),
                path: report.path.clone(),
                file: report.file.clone(),
                tasks: report.results.clone(),
            });
        }
        Ok(())
    }

    fn on_finish(&mut self, summary: &RunSummary) -> Result<(), ReportError> {
        let report = JsonReport {
            meta: ReportMeta {
                schema_version: SCHEMA_VERSION,
                timestamp: Utc::now(),
                env: EnvInfo::current(),
            },
            results: std::mem::take(&mut self.bundles),
            summary: summary.clone(),
        };

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(&self.path, generate_json_report(&report)?)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::report::{Distribution, RunStats};

    fn result(name: &str) -> TaskResult {
        TaskResult {
            name: name.to_string(),
            latency: Distribution::default(),
            throughput: Distribution::default(),
            samples: 10,
            warmup_iterations: 0,
            total_time_ns: 1_000,
        }
    }

    #[test]
    fn test_writes_only_suites_with_results() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out").join("results.json");
        let mut reporter = JsonReporter::new(&path);

        reporter
            .on_suite(&SuiteReport {
                path: vec!["Focused Suite".to_string()],
                file: Some("benches/example.rs".to_string()),
                results: vec![result("a"), result("b")],
            })
            .unwrap();
        reporter
            .on_suite(&SuiteReport {
                path: vec!["Empty".to_string()],
                file: None,
                results: Vec::new(),
            })
            .unwrap();

        let summary = RunSummary {
            stats: RunStats {
                benches_run: 2,
                suites_run: 1,
                ..Default::default()
            },
            files: 1,
            total_duration_ms: 12.5,
        };
        reporter.on_finish(&summary).unwrap();

        let written: JsonReport =
            serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(written.meta.schema_version, SCHEMA_VERSION);
        assert_eq!(written.results.len(), 1);
        assert_eq!(written.results[0].suite, "Focused Suite");
        assert_eq!(written.results[0].tasks.len(), 2);
        assert_eq!(written.summary, summary);
    }

    #[test]
    fn test_env_info() {
        let env = EnvInfo::current();
        assert_eq!(env.os, std::env::consts::OS);
        assert!(!env.benchpress_version.is_empty());
    }
}
