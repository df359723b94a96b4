#![warn(missing_docs)]
//! Benchpress Report - Results and Reporters
//!
//! The executor hands every executed suite and the final run summary to a
//! [`Reporter`]. Two are provided:
//! - Pretty (tree view grouped by source file, rendered when the run completes)
//! - JSON (flat list of per-suite bundles written to a file at the end)

mod json;
mod pretty;
mod report;

pub use json::{EnvInfo, JsonReport, JsonReporter, ReportMeta, SuiteResultBundle, generate_json_report};
pub use pretty::{PrettyReporter, format_summary, format_thousands};
pub use report::{Distribution, RunStats, RunSummary, SuiteReport, TaskResult};

use thiserror::Error;

/// Errors raised while emitting a report
#[derive(Debug, Error)]
pub enum ReportError {
    #[error("failed to write report: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to serialize report: {0}")]
    Json(#[from] serde_json::Error),
}

/// Receives results as the executor produces them
pub trait Reporter {
    /// Called once per executed suite, after its `afterAll` hooks
    fn on_suite(&mut self, report: &SuiteReport) -> Result<(), ReportError>;

    /// Called once after the whole tree has been traversed
    fn on_finish(&mut self, summary: &RunSummary) -> Result<(), ReportError>;
}

/// Output format selection
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// Tree view on stdout
    Pretty,
    /// JSON document written to a file
    Json,
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "pretty" | "human" => Ok(OutputFormat::Pretty),
            "json" => Ok(OutputFormat::Json),
            other => Err(format!("Unknown reporter: {}", other)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_output_format_parse() {
        assert_eq!("pretty".parse::<OutputFormat>(), Ok(OutputFormat::Pretty));
        assert_eq!("JSON".parse::<OutputFormat>(), Ok(OutputFormat::Json));
        assert!("html".parse::<OutputFormat>().is_err());
    }
}
