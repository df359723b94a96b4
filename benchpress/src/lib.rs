#![warn(missing_docs)]
//! # Benchpress
//!
//! Declarative benchmark suites for Rust.
//!
//! Bench files describe a tree of suites and benches through a small DSL;
//! the harness collects every linked file, filters the tree and measures
//! what remains:
//! - **Suites**: `describe` blocks nest arbitrarily and carry lifecycle hooks
//! - **Modes**: `skip`, `only` and `todo` on suites and benches
//! - **Filtering**: a regex over suite and bench names, a glob over file paths
//! - **Async**: benches and hooks may be sync or async
//! - **Reporting**: a tree view grouped by file, or a JSON document for tooling
//!
//! ## Quick Start
//!
//! ```ignore
//! use benchpress::prelude::*;
//!
//! #[bench_file]
//! fn sorting(s: &mut SuiteBuilder<'_>) {
//!     s.describe("Array Sorting", |s| {
//!         s.bench("sort", || {
//!             let mut v = vec![5, 3, 1, 4, 2];
//!             v.sort();
//!             black_box(v);
//!         });
//!         s.bench_skip("bubble", || {});
//!         s.bench_todo("quick");
//!     });
//! }
//!
//! fn main() -> anyhow::Result<()> {
//!     benchpress::run()
//! }
//! ```
//!
//! ## Hooks and Async Benches
//!
//! ```ignore
//! s.describe("cache", |s| {
//!     s.before_all(|| warm_cache());
//!     s.before_each(|| reset_counters());
//!     s.bench_async("lookup", || async {
//!         lookup("key").await;
//!     });
//! });
//! ```

// Re-export core types
pub use benchpress_core::{
    BenchCase, BenchFileDef, BenchFn, BenchFuture, BenchMode, BenchOptions, Collector, HookKind,
    MeasurementSettings, RegistrationError, Suite, SuiteBuilder, SuiteMode, registered_files,
};

// Re-export macros
pub use benchpress_macros::bench_file;

// Re-export reporting
pub use benchpress_report::{
    Distribution, JsonReporter, OutputFormat, PrettyReporter, ReportError, Reporter, RunStats,
    RunSummary, SuiteReport, TaskResult,
};

// Re-export stats
pub use benchpress_stats::{SummaryStatistics, compute_summary};

// Re-export the harness
pub use benchpress_cli::{
    BenchpressConfig, Cli, ExecutionError, MeasurementBatch, MeasurementEngine, RunOptions, Runner,
    SamplingEngine, Selection, execute_run, run_with_cli,
};

/// Internal re-exports for macro use
#[doc(hidden)]
pub mod internal {
    pub use inventory;
}

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::{BenchFn, BenchOptions, HookKind, SuiteBuilder, bench_file};
    pub use std::hint::black_box;
}

/// Run the Benchpress CLI harness.
///
/// Call this from your benchmark binary's `main()`:
/// ```ignore
/// fn main() -> anyhow::Result<()> {
///     benchpress::run()
/// }
/// ```
pub use benchpress_cli::run;
