#![warn(missing_docs)]
//! Benchpress Core - Suite Tree and Collection
//!
//! This crate provides the declaration side of benchpress:
//! - `Suite`/`BenchCase` tree with run, skip, only and todo modes
//! - `Collector` and the `SuiteBuilder` DSL that fills it
//! - `BenchFn`, the uniform sync/async operation type for benches and hooks
//! - `Bencher`, the warm-up/measurement sampling loop
//! - The registry of benchmark files submitted via `#[bench_file]`

mod bencher;
mod collector;
mod suite;
mod task;

pub use bencher::{
    BenchOptions, Bencher, DEFAULT_ITERATIONS, DEFAULT_TIME, DEFAULT_WARMUP_ITERATIONS,
    DEFAULT_WARMUP_TIME, MeasurementSettings, TaskSamples, run_task_loop,
};
pub use collector::{Collector, RegistrationError, SuiteBuilder};
pub use suite::{BenchCase, BenchMode, HookKind, Hooks, ROOT_SUITE_NAME, Suite, SuiteMode};
pub use task::{BenchFn, BenchFuture};

/// Benchmark file registered via `#[bench_file]`
#[derive(Debug, Clone)]
pub struct BenchFileDef {
    /// Name of the registering function
    pub name: &'static str,
    /// Source file path, used as provenance and for discovery globs
    pub file: &'static str,
    /// Source line number
    pub line: u32,
    /// Module path
    pub module_path: &'static str,
    /// Declares the file's suites
    pub register_fn: fn(&mut SuiteBuilder<'_>),
}

inventory::collect!(BenchFileDef);

/// Every benchmark file linked into this binary, sorted by path then line
pub fn registered_files() -> Vec<&'static BenchFileDef> {
    let mut files: Vec<_> = inventory::iter::<BenchFileDef>.into_iter().collect();
    files.sort_by_key(|f| (f.file, f.line));
    files
}

/// Anchor to prevent LTO from stripping inventory entries
#[used]
#[doc(hidden)]
pub static REGISTRY_ANCHOR: fn() = || for _ in inventory::iter::<BenchFileDef> {};
