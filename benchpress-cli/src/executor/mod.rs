//! Benchmark Executor
//!
//! Walks the suite tree, applies the selection rules and hands each suite's
//! runnable benches to a measurement engine as one batch.
//!
//! ## Pipeline Overview
//!
//! ```text
//! Suite tree (from the collector)
//!       │
//!       ▼
//! ┌─────────────┐
//! │  execution  │  Traverse, select, run hooks, count
//! └──────┬──────┘
//!        │  MeasurementBatch per suite
//!        ▼
//! ┌─────────────┐
//! │   engine    │  Warm-up → measurement, raw samples
//! └──────┬──────┘
//!        │
//!        ▼
//! ┌─────────────┐
//! │ statistics  │  Summaries per task (parallel)
//! └──────┬──────┘
//!        │
//!        ▼
//!    Reporter
//! ```
//!
//! ## Modules
//!
//! - [`execution`] - Tree traversal, hook ordering and run accounting
//! - [`engine`] - The measurement engine seam and its sampling implementation
//! - [`statistics`] - Parallel statistics computation

mod engine;
mod execution;
mod statistics;

pub use engine::{MeasurementBatch, MeasurementEngine, SamplingEngine, Task};
pub use execution::{ExecutionError, Runner};
pub use statistics::compute_statistics;
