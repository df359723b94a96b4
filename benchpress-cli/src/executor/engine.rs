//! Measurement Engine
//!
//! The executor never times anything itself. It builds one
//! [`MeasurementBatch`] per suite and hands it to a [`MeasurementEngine`],
//! which returns one [`TaskResult`] per task in batch order.

use super::execution::ExecutionError;
use super::statistics::compute_statistics;
use benchpress_core::{BenchFn, BenchOptions, MeasurementSettings, run_task_loop};
use benchpress_report::TaskResult;

/// One measurable task, already wrapped with its per-invocation hooks
#[derive(Debug, Clone)]
pub struct Task {
    /// Bench name
    pub name: String,
    /// beforeEach hooks, the bench, then afterEach hooks
    pub func: BenchFn,
    /// Effective overrides (suite defaults overlaid with the bench's own)
    pub options: BenchOptions,
}

/// The runnable benches of one suite
#[derive(Debug, Clone)]
pub struct MeasurementBatch {
    /// Suite names from the top-level suite down, root excluded
    pub path: Vec<String>,
    /// Tasks in declaration order
    pub tasks: Vec<Task>,
}

impl MeasurementBatch {
    /// Name of the suite this batch belongs to
    pub fn suite_name(&self) -> String {
        self.path.last().cloned().unwrap_or_default()
    }
}

/// Measures a batch of tasks.
///
/// Any task failure aborts the batch with an error.
#[allow(async_fn_in_trait)]
pub trait MeasurementEngine {
    /// Measure every task; results come back in task order
    async fn run_batch(&mut self, batch: MeasurementBatch) -> Result<Vec<TaskResult>, ExecutionError>;
}

impl<E: MeasurementEngine + ?Sized> MeasurementEngine for &mut E {
    async fn run_batch(&mut self, batch: MeasurementBatch) -> Result<Vec<TaskResult>, ExecutionError> {
        (**self).run_batch(batch).await
    }
}

/// Engine that samples each task sequentially with wall-clock timing
#[derive(Debug, Clone, Default)]
pub struct SamplingEngine {
    defaults: MeasurementSettings,
}

impl SamplingEngine {
    /// Create an engine with run-wide default settings
    pub fn new(defaults: MeasurementSettings) -> Self {
        Self { defaults }
    }
}

impl MeasurementEngine for SamplingEngine {
    async fn run_batch(&mut self, batch: MeasurementBatch) -> Result<Vec<TaskResult>, ExecutionError> {
        let suite = batch.suite_name();
        let mut raw = Vec::with_capacity(batch.tasks.len());

        for task in batch.tasks {
            let settings = self.defaults.resolve(&task.options);
            tracing::debug!(
                suite = %suite,
                bench = %task.name,
                time_ms = settings.time.as_millis() as u64,
                iterations = settings.iterations,
                "measuring"
            );

            let samples = run_task_loop(&task.func, &settings)
                .await
                .map_err(|source| ExecutionError::Bench {
                    suite: suite.clone(),
                    bench: task.name.clone(),
                    source,
                })?;

            if samples.samples_ns.is_empty() {
                return Err(ExecutionError::Measurement {
                    suite,
                    message: format!("bench `{}` produced no samples", task.name),
                });
            }
            raw.push((task.name, samples));
        }

        Ok(compute_statistics(raw))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;
    use std::rc::Rc;
    use std::time::Duration;

    fn quick() -> MeasurementSettings {
        MeasurementSettings {
            time: Duration::ZERO,
            warmup_time: Duration::ZERO,
            iterations: 4,
            warmup_iterations: 2,
            max_iterations: None,
        }
    }

    fn batch(tasks: Vec<Task>) -> MeasurementBatch {
        MeasurementBatch {
            path: vec!["outer".into(), "inner".into()],
            tasks,
        }
    }

    #[tokio::test]
    async fn test_sampling_engine_counts_invocations() {
        let calls = Rc::new(Cell::new(0u64));
        let counter = calls.clone();
        let task = Task {
            name: "count".into(),
            func: BenchFn::new(move || counter.set(counter.get() + 1)),
            options: BenchOptions::default(),
        };

        let mut engine = SamplingEngine::new(quick());
        let results = engine.run_batch(batch(vec![task])).await.unwrap();

        assert_eq!(results.len(), 1);
        assert_eq!(results[0].name, "count");
        assert_eq!(results[0].samples, 4);
        assert_eq!(results[0].warmup_iterations, 2);
        assert_eq!(calls.get(), 6);
    }

    #[tokio::test]
    async fn test_task_options_override_defaults() {
        let task = Task {
            name: "capped".into(),
            func: BenchFn::noop(),
            options: BenchOptions::new().iterations(7).warmup_iterations(0),
        };
        let mut engine = SamplingEngine::new(quick());
        let results = engine.run_batch(batch(vec![task])).await.unwrap();
        assert_eq!(results[0].samples, 7);
    }

    #[tokio::test]
    async fn test_failure_names_suite_and_bench() {
        let task = Task {
            name: "broken".into(),
            func: BenchFn::fallible(|| anyhow::bail!("boom")),
            options: BenchOptions::default(),
        };
        let mut engine = SamplingEngine::new(quick());
        let err = engine.run_batch(batch(vec![task])).await.unwrap_err();

        match err {
            ExecutionError::Bench { suite, bench, .. } => {
                assert_eq!(suite, "inner");
                assert_eq!(bench, "broken");
            }
            other => panic!("unexpected error: {other}"),
        }
    }
}
