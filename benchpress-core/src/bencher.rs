//! Bencher - The Sampling Loop
//!
//! Drives a single task through a warm-up phase and a measurement phase and
//! collects one wall-clock sample per invocation. Statistics are computed
//! elsewhere; this module only decides how many times to call the task.

use crate::task::BenchFn;
use std::time::{Duration, Instant};

/// Default measurement time budget
pub const DEFAULT_TIME: Duration = Duration::from_millis(500);
/// Default warm-up time budget
pub const DEFAULT_WARMUP_TIME: Duration = Duration::from_millis(100);
/// Default minimum number of measured iterations
pub const DEFAULT_ITERATIONS: u64 = 10;
/// Default minimum number of warm-up iterations
pub const DEFAULT_WARMUP_ITERATIONS: u64 = 5;

/// Per-suite or per-bench overrides of the measurement configuration.
///
/// Every field is optional; unset fields fall through to the next layer
/// (bench → suite → run defaults).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BenchOptions {
    /// Minimum measurement time
    pub time: Option<Duration>,
    /// Minimum warm-up time
    pub warmup_time: Option<Duration>,
    /// Minimum measured iterations
    pub iterations: Option<u64>,
    /// Minimum warm-up iterations
    pub warmup_iterations: Option<u64>,
    /// Hard cap on measured iterations
    pub max_iterations: Option<u64>,
}

impl BenchOptions {
    /// Empty overrides
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the measurement time
    pub fn time(mut self, time: Duration) -> Self {
        self.time = Some(time);
        self
    }

    /// Set the warm-up time
    pub fn warmup_time(mut self, time: Duration) -> Self {
        self.warmup_time = Some(time);
        self
    }

    /// Set the minimum measured iterations
    pub fn iterations(mut self, n: u64) -> Self {
        self.iterations = Some(n);
        self
    }

    /// Set the minimum warm-up iterations
    pub fn warmup_iterations(mut self, n: u64) -> Self {
        self.warmup_iterations = Some(n);
        self
    }

    /// Cap the measured iterations
    pub fn max_iterations(mut self, n: u64) -> Self {
        self.max_iterations = Some(n);
        self
    }

    /// Overlay `overrides` on top of `self`; fields set in `overrides` win.
    pub fn merge(&self, overrides: &BenchOptions) -> BenchOptions {
        BenchOptions {
            time: overrides.time.or(self.time),
            warmup_time: overrides.warmup_time.or(self.warmup_time),
            iterations: overrides.iterations.or(self.iterations),
            warmup_iterations: overrides.warmup_iterations.or(self.warmup_iterations),
            max_iterations: overrides.max_iterations.or(self.max_iterations),
        }
    }
}

/// Fully resolved measurement configuration for one task
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MeasurementSettings {
    /// Minimum measurement time
    pub time: Duration,
    /// Minimum warm-up time
    pub warmup_time: Duration,
    /// Minimum measured iterations (at least one is always taken)
    pub iterations: u64,
    /// Minimum warm-up iterations
    pub warmup_iterations: u64,
    /// Hard cap on measured iterations
    pub max_iterations: Option<u64>,
}

impl Default for MeasurementSettings {
    fn default() -> Self {
        Self {
            time: DEFAULT_TIME,
            warmup_time: DEFAULT_WARMUP_TIME,
            iterations: DEFAULT_ITERATIONS,
            warmup_iterations: DEFAULT_WARMUP_ITERATIONS,
            max_iterations: None,
        }
    }
}

impl MeasurementSettings {
    /// Apply overrides on top of these settings
    pub fn resolve(&self, options: &BenchOptions) -> MeasurementSettings {
        MeasurementSettings {
            time: options.time.unwrap_or(self.time),
            warmup_time: options.warmup_time.unwrap_or(self.warmup_time),
            iterations: options.iterations.unwrap_or(self.iterations),
            warmup_iterations: options.warmup_iterations.unwrap_or(self.warmup_iterations),
            max_iterations: options.max_iterations.or(self.max_iterations),
        }
    }
}

/// Raw samples collected for one task
#[derive(Debug, Clone, Default)]
pub struct TaskSamples {
    /// Wall-clock nanoseconds per measured invocation
    pub samples_ns: Vec<f64>,
    /// Warm-up invocations performed
    pub warmup_iterations: u64,
    /// Total time spent in the measurement phase
    pub total_time: Duration,
}

/// Collects samples for a single task.
///
/// Starts in warm-up mode, where invocations are timed but discarded.
pub struct Bencher {
    samples_ns: Vec<f64>,
    warmup_iterations: u64,
    is_warmup: bool,
}

impl Bencher {
    /// Create a Bencher in warm-up mode
    pub fn new() -> Self {
        Self {
            samples_ns: Vec::new(),
            warmup_iterations: 0,
            is_warmup: true,
        }
    }

    /// Invoke the task once and record its duration
    pub async fn iter(&mut self, func: &BenchFn) -> anyhow::Result<()> {
        let start = Instant::now();
        func.call().await?;
        let elapsed = start.elapsed();

        if self.is_warmup {
            self.warmup_iterations += 1;
        } else {
            self.samples_ns.push(elapsed.as_nanos() as f64);
        }
        Ok(())
    }

    /// Switch from warm-up to measurement
    pub fn start_measurement(&mut self) {
        self.is_warmup = false;
        self.samples_ns.clear();
    }

    /// Measured iterations so far
    pub fn iteration_count(&self) -> u64 {
        self.samples_ns.len() as u64
    }

    /// Warm-up iterations so far
    pub fn warmup_count(&self) -> u64 {
        self.warmup_iterations
    }

    /// Finish and hand back the samples
    pub fn finish(self, total_time: Duration) -> TaskSamples {
        TaskSamples {
            samples_ns: self.samples_ns,
            warmup_iterations: self.warmup_iterations,
            total_time,
        }
    }
}

impl Default for Bencher {
    fn default() -> Self {
        Self::new()
    }
}

/// Run the full loop for one task: warm-up → measurement → finish.
///
/// Both phases run until their time budget AND their iteration floor are met.
/// The measurement phase stops early at `max_iterations`. Any error from the
/// task aborts the loop.
pub async fn run_task_loop(
    func: &BenchFn,
    settings: &MeasurementSettings,
) -> anyhow::Result<TaskSamples> {
    let mut bencher = Bencher::new();

    let warmup_start = Instant::now();
    while bencher.warmup_count() < settings.warmup_iterations
        || warmup_start.elapsed() < settings.warmup_time
    {
        bencher.iter(func).await?;
    }

    bencher.start_measurement();

    let min_iterations = settings.iterations.max(1);
    let max_iterations = settings
        .max_iterations
        .unwrap_or(u64::MAX)
        .max(min_iterations);
    let measure_start = Instant::now();

    loop {
        let measured = bencher.iteration_count();
        if measured >= max_iterations {
            break;
        }
        if measured >= min_iterations && measure_start.elapsed() >= settings.time {
            break;
        }
        bencher.iter(func).await?;
    }

    Ok(bencher.finish(measure_start.elapsed()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;
    use std::rc::Rc;

    fn fixed(iterations: u64, warmup_iterations: u64) -> MeasurementSettings {
        MeasurementSettings {
            time: Duration::ZERO,
            warmup_time: Duration::ZERO,
            iterations,
            warmup_iterations,
            max_iterations: None,
        }
    }

    fn counting() -> (BenchFn, Rc<Cell<u64>>) {
        let hits = Rc::new(Cell::new(0));
        let counter = hits.clone();
        (BenchFn::new(move || counter.set(counter.get() + 1)), hits)
    }

    #[test]
    fn test_merge_prefers_overrides() {
        let suite = BenchOptions::new().iterations(50).time(Duration::from_secs(1));
        let bench = BenchOptions::new().iterations(5);
        let merged = suite.merge(&bench);

        assert_eq!(merged.iterations, Some(5));
        assert_eq!(merged.time, Some(Duration::from_secs(1)));
        assert_eq!(merged.warmup_time, None);
    }

    #[test]
    fn test_resolve_falls_back_to_defaults() {
        let settings = MeasurementSettings::default().resolve(&BenchOptions::new().iterations(3));
        assert_eq!(settings.iterations, 3);
        assert_eq!(settings.time, DEFAULT_TIME);
        assert_eq!(settings.warmup_iterations, DEFAULT_WARMUP_ITERATIONS);
    }

    #[tokio::test]
    async fn test_fixed_iterations() {
        let (func, hits) = counting();
        let samples = run_task_loop(&func, &fixed(7, 2)).await.unwrap();

        assert_eq!(samples.samples_ns.len(), 7);
        assert_eq!(samples.warmup_iterations, 2);
        assert_eq!(hits.get(), 9);
    }

    #[tokio::test]
    async fn test_always_takes_one_sample() {
        let (func, hits) = counting();
        let samples = run_task_loop(&func, &fixed(0, 0)).await.unwrap();

        assert_eq!(samples.samples_ns.len(), 1);
        assert_eq!(hits.get(), 1);
    }

    #[tokio::test]
    async fn test_max_iterations_caps_time_budget() {
        let (func, _) = counting();
        let settings = MeasurementSettings {
            time: Duration::from_secs(60),
            max_iterations: Some(4),
            ..fixed(1, 0)
        };
        let samples = run_task_loop(&func, &settings).await.unwrap();
        assert_eq!(samples.samples_ns.len(), 4);
    }

    #[tokio::test]
    async fn test_error_aborts_loop() {
        let hits = Rc::new(Cell::new(0));
        let counter = hits.clone();
        let func = BenchFn::fallible(move || {
            counter.set(counter.get() + 1);
            if counter.get() == 3 {
                anyhow::bail!("third call fails");
            }
            Ok(())
        });

        let err = run_task_loop(&func, &fixed(10, 0)).await.unwrap_err();
        assert_eq!(err.to_string(), "third call fails");
        assert_eq!(hits.get(), 3);
    }
}
