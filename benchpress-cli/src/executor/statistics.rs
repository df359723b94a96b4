//! Statistics Computation
//!
//! Turns raw per-task samples into latency and throughput distributions.
//! Tasks are independent, so Rayon spreads them across threads.

use benchpress_core::TaskSamples;
use benchpress_report::{Distribution, TaskResult};
use benchpress_stats::{OutlierMethod, compute_summary};
use rayon::prelude::*;

const NANOS_PER_SEC: f64 = 1e9;

/// Compute results for `(name, samples)` pairs, preserving input order.
///
/// Callers must not pass empty sample sets.
pub fn compute_statistics(raw: Vec<(String, TaskSamples)>) -> Vec<TaskResult> {
    raw.into_par_iter()
        .map(|(name, samples)| {
            let latency = compute_summary(&samples.samples_ns, OutlierMethod::default());

            // ops/sec per sample; zero-duration samples carry no rate
            let rates: Vec<f64> = samples
                .samples_ns
                .iter()
                .filter(|&&ns| ns > 0.0)
                .map(|&ns| NANOS_PER_SEC / ns)
                .collect();
            let throughput = compute_summary(&rates, OutlierMethod::default());

            TaskResult {
                name,
                latency: Distribution::from(&latency),
                throughput: Distribution::from(&throughput),
                samples: samples.samples_ns.len(),
                warmup_iterations: samples.warmup_iterations,
                total_time_ns: samples.total_time.as_nanos() as u64,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    fn samples(values: &[f64]) -> TaskSamples {
        TaskSamples {
            samples_ns: values.to_vec(),
            warmup_iterations: 3,
            total_time: Duration::from_micros(10),
        }
    }

    #[test]
    fn test_order_is_preserved() {
        let raw = (0..16)
            .map(|i| (format!("task-{i}"), samples(&[100.0, 110.0, 90.0])))
            .collect();
        let results = compute_statistics(raw);
        let names: Vec<_> = results.iter().map(|r| r.name.as_str()).collect();
        let expected: Vec<_> = (0..16).map(|i| format!("task-{i}")).collect();
        assert_eq!(names, expected);
    }

    #[test]
    fn test_latency_and_throughput() {
        let results = compute_statistics(vec![("flat".to_string(), samples(&[1000.0; 8]))]);
        let result = &results[0];

        assert_eq!(result.samples, 8);
        assert_eq!(result.warmup_iterations, 3);
        assert_eq!(result.total_time_ns, 10_000);
        assert!((result.latency.mean - 1000.0).abs() < 1e-9);
        assert!((result.throughput.mean - 1_000_000.0).abs() < 1e-3);
        assert_eq!(result.latency.rme, 0.0);
    }
}
