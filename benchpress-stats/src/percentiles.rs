//! Percentile Computation
//!
//! Percentiles are always taken from the raw samples. Dropping outliers here
//! would hide exactly the tail behaviour p99/p999 exist to show.

/// Percentiles reported for a distribution
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Percentiles {
    /// 50th percentile (median)
    pub p50: f64,
    /// 75th percentile
    pub p75: f64,
    /// 99th percentile
    pub p99: f64,
    /// 99.9th percentile
    pub p999: f64,
}

/// Compute a single percentile from unsorted samples.
///
/// Uses linear interpolation between nearest ranks. Returns 0.0 for an empty slice.
pub fn compute_percentile(samples: &[f64], percentile: f64) -> f64 {
    let sorted = sorted_copy(samples);
    percentile_of_sorted(&sorted, percentile)
}

/// Compute every reported percentile with a single sort
pub fn compute_percentiles(samples: &[f64]) -> Percentiles {
    let sorted = sorted_copy(samples);
    Percentiles {
        p50: percentile_of_sorted(&sorted, 50.0),
        p75: percentile_of_sorted(&sorted, 75.0),
        p99: percentile_of_sorted(&sorted, 99.0),
        p999: percentile_of_sorted(&sorted, 99.9),
    }
}

pub(crate) fn sorted_copy(samples: &[f64]) -> Vec<f64> {
    let mut sorted = samples.to_vec();
    sorted.sort_by(|a, b| a.total_cmp(b));
    sorted
}

pub(crate) fn percentile_of_sorted(sorted: &[f64], percentile: f64) -> f64 {
    match sorted.len() {
        0 => 0.0,
        1 => sorted[0],
        n => {
            let rank = (percentile / 100.0).clamp(0.0, 1.0) * (n - 1) as f64;
            let lower = rank.floor() as usize;
            let upper = (lower + 1).min(n - 1);
            let fraction = rank - lower as f64;
            sorted[lower] + fraction * (sorted[upper] - sorted[lower])
        }
    }
}
