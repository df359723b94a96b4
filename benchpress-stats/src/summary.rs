//! Summary Statistics
//!
//! - Mean, std-dev, standard error and margin of error from CLEANED data
//! - Min, max and percentiles from ALL data

use crate::margin::relative_margin_of_error;
use crate::outliers::{OutlierMethod, detect_outliers};
use crate::percentiles::compute_percentiles;

/// Summary of one sample distribution
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SummaryStatistics {
    /// Arithmetic mean of the cleaned samples
    pub mean: f64,
    /// Sample standard deviation of the cleaned samples
    pub std_dev: f64,
    /// Standard error of the mean
    pub sem: f64,
    /// Relative margin of error, percent of the mean
    pub rme: f64,
    /// Smallest sample
    pub min: f64,
    /// Largest sample
    pub max: f64,
    /// Median
    pub p50: f64,
    /// 75th percentile
    pub p75: f64,
    /// 99th percentile
    pub p99: f64,
    /// 99.9th percentile
    pub p999: f64,
    /// Number of samples (including outliers)
    pub sample_count: usize,
    /// Number of samples rejected as outliers
    pub outlier_count: usize,
}

/// Compute summary statistics for raw samples
pub fn compute_summary(samples: &[f64], outlier_method: OutlierMethod) -> SummaryStatistics {
    if samples.is_empty() {
        return SummaryStatistics::default();
    }

    let analysis = detect_outliers(samples, outlier_method);
    let cleaned = &analysis.cleaned_samples;
    let n = cleaned.len();

    let mean = if n == 0 {
        0.0
    } else {
        cleaned.iter().sum::<f64>() / n as f64
    };
    let std_dev = if n < 2 {
        0.0
    } else {
        let variance = cleaned.iter().map(|x| (x - mean).powi(2)).sum::<f64>() / (n - 1) as f64;
        variance.sqrt()
    };
    let sem = if n == 0 { 0.0 } else { std_dev / (n as f64).sqrt() };

    let percentiles = compute_percentiles(samples);
    let min = samples.iter().copied().fold(f64::INFINITY, f64::min);
    let max = samples.iter().copied().fold(f64::NEG_INFINITY, f64::max);

    SummaryStatistics {
        mean,
        std_dev,
        sem,
        rme: relative_margin_of_error(mean, sem, n),
        min,
        max,
        p50: percentiles.p50,
        p75: percentiles.p75,
        p99: percentiles.p99,
        p999: percentiles.p999,
        sample_count: samples.len(),
        outlier_count: analysis.outlier_count(),
    }
}
