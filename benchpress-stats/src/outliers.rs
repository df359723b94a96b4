//! Outlier Detection
//!
//! Tukey fences on the interquartile range. Outliers are only excluded from
//! mean and spread; min, max and percentiles keep every sample.

use crate::percentiles::{percentile_of_sorted, sorted_copy};

/// Method for outlier detection
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum OutlierMethod {
    /// Samples outside [Q1 - k*IQR, Q3 + k*IQR] are outliers
    Iqr {
        /// Fence multiplier (1.5 is Tukey's classic value)
        k: f64,
    },
    /// Keep every sample
    None,
}

impl Default for OutlierMethod {
    fn default() -> Self {
        OutlierMethod::Iqr { k: 1.5 }
    }
}

/// Result of outlier analysis
#[derive(Debug, Clone)]
pub struct OutlierAnalysis {
    /// Samples inside the fences, in original order
    pub cleaned_samples: Vec<f64>,
    /// Number of samples below the lower fence
    pub low_outlier_count: usize,
    /// Number of samples above the upper fence
    pub high_outlier_count: usize,
    /// Lower fence
    pub lower_bound: f64,
    /// Upper fence
    pub upper_bound: f64,
}

impl OutlierAnalysis {
    /// Total number of rejected samples
    pub fn outlier_count(&self) -> usize {
        self.low_outlier_count + self.high_outlier_count
    }
}

/// Detect outliers in samples using the given method
pub fn detect_outliers(samples: &[f64], method: OutlierMethod) -> OutlierAnalysis {
    let k = match method {
        OutlierMethod::Iqr { k } if samples.len() >= 4 => k,
        _ => {
            return OutlierAnalysis {
                cleaned_samples: samples.to_vec(),
                low_outlier_count: 0,
                high_outlier_count: 0,
                lower_bound: f64::NEG_INFINITY,
                upper_bound: f64::INFINITY,
            };
        }
    };

    let sorted = sorted_copy(samples);
    let q1 = percentile_of_sorted(&sorted, 25.0);
    let q3 = percentile_of_sorted(&sorted, 75.0);
    let iqr = q3 - q1;
    let lower_bound = q1 - k * iqr;
    let upper_bound = q3 + k * iqr;

    let mut analysis = OutlierAnalysis {
        cleaned_samples: Vec::with_capacity(samples.len()),
        low_outlier_count: 0,
        high_outlier_count: 0,
        lower_bound,
        upper_bound,
    };
    for &sample in samples {
        if sample < lower_bound {
            analysis.low_outlier_count += 1;
        } else if sample > upper_bound {
            analysis.high_outlier_count += 1;
        } else {
            analysis.cleaned_samples.push(sample);
        }
    }
    analysis
}
