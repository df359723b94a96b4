#![warn(missing_docs)]
//! Benchpress Statistical Engine
//!
//! Turns raw per-iteration timings into the figures reported for every task:
//! - Percentiles computed over all samples (tail latency is signal)
//! - Outlier rejection via the IQR method before central tendency
//! - Standard error and relative margin of error (Student's t)

mod margin;
mod outliers;
mod percentiles;
mod summary;

pub use margin::{critical_value, relative_margin_of_error};
pub use outliers::{OutlierAnalysis, OutlierMethod, detect_outliers};
pub use percentiles::{Percentiles, compute_percentile, compute_percentiles};
pub use summary::{SummaryStatistics, compute_summary};

