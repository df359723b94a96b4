//! Margin of Error
//!
//! Two-tailed 95% Student's t critical values, falling back to the normal
//! approximation once the degrees of freedom exceed the table.

const T_TABLE_95: [f64; 30] = [
    12.706, 4.303, 3.182, 2.776, 2.571, 2.447, 2.365, 2.306, 2.262, 2.228, 2.201, 2.179, 2.16,
    2.145, 2.131, 2.12, 2.11, 2.101, 2.093, 2.086, 2.08, 2.074, 2.069, 2.064, 2.06, 2.056, 2.052,
    2.048, 2.045, 2.042,
];

const Z_95: f64 = 1.96;

/// Critical value for the given degrees of freedom
pub fn critical_value(degrees_of_freedom: usize) -> f64 {
    match degrees_of_freedom {
        0 => 0.0,
        df if df <= T_TABLE_95.len() => T_TABLE_95[df - 1],
        _ => Z_95,
    }
}

/// Relative margin of error in percent of the mean.
///
/// Returns 0.0 when the mean is zero or there are fewer than two samples.
pub fn relative_margin_of_error(mean: f64, standard_error: f64, sample_count: usize) -> f64 {
    if mean == 0.0 || sample_count < 2 {
        return 0.0;
    }
    let margin = standard_error * critical_value(sample_count - 1);
    (margin / mean).abs() * 100.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_critical_values() {
        assert_eq!(critical_value(0), 0.0);
        assert!((critical_value(1) - 12.706).abs() < 1e-9);
        assert!((critical_value(30) - 2.042).abs() < 1e-9);
        assert!((critical_value(500) - 1.96).abs() < 1e-9);
    }

    #[test]
    fn test_rme() {
        // sem 1.0 over 100 samples, mean 100 -> 1.96%
        let rme = relative_margin_of_error(100.0, 1.0, 100);
        assert!((rme - 1.96).abs() < 1e-9);
    }

    #[test]
    fn test_rme_degenerate() {
        assert_eq!(relative_margin_of_error(0.0, 1.0, 10), 0.0);
        assert_eq!(relative_margin_of_error(10.0, 1.0, 1), 0.0);
    }
}
