//! Statistics Calculator Module
//! Descriptive price statistics for a set of listings.

use statrs::statistics::Statistics;

/// Descriptive statistics for a price column.
#[derive(Debug, Clone, PartialEq)]
pub struct PriceSummary {
    pub count: usize,
    pub mean: f64,
    pub median: f64,
    /// Sample standard deviation; undefined below two values.
    pub std: Option<f64>,
    pub p25: f64,
    pub p75: f64,
}

/// Handles descriptive statistics over plain value slices.
pub struct StatsCalculator;

impl StatsCalculator {
    /// Compute descriptive statistics for an array of values.
    pub fn compute_price_summary(values: &[f64]) -> Option<PriceSummary> {
        let n = values.len();
        if n == 0 {
            return None;
        }

        let mut sorted = values.to_vec();
        sorted.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));

        let median = if n % 2 == 0 {
            (sorted[n / 2 - 1] + sorted[n / 2]) / 2.0
        } else {
            sorted[n / 2]
        };

        let std = if n > 1 {
            Some(values.iter().std_dev())
        } else {
            None
        };

        Some(PriceSummary {
            count: n,
            mean: values.iter().mean(),
            median,
            std,
            p25: Self::percentile(&sorted, 25.0),
            p75: Self::percentile(&sorted, 75.0),
        })
    }

    /// Calculate percentile using linear interpolation (NumPy compatible).
    pub fn percentile(sorted_values: &[f64], p: f64) -> f64 {
        let n = sorted_values.len();
        if n == 0 {
            return f64::NAN;
        }
        if n == 1 {
            return sorted_values[0];
        }

        let rank = (p / 100.0) * (n - 1) as f64;
        let lower = rank.floor() as usize;
        let upper = (rank.ceil() as usize).min(n - 1);
        let frac = rank - lower as f64;

        if lower == upper {
            sorted_values[lower]
        } else {
            sorted_values[lower] * (1.0 - frac) + sorted_values[upper] * frac
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn summary_matches_pandas() {
        let prices = [40.0, 120.0, 75.0, 250.0, 95.0, 50.0];
        let summary = StatsCalculator::compute_price_summary(&prices).unwrap();

        assert_eq!(summary.count, 6);
        assert!(close(summary.mean, 105.0));
        assert!(close(summary.median, 85.0));
        assert!(close(summary.p25, 56.25));
        assert!(close(summary.p75, 113.75));
        let std = summary.std.unwrap();
        assert!((std - 5900f64.sqrt()).abs() < 1e-9);
    }

    #[test]
    fn odd_count_median() {
        let summary = StatsCalculator::compute_price_summary(&[3.0, 1.0, 2.0]).unwrap();
        assert_eq!(summary.median, 2.0);
        assert_eq!(summary.p25, 1.5);
        assert_eq!(summary.p75, 2.5);
    }

    #[test]
    fn single_value_has_no_std() {
        let summary = StatsCalculator::compute_price_summary(&[120.0]).unwrap();
        assert_eq!(summary.count, 1);
        assert_eq!(summary.median, 120.0);
        assert_eq!(summary.p25, 120.0);
        assert_eq!(summary.std, None);
    }

    #[test]
    fn empty_input() {
        assert!(StatsCalculator::compute_price_summary(&[]).is_none());
        assert!(StatsCalculator::percentile(&[], 50.0).is_nan());
    }
}
