//! Volatility of the multiplier history

use statrs::statistics::Statistics;

use crate::numeric::round_report;

/// Sample standard deviation of the history, rounded to two decimals.
///
/// Uses the Bessel-corrected estimator (divides by `n - 1`). Samples with
/// fewer than two observations have no spread and return `0.0`.
pub fn estimate_volatility(sample: &[f64]) -> f64 {
    if sample.len() < 2 {
        return 0.0;
    }
    round_report(sample.iter().std_dev())
}
