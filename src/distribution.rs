//! Exponential fit of the multiplier history
//!
//! Multipliers are modelled as draws from an exponential distribution whose
//! rate is the reciprocal of the sample mean. The fit is rebuilt on every
//! estimation call and never cached.

use statrs::distribution::{ContinuousCDF, Exp};
use tracing::debug;

use crate::error::{SignalError, SignalResult};
use crate::numeric::mean;

/// Exponential distribution fitted to a historical sample
#[derive(Debug, Clone)]
pub struct FittedExponential {
    rate: f64,
    dist: Exp,
}

impl FittedExponential {
    /// Build from an explicit rate
    pub fn from_rate(rate: f64) -> SignalResult<Self> {
        if !rate.is_finite() || rate <= 0.0 {
            return Err(SignalError::NonPositiveMean(1.0 / rate));
        }
        let dist = Exp::new(rate).map_err(|_| SignalError::NonPositiveMean(1.0 / rate))?;
        Ok(Self { rate, dist })
    }

    /// Rate parameter (lambda)
    pub fn rate(&self) -> f64 {
        self.rate
    }

    /// Mean of the fitted distribution, `1 / rate`
    pub fn mean(&self) -> f64 {
        1.0 / self.rate
    }

    /// Inverse-CDF transform of a uniform draw `u` in [0, 1)
    #[inline]
    pub fn quantile(&self, u: f64) -> f64 {
        // -ln(1 - u) / rate, with ln_1p keeping precision for small u
        -(-u).ln_1p() / self.rate
    }

    /// Closed-form `P(X >= target)`
    pub fn tail_probability(&self, target: f64) -> f64 {
        if target <= 0.0 {
            return 1.0;
        }
        self.dist.sf(target)
    }
}

/// Fit an exponential distribution to `sample`.
///
/// Every observation must be strictly positive and finite, so the fitted
/// rate is always a finite positive number.
pub fn fit_exponential(sample: &[f64]) -> SignalResult<FittedExponential> {
    if let Some((index, &value)) = sample
        .iter()
        .enumerate()
        .find(|(_, v)| !v.is_finite() || **v <= 0.0)
    {
        return Err(SignalError::NonPositiveValue { index, value });
    }

    let mean = mean(sample).ok_or(SignalError::EmptySample)?;
    if !mean.is_finite() || mean <= 0.0 {
        return Err(SignalError::NonPositiveMean(mean));
    }

    let rate = 1.0 / mean;
    debug!(observations = sample.len(), mean, rate, "Fitted exponential");
    FittedExponential::from_rate(rate)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_rate_is_reciprocal_of_mean() {
        let fit = fit_exponential(&[1.0, 2.0, 3.0]).unwrap();
        assert_relative_eq!(fit.rate(), 0.5);
        assert_relative_eq!(fit.mean(), 2.0);
    }

    #[test]
    fn test_rejects_empty_sample() {
        assert_eq!(fit_exponential(&[]).unwrap_err(), SignalError::EmptySample);
    }

    #[test]
    fn test_rejects_non_positive_values() {
        let err = fit_exponential(&[1.5, 0.0, 2.0]).unwrap_err();
        assert_eq!(err, SignalError::NonPositiveValue { index: 1, value: 0.0 });

        let err = fit_exponential(&[1.5, 2.0, -3.0]).unwrap_err();
        assert_eq!(err, SignalError::NonPositiveValue { index: 2, value: -3.0 });
    }

    #[test]
    fn test_rejects_non_finite_values() {
        assert!(matches!(
            fit_exponential(&[f64::INFINITY]),
            Err(SignalError::NonPositiveValue { index: 0, .. })
        ));
        assert!(matches!(
            fit_exponential(&[1.0, f64::NAN]),
            Err(SignalError::NonPositiveValue { index: 1, .. })
        ));
    }

    #[test]
    fn test_rejects_overflowing_mean() {
        let err = fit_exponential(&[f64::MAX, f64::MAX]).unwrap_err();
        assert!(matches!(err, SignalError::NonPositiveMean(_)));
    }

    #[test]
    fn test_quantile() {
        let fit = FittedExponential::from_rate(0.5).unwrap();
        assert_eq!(fit.quantile(0.0), 0.0);
        // Median of Exp(0.5) is ln(2) / 0.5
        assert_relative_eq!(fit.quantile(0.5), 2.0 * 2f64.ln(), epsilon = 1e-12);
    }

    #[test]
    fn test_tail_probability() {
        let fit = FittedExponential::from_rate(0.5).unwrap();
        assert_relative_eq!(fit.tail_probability(3.0), (-1.5f64).exp(), epsilon = 1e-12);
        assert_relative_eq!(fit.tail_probability(0.0), 1.0);
        assert_relative_eq!(fit.tail_probability(-4.0), 1.0);
    }
}
