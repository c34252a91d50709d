//! Domain errors raised by the estimators

use thiserror::Error;

/// Errors for inputs on which the exponential model is undefined
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SignalError {
    #[error("cannot fit a distribution to an empty sample")]
    EmptySample,

    #[error("multiplier at index {index} must be positive and finite, got {value}")]
    NonPositiveValue { index: usize, value: f64 },

    #[error("sample mean must be positive and finite, got {0}")]
    NonPositiveMean(f64),

    #[error("trial count must be positive, got {0}")]
    InvalidTrialCount(usize),
}

pub type SignalResult<T> = Result<T, SignalError>;
