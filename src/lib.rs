//! Crash Signals
//!
//! Estimates how likely a crash-style game round is to reach a target
//! multiplier, based on the history of observed multipliers, and turns the
//! estimate into a market regime signal.
//!
//! The history is modelled as exponential with rate `1 / mean`. The
//! exceedance probability is measured by Monte Carlo sampling with a caller
//! supplied generator, classified into a regime, and packaged as a
//! [`Signal`].

pub mod config;
pub mod data;
pub mod distribution;
pub mod error;
pub mod market;
pub mod montecarlo;
pub mod numeric;
pub mod signal;
pub mod volatility;

pub use config::SimulationConfig;
pub use distribution::{fit_exponential, FittedExponential};
pub use error::{SignalError, SignalResult};
pub use market::{classify_market, MarketRegime};
pub use montecarlo::{estimate_probability, MonteCarloEstimator, SimulationOutcome, DEFAULT_TRIALS};
pub use signal::{build_signal, Signal, SignalEngine};
pub use volatility::estimate_volatility;
