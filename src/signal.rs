//! Signal composition
//!
//! Runs the estimator, classifies the result and packages both into the
//! reply record.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::SimulationConfig;
use crate::error::SignalResult;
use crate::market::{classify_market, MarketRegime};
use crate::montecarlo::{MonteCarloEstimator, SimulationOutcome, DEFAULT_TRIALS};
use crate::numeric::{format_decimal, format_multiplier};

/// Reply record for one target
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Signal {
    /// Target multiplier, e.g. `"3.0X"`
    #[serde(rename = "POSSÍVEL")]
    pub target: String,
    /// Exceedance percentage, e.g. `"45.23%"`
    #[serde(rename = "PROBABILIDADE")]
    pub probability: String,
    #[serde(rename = "MERCADO")]
    pub market: MarketRegime,
}

impl Signal {
    /// Assemble the record from an already computed percentage
    pub fn from_probability(target: f64, probability: f64) -> Self {
        Signal {
            target: format_multiplier(target),
            probability: format!("{}%", format_decimal(probability)),
            market: classify_market(probability),
        }
    }
}

/// Build a signal using the default trial count and the supplied generator
pub fn build_signal<R: Rng + ?Sized>(
    sample: &[f64],
    target: f64,
    rng: &mut R,
) -> SignalResult<Signal> {
    let probability = MonteCarloEstimator::new(DEFAULT_TRIALS)?.estimate(sample, target, rng)?;
    Ok(Signal::from_probability(target, probability))
}

/// Estimator bound to a simulation configuration.
///
/// With a configured seed every call starts from the same generator state,
/// so `probability` and `signal` agree for identical inputs.
#[derive(Debug, Clone)]
pub struct SignalEngine {
    estimator: MonteCarloEstimator,
    seed: Option<u64>,
    parallel: bool,
}

impl SignalEngine {
    pub fn from_config(config: &SimulationConfig) -> SignalResult<Self> {
        let estimator = MonteCarloEstimator::new(config.trials)?.with_chunk_size(config.chunk_size);
        Ok(SignalEngine {
            estimator,
            seed: config.seed,
            parallel: config.parallel,
        })
    }

    /// Run the configured simulation and return the raw outcome
    pub fn simulate(&self, sample: &[f64], target: f64) -> SignalResult<SimulationOutcome> {
        let seed = self.seed.unwrap_or_else(rand::random::<u64>);
        debug!(seed, parallel = self.parallel, "Running simulation");

        if self.parallel {
            self.estimator.simulate_parallel(sample, target, seed)
        } else {
            let mut rng = StdRng::seed_from_u64(seed);
            self.estimator.simulate(sample, target, &mut rng)
        }
    }

    /// Exceedance percentage rounded to two decimals
    pub fn probability(&self, sample: &[f64], target: f64) -> SignalResult<f64> {
        Ok(self.simulate(sample, target)?.probability_pct())
    }

    pub fn signal(&self, sample: &[f64], target: f64) -> SignalResult<Signal> {
        let probability = self.probability(sample, target)?;
        Ok(Signal::from_probability(target, probability))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::SignalError;
    use crate::montecarlo::estimate_probability;

    const HISTORY: [f64; 10] = [1.2, 3.4, 1.05, 2.8, 7.9, 1.6, 1.0, 4.2, 2.1, 1.9];

    #[test]
    fn test_from_probability_formats_fields() {
        let signal = Signal::from_probability(3.0, 45.23);
        assert_eq!(signal.target, "3.0X");
        assert_eq!(signal.probability, "45.23%");
        assert_eq!(signal.market, MarketRegime::Medio);

        let signal = Signal::from_probability(2.5, 100.0);
        assert_eq!(signal.target, "2.5X");
        assert_eq!(signal.probability, "100.0%");
        assert_eq!(signal.market, MarketRegime::Neutro);
    }

    #[test]
    fn test_build_signal_matches_direct_estimate() {
        let signal = build_signal(&HISTORY, 3.0, &mut StdRng::seed_from_u64(5)).unwrap();
        let direct =
            estimate_probability(&HISTORY, 3.0, DEFAULT_TRIALS, &mut StdRng::seed_from_u64(5))
                .unwrap();

        assert_eq!(signal.target, "3.0X");
        assert_eq!(signal.probability, format!("{}%", format_decimal(direct)));
        assert_eq!(signal.market, classify_market(direct));
    }

    #[test]
    fn test_build_signal_empty_sample() {
        let signal = build_signal(&[], 3.0, &mut StdRng::seed_from_u64(5)).unwrap();
        assert_eq!(signal.probability, "0.0%");
        assert_eq!(signal.market, MarketRegime::Neutro);
    }

    #[test]
    fn test_build_signal_propagates_domain_errors() {
        let err = build_signal(&[2.0, 0.0], 3.0, &mut StdRng::seed_from_u64(5)).unwrap_err();
        assert_eq!(err, SignalError::NonPositiveValue { index: 1, value: 0.0 });
    }

    #[test]
    fn test_seeded_engine_is_consistent() {
        let config = SimulationConfig {
            trials: 20_000,
            seed: Some(17),
            ..Default::default()
        };
        let engine = SignalEngine::from_config(&config).unwrap();

        let probability = engine.probability(&HISTORY, 2.0).unwrap();
        let signal = engine.signal(&HISTORY, 2.0).unwrap();
        assert_eq!(signal.probability, format!("{}%", format_decimal(probability)));
    }

    #[test]
    fn test_parallel_engine_is_consistent() {
        let config = SimulationConfig {
            trials: 30_000,
            seed: Some(3),
            parallel: true,
            chunk_size: 1_000,
        };
        let engine = SignalEngine::from_config(&config).unwrap();
        assert_eq!(
            engine.probability(&HISTORY, 2.0).unwrap(),
            engine.probability(&HISTORY, 2.0).unwrap()
        );
    }

    #[test]
    fn test_engine_rejects_zero_trials() {
        let config = SimulationConfig {
            trials: 0,
            ..Default::default()
        };
        assert_eq!(
            SignalEngine::from_config(&config).unwrap_err(),
            SignalError::InvalidTrialCount(0)
        );
    }

    #[test]
    fn test_serializes_with_reply_keys() {
        let signal = Signal::from_probability(3.0, 22.31);
        let json = serde_json::to_value(&signal).unwrap();
        assert_eq!(json["POSSÍVEL"], "3.0X");
        assert_eq!(json["PROBABILIDADE"], "22.31%");
        assert_eq!(json["MERCADO"], "RECOLHENDO");
    }
}
