//! Monte Carlo exceedance probability
//!
//! Draws from the exponential fitted to the history and counts how many
//! draws reach the target multiplier. The generator is always supplied by the
//! caller: sequential runs borrow an `Rng`, parallel runs take a seed and
//! derive one `StdRng` per chunk so the hit count does not depend on how
//! rayon schedules the chunks.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rayon::prelude::*;
use tracing::debug;

use crate::distribution::{fit_exponential, FittedExponential};
use crate::error::{SignalError, SignalResult};
use crate::numeric::round_report;

/// Trials used when the caller does not pick a count
pub const DEFAULT_TRIALS: usize = 100_000;

/// Trials handled by one parallel work unit
pub const DEFAULT_CHUNK_SIZE: usize = 10_000;

/// Raw result of a simulation run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SimulationOutcome {
    /// Draws that reached the target
    pub hits: u64,
    /// Draws actually performed (zero when the sample was empty)
    pub trials: usize,
}

impl SimulationOutcome {
    /// Outcome of a run that never started
    pub fn empty() -> Self {
        Self { hits: 0, trials: 0 }
    }

    /// Hit fraction in [0, 1]
    pub fn fraction(&self) -> f64 {
        if self.trials == 0 {
            return 0.0;
        }
        self.hits as f64 / self.trials as f64
    }

    /// Hit percentage rounded to two decimals
    pub fn probability_pct(&self) -> f64 {
        round_report(self.fraction() * 100.0)
    }

    /// Binomial standard error of the percentage, in percentage points
    pub fn standard_error_pct(&self) -> f64 {
        if self.trials == 0 {
            return 0.0;
        }
        let p = self.fraction();
        (p * (1.0 - p) / self.trials as f64).sqrt() * 100.0
    }
}

/// Monte Carlo estimator with a fixed trial budget
#[derive(Debug, Clone)]
pub struct MonteCarloEstimator {
    trials: usize,
    chunk_size: usize,
}

impl Default for MonteCarloEstimator {
    fn default() -> Self {
        Self {
            trials: DEFAULT_TRIALS,
            chunk_size: DEFAULT_CHUNK_SIZE,
        }
    }
}

impl MonteCarloEstimator {
    /// Create an estimator running `trials` draws per call
    pub fn new(trials: usize) -> SignalResult<Self> {
        if trials == 0 {
            return Err(SignalError::InvalidTrialCount(trials));
        }
        Ok(Self {
            trials,
            ..Self::default()
        })
    }

    /// Set the number of trials per parallel chunk (minimum 1)
    pub fn with_chunk_size(mut self, chunk_size: usize) -> Self {
        self.chunk_size = chunk_size.max(1);
        self
    }

    pub fn chunk_size(&self) -> usize {
        self.chunk_size
    }

    /// Run all trials on the current thread with the given generator
    pub fn simulate<R: Rng + ?Sized>(
        &self,
        sample: &[f64],
        target: f64,
        rng: &mut R,
    ) -> SignalResult<SimulationOutcome> {
        let Some(fit) = fit_or_skip(sample)? else {
            return Ok(SimulationOutcome::empty());
        };

        let hits = count_hits(&fit, target, self.trials, rng);
        debug!(trials = self.trials, hits, target, "Sequential simulation finished");

        Ok(SimulationOutcome {
            hits,
            trials: self.trials,
        })
    }

    /// Run the trials on the rayon pool.
    ///
    /// Chunk `i` draws from `StdRng::seed_from_u64(seed + i)`, so a given
    /// seed and chunk size always produce the same hit count.
    pub fn simulate_parallel(
        &self,
        sample: &[f64],
        target: f64,
        seed: u64,
    ) -> SignalResult<SimulationOutcome> {
        let Some(fit) = fit_or_skip(sample)? else {
            return Ok(SimulationOutcome::empty());
        };

        let chunks = self.trials.div_ceil(self.chunk_size);
        let hits: u64 = (0..chunks)
            .into_par_iter()
            .map(|chunk| {
                let start = chunk * self.chunk_size;
                let len = self.chunk_size.min(self.trials - start);
                let mut rng = StdRng::seed_from_u64(seed.wrapping_add(chunk as u64));
                count_hits(&fit, target, len, &mut rng)
            })
            .sum();

        debug!(
            trials = self.trials,
            chunks,
            hits,
            target,
            "Parallel simulation finished"
        );

        Ok(SimulationOutcome {
            hits,
            trials: self.trials,
        })
    }

    /// Sequential estimate as a rounded percentage
    pub fn estimate<R: Rng + ?Sized>(
        &self,
        sample: &[f64],
        target: f64,
        rng: &mut R,
    ) -> SignalResult<f64> {
        Ok(self.simulate(sample, target, rng)?.probability_pct())
    }
}

/// Percentage of simulated draws reaching `target`, rounded to two decimals.
///
/// An empty sample yields `0.0` without running any trial. A zero trial
/// count and samples containing non-positive values are rejected.
pub fn estimate_probability<R: Rng + ?Sized>(
    sample: &[f64],
    target: f64,
    trials: usize,
    rng: &mut R,
) -> SignalResult<f64> {
    MonteCarloEstimator::new(trials)?.estimate(sample, target, rng)
}

fn fit_or_skip(sample: &[f64]) -> SignalResult<Option<FittedExponential>> {
    if sample.is_empty() {
        debug!("Empty sample, skipping simulation");
        return Ok(None);
    }
    fit_exponential(sample).map(Some)
}

fn count_hits<R: Rng + ?Sized>(
    fit: &FittedExponential,
    target: f64,
    trials: usize,
    rng: &mut R,
) -> u64 {
    let mut hits = 0u64;
    for _ in 0..trials {
        let u: f64 = rng.gen();
        if fit.quantile(u) >= target {
            hits += 1;
        }
    }
    hits
}
