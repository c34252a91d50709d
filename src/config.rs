//! Configuration management
//!
//! Simulation settings loaded from an optional JSON file, with environment
//! variable overrides applied on top.

use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::montecarlo::{DEFAULT_CHUNK_SIZE, DEFAULT_TRIALS};

pub const ENV_TRIALS: &str = "CRASH_SIGNALS_TRIALS";
pub const ENV_SEED: &str = "CRASH_SIGNALS_SEED";
pub const ENV_PARALLEL: &str = "CRASH_SIGNALS_PARALLEL";

/// Monte Carlo settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    /// Draws per estimate
    pub trials: usize,
    /// Fixed seed for reproducible runs; entropy when unset
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
    /// Spread the trials over the rayon pool
    pub parallel: bool,
    /// Trials per parallel chunk
    pub chunk_size: usize,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        SimulationConfig {
            trials: DEFAULT_TRIALS,
            seed: None,
            parallel: false,
            chunk_size: DEFAULT_CHUNK_SIZE,
        }
    }
}

impl SimulationConfig {
    /// Load configuration from JSON file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        let mut config: SimulationConfig =
            serde_json::from_str(&contents).context("Failed to parse config JSON")?;

        config.apply_env_overrides()?;
        config.validate()?;
        Ok(config)
    }

    /// Override fields from `CRASH_SIGNALS_*` environment variables
    pub fn apply_env_overrides(&mut self) -> Result<()> {
        if let Ok(trials) = std::env::var(ENV_TRIALS) {
            self.trials = trials
                .trim()
                .parse()
                .with_context(|| format!("Invalid {}: {}", ENV_TRIALS, trials))?;
        }
        if let Ok(seed) = std::env::var(ENV_SEED) {
            self.seed = Some(
                seed.trim()
                    .parse()
                    .with_context(|| format!("Invalid {}: {}", ENV_SEED, seed))?,
            );
        }
        if let Ok(parallel) = std::env::var(ENV_PARALLEL) {
            self.parallel = match parallel.trim().to_ascii_lowercase().as_str() {
                "1" | "true" | "yes" | "on" => true,
                "0" | "false" | "no" | "off" => false,
                _ => bail!("Invalid {}: {}", ENV_PARALLEL, parallel),
            };
        }
        Ok(())
    }

    pub fn validate(&self) -> Result<()> {
        if self.trials == 0 {
            bail!("trials must be positive");
        }
        if self.chunk_size == 0 {
            bail!("chunk_size must be positive");
        }
        Ok(())
    }
}
