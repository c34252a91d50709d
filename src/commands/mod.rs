//! Subcommand implementations

pub mod classify;
pub mod probability;
pub mod signal;
pub mod volatility;

use anyhow::{Context, Result};
use crash_signals::{data, SimulationConfig};
use tracing::info;

use crate::{InputArgs, SimulationArgs};

/// Load the multiplier history from whichever input was given
pub fn load_sample(input: &InputArgs) -> Result<Vec<f64>> {
    let sample = match (&input.input, &input.values) {
        (Some(path), _) => data::load_csv(path)?,
        (None, Some(values)) => data::parse_values(values)?,
        (None, None) => anyhow::bail!("Either --input or --values is required"),
    };
    info!("History size: {}", sample.len());
    Ok(sample)
}

/// Resolve simulation settings: defaults, then config file and env, then flags
pub fn simulation_config(args: &SimulationArgs) -> Result<SimulationConfig> {
    let mut config = match &args.config {
        Some(path) => {
            let config = SimulationConfig::from_file(path)?;
            info!("Loaded configuration from: {}", path.display());
            config
        }
        None => {
            let mut config = SimulationConfig::default();
            config.apply_env_overrides()?;
            config
        }
    };

    if let Some(trials) = args.trials {
        info!("Overriding trials to: {}", trials);
        config.trials = trials;
    }
    if let Some(seed) = args.seed {
        info!("Overriding seed to: {}", seed);
        config.seed = Some(seed);
    }
    if args.parallel {
        config.parallel = true;
    }

    config.validate().context("Invalid simulation settings")?;
    Ok(config)
}
