//! Signal command implementation

use anyhow::Result;
use crash_signals::numeric::format_multiplier;
use crash_signals::SignalEngine;
use tracing::info;

use crate::{InputArgs, SimulationArgs};

pub fn run(input: InputArgs, sim: SimulationArgs, target: f64, json: bool) -> Result<()> {
    let sample = super::load_sample(&input)?;
    let config = super::simulation_config(&sim)?;
    let engine = SignalEngine::from_config(&config)?;

    info!(
        "Estimating signal for target {} ({} trials)",
        format_multiplier(target),
        config.trials
    );
    let signal = engine.signal(&sample, target)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&signal)?);
    } else {
        println!("POSSÍVEL {}", signal.target);
        println!("PROBABILIDADE: {}", signal.probability);
        println!("MERCADO: {}", signal.market);
    }

    Ok(())
}
