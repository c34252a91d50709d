//! Probability command implementation

use anyhow::Result;
use crash_signals::numeric::format_multiplier;
use crash_signals::{fit_exponential, SignalEngine};
use tracing::info;

use crate::{InputArgs, SimulationArgs};

pub fn run(input: InputArgs, sim: SimulationArgs, target: f64) -> Result<()> {
    let sample = super::load_sample(&input)?;
    let config = super::simulation_config(&sim)?;
    let engine = SignalEngine::from_config(&config)?;

    info!(
        "Simulating {} trials for target {}",
        config.trials,
        format_multiplier(target)
    );
    let outcome = engine.simulate(&sample, target)?;

    println!("\n{}", "=".repeat(40));
    println!("EXCEEDANCE PROBABILITY");
    println!("{}", "=".repeat(40));
    println!("Target:             {}", format_multiplier(target));
    println!("Observations:       {}", sample.len());

    if sample.is_empty() {
        println!("Simulated:          {:.2}%", outcome.probability_pct());
        println!("(empty history, no simulation run)");
    } else {
        let fit = fit_exponential(&sample)?;
        println!("Fitted mean:        {:.4}", fit.mean());
        println!("Rate (lambda):      {:.4}", fit.rate());
        println!("Trials:             {}", outcome.trials);
        println!("Hits:               {}", outcome.hits);
        println!("Simulated:          {:.2}%", outcome.probability_pct());
        println!("Standard error:     {:.3} pp", outcome.standard_error_pct());
        println!("Analytic tail:      {:.2}%", fit.tail_probability(target) * 100.0);
    }
    println!("{}", "=".repeat(40));

    Ok(())
}
