//! Classify command implementation

use anyhow::Result;
use crash_signals::classify_market;

pub fn run(probability: f64) -> Result<()> {
    println!("{}", classify_market(probability));
    Ok(())
}
