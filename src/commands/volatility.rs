//! Volatility command implementation

use anyhow::Result;
use crash_signals::estimate_volatility;

use crate::InputArgs;

pub fn run(input: InputArgs) -> Result<()> {
    let sample = super::load_sample(&input)?;
    println!("{:.2}", estimate_volatility(&sample));
    Ok(())
}
