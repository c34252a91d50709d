//! Historical multiplier loading
//!
//! Reads the multiplier history handed over by the caller, either from a CSV
//! file (first column, optional header) or from an inline comma-separated
//! list.

use anyhow::{bail, Context, Result};
use std::path::Path;
use tracing::{debug, info};

/// Load multipliers from the first column of a CSV file.
///
/// A non-numeric first row is treated as a header and skipped. Blank rows
/// are ignored. Any other row that does not parse is an error.
pub fn load_csv(path: impl AsRef<Path>) -> Result<Vec<f64>> {
    let path = path.as_ref();
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_path(path)
        .with_context(|| format!("Failed to open CSV file {}", path.display()))?;

    let mut values = Vec::new();

    for (record_idx, result) in reader.records().enumerate() {
        let record =
            result.with_context(|| format!("Failed to read record {}", record_idx + 1))?;

        let field = match record.get(0) {
            Some(field) if !field.is_empty() => field,
            _ => continue,
        };

        match field.parse::<f64>() {
            Ok(value) => values.push(value),
            Err(_) if record_idx == 0 => debug!("Skipping header row: {}", field),
            Err(e) => {
                // Blank lines are not records, so report the file line
                let line = record.position().map_or(record_idx as u64 + 1, |p| p.line());
                bail!("Failed to parse multiplier '{}' on line {}: {}", field, line, e)
            }
        }
    }

    info!("Loaded {} multipliers from {}", values.len(), path.display());
    Ok(values)
}

/// Parse a comma-separated list such as `"1.2, 3.4,2.0"`
pub fn parse_values(s: &str) -> Result<Vec<f64>> {
    s.split(',')
        .map(str::trim)
        .filter(|x| !x.is_empty())
        .map(|x| {
            x.parse::<f64>()
                .with_context(|| format!("Invalid multiplier: {}", x))
        })
        .collect()
}
