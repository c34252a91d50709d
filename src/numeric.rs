//! Numeric helpers shared by the probability and volatility paths

/// Decimal places kept on every reported percentage and volatility
pub const REPORT_DECIMALS: u32 = 2;

/// Round `value` to `decimals` places, halves away from zero
pub fn round_to(value: f64, decimals: u32) -> f64 {
    if !value.is_finite() {
        return value;
    }
    let factor = 10f64.powi(decimals as i32);
    (value * factor).round() / factor
}

/// Round to the reporting precision
pub fn round_report(value: f64) -> f64 {
    round_to(value, REPORT_DECIMALS)
}

/// Render a float the way the reply fields expect it.
///
/// Whole numbers keep one decimal place (`3.0`, `100.0`); everything else
/// uses the shortest representation that round-trips (`2.5`, `45.23`).
/// Decimal exponents below -4 or from 16 up switch to exponent notation
/// with a signed, two-digit exponent (`1e-05`, `1.5e+16`).
pub fn format_decimal(value: f64) -> String {
    if value.is_nan() {
        return "nan".to_string();
    }
    if value.is_infinite() {
        return if value > 0.0 { "inf" } else { "-inf" }.to_string();
    }

    // Shortest round-trip digits, e.g. "1.5e16"
    let sci = format!("{:e}", value);
    let (mantissa, exponent) = sci.split_once('e').unwrap_or((sci.as_str(), "0"));
    let exponent: i32 = exponent.parse().unwrap_or(0);

    if value != 0.0 && !(-4..16).contains(&exponent) {
        let sign = if exponent < 0 { '-' } else { '+' };
        format!("{}e{}{:02}", mantissa, sign, exponent.abs())
    } else if value.fract() == 0.0 {
        format!("{:.1}", value)
    } else {
        format!("{}", value)
    }
}

/// Target multiplier label, e.g. `3.0X`
pub fn format_multiplier(target: f64) -> String {
    format!("{}X", format_decimal(target))
}

/// Arithmetic mean, `None` for an empty slice
pub fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    let sum: f64 = values.iter().sum();
    Some(sum / values.len() as f64)
}
