//! Market regime classification
//!
//! Maps an exceedance percentage onto one of four regimes. Bands are
//! inclusive on both ends; anything between or outside them is neutral.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Band for a collecting ("recolhendo") market
pub const RECOLHENDO_BAND: (f64, f64) = (10.0, 30.0);
/// Band for a middling market
pub const MEDIO_BAND: (f64, f64) = (40.0, 50.0);
/// Band for a paying ("pagando") market
pub const PAGANDO_BAND: (f64, f64) = (60.0, 80.0);

/// Market regime derived from an exceedance probability
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MarketRegime {
    #[serde(rename = "RECOLHENDO")]
    Recolhendo,
    #[serde(rename = "MÉDIO")]
    Medio,
    #[serde(rename = "PAGANDO")]
    Pagando,
    #[serde(rename = "NEUTRO")]
    Neutro,
}

impl MarketRegime {
    /// Label shown to users
    pub fn label(&self) -> &'static str {
        match self {
            MarketRegime::Recolhendo => "RECOLHENDO",
            MarketRegime::Medio => "MÉDIO",
            MarketRegime::Pagando => "PAGANDO",
            MarketRegime::Neutro => "NEUTRO",
        }
    }
}

impl fmt::Display for MarketRegime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

fn within(value: f64, (low, high): (f64, f64)) -> bool {
    low <= value && value <= high
}

/// Classify a probability percentage. Total: NaN and out-of-range
/// values are `Neutro`.
pub fn classify_market(probability: f64) -> MarketRegime {
    if within(probability, RECOLHENDO_BAND) {
        MarketRegime::Recolhendo
    } else if within(probability, MEDIO_BAND) {
        MarketRegime::Medio
    } else if within(probability, PAGANDO_BAND) {
        MarketRegime::Pagando
    } else {
        MarketRegime::Neutro
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_band_boundaries() {
        assert_eq!(classify_market(9.99), MarketRegime::Neutro);
        assert_eq!(classify_market(10.0), MarketRegime::Recolhendo);
        assert_eq!(classify_market(30.0), MarketRegime::Recolhendo);
        assert_eq!(classify_market(30.01), MarketRegime::Neutro);
        assert_eq!(classify_market(40.0), MarketRegime::Medio);
        assert_eq!(classify_market(50.0), MarketRegime::Medio);
        assert_eq!(classify_market(60.0), MarketRegime::Pagando);
        assert_eq!(classify_market(80.0), MarketRegime::Pagando);
        assert_eq!(classify_market(80.01), MarketRegime::Neutro);
    }

    #[test]
    fn test_gaps_are_neutral() {
        for p in [0.0, 5.0, 35.0, 39.99, 50.01, 55.0, 59.99, 90.0, 100.0] {
            assert_eq!(classify_market(p), MarketRegime::Neutro, "p = {}", p);
        }
    }

    #[test]
    fn test_out_of_range_is_neutral() {
        assert_eq!(classify_market(-20.0), MarketRegime::Neutro);
        assert_eq!(classify_market(150.0), MarketRegime::Neutro);
        assert_eq!(classify_market(f64::NAN), MarketRegime::Neutro);
        assert_eq!(classify_market(f64::INFINITY), MarketRegime::Neutro);
    }

    #[test]
    fn test_labels() {
        assert_eq!(MarketRegime::Recolhendo.to_string(), "RECOLHENDO");
        assert_eq!(MarketRegime::Medio.to_string(), "MÉDIO");
        assert_eq!(MarketRegime::Pagando.to_string(), "PAGANDO");
        assert_eq!(MarketRegime::Neutro.to_string(), "NEUTRO");
    }

    #[test]
    fn test_serializes_as_label() {
        let json = serde_json::to_string(&MarketRegime::Medio).unwrap();
        assert_eq!(json, "\"MÉDIO\"");
        let back: MarketRegime = serde_json::from_str("\"PAGANDO\"").unwrap();
        assert_eq!(back, MarketRegime::Pagando);
    }
}
