//! Display units for energy quantities.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Divisor applied to watt-hour values before presentation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DisplayUnit {
    Wh,
    KWh,
    MWh,
    GWh,
    #[default]
    TWh,
}

impl DisplayUnit {
    /// Accepted names, lowercase.
    pub const NAMES: &[&str] = &["wh", "kwh", "mwh", "gwh", "twh"];

    /// Watt-hours per one unit.
    pub fn divisor(self) -> f64 {
        match self {
            DisplayUnit::Wh => 1.0,
            DisplayUnit::KWh => 1e3,
            DisplayUnit::MWh => 1e6,
            DisplayUnit::GWh => 1e9,
            DisplayUnit::TWh => 1e12,
        }
    }

    /// Conventional symbol, e.g. `"TWh"`.
    pub fn symbol(self) -> &'static str {
        match self {
            DisplayUnit::Wh => "Wh",
            DisplayUnit::KWh => "kWh",
            DisplayUnit::MWh => "MWh",
            DisplayUnit::GWh => "GWh",
            DisplayUnit::TWh => "TWh",
        }
    }

    /// Converts a watt-hour value into this unit. Non-finite values pass through.
    pub fn scale(self, wh: f64) -> f64 {
        wh / self.divisor()
    }
}

impl fmt::Display for DisplayUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

impl FromStr for DisplayUnit {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "wh" => Ok(DisplayUnit::Wh),
            "kwh" => Ok(DisplayUnit::KWh),
            "mwh" => Ok(DisplayUnit::MWh),
            "gwh" => Ok(DisplayUnit::GWh),
            "twh" => Ok(DisplayUnit::TWh),
            _ => Err(format!(
                "unknown unit \"{s}\", available: {}",
                Self::NAMES.join(", ")
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn terawatt_hours_divide_by_1e12() {
        assert!((DisplayUnit::TWh.scale(1.4454e14) - 144.54).abs() < 1e-9);
    }

    #[test]
    fn parse_is_case_insensitive() {
        assert_eq!("TWh".parse::<DisplayUnit>(), Ok(DisplayUnit::TWh));
        assert_eq!("kwh".parse::<DisplayUnit>(), Ok(DisplayUnit::KWh));
        assert!("joules".parse::<DisplayUnit>().is_err());
    }

    #[test]
    fn infinity_passes_through() {
        assert_eq!(DisplayUnit::GWh.scale(f64::INFINITY), f64::INFINITY);
        assert!(DisplayUnit::GWh.scale(f64::NAN).is_nan());
    }
}
