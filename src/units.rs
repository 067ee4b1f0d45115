//! Length units found in survey field books.
//!
//! Traverse distances are stored in meters. Legs recorded in feet or Gunter's
//! links are converted in place with one of the converters below.

use std::fmt;
use std::str::FromStr;

#[cfg(feature = "serialize")]
use serde::{Deserialize, Serialize};

/// International foot.
pub const FEET_TO_METERS: f64 = 0.3048;

/// Gunter's link (1/100 chain, 0.66 ft).
pub const LINKS_TO_METERS: f64 = 0.201_168;

/// Converts feet to meters.
#[must_use]
pub fn feet_to_meters(feet: f64) -> f64 {
    feet * FEET_TO_METERS
}

/// Converts links to meters.
#[must_use]
pub fn links_to_meters(links: f64) -> f64 {
    links * LINKS_TO_METERS
}

/// A unit a traverse distance may have been recorded in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serialize", derive(Serialize, Deserialize))]
pub enum LengthUnit {
    #[default]
    Meters,
    Feet,
    Links,
}

impl LengthUnit {
    /// Meters per one of this unit.
    #[must_use]
    pub fn meters_per_unit(self) -> f64 {
        match self {
            Self::Meters => 1.0,
            Self::Feet => FEET_TO_METERS,
            Self::Links => LINKS_TO_METERS,
        }
    }

    /// Converts `value` in this unit to meters.
    #[must_use]
    pub fn to_meters(self, value: f64) -> f64 {
        value * self.meters_per_unit()
    }

    /// Converts `meters` to this unit.
    #[must_use]
    pub fn convert_meters(self, meters: f64) -> f64 {
        meters / self.meters_per_unit()
    }
}

impl fmt::Display for LengthUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Meters => write!(f, "m"),
            Self::Feet => write!(f, "ft"),
            Self::Links => write!(f, "lk"),
        }
    }
}

impl FromStr for LengthUnit {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "m" | "meter" | "meters" | "metre" | "metres" => Ok(Self::Meters),
            "ft" | "foot" | "feet" => Ok(Self::Feet),
            "lk" | "link" | "links" => Ok(Self::Links),
            _ => Err(format!("unknown length unit: {s}")),
        }
    }
}

/// Splits a field-book distance such as `100ft`, `250 lk` or `1e3` into its
/// value and unit. A bare number is in meters.
///
/// # Errors
///
/// Returns a message if the number or the unit suffix is not recognised.
pub fn parse_length(text: &str) -> Result<(f64, LengthUnit), String> {
    let text = text.trim();
    // The unit is the trailing run of letters, so an exponent stays with the number.
    let number = text.trim_end_matches(|c: char| c.is_ascii_alphabetic());
    let suffix = &text[number.len()..];
    let value = number
        .trim()
        .parse::<f64>()
        .map_err(|e| format!("invalid distance {text:?}: {e}"))?;
    let unit = if suffix.is_empty() {
        LengthUnit::Meters
    } else {
        suffix.parse()?
    };
    Ok((value, unit))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn hundred_feet() {
        assert_abs_diff_eq!(feet_to_meters(100.0), 30.48, epsilon = 1e-3);
    }

    #[test]
    fn one_chain_of_links() {
        assert_abs_diff_eq!(links_to_meters(100.0), 20.1168, epsilon = 1e-9);
    }

    #[test]
    fn unit_round_trip() {
        for unit in [LengthUnit::Meters, LengthUnit::Feet, LengthUnit::Links] {
            assert_abs_diff_eq!(unit.convert_meters(unit.to_meters(42.5)), 42.5, epsilon = 1e-9);
        }
    }

    #[test]
    fn parse_and_display() {
        assert_eq!("Feet".parse::<LengthUnit>().unwrap(), LengthUnit::Feet);
        assert_eq!(" lk ".parse::<LengthUnit>().unwrap(), LengthUnit::Links);
        assert!("furlong".parse::<LengthUnit>().is_err());
        assert_eq!(LengthUnit::Links.to_string(), "lk");
    }

    #[test]
    fn parse_length_with_suffix() {
        assert_eq!(parse_length("100ft").unwrap(), (100.0, LengthUnit::Feet));
        assert_eq!(parse_length("250 lk").unwrap(), (250.0, LengthUnit::Links));
        assert_eq!(parse_length("30.5m").unwrap(), (30.5, LengthUnit::Meters));
        assert_eq!(parse_length("42").unwrap(), (42.0, LengthUnit::Meters));
    }

    #[test]
    fn parse_length_keeps_exponent_with_number() {
        assert_eq!(parse_length("1e3").unwrap(), (1000.0, LengthUnit::Meters));
        assert_eq!(parse_length("2.5E2 ft").unwrap(), (250.0, LengthUnit::Feet));
        assert!(parse_length("12 furlongs").is_err());
        assert!(parse_length("ft").is_err());
    }
}
