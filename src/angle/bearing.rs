//! Quadrant bearing notation, e.g. `N45°30'00"E`.
//!
//! A quadrant bearing is an acute angle (0 to 90 degrees) measured from north
//! or south towards east or west. Rendering always produces the canonical
//! form with two-digit minutes and seconds.

use std::fmt;
use std::str::FromStr;

use super::{Angle, AngleConvention, SECONDS_PER_TURN};
use crate::error::AngleError;

/// Compass quadrant of a bearing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Quadrant {
    NorthEast,
    SouthEast,
    SouthWest,
    NorthWest,
}

impl Quadrant {
    fn letters(self) -> (char, char) {
        match self {
            Self::NorthEast => ('N', 'E'),
            Self::SouthEast => ('S', 'E'),
            Self::SouthWest => ('S', 'W'),
            Self::NorthWest => ('N', 'W'),
        }
    }
}

/// A bearing expressed as a quadrant plus an angle in `[0, 90]` degrees.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct QuadrantBearing {
    pub quadrant: Quadrant,
    /// Angle off the north/south meridian, in decimal degrees.
    pub degrees: f64,
}

impl QuadrantBearing {
    /// Expresses a clockwise-from-north azimuth as a quadrant bearing.
    ///
    /// Directions on an axis use a fixed quadrant: north is `N0E`, east is
    /// `N90E`, south is `S0E` and west is `S90W`. An azimuth that rounds onto an
    /// axis at whole-second precision counts as that axis.
    #[must_use]
    pub fn from_azimuth(azimuth: f64) -> Self {
        let az = snap_to_axis(azimuth.rem_euclid(360.0));
        let (quadrant, degrees) = if az <= 90.0 {
            (Quadrant::NorthEast, az)
        } else if az <= 180.0 {
            (Quadrant::SouthEast, 180.0 - az)
        } else if az <= 270.0 {
            (Quadrant::SouthWest, az - 180.0)
        } else {
            (Quadrant::NorthWest, 360.0 - az)
        };
        Self { quadrant, degrees }
    }

    /// Returns the clockwise-from-north azimuth of this bearing.
    #[must_use]
    pub fn azimuth(self) -> f64 {
        let az = match self.quadrant {
            Quadrant::NorthEast => self.degrees,
            Quadrant::SouthEast => 180.0 - self.degrees,
            Quadrant::SouthWest => 180.0 + self.degrees,
            Quadrant::NorthWest => 360.0 - self.degrees,
        };
        az.rem_euclid(360.0)
    }
}

/// Replaces `az` with the exact axis direction when it is within half a second of one.
fn snap_to_axis(az: f64) -> f64 {
    const SECONDS_PER_QUARTER: u32 = SECONDS_PER_TURN / 4;
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let seconds = (az * 3600.0).round() as u32;
    if seconds % SECONDS_PER_QUARTER == 0 {
        f64::from(seconds % SECONDS_PER_TURN) / 3600.0
    } else {
        az
    }
}

impl fmt::Display for QuadrantBearing {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (first, last) = self.quadrant.letters();
        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        let total = (self.degrees.clamp(0.0, 90.0) * 3600.0).round() as u32;
        write!(
            f,
            "{first}{}°{:02}'{:02}\"{last}",
            total / 3600,
            total / 60 % 60,
            total % 60
        )
    }
}

impl FromStr for QuadrantBearing {
    type Err = AngleError;

    fn from_str(s: &str) -> Result<Self, AngleError> {
        let fail = |reason| AngleError::Format {
            input: s.to_string(),
            reason,
        };

        let text = s.trim();
        let mut chars = text.chars();
        let north = match chars.next() {
            Some('N' | 'n') => true,
            Some('S' | 's') => false,
            _ => return Err(fail("missing north/south prefix")),
        };
        let east = match chars.next_back() {
            Some('E' | 'e') => true,
            Some('W' | 'w') => false,
            _ => return Err(fail("missing east/west suffix")),
        };
        let degrees = parse_dms(chars.as_str()).map_err(fail)?;

        let quadrant = match (north, east) {
            (true, true) => Quadrant::NorthEast,
            (false, true) => Quadrant::SouthEast,
            (false, false) => Quadrant::SouthWest,
            (true, false) => Quadrant::NorthWest,
        };
        Ok(Self { quadrant, degrees })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Marker {
    Degrees,
    Minutes,
    Seconds,
}

fn marker(c: char) -> Option<Marker> {
    match c {
        '°' | 'º' | 'd' | 'D' => Some(Marker::Degrees),
        '\'' | '′' | 'm' | 'M' => Some(Marker::Minutes),
        '"' | '″' | 's' | 'S' => Some(Marker::Seconds),
        _ => None,
    }
}

struct Field<'a> {
    digits: &'a str,
    marker: Option<Marker>,
}

/// Parses the `45°30'00"` part of a bearing into decimal degrees in `[0, 90]`.
fn parse_dms(body: &str) -> Result<f64, &'static str> {
    let mut fields: Vec<Field<'_>> = Vec::with_capacity(3);
    let mut start: Option<usize> = None;

    for (i, c) in body.char_indices() {
        if c.is_ascii_digit() || c == '.' {
            start.get_or_insert(i);
            continue;
        }
        if let Some(s) = start.take() {
            fields.push(Field {
                digits: &body[s..i],
                marker: None,
            });
        }
        if c.is_whitespace() {
            continue;
        }
        let kind = marker(c).ok_or("unexpected character")?;
        match fields.last_mut() {
            Some(field) if field.marker.is_none() => field.marker = Some(kind),
            _ => return Err("unit marker without a value"),
        }
    }
    if let Some(s) = start {
        fields.push(Field {
            digits: &body[s..],
            marker: None,
        });
    }

    if fields.is_empty() {
        return Err("missing angle");
    }
    if fields.len() > 3 {
        return Err("too many angle components");
    }

    let expected = [Marker::Degrees, Marker::Minutes, Marker::Seconds];
    let last = fields.len() - 1;
    let mut parts = [0.0_f64; 3];
    for (pos, field) in fields.iter().enumerate() {
        if field.marker.is_some_and(|m| m != expected[pos]) {
            return Err("unit markers out of order");
        }
        if pos != last && field.digits.contains('.') {
            return Err("only the last component may be fractional");
        }
        parts[pos] = field.digits.parse().map_err(|_| "invalid number")?;
    }

    let [degrees, minutes, seconds] = parts;
    if minutes >= 60.0 {
        return Err("minutes must be below 60");
    }
    if seconds >= 60.0 {
        return Err("seconds must be below 60");
    }
    let total = degrees + minutes / 60.0 + seconds / 3600.0;
    if total > 90.0 {
        return Err("bearing exceeds 90 degrees");
    }
    Ok(total)
}

impl Angle {
    /// Parses quadrant bearing text (`N45°30'00"E`) into an angle expressed in
    /// `convention`.
    ///
    /// Accepted forms include `N45°30'00"E`, `N45°30'E`, `N45E`, `N45.5E`,
    /// `n 45 30 00 e` and `N45d30m00sE`.
    ///
    /// # Errors
    ///
    /// Returns [`AngleError::Format`] if the text is not a valid quadrant bearing.
    pub fn from_bearing_str(
        text: &str,
        convention: impl Into<AngleConvention>,
    ) -> Result<Self, AngleError> {
        let bearing: QuadrantBearing = text.parse()?;
        Self::from_azimuth(bearing.azimuth(), convention)
    }

    /// Renders this angle, read in `convention`, as canonical quadrant bearing text.
    #[must_use]
    pub fn to_bearing_string(self, convention: impl Into<AngleConvention>) -> String {
        QuadrantBearing::from_azimuth(self.to_azimuth(convention)).to_string()
    }

    /// Returns this angle, read in `convention`, as a quadrant bearing.
    #[must_use]
    pub fn to_quadrant_bearing(self, convention: impl Into<AngleConvention>) -> QuadrantBearing {
        QuadrantBearing::from_azimuth(self.to_azimuth(convention))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::angle::{AngleReferenceDirection, AngleRotationDirection};
    use crate::error::AngleError;
    use approx::assert_abs_diff_eq;

    fn parse(text: &str) -> Angle {
        Angle::from_bearing_str(text, AngleConvention::AZIMUTH).unwrap()
    }

    #[test]
    fn parses_each_quadrant() {
        assert_abs_diff_eq!(parse("N45°30'00\"E").degrees(), 45.5, epsilon = 1e-12);
        assert_abs_diff_eq!(parse("S45°30'00\"E").degrees(), 134.5, epsilon = 1e-12);
        assert_abs_diff_eq!(parse("S45°30'00\"W").degrees(), 225.5, epsilon = 1e-12);
        assert_abs_diff_eq!(parse("N45°30'00\"W").degrees(), 314.5, epsilon = 1e-12);
    }

    #[test]
    fn accepts_loose_forms() {
        for text in [
            "N45°30'E",
            "N45°30'00\"E",
            "n 45 30 00 e",
            "N45d30m00sE",
            "N45.5E",
            "  N 45° 30′ 00″ E  ",
            "N45°30E",
        ] {
            assert_abs_diff_eq!(parse(text).degrees(), 45.5, epsilon = 1e-12);
        }
        assert_abs_diff_eq!(parse("N0°E").degrees(), 0.0);
        assert_abs_diff_eq!(parse("N90E").degrees(), 90.0);
    }

    #[test]
    fn rejects_malformed_text() {
        for text in [
            "",
            "45°30'E",
            "N45°30'",
            "X45E",
            "NE",
            "N°E",
            "N91E",
            "N45°60'E",
            "N45°30'60\"E",
            "N45.5°30'E",
            "N45°°E",
            "N45'30°E",
            "N1 2 3 4E",
            "N4.5.6E",
            "N45xE",
        ] {
            let err = Angle::from_bearing_str(text, AngleConvention::AZIMUTH).unwrap_err();
            assert!(matches!(err, AngleError::Format { .. }), "{text:?} gave {err:?}");
        }
    }

    #[test]
    fn renders_canonical_form() {
        let a = Angle::from_degrees(225.0).unwrap();
        assert_eq!(a.to_bearing_string(AngleConvention::AZIMUTH), "S45°00'00\"W");
        let b = Angle::from_dms(12, 3, 4.0).unwrap();
        assert_eq!(b.to_bearing_string(AngleConvention::AZIMUTH), "N12°03'04\"E");
    }

    #[test]
    fn axis_directions_render_in_fixed_quadrants() {
        let render = |d: f64| Angle::from_degrees(d).unwrap().to_bearing_string(AngleConvention::AZIMUTH);
        assert_eq!(render(0.0), "N0°00'00\"E");
        assert_eq!(render(90.0), "N90°00'00\"E");
        assert_eq!(render(180.0), "S0°00'00\"E");
        assert_eq!(render(270.0), "S90°00'00\"W");
    }

    #[test]
    fn near_axis_directions_render_like_the_axis() {
        let render = |d: f64| Angle::from_degrees(d).unwrap().to_bearing_string(AngleConvention::AZIMUTH);
        assert_eq!(render(359.999_999_99), "N0°00'00\"E");
        assert_eq!(render(0.000_000_01), "N0°00'00\"E");
        assert_eq!(render(89.999_999_99), "N90°00'00\"E");
        assert_eq!(render(90.000_000_01), "N90°00'00\"E");
        assert_eq!(render(179.999_999_99), "S0°00'00\"E");
        assert_eq!(render(180.000_000_01), "S0°00'00\"E");
        assert_eq!(render(269.999_999_99), "S90°00'00\"W");
        assert_eq!(render(270.000_000_01), "S90°00'00\"W");
        // Half a second off the axis still rounds away from it.
        assert_eq!(render(0.5 / 3600.0 + 1e-9), "N0°00'01\"E");
        assert_eq!(render(90.0 + 1.0 / 3600.0), "S89°59'59\"E");
    }

    #[test]
    fn flipped_closure_noise_stays_canonical() {
        let noisy = Angle::from_degrees(180.0 + 1e-11).unwrap().flipped();
        assert_eq!(noisy.to_bearing_string(AngleConvention::AZIMUTH), "N0°00'00\"E");
    }

    #[test]
    fn render_parse_round_trip() {
        let conventions = [
            AngleConvention::AZIMUTH,
            AngleConvention::new(
                AngleReferenceDirection::East,
                AngleRotationDirection::CounterClockwise,
            ),
            AngleConvention::new(
                AngleReferenceDirection::South,
                AngleRotationDirection::Clockwise,
            ),
        ];
        for convention in conventions {
            for (first, last) in [('N', 'E'), ('S', 'E'), ('S', 'W'), ('N', 'W')] {
                for d in 1..90 {
                    for (m, s) in [(0, 0), (0, 1), (15, 30), (59, 59)] {
                        let text = format!("{first}{d}°{m:02}'{s:02}\"{last}");
                        let angle = Angle::from_bearing_str(&text, convention).unwrap();
                        assert_eq!(angle.to_bearing_string(convention), text);
                    }
                }
            }
            for text in ["N0°00'00\"E", "N90°00'00\"E", "S0°00'00\"E", "S90°00'00\"W"] {
                let angle = Angle::from_bearing_str(text, convention).unwrap();
                assert_eq!(angle.to_bearing_string(convention), text);
            }
        }
    }

    #[test]
    fn quadrant_bearing_from_str() {
        let b: QuadrantBearing = "S10°15'00\"W".parse().unwrap();
        assert_eq!(b.quadrant, Quadrant::SouthWest);
        assert_abs_diff_eq!(b.degrees, 10.25, epsilon = 1e-12);
        assert_abs_diff_eq!(b.azimuth(), 190.25, epsilon = 1e-12);
    }
}
