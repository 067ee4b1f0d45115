//! Directional values for survey computations.
//!
//! An [`Angle`] is a direction normalized into `[0, 360)` degrees. How that
//! number maps onto the compass is decided by an [`AngleConvention`]: the
//! reference direction the angle is measured from, and the direction it turns.
//! The default convention (north, clockwise) makes an `Angle` a plain azimuth.

mod bearing;

pub use bearing::{Quadrant, QuadrantBearing};

use std::fmt;
use std::ops::{Add, Sub};

use crate::error::AngleError;

#[cfg(feature = "serialize")]
use serde::{Deserialize, Serialize};

const FULL_TURN: f64 = 360.0;
const SECONDS_PER_TURN: u32 = 360 * 3600;

/// Wraps a finite degree value into `[0, 360)`.
fn wrap(degrees: f64) -> f64 {
    let d = degrees.rem_euclid(FULL_TURN);
    // rem_euclid of a tiny negative value rounds up to 360.0, and -0.0 stays negative.
    if d >= FULL_TURN {
        0.0
    } else {
        d + 0.0
    }
}

/// A direction in degrees, always normalized into `[0, 360)`.
///
/// Arithmetic wraps modulo 360, so subtracting a larger angle never goes
/// negative.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default)]
#[cfg_attr(
    feature = "serialize",
    derive(Serialize, Deserialize),
    serde(try_from = "f64", into = "f64")
)]
pub struct Angle {
    degrees: f64,
}

impl Angle {
    /// The zero direction.
    pub const ZERO: Self = Self { degrees: 0.0 };

    /// Creates an angle from decimal degrees, wrapping into `[0, 360)`.
    ///
    /// # Errors
    ///
    /// Returns [`AngleError::NonFinite`] if `degrees` is NaN or infinite.
    pub fn from_degrees(degrees: f64) -> Result<Self, AngleError> {
        if !degrees.is_finite() {
            return Err(AngleError::NonFinite { value: degrees });
        }
        Ok(Self {
            degrees: wrap(degrees),
        })
    }

    /// Creates an angle from degrees, minutes and seconds.
    ///
    /// # Errors
    ///
    /// Returns [`AngleError::NonFinite`] if `seconds` is NaN or infinite, and
    /// [`AngleError::Format`] if `minutes` is 60 or more or `seconds` is outside
    /// `[0, 60)`.
    pub fn from_dms(degrees: u16, minutes: u8, seconds: f64) -> Result<Self, AngleError> {
        if !seconds.is_finite() {
            return Err(AngleError::NonFinite { value: seconds });
        }
        let reason = if minutes >= 60 {
            Some("minutes must be below 60")
        } else if !(0.0..60.0).contains(&seconds) {
            Some("seconds must be in [0, 60)")
        } else {
            None
        };
        if let Some(reason) = reason {
            return Err(AngleError::Format {
                input: format!("{degrees}°{minutes}'{seconds}\""),
                reason,
            });
        }
        Self::from_degrees(
            f64::from(degrees) + f64::from(minutes) / 60.0 + seconds / 3600.0,
        )
    }

    /// Creates an angle from surveyor's `DDD.MMSS` notation, e.g. `45.3015` for 45°30'15".
    ///
    /// Digits past the fourth decimal place are fractional seconds.
    ///
    /// # Errors
    ///
    /// Returns [`AngleError::NonFinite`] for NaN or infinite input, and
    /// [`AngleError::Format`] if the minutes or seconds field is 60 or more.
    pub fn from_dms_decimal(value: f64) -> Result<Self, AngleError> {
        if !value.is_finite() {
            return Err(AngleError::NonFinite { value });
        }
        let sign = value.signum();
        let value = value.abs();
        let degrees = value.trunc();
        // The nudge keeps 45.3 from landing on 29.999.. minutes.
        let minute_field = (value - degrees) * 100.0;
        let minutes = (minute_field + 1e-9).floor();
        let seconds = ((minute_field - minutes) * 100.0).max(0.0);
        let seconds = (seconds * 1e6).round() / 1e6;
        if minutes >= 60.0 {
            return Err(AngleError::Format {
                input: value.to_string(),
                reason: "minutes must be below 60",
            });
        }
        if seconds >= 60.0 {
            return Err(AngleError::Format {
                input: value.to_string(),
                reason: "seconds must be below 60",
            });
        }
        Self::from_degrees(sign * (degrees + minutes / 60.0 + seconds / 3600.0))
    }

    /// Returns the normalized value in decimal degrees.
    #[must_use]
    pub fn degrees(self) -> f64 {
        self.degrees
    }

    /// Returns the value in radians.
    #[must_use]
    pub fn to_radians(self) -> f64 {
        self.degrees.to_radians()
    }

    /// Splits the angle into whole degrees, minutes and seconds.
    ///
    /// Seconds are rounded to the nearest whole second with carry, so
    /// 359°59'59.7" becomes 0°00'00".
    #[must_use]
    pub fn dms(self) -> Dms {
        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        let total = (self.degrees * 3600.0).round() as u32 % SECONDS_PER_TURN;
        // Every part is below its type's limit after the modulo above.
        #[allow(clippy::cast_possible_truncation)]
        let (degrees, minutes, seconds) =
            ((total / 3600) as u16, (total / 60 % 60) as u8, (total % 60) as u8);
        Dms {
            degrees,
            minutes,
            seconds,
        }
    }

    /// Returns the angle in surveyor's `DDD.MMSS` notation, rounded to whole seconds.
    #[must_use]
    pub fn to_dms_decimal(self) -> f64 {
        let dms = self.dms();
        f64::from(dms.degrees) + f64::from(dms.minutes) / 100.0 + f64::from(dms.seconds) / 10_000.0
    }

    /// Returns the opposite direction, `(self + 180) mod 360`.
    #[must_use]
    pub fn flipped(self) -> Self {
        Self {
            degrees: wrap(self.degrees + 180.0),
        }
    }

    /// Converts this angle, read in `convention`, into a clockwise-from-north azimuth.
    #[must_use]
    pub fn to_azimuth(self, convention: impl Into<AngleConvention>) -> f64 {
        let convention = convention.into();
        let reference = convention.reference.azimuth();
        match convention.rotation {
            AngleRotationDirection::Clockwise => wrap(reference + self.degrees),
            AngleRotationDirection::CounterClockwise => wrap(reference - self.degrees),
        }
    }

    /// Expresses a clockwise-from-north azimuth as an angle in `convention`.
    ///
    /// # Errors
    ///
    /// Returns [`AngleError::NonFinite`] if `azimuth` is NaN or infinite.
    pub fn from_azimuth(
        azimuth: f64,
        convention: impl Into<AngleConvention>,
    ) -> Result<Self, AngleError> {
        let convention = convention.into();
        let reference = convention.reference.azimuth();
        match convention.rotation {
            AngleRotationDirection::Clockwise => Self::from_degrees(azimuth - reference),
            AngleRotationDirection::CounterClockwise => Self::from_degrees(reference - azimuth),
        }
    }

    /// Returns `true` if the two angles differ by at most `tolerance` degrees,
    /// measured the short way around the circle.
    #[must_use]
    pub fn approx_eq(self, other: Self, tolerance: f64) -> bool {
        let diff = (self.degrees - other.degrees).abs();
        diff.min(FULL_TURN - diff) <= tolerance
    }
}

impl Add for Angle {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self {
            degrees: wrap(self.degrees + rhs.degrees),
        }
    }
}

impl Sub for Angle {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        Self {
            degrees: wrap(self.degrees - rhs.degrees),
        }
    }
}

impl TryFrom<f64> for Angle {
    type Error = AngleError;

    fn try_from(degrees: f64) -> Result<Self, AngleError> {
        Self::from_degrees(degrees)
    }
}

impl From<Angle> for f64 {
    fn from(angle: Angle) -> Self {
        angle.degrees
    }
}

impl fmt::Display for Angle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let dms = self.dms();
        write!(f, "{}°{:02}'{:02}\"", dms.degrees, dms.minutes, dms.seconds)
    }
}

/// An angle broken into whole degrees, minutes and seconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Dms {
    pub degrees: u16,
    pub minutes: u8,
    pub seconds: u8,
}

/// The direction an angle is measured from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serialize", derive(Serialize, Deserialize))]
pub enum AngleReferenceDirection {
    #[default]
    North,
    East,
    South,
    West,
}

impl AngleReferenceDirection {
    /// Azimuth of the reference direction itself.
    #[must_use]
    pub fn azimuth(self) -> f64 {
        match self {
            Self::North => 0.0,
            Self::East => 90.0,
            Self::South => 180.0,
            Self::West => 270.0,
        }
    }
}

/// The direction an angle turns away from its reference.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serialize", derive(Serialize, Deserialize))]
pub enum AngleRotationDirection {
    #[default]
    Clockwise,
    CounterClockwise,
}

/// How a stored [`Angle`] maps onto the compass.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serialize", derive(Serialize, Deserialize))]
pub struct AngleConvention {
    pub reference: AngleReferenceDirection,
    pub rotation: AngleRotationDirection,
}

impl AngleConvention {
    /// Clockwise from north: angles are plain azimuths.
    pub const AZIMUTH: Self = Self {
        reference: AngleReferenceDirection::North,
        rotation: AngleRotationDirection::Clockwise,
    };

    /// Creates a convention from its two parts.
    #[must_use]
    pub fn new(reference: AngleReferenceDirection, rotation: AngleRotationDirection) -> Self {
        Self {
            reference,
            rotation,
        }
    }
}

impl From<AngleRotationDirection> for AngleConvention {
    /// A north-referenced convention turning in `rotation`.
    fn from(rotation: AngleRotationDirection) -> Self {
        Self::new(AngleReferenceDirection::North, rotation)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    fn deg(d: f64) -> Angle {
        Angle::from_degrees(d).unwrap()
    }

    #[test]
    fn normalizes_into_full_turn() {
        assert_abs_diff_eq!(deg(370.0).degrees(), 10.0, epsilon = 1e-12);
        assert_abs_diff_eq!(deg(-90.0).degrees(), 270.0, epsilon = 1e-12);
        assert_abs_diff_eq!(deg(720.0).degrees(), 0.0);
        assert!(deg(-1e-20).degrees() < 360.0);
        assert!(deg(-0.0).degrees().is_sign_positive());
    }

    #[test]
    fn rejects_non_finite() {
        assert!(matches!(
            Angle::from_degrees(f64::NAN),
            Err(AngleError::NonFinite { .. })
        ));
        assert!(Angle::from_degrees(f64::INFINITY).is_err());
        assert!(Angle::from_dms(10, 0, f64::NEG_INFINITY).is_err());
    }

    #[test]
    fn dms_fields_out_of_range_are_format_errors() {
        for (m, s) in [(75, 0.0), (60, 0.0), (10, -3.0), (10, 60.0), (75, -3.0)] {
            let err = Angle::from_dms(10, m, s).unwrap_err();
            assert!(matches!(err, AngleError::Format { .. }), "{m} {s} gave {err:?}");
        }
        assert_abs_diff_eq!(
            Angle::from_dms(10, 59, 59.5).unwrap().degrees(),
            10.0 + 59.0 / 60.0 + 59.5 / 3600.0,
            epsilon = 1e-12
        );
    }

    #[test]
    fn arithmetic_wraps() {
        assert_abs_diff_eq!((deg(350.0) + deg(20.0)).degrees(), 10.0, epsilon = 1e-12);
        assert_abs_diff_eq!((deg(10.0) - deg(30.0)).degrees(), 340.0, epsilon = 1e-12);
        assert_abs_diff_eq!((deg(30.0) - deg(30.0)).degrees(), 0.0);
    }

    #[test]
    fn flip_45_and_back() {
        let a = deg(45.0);
        let flipped = a.flipped();
        assert_abs_diff_eq!(flipped.degrees(), 225.0);
        assert_abs_diff_eq!(flipped.flipped().degrees(), 45.0);
    }

    #[test]
    fn double_flip_is_identity() {
        for i in 0..3600 {
            let a = deg(f64::from(i) * 0.1 + 0.013);
            assert!(a.flipped().flipped().approx_eq(a, 1e-9), "a={a:?}");
            assert!(!a.flipped().approx_eq(a, 179.0));
        }
    }

    #[test]
    fn dms_parts_and_display() {
        let a = Angle::from_dms(45, 30, 15.0).unwrap();
        assert_eq!(
            a.dms(),
            Dms {
                degrees: 45,
                minutes: 30,
                seconds: 15
            }
        );
        assert_eq!(a.to_string(), "45°30'15\"");
        assert_eq!(deg(359.99999).to_string(), "0°00'00\"");
    }

    #[test]
    fn dms_decimal_notation() {
        let a = Angle::from_dms_decimal(45.3).unwrap();
        assert_abs_diff_eq!(a.degrees(), 45.5, epsilon = 1e-9);
        let b = Angle::from_dms_decimal(123.4530).unwrap();
        assert_eq!(b.to_string(), "123°45'30\"");
        assert_abs_diff_eq!(b.to_dms_decimal(), 123.4530, epsilon = 1e-9);
        assert!(matches!(
            Angle::from_dms_decimal(45.75),
            Err(AngleError::Format { .. })
        ));
        assert!(Angle::from_dms_decimal(45.3075).is_err());
    }

    #[test]
    fn azimuth_conventions() {
        let a = deg(30.0);
        assert_abs_diff_eq!(a.to_azimuth(AngleConvention::AZIMUTH), 30.0, epsilon = 1e-12);
        assert_abs_diff_eq!(
            a.to_azimuth(AngleRotationDirection::CounterClockwise),
            330.0,
            epsilon = 1e-12
        );
        let east_ccw = AngleConvention::new(
            AngleReferenceDirection::East,
            AngleRotationDirection::CounterClockwise,
        );
        // Mathematical convention: 30° above the +x axis.
        assert_abs_diff_eq!(a.to_azimuth(east_ccw), 60.0, epsilon = 1e-12);
        let south_cw = AngleConvention::new(
            AngleReferenceDirection::South,
            AngleRotationDirection::Clockwise,
        );
        assert_abs_diff_eq!(a.to_azimuth(south_cw), 210.0, epsilon = 1e-12);
    }

    #[test]
    fn azimuth_round_trip_in_every_convention() {
        use AngleReferenceDirection::{East, North, South, West};
        use AngleRotationDirection::{Clockwise, CounterClockwise};
        for reference in [North, East, South, West] {
            for rotation in [Clockwise, CounterClockwise] {
                let convention = AngleConvention::new(reference, rotation);
                for az in [0.0, 12.5, 90.0, 181.0, 359.5] {
                    let a = Angle::from_azimuth(az, convention).unwrap();
                    assert_abs_diff_eq!(a.to_azimuth(convention), az, epsilon = 1e-9);
                }
            }
        }
    }

    #[test]
    fn approx_eq_across_zero() {
        assert!(deg(359.9999999).approx_eq(deg(0.0), 1e-6));
        assert!(!deg(359.0).approx_eq(deg(1.0), 1.0));
    }
}
