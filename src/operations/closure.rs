use crate::angle::{Angle, AngleConvention};
use crate::math::{azimuth_between, distance_between, Point2, TOLERANCE};

#[cfg(feature = "serialize")]
use serde::{Deserialize, Serialize};

/// The implied leg from the last traverse point back to the first.
///
/// Values are kept at full precision; rounding happens only in the
/// `display_*` methods.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serialize", derive(Serialize, Deserialize))]
pub struct ClosureResult {
    /// Length of the closing leg.
    pub distance: f64,
    /// Direction of the closing leg, expressed in `convention`.
    pub bearing: Angle,
    /// Convention `bearing` is expressed in.
    pub convention: AngleConvention,
    /// Easting component of the closing leg (first − last).
    pub delta_easting: f64,
    /// Northing component of the closing leg (first − last).
    pub delta_northing: f64,
    /// Sum of the traverse leg lengths, excluding the closing leg.
    pub perimeter: f64,
}

impl ClosureResult {
    /// Precision of the traverse as `perimeter / closing distance`, i.e. the
    /// `N` in "1 : N". `None` when the traverse closes exactly.
    #[must_use]
    pub fn precision_ratio(&self) -> Option<f64> {
        (self.distance > TOLERANCE).then(|| self.perimeter / self.distance)
    }

    /// Closing distance formatted with `decimals` places, e.g. `"14.142"`.
    #[must_use]
    pub fn display_distance(&self, decimals: usize) -> String {
        format!("{:.*}", decimals, self.distance)
    }

    /// Closing bearing as quadrant bearing text, e.g. `S45°00'00"W`.
    #[must_use]
    pub fn display_bearing(&self) -> String {
        self.bearing.to_bearing_string(self.convention)
    }
}

/// Computes the closing error of a projected traverse.
pub struct Closure<'a> {
    coordinates: &'a [Point2],
    convention: AngleConvention,
}

impl<'a> Closure<'a> {
    /// Creates a new `Closure` query reporting the bearing as an azimuth.
    #[must_use]
    pub fn new(coordinates: &'a [Point2]) -> Self {
        Self {
            coordinates,
            convention: AngleConvention::AZIMUTH,
        }
    }

    /// Reports the closing bearing in `convention`.
    #[must_use]
    pub fn with_convention(mut self, convention: AngleConvention) -> Self {
        self.convention = convention;
        self
    }

    /// Executes the query.
    ///
    /// Returns `None` for fewer than two coordinates, and when a coordinate or
    /// a derived length is not finite.
    #[must_use]
    pub fn execute(&self) -> Option<ClosureResult> {
        let (first, last) = match self.coordinates {
            [first, .., last] => (first, last),
            _ => return None,
        };
        if !self
            .coordinates
            .iter()
            .all(|p| p.x.is_finite() && p.y.is_finite())
        {
            return None;
        }
        let distance = distance_between(last, first);
        let perimeter: f64 = self
            .coordinates
            .windows(2)
            .map(|w| distance_between(&w[0], &w[1]))
            .sum();
        if !(distance.is_finite() && perimeter.is_finite()) {
            return None;
        }
        let bearing = Angle::from_azimuth(azimuth_between(last, first), self.convention).ok()?;
        Some(ClosureResult {
            distance,
            bearing,
            convention: self.convention,
            delta_easting: first.x - last.x,
            delta_northing: first.y - last.y,
            perimeter,
        })
    }
}
