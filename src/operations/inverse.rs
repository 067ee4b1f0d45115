use crate::angle::{Angle, AngleConvention};
use crate::math::{azimuth_between, distance_between, Point2};

/// Computes the bearing and distance of the course between two known points.
///
/// This is the inverse of projecting a leg: given its ends, recover the leg.
pub struct Inverse {
    from: Point2,
    to: Point2,
    convention: AngleConvention,
}

impl Inverse {
    /// Creates a new `Inverse` query reporting the bearing as an azimuth.
    #[must_use]
    pub fn new(from: Point2, to: Point2) -> Self {
        Self {
            from,
            to,
            convention: AngleConvention::AZIMUTH,
        }
    }

    /// Reports the bearing in `convention`.
    #[must_use]
    pub fn with_convention(mut self, convention: AngleConvention) -> Self {
        self.convention = convention;
        self
    }

    /// Executes the query, returning `(bearing, distance)` from `from` to `to`.
    ///
    /// Coincident points give a zero-length course bearing north. Returns
    /// `None` if either point is not finite or the distance overflows.
    #[must_use]
    pub fn execute(&self) -> Option<(Angle, f64)> {
        let distance = distance_between(&self.from, &self.to);
        if !distance.is_finite() {
            return None;
        }
        let bearing = Angle::from_azimuth(azimuth_between(&self.from, &self.to), self.convention).ok()?;
        Some((bearing, distance))
    }
}

/// Bearing and distance from `from` to `to`, with the bearing in `convention`.
#[must_use]
pub fn leg_between(from: Point2, to: Point2, convention: AngleConvention) -> Option<(Angle, f64)> {
    Inverse::new(from, to).with_convention(convention).execute()
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::angle::{AngleReferenceDirection, AngleRotationDirection};
    use crate::operations::project_courses;
    use approx::assert_abs_diff_eq;

    #[test]
    fn south_west_course() {
        let (bearing, distance) = Inverse::new(Point2::new(10.0, 10.0), Point2::new(0.0, 0.0))
            .execute()
            .unwrap();
        assert_abs_diff_eq!(distance, 200.0_f64.sqrt(), epsilon = 1e-12);
        assert_abs_diff_eq!(bearing.degrees(), 225.0, epsilon = 1e-9);
        assert_eq!(bearing.to_bearing_string(AngleConvention::AZIMUTH), "S45°00'00\"W");
    }

    #[test]
    fn coincident_points_give_zero_course() {
        let p = Point2::new(3.0, -4.0);
        let (bearing, distance) = Inverse::new(p, p).execute().unwrap();
        assert_abs_diff_eq!(distance, 0.0);
        assert_abs_diff_eq!(bearing.degrees(), 0.0);
    }

    #[test]
    fn bearing_follows_convention() {
        let east_ccw = AngleConvention::new(
            AngleReferenceDirection::East,
            AngleRotationDirection::CounterClockwise,
        );
        // Due north is a quarter turn counter-clockwise from east.
        let (bearing, _) = leg_between(Point2::origin(), Point2::new(0.0, 5.0), east_ccw).unwrap();
        assert_abs_diff_eq!(bearing.degrees(), 90.0, epsilon = 1e-9);
    }

    #[test]
    fn projecting_the_course_lands_on_the_far_point() {
        let from = Point2::new(12.5, -7.0);
        let to = Point2::new(-3.25, 41.0);
        let (bearing, distance) = leg_between(from, to, AngleConvention::AZIMUTH).unwrap();
        let pts = project_courses(from, [(bearing, distance)], AngleConvention::AZIMUTH);
        assert_abs_diff_eq!(pts[1].x, to.x, epsilon = 1e-9);
        assert_abs_diff_eq!(pts[1].y, to.y, epsilon = 1e-9);
    }

    #[test]
    fn non_finite_input_has_no_course() {
        assert!(Inverse::new(Point2::new(f64::NAN, 0.0), Point2::origin())
            .execute()
            .is_none());
        assert!(Inverse::new(Point2::origin(), Point2::new(0.0, f64::INFINITY))
            .execute()
            .is_none());
        assert!(Inverse::new(Point2::new(-1.5e308, 0.0), Point2::new(1.5e308, 0.0))
            .execute()
            .is_none());
    }
}
