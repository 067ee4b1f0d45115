use crate::angle::{Angle, AngleConvention};
use crate::math::{polar_point, Point2};
use crate::traverse::TraverseLegs;

/// Projects a traverse from its base point into plane coordinates.
///
/// The result has one more point than there are legs: element 0 is the base
/// point and element `i + 1` is the end of leg `i`. Nothing is cached, so
/// executing twice on unchanged inputs yields identical output.
pub struct Project<'a> {
    base: Point2,
    legs: &'a TraverseLegs,
    convention: AngleConvention,
}

impl<'a> Project<'a> {
    /// Creates a new `Project` operation reading bearings as azimuths.
    #[must_use]
    pub fn new(base: Point2, legs: &'a TraverseLegs) -> Self {
        Self {
            base,
            legs,
            convention: AngleConvention::AZIMUTH,
        }
    }

    /// Reads leg bearings in `convention` instead of as plain azimuths.
    #[must_use]
    pub fn with_convention(mut self, convention: AngleConvention) -> Self {
        self.convention = convention;
        self
    }

    /// Executes the projection, returning `legs.len() + 1` coordinates.
    #[must_use]
    pub fn execute(&self) -> Vec<Point2> {
        project_courses(
            self.base,
            self.legs.iter().map(|leg| (leg.bearing(), leg.distance())),
            self.convention,
        )
    }
}

/// Projects `(bearing, distance)` courses from `base`.
///
/// For course `i`, `p[i + 1] = p[i] + (d·sin(az), d·cos(az))` where `az` is the
/// bearing converted to a clockwise-from-north azimuth.
#[must_use]
pub fn project_courses(
    base: Point2,
    courses: impl IntoIterator<Item = (Angle, f64)>,
    convention: AngleConvention,
) -> Vec<Point2> {
    let courses = courses.into_iter();
    let mut points = Vec::with_capacity(courses.size_hint().0 + 1);
    points.push(base);
    let mut current = base;
    for (bearing, distance) in courses {
        current = polar_point(&current, bearing.to_azimuth(convention), distance);
        points.push(current);
    }
    points
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::angle::{AngleReferenceDirection, AngleRotationDirection};
    use proptest::prelude::*;

    const TOL: f64 = 1e-9;

    fn assert_point(p: &Point2, x: f64, y: f64) {
        assert!((p.x - x).abs() < TOL && (p.y - y).abs() < TOL, "got {p:?}, expected ({x}, {y})");
    }

    #[test]
    fn north_then_east() {
        let mut legs = TraverseLegs::new();
        legs.push(Angle::from_bearing_str("N0°E", AngleConvention::AZIMUTH).unwrap(), 10.0)
            .unwrap();
        legs.push(Angle::from_bearing_str("N90°E", AngleConvention::AZIMUTH).unwrap(), 10.0)
            .unwrap();

        let pts = Project::new(Point2::origin(), &legs).execute();
        assert_eq!(pts.len(), 3);
        assert_point(&pts[0], 0.0, 0.0);
        assert_point(&pts[1], 0.0, 10.0);
        assert_point(&pts[2], 10.0, 10.0);
    }

    #[test]
    fn empty_legs_yield_base_point_only() {
        let legs = TraverseLegs::new();
        let base = Point2::new(500.0, 1000.0);
        assert_eq!(Project::new(base, &legs).execute(), vec![base]);
    }

    #[test]
    fn zero_distance_leg_repeats_point() {
        let mut legs = TraverseLegs::new();
        legs.add_leg();
        let pts = Project::new(Point2::new(1.0, 2.0), &legs).execute();
        assert_eq!(pts.len(), 2);
        assert_point(&pts[1], 1.0, 2.0);
    }

    #[test]
    fn convention_changes_direction() {
        let mut legs = TraverseLegs::new();
        legs.push(Angle::from_degrees(0.0).unwrap(), 5.0).unwrap();
        let east_ccw = AngleConvention::new(
            AngleReferenceDirection::East,
            AngleRotationDirection::CounterClockwise,
        );
        let pts = Project::new(Point2::origin(), &legs)
            .with_convention(east_ccw)
            .execute();
        assert_point(&pts[1], 5.0, 0.0);
    }

    proptest! {
        #[test]
        fn length_and_idempotence(
            courses in prop::collection::vec((0.0f64..360.0, 0.0f64..1000.0), 0..20),
            bx in -1e4f64..1e4,
            by in -1e4f64..1e4,
        ) {
            let mut legs = TraverseLegs::new();
            for (b, d) in &courses {
                legs.push(Angle::from_degrees(*b).unwrap(), *d).unwrap();
            }
            let op = Project::new(Point2::new(bx, by), &legs);
            let first = op.execute();
            prop_assert_eq!(first.len(), courses.len() + 1);
            prop_assert_eq!(first, op.execute());
        }
    }
}
