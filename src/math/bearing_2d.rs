//! Plane survey helpers.
//!
//! Directions here are plain azimuths in degrees: measured clockwise from
//! north (+y), in `[0, 360)`. Easting maps to `x` via sine, northing to `y`
//! via cosine.

use super::{Point2, Vector2, TOLERANCE};

/// Returns the straight-line distance between two points.
#[must_use]
pub fn distance_between(a: &Point2, b: &Point2) -> f64 {
    nalgebra::distance(a, b)
}

/// Returns the azimuth (degrees clockwise from north) from `from` to `to`.
///
/// Coincident points have no direction; `0.0` (north) is returned for them.
#[must_use]
pub fn azimuth_between(from: &Point2, to: &Point2) -> f64 {
    let d = *to - *from;
    if d.norm() < TOLERANCE {
        return 0.0;
    }
    // atan2(east, north) swaps the usual argument order to get a
    // clockwise-from-north angle.
    let az = d.x.atan2(d.y).to_degrees();
    let az = az.rem_euclid(360.0);
    // rem_euclid can round up to exactly 360 for tiny negative inputs.
    if az >= 360.0 {
        0.0
    } else {
        az
    }
}

/// Returns the point reached by travelling `distance` from `origin` along `azimuth_deg`.
#[must_use]
pub fn polar_point(origin: &Point2, azimuth_deg: f64, distance: f64) -> Point2 {
    let (sin, cos) = azimuth_deg.to_radians().sin_cos();
    *origin + Vector2::new(distance * sin, distance * cos)
}

/// Returns the point halfway between `a` and `b`.
#[must_use]
pub fn midpoint(a: &Point2, b: &Point2) -> Point2 {
    nalgebra::center(a, b)
}

#[cfg(test)]
mod tests {
    use super::*;

    const TOL: f64 = 1e-10;

    #[test]
    fn distance_3_4_5() {
        let d = distance_between(&Point2::new(0.0, 0.0), &Point2::new(3.0, 4.0));
        assert!((d - 5.0).abs() < TOL, "d={d}");
    }

    #[test]
    fn azimuth_cardinal_directions() {
        let o = Point2::origin();
        let cases = [
            (Point2::new(0.0, 1.0), 0.0),
            (Point2::new(1.0, 0.0), 90.0),
            (Point2::new(0.0, -1.0), 180.0),
            (Point2::new(-1.0, 0.0), 270.0),
        ];
        for (p, expected) in cases {
            let az = azimuth_between(&o, &p);
            assert!((az - expected).abs() < TOL, "to {p:?}: az={az}");
        }
    }

    #[test]
    fn azimuth_south_west_diagonal() {
        let az = azimuth_between(&Point2::new(10.0, 10.0), &Point2::origin());
        assert!((az - 225.0).abs() < TOL, "az={az}");
    }

    #[test]
    fn azimuth_of_coincident_points_is_north() {
        let p = Point2::new(4.0, -2.0);
        assert!(azimuth_between(&p, &p).abs() < TOL);
    }

    #[test]
    fn polar_point_inverts_azimuth_and_distance() {
        let origin = Point2::new(100.0, 200.0);
        let p = polar_point(&origin, 123.456, 78.9);
        assert!((distance_between(&origin, &p) - 78.9).abs() < 1e-9);
        assert!((azimuth_between(&origin, &p) - 123.456).abs() < 1e-9);
    }

    #[test]
    fn polar_point_north_and_east() {
        let north = polar_point(&Point2::origin(), 0.0, 10.0);
        assert!(north.x.abs() < TOL && (north.y - 10.0).abs() < TOL);
        let east = polar_point(&Point2::origin(), 90.0, 10.0);
        assert!((east.x - 10.0).abs() < TOL && east.y.abs() < TOL);
    }

    #[test]
    fn midpoint_halfway() {
        let m = midpoint(&Point2::new(0.0, 0.0), &Point2::new(4.0, -2.0));
        assert!((m.x - 2.0).abs() < TOL);
        assert!((m.y + 1.0).abs() < TOL);
    }
}
