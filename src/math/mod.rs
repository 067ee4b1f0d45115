pub mod bearing_2d;

pub use bearing_2d::{azimuth_between, distance_between, midpoint, polar_point};

/// 2D point type. Easting is `x`, northing is `y`.
pub type Point2 = nalgebra::Point2<f64>;

/// 2D vector type.
pub type Vector2 = nalgebra::Vector2<f64>;

/// Global geometric tolerance for floating-point comparisons.
pub const TOLERANCE: f64 = 1e-10;
