use crate::math::{midpoint, Point2};

/// An axis-aligned rectangle in plan.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds2 {
    /// South-west corner.
    pub min: Point2,
    /// North-east corner.
    pub max: Point2,
}

impl Bounds2 {
    /// East-west extent.
    #[must_use]
    pub fn width(&self) -> f64 {
        self.max.x - self.min.x
    }

    /// North-south extent.
    #[must_use]
    pub fn height(&self) -> f64 {
        self.max.y - self.min.y
    }

    /// Centre of the rectangle.
    #[must_use]
    pub fn center(&self) -> Point2 {
        midpoint(&self.min, &self.max)
    }
}

/// Computes the plan extents of a set of coordinates, e.g. to zoom a view to a traverse.
pub struct Extents<'a> {
    coordinates: &'a [Point2],
}

impl<'a> Extents<'a> {
    /// Creates a new `Extents` query.
    #[must_use]
    pub fn new(coordinates: &'a [Point2]) -> Self {
        Self { coordinates }
    }

    /// Executes the query. Returns `None` when there are no coordinates.
    #[must_use]
    pub fn execute(&self) -> Option<Bounds2> {
        let (first, rest) = self.coordinates.split_first()?;
        let init = Bounds2 {
            min: *first,
            max: *first,
        };
        Some(rest.iter().fold(init, |b, p| Bounds2 {
            min: Point2::new(b.min.x.min(p.x), b.min.y.min(p.y)),
            max: Point2::new(b.max.x.max(p.x), b.max.y.max(p.y)),
        }))
    }
}
