//! Contracts the host application implements for an edit session.
//!
//! Capture collaborators prompt the user and return synchronously; `None`
//! means the user cancelled the prompt. Sinks receive coordinates and never
//! call back into the session.

use crate::angle::Angle;
use crate::error::CommitRejected;
use crate::math::Point2;

/// Asks the user for the traverse base point.
pub trait PointCapture {
    /// Returns the picked point, or `None` if the prompt was cancelled.
    fn request_base_point(&mut self) -> Option<Point2>;
}

/// Asks the user for a bearing, rubber-banded from `origin`.
pub trait AngleCapture {
    /// Returns the entered bearing, or `None` if the prompt was cancelled.
    fn request_angle(&mut self, origin: Point2) -> Option<Angle>;
}

/// Asks the user for a distance, measured from `origin`.
pub trait DistanceCapture {
    /// Returns the entered distance, or `None` if the prompt was cancelled.
    fn request_distance(&mut self, origin: Point2) -> Option<f64>;
}

/// Draws temporary graphics showing the traverse being edited.
pub trait PreviewRenderer {
    /// Replaces any current preview with a polyline through `coordinates`.
    fn show_preview(&mut self, coordinates: &[Point2]);

    /// Removes the preview.
    fn clear_preview(&mut self);
}

/// Writes the finished traverse into the drawing.
pub trait GeometryPersister {
    /// Commits a polyline through `coordinates`.
    ///
    /// # Errors
    ///
    /// Returns [`CommitRejected`] if the host could not store the geometry.
    fn commit_polyline(&mut self, coordinates: &[Point2]) -> Result<(), CommitRejected>;
}
