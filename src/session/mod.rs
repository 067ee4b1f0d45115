//! Host-agnostic orchestration of a traverse being edited.
//!
//! A [`TraverseSession`] owns the leg collection. Every successful edit
//! re-projects the coordinates, recomputes the closure and pushes the new
//! coordinates to the preview renderer; a rejected edit changes nothing.
//!
//! ```text
//! Empty --add/capture leg--> Editing --clear / last leg removed--> Empty
//!                            Editing --draw--> persister --> Editing | Empty (AfterDraw)
//! ```

mod collaborators;
mod config;

pub use collaborators::{
    AngleCapture, DistanceCapture, GeometryPersister, PointCapture, PreviewRenderer,
};
pub use config::{AfterDraw, SessionConfig};

use std::fmt;

use tracing::{debug, info, warn};

use crate::angle::Angle;
use crate::error::{LegError, Result, SessionError, TraverseError};
use crate::math::Point2;
use crate::operations::{Bounds2, Closure, ClosureResult, Extents, Inverse, Project};
use crate::traverse::{LegId, TraverseLeg, TraverseLegs};
use crate::units::LengthUnit;

/// Lifecycle state of a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    /// No legs.
    Empty,
    /// At least one leg; edits and draws are possible.
    Editing,
}

/// Outcome of an interactive capture: a value, or the user backed out.
///
/// Cancelling is not an error and never changes the session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[must_use]
pub enum Captured<T> {
    Value(T),
    Cancelled,
}

impl<T> Captured<T> {
    /// Returns the captured value, if any.
    pub fn value(self) -> Option<T> {
        match self {
            Self::Value(v) => Some(v),
            Self::Cancelled => None,
        }
    }

    /// Returns `true` if the user cancelled.
    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        matches!(self, Self::Cancelled)
    }
}

/// A copy of everything derived from the legs at one point in time.
#[derive(Debug, Clone, PartialEq)]
pub struct TraverseSnapshot {
    pub state: SessionState,
    pub legs: Vec<TraverseLeg>,
    pub coordinates: Vec<Point2>,
    pub closure: Option<ClosureResult>,
}

/// A single traverse being edited interactively.
///
/// Collaborators are passed in explicitly at construction. All methods take
/// `&mut self`, so a session cannot be edited or drawn from two places at once.
pub struct TraverseSession {
    config: SessionConfig,
    base_point: Point2,
    legs: TraverseLegs,
    coordinates: Vec<Point2>,
    closure: Option<ClosureResult>,
    point_capture: Box<dyn PointCapture>,
    angle_capture: Box<dyn AngleCapture>,
    distance_capture: Box<dyn DistanceCapture>,
    preview: Box<dyn PreviewRenderer>,
    persister: Box<dyn GeometryPersister>,
}

impl fmt::Debug for TraverseSession {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TraverseSession")
            .field("config", &self.config)
            .field("base_point", &self.base_point)
            .field("legs", &self.legs)
            .field("closure", &self.closure)
            .finish_non_exhaustive()
    }
}

/// Logs a rejected edit and lifts its error into [`TraverseError`].
fn rejected<T, E>(op: &'static str, result: std::result::Result<T, E>) -> Result<T>
where
    E: Into<TraverseError>,
{
    result.map_err(|e| {
        let e = e.into();
        warn!(op, error = %e, "traverse edit rejected");
        e
    })
}

/// Returns the first point with a NaN or infinite component.
fn first_non_finite<'a>(points: impl IntoIterator<Item = &'a Point2>) -> Option<&'a Point2> {
    points
        .into_iter()
        .find(|p| !(p.x.is_finite() && p.y.is_finite()))
}

impl TraverseSession {
    /// Creates an empty session wired to the host's collaborators.
    pub fn new(
        config: SessionConfig,
        point_capture: impl PointCapture + 'static,
        angle_capture: impl AngleCapture + 'static,
        distance_capture: impl DistanceCapture + 'static,
        preview: impl PreviewRenderer + 'static,
        persister: impl GeometryPersister + 'static,
    ) -> Self {
        Self {
            base_point: config.base_point,
            config,
            legs: TraverseLegs::new(),
            coordinates: vec![config.base_point],
            closure: None,
            point_capture: Box::new(point_capture),
            angle_capture: Box::new(angle_capture),
            distance_capture: Box::new(distance_capture),
            preview: Box::new(preview),
            persister: Box::new(persister),
        }
    }

    // --- Queries ---

    #[must_use]
    pub fn state(&self) -> SessionState {
        if self.legs.is_empty() {
            SessionState::Empty
        } else {
            SessionState::Editing
        }
    }

    #[must_use]
    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    #[must_use]
    pub fn base_point(&self) -> Point2 {
        self.base_point
    }

    #[must_use]
    pub fn legs(&self) -> &TraverseLegs {
        &self.legs
    }

    /// Projected coordinates, base point first.
    #[must_use]
    pub fn coordinates(&self) -> &[Point2] {
        &self.coordinates
    }

    /// Closing error, available once the traverse has two or more legs.
    #[must_use]
    pub fn closure(&self) -> Option<&ClosureResult> {
        self.closure.as_ref()
    }

    /// Closing distance and bearing formatted for display.
    #[must_use]
    pub fn closure_text(&self) -> Option<(String, String)> {
        self.closure.as_ref().map(|c| {
            (
                c.display_distance(self.config.display_decimals),
                c.display_bearing(),
            )
        })
    }

    /// Plan extents of the projected coordinates, for zooming a view to the traverse.
    #[must_use]
    pub fn extents(&self) -> Option<Bounds2> {
        Extents::new(&self.coordinates).execute()
    }

    #[must_use]
    pub fn snapshot(&self) -> TraverseSnapshot {
        TraverseSnapshot {
            state: self.state(),
            legs: self.legs.to_vec(),
            coordinates: self.coordinates.clone(),
            closure: self.closure,
        }
    }

    // --- Edits ---

    /// Appends an empty leg.
    pub fn add_leg(&mut self) -> LegId {
        let id = self.legs.add_leg();
        self.refresh();
        id
    }

    /// Appends a leg with the given bearing and distance.
    ///
    /// # Errors
    ///
    /// Returns an error if `distance` is negative or not finite, or if the
    /// new leg would project to a non-finite coordinate.
    pub fn push_leg(&mut self, bearing: Angle, distance: f64) -> Result<LegId> {
        self.stage("push_leg", |legs| legs.push(bearing, distance))
    }

    /// Inserts a leg before position `index`.
    ///
    /// # Errors
    ///
    /// Returns an error if `index > len`, or if `distance` is invalid.
    pub fn insert_leg(&mut self, index: usize, bearing: Angle, distance: f64) -> Result<LegId> {
        self.stage("insert_leg", |legs| legs.insert_leg(index, bearing, distance))
    }

    /// Removes the leg at `index`.
    ///
    /// # Errors
    ///
    /// Returns an error if `index` is out of range.
    pub fn remove_leg(&mut self, index: usize) -> Result<TraverseLeg> {
        self.stage("remove_leg", |legs| legs.remove_leg(index))
    }

    /// Moves the leg at `from` to position `to`.
    ///
    /// # Errors
    ///
    /// Returns an error if either index is out of range.
    pub fn move_leg(&mut self, from: usize, to: usize) -> Result<()> {
        self.stage("move_leg", |legs| legs.move_leg(from, to))
    }

    /// Replaces the distance of the leg at `index`.
    ///
    /// # Errors
    ///
    /// Returns an error if `index` is out of range, or if `distance` is invalid.
    pub fn set_distance(&mut self, index: usize, distance: f64) -> Result<()> {
        self.stage("set_distance", |legs| legs.set_distance(index, distance))
    }

    /// Replaces the bearing of the leg at `index`.
    ///
    /// # Errors
    ///
    /// Returns an error if `index` is out of range.
    pub fn set_bearing(&mut self, index: usize, bearing: Angle) -> Result<()> {
        self.stage("set_bearing", |legs| legs.set_bearing(index, bearing))
    }

    /// Parses quadrant bearing text in the session's convention and applies it
    /// to the leg at `index`.
    ///
    /// # Errors
    ///
    /// Returns a format error for malformed text, or an error if `index` is out
    /// of range.
    pub fn set_bearing_str(&mut self, index: usize, text: &str) -> Result<Angle> {
        let bearing = rejected(
            "set_bearing_str",
            Angle::from_bearing_str(text, self.config.convention),
        )?;
        self.set_bearing(index, bearing)?;
        Ok(bearing)
    }

    /// Reverses the leg at `index` and returns its new bearing.
    ///
    /// # Errors
    ///
    /// Returns an error if `index` is out of range.
    pub fn flip_bearing(&mut self, index: usize) -> Result<Angle> {
        self.stage("flip_bearing", |legs| legs.flip_bearing(index))
    }

    /// Treats the distance of the leg at `index` as recorded in `unit` and
    /// converts it to meters, returning the new distance.
    ///
    /// # Errors
    ///
    /// Returns an error if `index` is out of range.
    pub fn convert_distance_units(&mut self, index: usize, unit: LengthUnit) -> Result<f64> {
        self.stage("convert_distance_units", |legs| {
            legs.convert_distance_units(index, |d| unit.to_meters(d))
        })
    }

    /// Removes every leg and returns to `Empty`.
    pub fn clear(&mut self) {
        self.legs.clear();
        self.refresh();
    }

    /// Appends the leg running from `from` to `to`, e.g. along an existing
    /// line picked in the host drawing.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::NonFiniteCoordinate`] if either point is NaN or
    /// infinite, and an error if the distance between them overflows.
    pub fn push_leg_between(&mut self, from: Point2, to: Point2) -> Result<LegId> {
        if let Some(p) = first_non_finite([&from, &to]) {
            return rejected(
                "push_leg_between",
                Err(SessionError::NonFiniteCoordinate { x: p.x, y: p.y }),
            );
        }
        let course = Inverse::new(from, to)
            .with_convention(self.config.convention)
            .execute();
        let Some((bearing, distance)) = course else {
            return rejected(
                "push_leg_between",
                Err(LegError::NonFiniteDistance {
                    value: f64::INFINITY,
                }),
            );
        };
        self.stage("push_leg_between", |legs| legs.push(bearing, distance))
    }

    /// Moves the traverse to start at `base_point`.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::NonFiniteCoordinate`] if `base_point` is NaN or
    /// infinite, or if the legs would project from it to a non-finite point.
    pub fn set_base_point(&mut self, base_point: Point2) -> Result<()> {
        self.commit("set_base_point", base_point, self.legs.clone())
    }

    /// Removes the preview without touching the legs, e.g. when the host
    /// window closes.
    pub fn dismiss(&mut self) {
        self.preview.clear_preview();
    }

    // --- Interactive capture ---

    /// Asks the host for a new base point.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::NonFiniteCoordinate`] if the captured point is
    /// NaN or infinite.
    pub fn capture_base_point(&mut self) -> Result<Captured<Point2>> {
        let Some(point) = self.point_capture.request_base_point() else {
            debug!("base point capture cancelled");
            return Ok(Captured::Cancelled);
        };
        self.set_base_point(point)?;
        Ok(Captured::Value(point))
    }

    /// Asks the host for a bearing and then a distance from the current end of
    /// the traverse, and appends the resulting leg.
    ///
    /// # Errors
    ///
    /// Returns an error if the captured distance is negative or not finite.
    pub fn capture_leg(&mut self) -> Result<Captured<LegId>> {
        let origin = self.end_point();
        let Some((bearing, distance)) = self.capture_course(origin) else {
            return Ok(Captured::Cancelled);
        };
        self.push_leg(bearing, distance).map(Captured::Value)
    }

    /// Runs the command-line flow: base point, bearing, distance, replacing
    /// any existing legs with the captured one.
    ///
    /// Nothing changes unless all three prompts complete.
    ///
    /// # Errors
    ///
    /// Returns an error if the captured distance is negative or not finite, or
    /// if the captured base point is NaN or infinite.
    pub fn start_traverse(&mut self) -> Result<Captured<LegId>> {
        let Some(base_point) = self.point_capture.request_base_point() else {
            debug!("base point capture cancelled");
            return Ok(Captured::Cancelled);
        };
        let Some((bearing, distance)) = self.capture_course(base_point) else {
            return Ok(Captured::Cancelled);
        };
        let mut legs = TraverseLegs::new();
        let id = rejected("start_traverse", legs.push(bearing, distance))?;
        self.commit("start_traverse", base_point, legs)?;
        Ok(Captured::Value(id))
    }

    fn capture_course(&mut self, origin: Point2) -> Option<(Angle, f64)> {
        let Some(bearing) = self.angle_capture.request_angle(origin) else {
            debug!("bearing capture cancelled");
            return None;
        };
        let Some(distance) = self.distance_capture.request_distance(origin) else {
            debug!("distance capture cancelled");
            return None;
        };
        Some((bearing, distance))
    }

    // --- Commit ---

    /// Hands the projected coordinates to the persister.
    ///
    /// On success the legs are kept or cleared according to
    /// [`SessionConfig::after_draw`]. On failure nothing changes, so the
    /// user can retry without re-entering data.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::NothingToDraw`] if there are no legs, or
    /// [`SessionError::Persist`] if the persister rejected the commit.
    pub fn draw(&mut self) -> Result<()> {
        if self.legs.is_empty() {
            return rejected("draw", Err(SessionError::NothingToDraw));
        }
        rejected(
            "draw",
            self.persister
                .commit_polyline(&self.coordinates)
                .map_err(SessionError::from),
        )?;
        info!(
            points = self.coordinates.len(),
            policy = ?self.config.after_draw,
            "traverse committed"
        );
        if self.config.after_draw == AfterDraw::Clear {
            self.clear();
        }
        Ok(())
    }

    // --- Internals ---

    fn end_point(&self) -> Point2 {
        self.coordinates.last().copied().unwrap_or(self.base_point)
    }

    /// Applies `edit` to a copy of the legs and keeps the result only if the
    /// edit succeeds and still projects to finite coordinates.
    fn stage<T>(
        &mut self,
        op: &'static str,
        edit: impl FnOnce(&mut TraverseLegs) -> std::result::Result<T, LegError>,
    ) -> Result<T> {
        let mut legs = self.legs.clone();
        let value = rejected(op, edit(&mut legs))?;
        self.commit(op, self.base_point, legs)?;
        Ok(value)
    }

    /// Projects `legs` from `base_point` and, if every coordinate is finite,
    /// makes them the session's traverse.
    fn commit(&mut self, op: &'static str, base_point: Point2, legs: TraverseLegs) -> Result<()> {
        let coordinates = self.project(base_point, &legs);
        if let Some(p) = first_non_finite(&coordinates) {
            return rejected(op, Err(SessionError::NonFiniteCoordinate { x: p.x, y: p.y }));
        }
        self.base_point = base_point;
        self.legs = legs;
        self.coordinates = coordinates;
        self.publish();
        Ok(())
    }

    fn project(&self, base_point: Point2, legs: &TraverseLegs) -> Vec<Point2> {
        Project::new(base_point, legs)
            .with_convention(self.config.convention)
            .execute()
    }

    /// Re-projects, recomputes the closure and redraws the preview.
    fn refresh(&mut self) {
        self.coordinates = self.project(self.base_point, &self.legs);
        self.publish();
    }

    /// Recomputes the closure and redraws the preview from the current coordinates.
    fn publish(&mut self) {
        let convention = self.config.convention;
        self.closure = if self.legs.len() < 2 {
            None
        } else {
            Closure::new(&self.coordinates)
                .with_convention(convention)
                .execute()
        };
        debug!(
            legs = self.legs.len(),
            closing_distance = ?self.closure.map(|c| c.distance),
            "traverse recomputed"
        );
        if self.legs.is_empty() {
            self.preview.clear_preview();
        } else {
            self.preview.show_preview(&self.coordinates);
        }
    }
}
