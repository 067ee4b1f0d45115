use crate::angle::{Angle, AngleRotationDirection};
use crate::error::LegError;
use crate::traverse::TraverseLegs;

#[cfg(feature = "serialize")]
use serde::{Deserialize, Serialize};

/// Which way along the previous leg an observed angle is turned from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serialize", derive(Serialize, Deserialize))]
pub enum TurnReference {
    /// Zero points back along the previous leg (interior/exterior angles).
    #[default]
    Backsight,
    /// Zero points ahead along the previous leg's direction (deflection angles).
    Foresight,
}

/// A leg observed as an angle relative to the previous leg, plus a distance.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serialize", derive(Serialize, Deserialize))]
pub struct AngleLeg {
    pub angle: Angle,
    pub distance: f64,
    pub reference: TurnReference,
    pub rotation: AngleRotationDirection,
}

impl AngleLeg {
    /// Creates a leg turned clockwise from the backsight.
    #[must_use]
    pub fn new(angle: Angle, distance: f64) -> Self {
        Self {
            angle,
            distance,
            reference: TurnReference::Backsight,
            rotation: AngleRotationDirection::Clockwise,
        }
    }

    /// Sets the direction the angle is turned from.
    #[must_use]
    pub fn with_reference(mut self, reference: TurnReference) -> Self {
        self.reference = reference;
        self
    }

    /// Sets the direction the angle is turned in.
    #[must_use]
    pub fn with_rotation(mut self, rotation: AngleRotationDirection) -> Self {
        self.rotation = rotation;
        self
    }
}

/// Reduces an angle traverse to absolute bearings.
///
/// Each angle is turned from the previous leg's direction (or its reverse).
/// The first leg is turned from a notional leg arriving at the base point
/// along `start_azimuth`, north by default, so a first foresight angle is
/// simply an azimuth.
pub struct AngleTraverse<'a> {
    legs: &'a [AngleLeg],
    start_azimuth: Angle,
}

impl<'a> AngleTraverse<'a> {
    /// Creates a new `AngleTraverse` reduction.
    #[must_use]
    pub fn new(legs: &'a [AngleLeg]) -> Self {
        Self {
            legs,
            start_azimuth: Angle::ZERO,
        }
    }

    /// Sets the azimuth of the notional leg the first angle is turned from.
    #[must_use]
    pub fn with_start_azimuth(mut self, start_azimuth: Angle) -> Self {
        self.start_azimuth = start_azimuth;
        self
    }

    /// Executes the reduction, returning azimuth bearing legs in the same order.
    ///
    /// # Errors
    ///
    /// Returns an error if any distance is negative or not finite.
    pub fn execute(&self) -> Result<TraverseLegs, LegError> {
        let mut out = TraverseLegs::new();
        let mut previous = self.start_azimuth;
        for leg in self.legs {
            let zero = match leg.reference {
                TurnReference::Backsight => previous.flipped(),
                TurnReference::Foresight => previous,
            };
            let bearing = match leg.rotation {
                AngleRotationDirection::Clockwise => zero + leg.angle,
                AngleRotationDirection::CounterClockwise => zero - leg.angle,
            };
            out.push(bearing, leg.distance)?;
            previous = bearing;
        }
        Ok(out)
    }
}
