mod legs;

pub use legs::TraverseLegs;

use crate::angle::Angle;

#[cfg(feature = "serialize")]
use serde::{Deserialize, Serialize};

slotmap::new_key_type! {
    /// Stable identifier for a leg, unaffected by structural edits around it.
    pub struct LegId;
}

/// One bearing + distance row of a traverse.
///
/// Legs are owned by a [`TraverseLegs`] collection; `index` is the leg's
/// current position in traverse order and is rewritten after every insert,
/// removal or move.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serialize", derive(Serialize, Deserialize))]
pub struct TraverseLeg {
    id: LegId,
    index: usize,
    bearing: Angle,
    distance: f64,
}

impl TraverseLeg {
    /// The leg's stable identifier.
    #[must_use]
    pub fn id(&self) -> LegId {
        self.id
    }

    /// Position of the leg in traverse order, starting at 0.
    #[must_use]
    pub fn index(&self) -> usize {
        self.index
    }

    /// Direction of travel for this leg.
    #[must_use]
    pub fn bearing(&self) -> Angle {
        self.bearing
    }

    /// Length of the leg in meters, never negative.
    #[must_use]
    pub fn distance(&self) -> f64 {
        self.distance
    }
}
