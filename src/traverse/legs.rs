use slotmap::SlotMap;

use super::{LegId, TraverseLeg};
use crate::angle::Angle;
use crate::error::LegError;

/// Ordered collection of traverse legs; the single source of truth for a traverse.
///
/// Insertion order is traverse order: leg 0 starts at the base point. Legs
/// live in a generational arena so a [`LegId`] stays valid across structural
/// edits, while `index` always equals the leg's position `0..len`.
///
/// Every edit either succeeds completely or returns an error and leaves the
/// collection exactly as it was.
#[derive(Debug, Clone, Default)]
pub struct TraverseLegs {
    legs: SlotMap<LegId, TraverseLeg>,
    order: Vec<LegId>,
}

fn validate_distance(value: f64) -> Result<f64, LegError> {
    if !value.is_finite() {
        return Err(LegError::NonFiniteDistance { value });
    }
    if value < 0.0 {
        return Err(LegError::NegativeDistance { value });
    }
    Ok(value)
}

impl TraverseLegs {
    /// Creates an empty collection.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of legs.
    #[must_use]
    pub fn len(&self) -> usize {
        self.order.len()
    }

    /// Returns `true` if there are no legs.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Appends an empty leg (zero bearing, zero distance).
    pub fn add_leg(&mut self) -> LegId {
        self.insert_unchecked(self.len(), Angle::ZERO, 0.0)
    }

    /// Appends a leg with the given bearing and distance.
    ///
    /// # Errors
    ///
    /// Returns an error if `distance` is negative or not finite.
    pub fn push(&mut self, bearing: Angle, distance: f64) -> Result<LegId, LegError> {
        self.insert_leg(self.len(), bearing, distance)
    }

    /// Inserts a leg before position `index`; `index == len()` appends.
    ///
    /// # Errors
    ///
    /// Returns an error if `index > len()`, or if `distance` is negative or not finite.
    pub fn insert_leg(
        &mut self,
        index: usize,
        bearing: Angle,
        distance: f64,
    ) -> Result<LegId, LegError> {
        if index > self.len() {
            return Err(LegError::IndexOutOfRange {
                index,
                len: self.len(),
            });
        }
        let distance = validate_distance(distance)?;
        Ok(self.insert_unchecked(index, bearing, distance))
    }

    fn insert_unchecked(&mut self, index: usize, bearing: Angle, distance: f64) -> LegId {
        let id = self.legs.insert_with_key(|id| TraverseLeg {
            id,
            index,
            bearing,
            distance,
        });
        self.order.insert(index, id);
        self.reindex();
        id
    }

    /// Removes and returns the leg at `index`.
    ///
    /// # Errors
    ///
    /// Returns an error if `index` is out of range.
    pub fn remove_leg(&mut self, index: usize) -> Result<TraverseLeg, LegError> {
        self.check_index(index)?;
        let id = self.order.remove(index);
        let leg = self
            .legs
            .remove(id)
            .ok_or(LegError::IndexOutOfRange {
                index,
                len: self.order.len(),
            })?;
        self.reindex();
        Ok(leg)
    }

    /// Moves the leg at `from` so that it ends up at position `to`.
    ///
    /// # Errors
    ///
    /// Returns an error if either index is out of range.
    pub fn move_leg(&mut self, from: usize, to: usize) -> Result<(), LegError> {
        self.check_index(from)?;
        self.check_index(to)?;
        let id = self.order.remove(from);
        self.order.insert(to, id);
        self.reindex();
        Ok(())
    }

    /// Replaces the distance of the leg at `index`, keeping its identity.
    ///
    /// # Errors
    ///
    /// Returns an error if `index` is out of range, or if `distance` is
    /// negative or not finite.
    pub fn set_distance(&mut self, index: usize, distance: f64) -> Result<(), LegError> {
        let distance = validate_distance(distance)?;
        self.leg_mut(index)?.distance = distance;
        Ok(())
    }

    /// Replaces the bearing of the leg at `index`, keeping its identity.
    ///
    /// # Errors
    ///
    /// Returns an error if `index` is out of range.
    pub fn set_bearing(&mut self, index: usize, bearing: Angle) -> Result<(), LegError> {
        self.leg_mut(index)?.bearing = bearing;
        Ok(())
    }

    /// Reverses the direction of the leg at `index` and returns the new bearing.
    ///
    /// # Errors
    ///
    /// Returns an error if `index` is out of range.
    pub fn flip_bearing(&mut self, index: usize) -> Result<Angle, LegError> {
        let leg = self.leg_mut(index)?;
        leg.bearing = leg.bearing.flipped();
        Ok(leg.bearing)
    }

    /// Applies a unit conversion to the distance of the leg at `index` and
    /// returns the converted distance.
    ///
    /// `converter` is typically [`crate::units::feet_to_meters`] or
    /// [`crate::units::links_to_meters`].
    ///
    /// # Errors
    ///
    /// Returns an error if `index` is out of range, or if the converted
    /// distance is negative or not finite.
    pub fn convert_distance_units(
        &mut self,
        index: usize,
        converter: impl FnOnce(f64) -> f64,
    ) -> Result<f64, LegError> {
        let leg = self.leg_mut(index)?;
        let converted = validate_distance(converter(leg.distance))?;
        leg.distance = converted;
        Ok(converted)
    }

    /// Removes every leg.
    pub fn clear(&mut self) {
        self.legs.clear();
        self.order.clear();
    }

    /// Returns the leg at `index`.
    #[must_use]
    pub fn get(&self, index: usize) -> Option<&TraverseLeg> {
        self.order.get(index).and_then(|&id| self.legs.get(id))
    }

    /// Returns the leg with the given identifier.
    #[must_use]
    pub fn leg(&self, id: LegId) -> Option<&TraverseLeg> {
        self.legs.get(id)
    }

    /// Returns the current position of the leg with the given identifier.
    #[must_use]
    pub fn index_of(&self, id: LegId) -> Option<usize> {
        self.legs.get(id).map(|leg| leg.index)
    }

    /// Iterates over the legs in traverse order.
    pub fn iter(&self) -> impl Iterator<Item = &TraverseLeg> + '_ {
        self.order.iter().filter_map(|&id| self.legs.get(id))
    }

    /// Copies the legs, in traverse order, into a new vector.
    #[must_use]
    pub fn to_vec(&self) -> Vec<TraverseLeg> {
        self.iter().copied().collect()
    }

    fn check_index(&self, index: usize) -> Result<(), LegError> {
        if index < self.len() {
            Ok(())
        } else {
            Err(LegError::IndexOutOfRange {
                index,
                len: self.len(),
            })
        }
    }

    fn leg_mut(&mut self, index: usize) -> Result<&mut TraverseLeg, LegError> {
        let len = self.len();
        self.order
            .get(index)
            .and_then(|&id| self.legs.get_mut(id))
            .ok_or(LegError::IndexOutOfRange { index, len })
    }

    /// Rewrites every leg's `index` to its position in `order`.
    fn reindex(&mut self) {
        for (position, &id) in self.order.iter().enumerate() {
            if let Some(leg) = self.legs.get_mut(id) {
                leg.index = position;
            }
        }
        debug_assert_eq!(self.order.len(), self.legs.len());
        debug_assert!(self.iter().enumerate().all(|(i, leg)| leg.index == i));
    }
}
