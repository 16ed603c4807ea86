// Copyright (c) 2025 Felix Kahle.
//
// Permission is hereby granted, free of charge, to any person obtaining
// a copy of this software and associated documentation files (the
// "Software"), to deal in the Software without restriction, including
// without limitation the rights to use, copy, modify, merge, publish,
// distribute, sublicense, and/or sell copies of the Software, and to
// permit persons to whom the Software is furnished to do so, subject to
// the following conditions:
//
// The above copyright notice and this permission notice shall be
// included in all copies or substantial portions of the Software.
//
// THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND,
// EXPRESS OR IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF
// MERCHANTABILITY, FITNESS FOR A PARTICULAR PURPOSE AND
// NONINFRINGEMENT. IN NO EVENT SHALL THE AUTHORS OR COPYRIGHT HOLDERS BE
// LIABLE FOR ANY CLAIM, DAMAGES OR OTHER LIABILITY, WHETHER IN AN ACTION
// OF CONTRACT, TORT OR OTHERWISE, ARISING FROM, OUT OF OR IN CONNECTION
// WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN THE SOFTWARE.


use crate::err::{CapacityViolationError, LaneCommitError, UnknownLaneError};
use lane_alloc_core::{index::LaneIndex, length::Length};
use lane_alloc_model::{
    err::InvalidConfigurationError,
    instance::{Instance, ensure_lane_configuration},
};
use serde::Serialize;

/// Read side of a lane pool. Selectors only ever see this.
pub trait LanesRead {
    fn capacity(&self) -> Length;

    fn lane_count(&self) -> usize;

    /// Occupied length of `lane`, or `None` if the index is out of range.
    fn occupied(&self, lane: LaneIndex) -> Option<Length>;

    #[inline]
    fn fits(&self, lane: LaneIndex, length: Length) -> bool {
        self.occupied(lane)
            .is_some_and(|occ| occ.fits_with(length, self.capacity()))
    }

    #[inline]
    fn remaining(&self, lane: LaneIndex) -> Option<Length> {
        self.occupied(lane)
            .map(|occ| self.capacity().saturating_sub(occ))
    }

    /// Lanes that can still take `length`, in ascending index order.
    fn feasible_lanes(&self, length: Length) -> impl Iterator<Item = LaneIndex> + '_ {
        (0..self.lane_count())
            .map(LaneIndex::new)
            .filter(move |&lane| self.fits(lane, length))
    }
}

pub trait LanesWrite {
    /// Adds `length` to `lane`.
    ///
    /// Refuses (instead of clamping) anything that would push the lane past
    /// its capacity; callers are expected to have asked a selector first.
    fn commit(&mut self, lane: LaneIndex, length: Length) -> Result<(), LaneCommitError>;
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct Lane {
    occupied: Length,
    vehicles: Vec<Length>,
}

impl Lane {
    #[inline]
    pub fn occupied(&self) -> Length {
        self.occupied
    }

    /// Lengths placed on this lane, in placement order.
    #[inline]
    pub fn vehicles(&self) -> &[Length] {
        &self.vehicles
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.vehicles.is_empty()
    }
}

/// A fixed number of lanes sharing one capacity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LanePool {
    capacity: Length,
    lanes: Vec<Lane>,
}

impl LanePool {
    pub fn new(num_lanes: usize, capacity: Length) -> Result<Self, InvalidConfigurationError> {
        ensure_lane_configuration(num_lanes, capacity)?;
        Ok(Self {
            capacity,
            lanes: vec![Lane::default(); num_lanes],
        })
    }

    /// Empty pool for the deck described by `instance`.
    #[inline]
    pub fn for_instance(instance: &Instance) -> Self {
        Self {
            capacity: instance.capacity(),
            lanes: vec![Lane::default(); instance.num_lanes()],
        }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.lanes.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.lanes.is_empty()
    }

    #[inline]
    pub fn lane(&self, lane: LaneIndex) -> Option<&Lane> {
        self.lanes.get(lane.value())
    }

    #[inline]
    pub fn lanes(&self) -> &[Lane] {
        &self.lanes
    }

    #[inline]
    pub fn iter(&self) -> impl Iterator<Item = (LaneIndex, &Lane)> + '_ {
        self.lanes
            .iter()
            .enumerate()
            .map(|(i, lane)| (LaneIndex::new(i), lane))
    }

    #[inline]
    pub fn total_occupied(&self) -> Length {
        self.lanes.iter().map(|l| l.occupied).sum()
    }

    #[inline]
    pub fn vehicle_count(&self) -> usize {
        self.lanes.iter().map(|l| l.vehicles.len()).sum()
    }

    /// `true` if no lane is filled beyond the shared capacity.
    #[inline]
    pub fn within_capacity(&self) -> bool {
        self.lanes.iter().all(|l| l.occupied <= self.capacity)
    }
}

impl LanesRead for LanePool {
    #[inline]
    fn capacity(&self) -> Length {
        self.capacity
    }

    #[inline]
    fn lane_count(&self) -> usize {
        self.lanes.len()
    }

    #[inline]
    fn occupied(&self, lane: LaneIndex) -> Option<Length> {
        self.lanes.get(lane.value()).map(|l| l.occupied)
    }
}

impl LanesWrite for LanePool {
    fn commit(&mut self, lane: LaneIndex, length: Length) -> Result<(), LaneCommitError> {
        let capacity = self.capacity;
        let lane_count = self.lanes.len();
        let slot = self
            .lanes
            .get_mut(lane.value())
            .ok_or(UnknownLaneError::new(lane, lane_count))?;

        let fits = slot.occupied.fits_with(length, capacity);
        debug_assert!(
            fits,
            "capacity invariant violated on {lane}: {} + {length} > {capacity}",
            slot.occupied
        );
        if !fits {
            return Err(
                CapacityViolationError::new(lane, slot.occupied, length, capacity).into(),
            );
        }

        slot.occupied += length;
        slot.vehicles.push(length);
        Ok(())
    }
}
