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


//! Offline greedy: sort every vehicle longest first, then fill the lanes one
//! after another.

use crate::{
    allocation::Allocation,
    err::AllocationError,
    lanes::{LanePool, LanesRead, LanesWrite},
};
use fixedbitset::FixedBitSet;
use lane_alloc_core::{index::LaneIndex, length::Length};
use lane_alloc_model::instance::{Instance, ensure_vehicle_lengths};
use std::cmp::Reverse;
use tracing::{debug, instrument};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GreedyOfflineSolver;

impl Default for GreedyOfflineSolver {
    fn default() -> Self {
        Self::new()
    }
}

impl GreedyOfflineSolver {
    pub fn new() -> Self {
        Self
    }

    /// Fills lane 0 from the sorted sequence, then lane 1 from what is left,
    /// and so on. Vehicles never placed end up in the overflow, longest first.
    #[instrument(skip_all, fields(vehicles = vehicles.len(), lanes = pool.len()), err(Display))]
    pub fn allocate(
        &self,
        vehicles: &[Length],
        mut pool: LanePool,
    ) -> Result<Allocation, AllocationError> {
        ensure_vehicle_lengths(vehicles)?;

        let mut sorted = vehicles.to_vec();
        sorted.sort_unstable_by_key(|&len| Reverse(len));

        let mut placed = FixedBitSet::with_capacity(sorted.len());
        let capacity = pool.capacity();
        for lane in (0..pool.len()).map(LaneIndex::new) {
            if placed.count_ones(..) == sorted.len() {
                break;
            }
            let mut occupied = Length::zero();
            for (i, &length) in sorted.iter().enumerate() {
                if placed.contains(i) || !occupied.fits_with(length, capacity) {
                    continue;
                }
                pool.commit(lane, length)?;
                occupied += length;
                placed.insert(i);
            }
        }

        let mut allocation = Allocation::new(pool);
        placed.toggle_range(..);
        allocation
            .overflow_mut()
            .extend(placed.ones().map(|i| sorted[i]));
        debug!(overflow = %allocation.overflow_total(), "greedy run finished");
        Ok(allocation)
    }

    #[inline]
    pub fn allocate_instance(&self, instance: &Instance) -> Result<Allocation, AllocationError> {
        self.allocate(instance.vehicles(), LanePool::for_instance(instance))
    }
}

/// Overflow left by the offline greedy fill of `num_lanes` lanes of
/// `capacity`.
pub fn greedy_overflow(
    num_lanes: usize,
    capacity: Length,
    vehicles: &[Length],
) -> Result<Length, AllocationError> {
    let pool = LanePool::new(num_lanes, capacity)?;
    let allocation = GreedyOfflineSolver::new().allocate(vehicles, pool)?;
    Ok(allocation.overflow_total())
}
