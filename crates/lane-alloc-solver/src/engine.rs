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


//! Online allocation: one vehicle at a time, in arrival order, no backtracking.

use crate::{
    allocation::Allocation,
    err::{AllocationError, LaneCommitError},
    lanes::{LanePool, LanesWrite},
    selector::LaneSelector,
};
use lane_alloc_core::{index::LaneIndex, length::Length};
use lane_alloc_model::{
    err::InvalidConfigurationError,
    instance::{Instance, ensure_vehicle_lengths},
};
use rand::Rng;
use tracing::{debug, instrument, trace};

/// Drives a [`LaneSelector`] over a stream of vehicles.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AllocationEngine<S> {
    selector: S,
}

impl<S: LaneSelector> AllocationEngine<S> {
    #[inline]
    pub fn new(selector: S) -> Self {
        Self { selector }
    }

    #[inline]
    pub fn selector(&self) -> &S {
        &self.selector
    }

    /// Places a single vehicle. Returns the lane it went to, or `None` if it
    /// was routed to the overflow.
    #[inline]
    pub fn place<R>(
        &self,
        length: Length,
        allocation: &mut Allocation,
        rng: &mut R,
    ) -> Result<Option<LaneIndex>, LaneCommitError>
    where
        R: Rng + ?Sized,
    {
        match self.selector.select(length, allocation.lanes(), rng) {
            Some(lane) => {
                allocation.lanes_mut().commit(lane, length)?;
                trace!(%lane, %length, "placed");
                Ok(Some(lane))
            }
            None => {
                allocation.overflow_mut().push(length);
                trace!(%length, "overflow");
                Ok(None)
            }
        }
    }

    /// Runs the vehicles through the selector in the given order.
    #[instrument(
        skip_all,
        fields(selector = self.selector.name(), vehicles = vehicles.len(), lanes = pool.len()),
        err(Display)
    )]
    pub fn run<R>(
        &self,
        vehicles: &[Length],
        pool: LanePool,
        rng: &mut R,
    ) -> Result<Allocation, AllocationError>
    where
        R: Rng + ?Sized,
    {
        ensure_vehicle_lengths(vehicles)?;
        let mut allocation = Allocation::new(pool);
        for &length in vehicles {
            self.place(length, &mut allocation, rng)?;
        }
        debug!(overflow = %allocation.overflow_total(), "online run finished");
        Ok(allocation)
    }

    /// Splits the vehicles into consecutive chunks of `chunk_size` (the last
    /// one may be shorter), sorts each chunk longest first and places it.
    /// The input slice itself is left untouched.
    #[instrument(
        skip_all,
        fields(
            selector = self.selector.name(),
            vehicles = vehicles.len(),
            lanes = pool.len(),
            chunk_size
        ),
        err(Display)
    )]
    pub fn run_chunked<R>(
        &self,
        vehicles: &[Length],
        pool: LanePool,
        chunk_size: usize,
        rng: &mut R,
    ) -> Result<Allocation, AllocationError>
    where
        R: Rng + ?Sized,
    {
        if chunk_size == 0 {
            return Err(InvalidConfigurationError::ZeroChunkSize.into());
        }
        ensure_vehicle_lengths(vehicles)?;

        let mut allocation = Allocation::new(pool);
        let mut chunk = Vec::with_capacity(chunk_size.min(vehicles.len()));
        for window in vehicles.chunks(chunk_size) {
            chunk.clear();
            chunk.extend_from_slice(window);
            chunk.sort_unstable_by(|a, b| b.cmp(a));
            for &length in &chunk {
                self.place(length, &mut allocation, rng)?;
            }
        }
        debug!(overflow = %allocation.overflow_total(), "chunked run finished");
        Ok(allocation)
    }

    /// Online run over an instance's vehicles on a fresh deck.
    #[inline]
    pub fn run_instance<R>(
        &self,
        instance: &Instance,
        rng: &mut R,
    ) -> Result<Allocation, AllocationError>
    where
        R: Rng + ?Sized,
    {
        self.run(instance.vehicles(), LanePool::for_instance(instance), rng)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::selector::{EmptiestFit, FirstFit, FullestFit, Policy, RandomFit};
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn lengths(v: &[usize]) -> Vec<Length> {
        v.iter().copied().map(Length::new).collect()
    }

    fn pool(n: usize, cap: usize) -> LanePool {
        LanePool::new(n, Length::new(cap)).unwrap()
    }

    fn occupied(a: &Allocation) -> Vec<usize> {
        a.lanes().lanes().iter().map(|l| l.occupied().value()).collect()
    }

    fn random_vehicles(rng: &mut ChaCha8Rng, n: usize, max: usize) -> Vec<Length> {
        (0..n).map(|_| Length::new(rng.random_range(1..=max))).collect()
    }

    #[test]
    fn test_first_fit_fills_back_into_earlier_lane() {
        let vehicles = lengths(&[6, 6, 4]);
        let mut rng = ChaCha8Rng::seed_from_u64(0);
        let a = AllocationEngine::new(FirstFit)
            .run(&vehicles, pool(2, 10), &mut rng)
            .unwrap();
        assert_eq!(occupied(&a), vec![10, 6]);
        assert_eq!(a.overflow_total(), Length::zero());
        assert_eq!(
            a.lanes().lanes()[0].vehicles(),
            &[Length::new(6), Length::new(4)]
        );
    }

    #[test]
    fn test_single_lane_overflow_is_selector_independent() {
        let vehicles = lengths(&[5, 5, 1]);
        for policy in Policy::ALL {
            let mut rng = ChaCha8Rng::seed_from_u64(1);
            let a = AllocationEngine::new(policy)
                .run(&vehicles, pool(1, 10), &mut rng)
                .unwrap();
            assert_eq!(occupied(&a), vec![10], "{policy}");
            assert_eq!(a.overflow_total(), Length::new(1), "{policy}");
            assert_eq!(a.overflow().vehicles(), &[Length::new(1)]);
        }
    }

    #[test]
    fn test_fullest_and_emptiest_choose_second_lane_for_second_item() {
        let first = Length::new(9);
        let second = Length::new(9);
        let mut rng = ChaCha8Rng::seed_from_u64(2);

        let fullest = AllocationEngine::new(FullestFit);
        let mut a = Allocation::new(pool(2, 10));
        assert_eq!(
            fullest.place(first, &mut a, &mut rng).unwrap(),
            Some(LaneIndex::new(0))
        );
        assert_eq!(
            fullest.place(second, &mut a, &mut rng).unwrap(),
            Some(LaneIndex::new(1))
        );
        assert_eq!(a.overflow_total(), Length::zero());

        let emptiest = AllocationEngine::new(EmptiestFit);
        let mut b = Allocation::new(pool(2, 10));
        assert_eq!(
            emptiest.place(first, &mut b, &mut rng).unwrap(),
            Some(LaneIndex::new(0))
        );
        assert_eq!(
            emptiest.place(second, &mut b, &mut rng).unwrap(),
            Some(LaneIndex::new(1))
        );
        assert_eq!(b.overflow_total(), Length::zero());
    }

    #[test]
    fn test_empty_input_yields_empty_allocation() {
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        let a = AllocationEngine::new(FirstFit)
            .run(&[], pool(3, 10), &mut rng)
            .unwrap();
        assert_eq!(a.placed_total(), Length::zero());
        assert!(a.overflow().is_empty());
    }

    #[test]
    fn test_vehicle_longer_than_capacity_overflows() {
        let mut rng = ChaCha8Rng::seed_from_u64(4);
        let a = AllocationEngine::new(EmptiestFit)
            .run(&lengths(&[11, 3]), pool(2, 10), &mut rng)
            .unwrap();
        assert_eq!(a.overflow().vehicles(), &[Length::new(11)]);
        assert_eq!(a.placed_total(), Length::new(3));
    }

    #[test]
    fn test_zero_length_vehicle_rejected_before_processing() {
        let mut rng = ChaCha8Rng::seed_from_u64(5);
        let err = AllocationEngine::new(FirstFit)
            .run(&lengths(&[3, 0]), pool(2, 10), &mut rng)
            .unwrap_err();
        assert!(matches!(
            err,
            AllocationError::InvalidConfiguration(
                InvalidConfigurationError::ZeroLengthVehicle(_)
            )
        ));
    }

    #[test]
    fn test_zero_chunk_size_rejected() {
        let mut rng = ChaCha8Rng::seed_from_u64(6);
        let err = AllocationEngine::new(FirstFit)
            .run_chunked(&lengths(&[3]), pool(1, 10), 0, &mut rng)
            .unwrap_err();
        assert_eq!(
            err,
            AllocationError::InvalidConfiguration(InvalidConfigurationError::ZeroChunkSize)
        );
    }

    #[test]
    fn test_chunks_sorted_longest_first() {
        // Chunks [2, 9] and [5]: the 9 goes first and takes lane 0.
        let vehicles = lengths(&[2, 9, 5]);
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        let a = AllocationEngine::new(FirstFit)
            .run_chunked(&vehicles, pool(2, 10), 2, &mut rng)
            .unwrap();
        assert_eq!(
            a.lanes().lanes()[0].vehicles(),
            &[Length::new(9)]
        );
        assert_eq!(
            a.lanes().lanes()[1].vehicles(),
            &[Length::new(2), Length::new(5)]
        );
        assert_eq!(vehicles, lengths(&[2, 9, 5]));
    }

    #[test]
    fn test_chunked_sorting_changes_outcome() {
        // Online keeps both fives; sorting the chunk lets the seven in first.
        let vehicles = lengths(&[5, 5, 7]);
        let engine = AllocationEngine::new(FirstFit);
        let mut rng = ChaCha8Rng::seed_from_u64(8);
        let online = engine.run(&vehicles, pool(1, 10), &mut rng).unwrap();
        let chunked = engine
            .run_chunked(&vehicles, pool(1, 10), 3, &mut rng)
            .unwrap();
        assert_eq!(online.overflow_total(), Length::new(7));
        assert_eq!(chunked.overflow_total(), Length::new(10));
    }

    #[test]
    fn test_chunk_size_one_matches_online_for_every_policy() {
        let mut gen_rng = ChaCha8Rng::seed_from_u64(9);
        for round in 0..20 {
            let vehicles = random_vehicles(&mut gen_rng, 60, 12);
            for policy in Policy::ALL {
                let engine = AllocationEngine::new(policy);
                let mut r1 = ChaCha8Rng::seed_from_u64(round);
                let mut r2 = ChaCha8Rng::seed_from_u64(round);
                let online = engine.run(&vehicles, pool(4, 20), &mut r1).unwrap();
                let chunked = engine
                    .run_chunked(&vehicles, pool(4, 20), 1, &mut r2)
                    .unwrap();
                assert_eq!(online, chunked, "{policy} round {round}");
            }
        }
    }

    #[test]
    fn test_conservation_and_capacity_hold_on_random_inputs() {
        let mut gen_rng = ChaCha8Rng::seed_from_u64(10);
        for round in 0..50 {
            let lanes = gen_rng.random_range(1..6);
            let capacity = gen_rng.random_range(5..40);
            let vehicles = random_vehicles(&mut gen_rng, 80, 25);
            let total: Length = vehicles.iter().sum();
            for policy in Policy::ALL {
                let engine = AllocationEngine::new(policy);
                let mut rng = ChaCha8Rng::seed_from_u64(round);
                for chunk in [None, Some(1), Some(7), Some(200)] {
                    let p = pool(lanes, capacity);
                    let a = match chunk {
                        None => engine.run(&vehicles, p, &mut rng),
                        Some(k) => engine.run_chunked(&vehicles, p, k, &mut rng),
                    }
                    .unwrap();
                    assert!(a.conserves(total), "{policy} {chunk:?}");
                    assert!(a.lanes().within_capacity(), "{policy} {chunk:?}");
                    assert_eq!(
                        a.lanes().vehicle_count() + a.overflow().len(),
                        vehicles.len()
                    );
                }
            }
        }
    }

    #[test]
    fn test_overflow_monotonic_over_prefixes() {
        let mut gen_rng = ChaCha8Rng::seed_from_u64(11);
        let vehicles = random_vehicles(&mut gen_rng, 40, 9);
        for policy in [Policy::FirstFit, Policy::EmptiestFit, Policy::FullestFit] {
            let engine = AllocationEngine::new(policy);
            let mut previous = Length::zero();
            for end in 0..=vehicles.len() {
                let mut rng = ChaCha8Rng::seed_from_u64(0);
                let a = engine
                    .run(&vehicles[..end], pool(3, 15), &mut rng)
                    .unwrap();
                assert!(a.overflow_total() >= previous, "{policy} prefix {end}");
                previous = a.overflow_total();
            }
        }
    }

    #[test]
    fn test_deterministic_policies_ignore_rng_state() {
        let mut gen_rng = ChaCha8Rng::seed_from_u64(12);
        let vehicles = random_vehicles(&mut gen_rng, 100, 10);
        for policy in [Policy::FirstFit, Policy::EmptiestFit, Policy::FullestFit] {
            let engine = AllocationEngine::new(policy);
            let a = engine
                .run(&vehicles, pool(5, 30), &mut ChaCha8Rng::seed_from_u64(1))
                .unwrap();
            let b = engine
                .run(&vehicles, pool(5, 30), &mut ChaCha8Rng::seed_from_u64(999))
                .unwrap();
            assert_eq!(a, b, "{policy}");
        }
    }

    #[test]
    fn test_random_fit_reproducible_from_seed() {
        let mut gen_rng = ChaCha8Rng::seed_from_u64(13);
        let vehicles = random_vehicles(&mut gen_rng, 100, 10);
        let engine = AllocationEngine::new(RandomFit);
        let a = engine
            .run(&vehicles, pool(5, 30), &mut ChaCha8Rng::seed_from_u64(42))
            .unwrap();
        let b = engine
            .run(&vehicles, pool(5, 30), &mut ChaCha8Rng::seed_from_u64(42))
            .unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_run_instance_uses_instance_deck() {
        let instance = Instance::new(Length::new(10), 2, lengths(&[6, 6, 4])).unwrap();
        let mut rng = ChaCha8Rng::seed_from_u64(14);
        let a = AllocationEngine::new(FirstFit)
            .run_instance(&instance, &mut rng)
            .unwrap();
        assert_eq!(a.lanes().len(), 2);
        assert_eq!(a.overflow_total(), Length::zero());
    }
}
