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


use lane_alloc_core::{index::LaneIndex, length::Length};
use lane_alloc_model::err::{InvalidConfigurationError, VehicleMixError};
use std::fmt::Display;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CapacityViolationError {
    lane: LaneIndex,
    occupied: Length,
    length: Length,
    capacity: Length,
}

impl CapacityViolationError {
    #[inline]
    pub fn new(lane: LaneIndex, occupied: Length, length: Length, capacity: Length) -> Self {
        Self {
            lane,
            occupied,
            length,
            capacity,
        }
    }

    #[inline]
    pub fn lane(&self) -> LaneIndex {
        self.lane
    }

    #[inline]
    pub fn occupied(&self) -> Length {
        self.occupied
    }

    #[inline]
    pub fn length(&self) -> Length {
        self.length
    }

    #[inline]
    pub fn capacity(&self) -> Length {
        self.capacity
    }
}

impl Display for CapacityViolationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Committing {} to {} would exceed its capacity: {} + {} > {}",
            self.length, self.lane, self.occupied, self.length, self.capacity
        )
    }
}

impl std::error::Error for CapacityViolationError {}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct UnknownLaneError {
    lane: LaneIndex,
    lane_count: usize,
}

impl UnknownLaneError {
    #[inline]
    pub fn new(lane: LaneIndex, lane_count: usize) -> Self {
        Self { lane, lane_count }
    }

    #[inline]
    pub fn lane(&self) -> LaneIndex {
        self.lane
    }

    #[inline]
    pub fn lane_count(&self) -> usize {
        self.lane_count
    }
}

impl Display for UnknownLaneError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} is out of range for a pool of {} lanes",
            self.lane, self.lane_count
        )
    }
}

impl std::error::Error for UnknownLaneError {}

/// A placement was committed that a correct selector can never produce.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LaneCommitError {
    UnknownLane(UnknownLaneError),
    CapacityExceeded(CapacityViolationError),
}

impl Display for LaneCommitError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LaneCommitError::UnknownLane(e) => write!(f, "{e}"),
            LaneCommitError::CapacityExceeded(e) => write!(f, "{e}"),
        }
    }
}

impl From<UnknownLaneError> for LaneCommitError {
    fn from(e: UnknownLaneError) -> Self {
        Self::UnknownLane(e)
    }
}

impl From<CapacityViolationError> for LaneCommitError {
    fn from(e: CapacityViolationError) -> Self {
        Self::CapacityExceeded(e)
    }
}

impl std::error::Error for LaneCommitError {}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AllocationError {
    InvalidConfiguration(InvalidConfigurationError),
    InvariantViolation(LaneCommitError),
}

impl Display for AllocationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AllocationError::InvalidConfiguration(e) => write!(f, "{e}"),
            AllocationError::InvariantViolation(e) => write!(f, "Invariant violation: {e}"),
        }
    }
}

impl From<InvalidConfigurationError> for AllocationError {
    fn from(e: InvalidConfigurationError) -> Self {
        Self::InvalidConfiguration(e)
    }
}

impl From<LaneCommitError> for AllocationError {
    fn from(e: LaneCommitError) -> Self {
        Self::InvariantViolation(e)
    }
}

impl std::error::Error for AllocationError {}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExperimentError {
    ZeroTrials,
    NoHeuristics,
    /// The sweep asks for more lanes than the deck has centimetres, which
    /// would leave some lanes without capacity.
    DeckTooShort { deck_length: Length, max_lanes: usize },
    VehicleMix(VehicleMixError),
    Allocation(AllocationError),
}

impl Display for ExperimentError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        use ExperimentError::*;
        match self {
            ZeroTrials => write!(f, "Experiment needs at least one trial"),
            NoHeuristics => write!(f, "Experiment needs at least one heuristic"),
            DeckTooShort {
                deck_length,
                max_lanes,
            } => write!(
                f,
                "Deck of {deck_length} cannot be split into {max_lanes} non-empty lanes"
            ),
            VehicleMix(e) => write!(f, "Vehicle mix error: {e}"),
            Allocation(e) => write!(f, "Allocation error: {e}"),
        }
    }
}

impl From<VehicleMixError> for ExperimentError {
    fn from(e: VehicleMixError) -> Self {
        Self::VehicleMix(e)
    }
}

impl From<AllocationError> for ExperimentError {
    fn from(e: AllocationError) -> Self {
        Self::Allocation(e)
    }
}

impl From<InvalidConfigurationError> for ExperimentError {
    fn from(e: InvalidConfigurationError) -> Self {
        Self::Allocation(e.into())
    }
}

impl std::error::Error for ExperimentError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_capacity_violation_display() {
        let e = CapacityViolationError::new(
            LaneIndex::new(1),
            Length::new(8),
            Length::new(3),
            Length::new(10),
        );
        assert_eq!(
            e.to_string(),
            "Committing Length(3) to LaneIndex(1) would exceed its capacity: Length(8) + Length(3) > Length(10)"
        );
    }

    #[test]
    fn test_allocation_error_wraps_commit_error() {
        let e: AllocationError =
            LaneCommitError::from(UnknownLaneError::new(LaneIndex::new(5), 2)).into();
        assert!(matches!(e, AllocationError::InvariantViolation(_)));
        assert!(e.to_string().starts_with("Invariant violation"));
    }

    #[test]
    fn test_experiment_error_from_configuration() {
        let e: ExperimentError = InvalidConfigurationError::ZeroCapacity.into();
        assert_eq!(
            e,
            ExperimentError::Allocation(AllocationError::InvalidConfiguration(
                InvalidConfigurationError::ZeroCapacity
            ))
        );
    }
}
