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


//! Lane selection policies.
//!
//! A selector inspects the lanes read-only and names the lane a vehicle should
//! go to, or `None` when no lane can take it. Feasibility is always
//! `occupied + length <= capacity`.

use crate::lanes::LanesRead;
use lane_alloc_core::{index::LaneIndex, length::Length};
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::{fmt::Display, str::FromStr};

pub trait LaneSelector {
    /// Short human-readable name used in reports.
    fn name(&self) -> &'static str;

    fn select<L, R>(&self, length: Length, lanes: &L, rng: &mut R) -> Option<LaneIndex>
    where
        L: LanesRead + ?Sized,
        R: Rng + ?Sized;
}

/// Lowest-indexed lane with room.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FirstFit;

impl LaneSelector for FirstFit {
    #[inline]
    fn name(&self) -> &'static str {
        "first-fit"
    }

    #[inline]
    fn select<L, R>(&self, length: Length, lanes: &L, _rng: &mut R) -> Option<LaneIndex>
    where
        L: LanesRead + ?Sized,
        R: Rng + ?Sized,
    {
        lanes.feasible_lanes(length).next()
    }
}

/// Feasible lane with the least occupied length. Ties go to the lowest index.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EmptiestFit;

impl LaneSelector for EmptiestFit {
    #[inline]
    fn name(&self) -> &'static str {
        "emptiest-fit"
    }

    fn select<L, R>(&self, length: Length, lanes: &L, _rng: &mut R) -> Option<LaneIndex>
    where
        L: LanesRead + ?Sized,
        R: Rng + ?Sized,
    {
        // `min_by_key` keeps the first minimum, which is the tie-break we want.
        lanes
            .feasible_lanes(length)
            .filter_map(|lane| lanes.occupied(lane).map(|occ| (lane, occ)))
            .min_by_key(|&(_, occ)| occ)
            .map(|(lane, _)| lane)
    }
}

/// Feasible lane with the most occupied length. Ties go to the lowest index.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FullestFit;

impl LaneSelector for FullestFit {
    #[inline]
    fn name(&self) -> &'static str {
        "fullest-fit"
    }

    fn select<L, R>(&self, length: Length, lanes: &L, _rng: &mut R) -> Option<LaneIndex>
    where
        L: LanesRead + ?Sized,
        R: Rng + ?Sized,
    {
        // `max_by_key` would return the last maximum.
        lanes
            .feasible_lanes(length)
            .filter_map(|lane| lanes.occupied(lane).map(|occ| (lane, occ)))
            .fold(None, |best: Option<(LaneIndex, Length)>, (lane, occ)| match best {
                Some((_, best_occ)) if occ <= best_occ => best,
                _ => Some((lane, occ)),
            })
            .map(|(lane, _)| lane)
    }
}

/// Uniformly random feasible lane.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RandomFit;

impl LaneSelector for RandomFit {
    #[inline]
    fn name(&self) -> &'static str {
        "random-fit"
    }

    fn select<L, R>(&self, length: Length, lanes: &L, rng: &mut R) -> Option<LaneIndex>
    where
        L: LanesRead + ?Sized,
        R: Rng + ?Sized,
    {
        let count = lanes.feasible_lanes(length).count();
        if count == 0 {
            return None;
        }
        let pick = rng.random_range(0..count);
        lanes.feasible_lanes(length).nth(pick)
    }
}

/// Closed set of the built-in selectors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Policy {
    FirstFit,
    EmptiestFit,
    FullestFit,
    RandomFit,
}

impl Policy {
    pub const ALL: [Policy; 4] = [
        Policy::FirstFit,
        Policy::EmptiestFit,
        Policy::FullestFit,
        Policy::RandomFit,
    ];

    /// Whether the policy consults the random source.
    #[inline]
    pub fn is_randomized(&self) -> bool {
        matches!(self, Policy::RandomFit)
    }
}

impl LaneSelector for Policy {
    #[inline]
    fn name(&self) -> &'static str {
        match self {
            Policy::FirstFit => FirstFit.name(),
            Policy::EmptiestFit => EmptiestFit.name(),
            Policy::FullestFit => FullestFit.name(),
            Policy::RandomFit => RandomFit.name(),
        }
    }

    #[inline]
    fn select<L, R>(&self, length: Length, lanes: &L, rng: &mut R) -> Option<LaneIndex>
    where
        L: LanesRead + ?Sized,
        R: Rng + ?Sized,
    {
        match self {
            Policy::FirstFit => FirstFit.select(length, lanes, rng),
            Policy::EmptiestFit => EmptiestFit.select(length, lanes, rng),
            Policy::FullestFit => FullestFit.select(length, lanes, rng),
            Policy::RandomFit => RandomFit.select(length, lanes, rng),
        }
    }
}

impl Display for Policy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownPolicyError {
    name: String,
}

impl UnknownPolicyError {
    #[inline]
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }

    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }
}

impl Display for UnknownPolicyError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Unknown policy '{}', expected one of: first-fit, emptiest-fit, fullest-fit, random-fit",
            self.name
        )
    }
}

impl std::error::Error for UnknownPolicyError {}

impl FromStr for Policy {
    type Err = UnknownPolicyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase().replace('_', "-");
        Policy::ALL
            .into_iter()
            .find(|p| p.name() == wanted)
            .ok_or_else(|| UnknownPolicyError::new(s))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lanes::{LanePool, LanesWrite};
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn pool_with(capacity: usize, occupied: &[usize]) -> LanePool {
        let mut pool = LanePool::new(occupied.len(), Length::new(capacity)).unwrap();
        for (i, &occ) in occupied.iter().enumerate() {
            if occ > 0 {
                pool.commit(LaneIndex::new(i), Length::new(occ)).unwrap();
            }
        }
        pool
    }

    fn rng() -> ChaCha8Rng {
        ChaCha8Rng::seed_from_u64(7)
    }

    #[test]
    fn test_first_fit_takes_lowest_feasible() {
        let pool = pool_with(10, &[8, 3, 0]);
        let lane = FirstFit.select(Length::new(5), &pool, &mut rng());
        assert_eq!(lane, Some(LaneIndex::new(1)));
    }

    #[test]
    fn test_emptiest_fit_prefers_least_occupied_and_lowest_index_on_tie() {
        let pool = pool_with(10, &[4, 2, 2, 9]);
        let lane = EmptiestFit.select(Length::new(1), &pool, &mut rng());
        assert_eq!(lane, Some(LaneIndex::new(1)));
    }

    #[test]
    fn test_fullest_fit_prefers_most_occupied_and_lowest_index_on_tie() {
        let pool = pool_with(10, &[6, 8, 8, 9]);
        let lane = FullestFit.select(Length::new(2), &pool, &mut rng());
        assert_eq!(lane, Some(LaneIndex::new(1)));
    }

    #[test]
    fn test_fullest_fit_skips_infeasible_fuller_lane() {
        let pool = pool_with(10, &[6, 9]);
        let lane = FullestFit.select(Length::new(2), &pool, &mut rng());
        assert_eq!(lane, Some(LaneIndex::new(0)));
    }

    #[test]
    fn test_random_fit_only_returns_feasible_lanes() {
        let pool = pool_with(10, &[9, 0, 9, 4]);
        let mut r = rng();
        let mut seen = [false; 4];
        for _ in 0..200 {
            let lane = RandomFit.select(Length::new(5), &pool, &mut r).unwrap();
            assert!(pool.fits(lane, Length::new(5)));
            seen[lane.value()] = true;
        }
        assert_eq!(seen, [false, true, false, true]);
    }

    #[test]
    fn test_all_policies_report_none_when_nothing_fits() {
        let pool = pool_with(10, &[6, 7]);
        for policy in Policy::ALL {
            assert_eq!(policy.select(Length::new(5), &pool, &mut rng()), None);
        }
    }

    #[test]
    fn test_policies_diverge_on_same_state() {
        let pool = pool_with(10, &[4, 7, 2]);
        let len = Length::new(3);
        assert_eq!(FirstFit.select(len, &pool, &mut rng()), Some(LaneIndex::new(0)));
        assert_eq!(EmptiestFit.select(len, &pool, &mut rng()), Some(LaneIndex::new(2)));
        assert_eq!(FullestFit.select(len, &pool, &mut rng()), Some(LaneIndex::new(1)));
    }

    #[test]
    fn test_policy_round_trips_through_name() {
        for policy in Policy::ALL {
            assert_eq!(policy.to_string().parse::<Policy>().unwrap(), policy);
        }
        assert_eq!("Fullest_Fit".parse::<Policy>().unwrap(), Policy::FullestFit);
        assert!("best-fit".parse::<Policy>().is_err());
    }

    #[test]
    fn test_policy_serde_uses_kebab_case() {
        let json = serde_json::to_string(&Policy::EmptiestFit).unwrap();
        assert_eq!(json, "\"emptiest-fit\"");
        let back: Policy = serde_json::from_str("\"random-fit\"").unwrap();
        assert_eq!(back, Policy::RandomFit);
    }
}
