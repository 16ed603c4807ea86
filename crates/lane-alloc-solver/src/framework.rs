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


use crate::{
    allocation::Allocation,
    engine::AllocationEngine,
    err::AllocationError,
    greedy::GreedyOfflineSolver,
    lanes::LanePool,
    selector::{LaneSelector, Policy},
};
use lane_alloc_core::length::Length;
use lane_alloc_model::instance::Instance;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};
use std::fmt::Display;
use tracing::instrument;

pub trait Solver {
    type Error;

    fn solve(&self, instance: &Instance) -> Result<Allocation, Self::Error>;
}

/// One way of turning a vehicle list into an allocation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum Heuristic {
    Online { policy: Policy },
    Chunked { policy: Policy, chunk_size: usize },
    GreedyOffline,
}

impl Heuristic {
    #[inline]
    pub fn online(policy: Policy) -> Self {
        Heuristic::Online { policy }
    }

    #[inline]
    pub fn chunked(policy: Policy, chunk_size: usize) -> Self {
        Heuristic::Chunked { policy, chunk_size }
    }

    #[inline]
    pub fn policy(&self) -> Option<Policy> {
        match self {
            Heuristic::Online { policy } | Heuristic::Chunked { policy, .. } => Some(*policy),
            Heuristic::GreedyOffline => None,
        }
    }

    /// Label used as the key in reports, e.g. `fullest-fit` or
    /// `random-fit/k=20`.
    pub fn label(&self) -> String {
        self.to_string()
    }

    pub fn allocate<R>(
        &self,
        vehicles: &[Length],
        pool: LanePool,
        rng: &mut R,
    ) -> Result<Allocation, AllocationError>
    where
        R: Rng + ?Sized,
    {
        match *self {
            Heuristic::Online { policy } => AllocationEngine::new(policy).run(vehicles, pool, rng),
            Heuristic::Chunked { policy, chunk_size } => {
                AllocationEngine::new(policy).run_chunked(vehicles, pool, chunk_size, rng)
            }
            Heuristic::GreedyOffline => GreedyOfflineSolver::new().allocate(vehicles, pool),
        }
    }
}

impl From<Policy> for Heuristic {
    fn from(policy: Policy) -> Self {
        Heuristic::online(policy)
    }
}

impl Display for Heuristic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Heuristic::Online { policy } => write!(f, "{}", policy.name()),
            Heuristic::Chunked { policy, chunk_size } => {
                write!(f, "{}/k={}", policy.name(), chunk_size)
            }
            Heuristic::GreedyOffline => write!(f, "greedy-offline"),
        }
    }
}

/// A [`Heuristic`] bound to a seed, so repeated solves of the same instance
/// give the same allocation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HeuristicSolver {
    heuristic: Heuristic,
    seed: u64,
}

impl HeuristicSolver {
    #[inline]
    pub fn new(heuristic: Heuristic, seed: u64) -> Self {
        Self { heuristic, seed }
    }

    #[inline]
    pub fn heuristic(&self) -> Heuristic {
        self.heuristic
    }

    #[inline]
    pub fn seed(&self) -> u64 {
        self.seed
    }
}

impl Solver for HeuristicSolver {
    type Error = AllocationError;

    #[instrument(skip_all, fields(heuristic = %self.heuristic, seed = self.seed), err(Display))]
    fn solve(&self, instance: &Instance) -> Result<Allocation, Self::Error> {
        let mut rng = ChaCha8Rng::seed_from_u64(self.seed);
        self.heuristic
            .allocate(instance.vehicles(), LanePool::for_instance(instance), &mut rng)
    }
}

impl Solver for GreedyOfflineSolver {
    type Error = AllocationError;

    fn solve(&self, instance: &Instance) -> Result<Allocation, Self::Error> {
        self.allocate_instance(instance)
    }
}
