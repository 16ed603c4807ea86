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


//! # Lane Allocation Solver (`lane-alloc-solver`)
//!
//! Assigns vehicles to deck lanes with greedy heuristics and compares the
//! heuristics statistically.
//!
//! ## Layers
//!
//! - **Lanes** (`lanes`): the `LanePool` and its read/write traits. A commit
//!   that would overfill a lane is refused, never corrected.
//! - **Selectors** (`selector`): First-Fit, Emptiest-Fit, Fullest-Fit and
//!   Random-Fit behind the `LaneSelector` trait, plus the `Policy` enum.
//! - **Engines**: the online `AllocationEngine` (with its chunked variant) and
//!   the `GreedyOfflineSolver`. Both produce an `Allocation`: the filled lanes
//!   and the `Overflow` of vehicles that found no room.
//! - **Framework** (`framework`): `Heuristic` names one complete strategy;
//!   `Solver` turns an `Instance` into an `Allocation`.
//! - **Experiments** (`experiment`): parallel seeded trials, chunk-size and
//!   lane-count sweeps, and the statistics used to compare results.

pub mod allocation;
pub mod engine;
pub mod err;
pub mod experiment;
pub mod framework;
pub mod greedy;
pub mod lanes;
pub mod overflow;
pub mod selector;

pub mod prelude {
    pub use crate::allocation::Allocation;
    pub use crate::engine::AllocationEngine;
    pub use crate::err::{
        AllocationError, CapacityViolationError, ExperimentError, LaneCommitError,
        UnknownLaneError,
    };
    pub use crate::experiment::{
        ChunkSweepConfig, Experiment, ExperimentConfig, ExperimentReport, LaneSweepConfig,
        OverflowSamples, OverflowSink, SweepReport, chunk_sweep, chunk_sweep_with, lane_sweep,
        lane_sweep_with,
    };
    pub use crate::framework::{Heuristic, HeuristicSolver, Solver};
    pub use crate::greedy::{GreedyOfflineSolver, greedy_overflow};
    pub use crate::lanes::{Lane, LanePool, LanesRead, LanesWrite};
    pub use crate::overflow::Overflow;
    pub use crate::selector::{
        EmptiestFit, FirstFit, FullestFit, LaneSelector, Policy, RandomFit, UnknownPolicyError,
    };
}
