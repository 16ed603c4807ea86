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


use crate::{framework::Heuristic, selector::Policy};
use lane_alloc_core::length::Length;
use lane_alloc_model::generator::VehicleMixConfig;
use serde::{Deserialize, Serialize};

pub const DEFAULT_SEED: u64 = 0x00C0_FFEE_D00D;

/// Repeated trials comparing heuristics on the same generated vehicle lists.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExperimentConfig {
    pub trials: usize,
    pub num_lanes: usize,
    pub capacity: Length,
    pub seed: u64,
    pub heuristics: Vec<Heuristic>,
    pub mix: VehicleMixConfig,
}

impl Default for ExperimentConfig {
    fn default() -> Self {
        Self {
            trials: 1000,
            num_lanes: 85,
            capacity: Length::new(3000),
            seed: DEFAULT_SEED,
            heuristics: Policy::ALL
                .into_iter()
                .map(Heuristic::online)
                .chain(std::iter::once(Heuristic::GreedyOffline))
                .collect(),
            mix: VehicleMixConfig::default(),
        }
    }
}

/// Mean overflow as a function of the chunk size `k = 1..=max_chunk_size`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChunkSweepConfig {
    pub trials: usize,
    pub num_lanes: usize,
    pub capacity: Length,
    pub max_chunk_size: usize,
    pub seed: u64,
    pub policies: Vec<Policy>,
    pub mix: VehicleMixConfig,
}

impl Default for ChunkSweepConfig {
    fn default() -> Self {
        Self {
            trials: 25,
            num_lanes: 85,
            capacity: Length::new(3000),
            max_chunk_size: 500,
            seed: DEFAULT_SEED,
            policies: Policy::ALL.to_vec(),
            mix: VehicleMixConfig::default(),
        }
    }
}

/// Mean overflow as a function of the lane count `n = 1..=max_lanes`, with
/// the deck split evenly: every lane gets `deck_length / n`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LaneSweepConfig {
    pub trials: usize,
    pub deck_length: Length,
    pub max_lanes: usize,
    pub seed: u64,
    pub policies: Vec<Policy>,
    pub include_greedy: bool,
    pub mix: VehicleMixConfig,
}

impl Default for LaneSweepConfig {
    fn default() -> Self {
        Self {
            trials: 25,
            deck_length: Length::new(255_000),
            max_lanes: 729,
            seed: DEFAULT_SEED,
            policies: Policy::ALL.to_vec(),
            include_greedy: true,
            mix: VehicleMixConfig::default(),
        }
    }
}
