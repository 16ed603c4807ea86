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


use super::{
    ChunkSweepConfig, LaneSweepConfig, make_trial_rng,
    stats::{SpearmanResult, spearman},
};
use crate::{err::ExperimentError, framework::Heuristic, lanes::LanePool};
use lane_alloc_core::length::Length;
use lane_alloc_model::{
    err::InvalidConfigurationError,
    generator::VehicleGenerator,
    source::VehicleSource,
};
use rayon::prelude::*;
use serde::Serialize;
use tracing::{info, instrument};

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SweepPoint {
    pub x: usize,
    pub mean_overflow: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SweepSeries {
    pub label: String,
    pub points: Vec<SweepPoint>,
    /// Rank correlation between the swept parameter and the mean overflow.
    pub trend: Option<SpearmanResult>,
}

impl SweepSeries {
    fn new(label: String, points: Vec<SweepPoint>) -> Self {
        let xs: Vec<f64> = points.iter().map(|p| p.x as f64).collect();
        let ys: Vec<f64> = points.iter().map(|p| p.mean_overflow).collect();
        Self {
            label,
            trend: spearman(&xs, &ys),
            points,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SweepReport {
    pub parameter: &'static str,
    pub series: Vec<SweepSeries>,
}

fn trial_vehicles<V>(source: &V, seed: u64, trials: usize) -> Vec<Vec<Length>>
where
    V: VehicleSource + ?Sized,
{
    (0..trials)
        .map(|t| source.draw_vehicles(&mut make_trial_rng(seed, t, 0)))
        .collect()
}

fn mean_overflow(
    heuristic: &Heuristic,
    trials: &[Vec<Length>],
    seed: u64,
    stream: usize,
    num_lanes: usize,
    capacity: Length,
) -> Result<f64, ExperimentError> {
    let mut sum = 0.0;
    for (t, vehicles) in trials.iter().enumerate() {
        let pool = LanePool::new(num_lanes, capacity)?;
        let mut rng = make_trial_rng(seed, t, stream);
        sum += heuristic
            .allocate(vehicles, pool, &mut rng)?
            .overflow_total()
            .as_f64();
    }
    Ok(sum / trials.len() as f64)
}

/// Mean overflow per policy for chunk sizes `1..=max_chunk_size`, on vehicle
/// lists sampled from `config.mix`.
pub fn chunk_sweep(config: &ChunkSweepConfig) -> Result<SweepReport, ExperimentError> {
    let generator = VehicleGenerator::new(config.mix.clone())?;
    chunk_sweep_with(config, &generator)
}

/// Like [`chunk_sweep`], with the vehicle lists drawn from `source`. Every
/// chunk size sees the same lists.
#[instrument(skip_all, fields(trials = config.trials, max_chunk_size = config.max_chunk_size), err(Display))]
pub fn chunk_sweep_with<V>(
    config: &ChunkSweepConfig,
    source: &V,
) -> Result<SweepReport, ExperimentError>
where
    V: VehicleSource + ?Sized,
{
    if config.trials == 0 {
        return Err(ExperimentError::ZeroTrials);
    }
    if config.policies.is_empty() {
        return Err(ExperimentError::NoHeuristics);
    }
    if config.max_chunk_size == 0 {
        return Err(InvalidConfigurationError::ZeroChunkSize.into());
    }
    LanePool::new(config.num_lanes, config.capacity)?;

    let trials = trial_vehicles(source, config.seed, config.trials);
    let mut series = Vec::with_capacity(config.policies.len());
    for (p, &policy) in config.policies.iter().enumerate() {
        let points = (1..=config.max_chunk_size)
            .into_par_iter()
            .map(|k| {
                let h = Heuristic::chunked(policy, k);
                mean_overflow(&h, &trials, config.seed, p + 1, config.num_lanes, config.capacity)
                    .map(|mean_overflow| SweepPoint { x: k, mean_overflow })
            })
            .collect::<Result<Vec<_>, _>>()?;
        info!(%policy, "chunk sweep series done");
        series.push(SweepSeries::new(policy.to_string(), points));
    }

    Ok(SweepReport {
        parameter: "chunk_size",
        series,
    })
}

/// Mean overflow per heuristic for `1..=max_lanes` lanes sharing a fixed deck,
/// on vehicle lists sampled from `config.mix`.
pub fn lane_sweep(config: &LaneSweepConfig) -> Result<SweepReport, ExperimentError> {
    let generator = VehicleGenerator::new(config.mix.clone())?;
    lane_sweep_with(config, &generator)
}

/// Like [`lane_sweep`], with the vehicle lists drawn from `source`.
#[instrument(skip_all, fields(trials = config.trials, max_lanes = config.max_lanes), err(Display))]
pub fn lane_sweep_with<V>(
    config: &LaneSweepConfig,
    source: &V,
) -> Result<SweepReport, ExperimentError>
where
    V: VehicleSource + ?Sized,
{
    if config.trials == 0 {
        return Err(ExperimentError::ZeroTrials);
    }
    if config.max_lanes == 0 {
        return Err(InvalidConfigurationError::ZeroLanes.into());
    }
    if config.deck_length.value() < config.max_lanes {
        return Err(ExperimentError::DeckTooShort {
            deck_length: config.deck_length,
            max_lanes: config.max_lanes,
        });
    }

    let mut heuristics: Vec<Heuristic> =
        config.policies.iter().copied().map(Heuristic::online).collect();
    if config.include_greedy {
        heuristics.push(Heuristic::GreedyOffline);
    }
    if heuristics.is_empty() {
        return Err(ExperimentError::NoHeuristics);
    }

    let trials = trial_vehicles(source, config.seed, config.trials);
    let mut series = Vec::with_capacity(heuristics.len());
    for (i, h) in heuristics.iter().enumerate() {
        let points = (1..=config.max_lanes)
            .into_par_iter()
            .map(|n| {
                let capacity = config.deck_length / n;
                mean_overflow(h, &trials, config.seed, i + 1, n, capacity)
                    .map(|mean_overflow| SweepPoint { x: n, mean_overflow })
            })
            .collect::<Result<Vec<_>, _>>()?;
        info!(heuristic = %h, "lane sweep series done");
        series.push(SweepSeries::new(h.label(), points));
    }

    Ok(SweepReport {
        parameter: "num_lanes",
        series,
    })
}
