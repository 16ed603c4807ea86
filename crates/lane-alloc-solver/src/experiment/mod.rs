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


//! Randomised trials comparing heuristics on synthetic ferry decks.

mod config;
mod sink;
pub mod stats;
mod sweep;

pub use config::{ChunkSweepConfig, DEFAULT_SEED, ExperimentConfig, LaneSweepConfig};
pub use sink::{OverflowSamples, OverflowSink};
pub use sweep::{
    SweepPoint, SweepReport, SweepSeries, chunk_sweep, chunk_sweep_with, lane_sweep,
    lane_sweep_with,
};

use crate::{err::ExperimentError, framework::Heuristic, lanes::LanePool};
use lane_alloc_core::length::Length;
use lane_alloc_model::{
    err::InvalidConfigurationError, generator::VehicleGenerator, source::VehicleSource,
};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use rayon::prelude::*;
use serde::Serialize;
use self::stats::{AnovaResult, SummaryStats, WelchTest, one_way_anova, welch_t_test};
use tracing::{info, instrument};

/// Independent stream for `(trial, stream)`. Stream 0 generates the vehicles,
/// stream `i + 1` drives heuristic `i`.
#[inline]
pub(crate) fn make_trial_rng(base_seed: u64, trial: usize, stream: usize) -> ChaCha8Rng {
    let s = base_seed
        ^ ((trial as u64).wrapping_mul(0x9E37_79B1_85EB_CA87))
        ^ ((stream as u64).wrapping_mul(0xD134_2543_DE82_E285)).rotate_left(17);
    ChaCha8Rng::seed_from_u64(s)
}

pub(crate) fn ensure_chunk_sizes(heuristics: &[Heuristic]) -> Result<(), InvalidConfigurationError> {
    if heuristics
        .iter()
        .any(|h| matches!(h, Heuristic::Chunked { chunk_size: 0, .. }))
    {
        return Err(InvalidConfigurationError::ZeroChunkSize);
    }
    Ok(())
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HeuristicSummary {
    pub heuristic: Heuristic,
    pub label: String,
    pub stats: Option<SummaryStats>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PairwiseComparison {
    pub first: String,
    pub second: String,
    pub welch: Option<WelchTest>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExperimentReport {
    pub config: ExperimentConfig,
    pub summaries: Vec<HeuristicSummary>,
    pub anova: Option<AnovaResult>,
    pub pairwise: Vec<PairwiseComparison>,
}

impl ExperimentReport {
    /// Summary of the heuristic with the lowest mean overflow.
    pub fn best(&self) -> Option<&HeuristicSummary> {
        self.summaries
            .iter()
            .filter_map(|s| s.stats.map(|st| (s, st.mean)))
            .min_by(|(_, a), (_, b)| a.total_cmp(b))
            .map(|(s, _)| s)
    }
}

/// Runs every configured heuristic on vehicle lists drawn from `V`.
///
/// [`Experiment::new`] samples from the configured mix; use
/// [`Experiment::with_source`] to plug in any other [`VehicleSource`], in
/// which case `config.mix` is not consulted.
#[derive(Debug, Clone)]
pub struct Experiment<V = VehicleGenerator> {
    config: ExperimentConfig,
    source: V,
}

impl Experiment {
    pub fn new(config: ExperimentConfig) -> Result<Self, ExperimentError> {
        let generator = VehicleGenerator::new(config.mix.clone())?;
        Self::with_source(config, generator)
    }
}

impl<V: VehicleSource + Sync> Experiment<V> {
    pub fn with_source(config: ExperimentConfig, source: V) -> Result<Self, ExperimentError> {
        if config.trials == 0 {
            return Err(ExperimentError::ZeroTrials);
        }
        if config.heuristics.is_empty() {
            return Err(ExperimentError::NoHeuristics);
        }
        LanePool::new(config.num_lanes, config.capacity)?;
        ensure_chunk_sizes(&config.heuristics)?;
        Ok(Self { config, source })
    }

    #[inline]
    pub fn config(&self) -> &ExperimentConfig {
        &self.config
    }

    #[inline]
    pub fn source(&self) -> &V {
        &self.source
    }

    /// Overflow of every configured heuristic on one drawn vehicle list.
    pub fn run_trial(&self, trial: usize) -> Result<Vec<Length>, ExperimentError> {
        let cfg = &self.config;
        let vehicles = self
            .source
            .draw_vehicles(&mut make_trial_rng(cfg.seed, trial, 0));
        cfg.heuristics
            .iter()
            .enumerate()
            .map(|(i, h)| -> Result<Length, ExperimentError> {
                let pool = LanePool::new(cfg.num_lanes, cfg.capacity)?;
                let mut rng = make_trial_rng(cfg.seed, trial, i + 1);
                Ok(h.allocate(&vehicles, pool, &mut rng)?.overflow_total())
            })
            .collect()
    }

    /// Runs all trials in parallel and reports them to `sink` in trial order.
    #[instrument(skip_all, fields(trials = self.config.trials, heuristics = self.config.heuristics.len()), err(Display))]
    pub fn run_into<S: OverflowSink + ?Sized>(&self, sink: &mut S) -> Result<(), ExperimentError> {
        let results: Vec<Vec<Length>> = (0..self.config.trials)
            .into_par_iter()
            .map(|t| self.run_trial(t))
            .collect::<Result<_, _>>()?;

        for (trial, overflows) in results.into_iter().enumerate() {
            for (&h, overflow) in self.config.heuristics.iter().zip(overflows) {
                sink.record(trial, h, overflow);
            }
        }
        info!("finished {} trials", self.config.trials);
        Ok(())
    }

    pub fn run(&self) -> Result<ExperimentReport, ExperimentError> {
        let mut samples = OverflowSamples::with_heuristics(&self.config.heuristics);
        self.run_into(&mut samples)?;
        Ok(self.report(&samples))
    }

    fn report(&self, samples: &OverflowSamples) -> ExperimentReport {
        let summaries = samples
            .iter()
            .map(|(h, s)| HeuristicSummary {
                heuristic: *h,
                label: h.label(),
                stats: SummaryStats::from_samples(s),
            })
            .collect();

        let groups: Vec<&[f64]> = samples.iter().map(|(_, s)| s).collect();
        let series: Vec<(&Heuristic, &[f64])> = samples.iter().collect();
        let mut pairwise = Vec::new();
        for (i, (ha, a)) in series.iter().enumerate() {
            for (hb, b) in &series[i + 1..] {
                pairwise.push(PairwiseComparison {
                    first: ha.label(),
                    second: hb.label(),
                    welch: welch_t_test(a, b),
                });
            }
        }

        ExperimentReport {
            config: self.config.clone(),
            summaries,
            anova: one_way_anova(&groups),
            pairwise,
        }
    }
}
