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


use crate::framework::Heuristic;
use lane_alloc_core::length::Length;

/// Consumer of per-trial overflow results.
///
/// Trials are reported in trial order regardless of how they were scheduled.
pub trait OverflowSink {
    fn record(&mut self, trial: usize, heuristic: Heuristic, overflow: Length);
}

/// Collects overflow samples per heuristic, in the order the heuristics were
/// first seen.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct OverflowSamples {
    series: Vec<(Heuristic, Vec<f64>)>,
}

impl OverflowSamples {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_heuristics(heuristics: &[Heuristic]) -> Self {
        Self {
            series: heuristics.iter().map(|&h| (h, Vec::new())).collect(),
        }
    }

    pub fn samples(&self, heuristic: &Heuristic) -> Option<&[f64]> {
        self.series
            .iter()
            .find(|(h, _)| h == heuristic)
            .map(|(_, s)| s.as_slice())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&Heuristic, &[f64])> + '_ {
        self.series.iter().map(|(h, s)| (h, s.as_slice()))
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.series.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.series.is_empty()
    }
}

impl OverflowSink for OverflowSamples {
    fn record(&mut self, _trial: usize, heuristic: Heuristic, overflow: Length) {
        let value = overflow.as_f64();
        match self.series.iter_mut().find(|(h, _)| *h == heuristic) {
            Some((_, s)) => s.push(value),
            None => self.series.push((heuristic, vec![value])),
        }
    }
}

impl<F> OverflowSink for F
where
    F: FnMut(usize, Heuristic, Length),
{
    fn record(&mut self, trial: usize, heuristic: Heuristic, overflow: Length) {
        self(trial, heuristic, overflow)
    }
}
