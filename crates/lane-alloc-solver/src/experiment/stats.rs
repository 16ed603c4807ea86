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


//! Descriptive statistics and significance tests over overflow samples.
//!
//! Every test returns `None` when the input is too small or has no variance,
//! so reports never carry NaN.

use serde::Serialize;
use statrs::{
    distribution::{ContinuousCDF, FisherSnedecor, StudentsT},
    statistics::{Data, OrderStatistics, Statistics},
};

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SummaryStats {
    pub count: usize,
    pub mean: f64,
    /// Sample variance (`n - 1` denominator); zero for a single sample.
    pub variance: f64,
    pub std_dev: f64,
    pub min: f64,
    pub median: f64,
    pub max: f64,
}

impl SummaryStats {
    pub fn from_samples(samples: &[f64]) -> Option<Self> {
        let vals: Vec<f64> = samples.iter().copied().filter(|x| x.is_finite()).collect();
        if vals.is_empty() {
            return None;
        }
        let count = vals.len();
        let mean = vals.iter().mean();
        let variance = if count > 1 { vals.iter().variance() } else { 0.0 };
        let (min, max) = vals
            .iter()
            .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &x| {
                (lo.min(x), hi.max(x))
            });
        let median = Data::new(vals).quantile(0.5);
        Some(Self {
            count,
            mean,
            variance,
            std_dev: variance.sqrt(),
            min,
            median,
            max,
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct AnovaResult {
    pub f_statistic: f64,
    pub df_between: f64,
    pub df_within: f64,
    pub p_value: f64,
}

/// One-way ANOVA across `groups`.
pub fn one_way_anova<G: AsRef<[f64]>>(groups: &[G]) -> Option<AnovaResult> {
    let k = groups.len();
    let n: usize = groups.iter().map(|g| g.as_ref().len()).sum();
    if k < 2 || n <= k || groups.iter().any(|g| g.as_ref().is_empty()) {
        return None;
    }

    let grand_mean = groups.iter().flat_map(|g| g.as_ref().iter()).mean();
    let mut ss_between = 0.0;
    let mut ss_within = 0.0;
    for g in groups {
        let g = g.as_ref();
        let m = g.iter().mean();
        ss_between += g.len() as f64 * (m - grand_mean).powi(2);
        ss_within += g.iter().map(|x| (x - m).powi(2)).sum::<f64>();
    }

    let df_between = (k - 1) as f64;
    let df_within = (n - k) as f64;
    let ms_within = ss_within / df_within;
    if !ms_within.is_normal() {
        return None;
    }
    let f_statistic = (ss_between / df_between) / ms_within;
    let dist = FisherSnedecor::new(df_between, df_within).ok()?;
    Some(AnovaResult {
        f_statistic,
        df_between,
        df_within,
        p_value: (1.0 - dist.cdf(f_statistic)).clamp(0.0, 1.0),
    })
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct WelchTest {
    pub t_statistic: f64,
    pub degrees_of_freedom: f64,
    /// Two-sided.
    pub p_value: f64,
}

/// Welch's unequal-variance t-test of `a` against `b`.
pub fn welch_t_test(a: &[f64], b: &[f64]) -> Option<WelchTest> {
    if a.len() < 2 || b.len() < 2 {
        return None;
    }
    let (na, nb) = (a.len() as f64, b.len() as f64);
    let (ma, mb) = (a.iter().mean(), b.iter().mean());
    let (va, vb) = (a.iter().variance() / na, b.iter().variance() / nb);
    let se2 = va + vb;
    if !se2.is_normal() {
        return None;
    }
    let t_statistic = (ma - mb) / se2.sqrt();
    let degrees_of_freedom = se2.powi(2) / (va.powi(2) / (na - 1.0) + vb.powi(2) / (nb - 1.0));
    Some(WelchTest {
        t_statistic,
        degrees_of_freedom,
        p_value: two_sided_t(t_statistic, degrees_of_freedom)?,
    })
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SpearmanResult {
    pub rho: f64,
    pub n: usize,
    /// Two-sided, from the t approximation with `n - 2` degrees of freedom.
    pub p_value: f64,
}

/// Spearman rank correlation. Ties get their average rank.
pub fn spearman(x: &[f64], y: &[f64]) -> Option<SpearmanResult> {
    let n = x.len();
    if n != y.len() || n < 3 {
        return None;
    }
    let rx = ranks(x);
    let ry = ranks(y);
    let (mx, my) = (rx.iter().mean(), ry.iter().mean());
    let mut sxy = 0.0;
    let mut sxx = 0.0;
    let mut syy = 0.0;
    for (a, b) in rx.iter().zip(&ry) {
        sxy += (a - mx) * (b - my);
        sxx += (a - mx).powi(2);
        syy += (b - my).powi(2);
    }
    if sxx <= 0.0 || syy <= 0.0 {
        return None;
    }
    let rho = (sxy / (sxx * syy).sqrt()).clamp(-1.0, 1.0);
    let df = (n - 2) as f64;
    let p_value = if (1.0 - rho.abs()) <= f64::EPSILON {
        0.0
    } else {
        two_sided_t(rho * (df / (1.0 - rho * rho)).sqrt(), df)?
    };
    Some(SpearmanResult { rho, n, p_value })
}

/// 1-based ranks; tied values share the mean of the ranks they span.
pub fn ranks(values: &[f64]) -> Vec<f64> {
    let mut order: Vec<usize> = (0..values.len()).collect();
    order.sort_by(|&a, &b| values[a].total_cmp(&values[b]));

    let mut out = vec![0.0; values.len()];
    let mut start = 0;
    while start < order.len() {
        let mut end = start + 1;
        while end < order.len() && values[order[end]] == values[order[start]] {
            end += 1;
        }
        // Positions start..end hold ranks start+1..=end.
        let rank = (start + 1 + end) as f64 / 2.0;
        for &i in &order[start..end] {
            out[i] = rank;
        }
        start = end;
    }
    out
}

fn two_sided_t(t: f64, df: f64) -> Option<f64> {
    if !t.is_finite() || !df.is_normal() || df < 0.0 {
        return None;
    }
    let dist = StudentsT::new(0.0, 1.0, df).ok()?;
    Some((2.0 * (1.0 - dist.cdf(t.abs()))).clamp(0.0, 1.0))
}
