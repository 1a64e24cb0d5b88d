//! Monte Carlo estimator for the portfolio-sum distribution.
//!
//! Draws one Beta sample per bucket, sums across the portfolio, and repeats
//! to build an empirical distribution of the total. Iterations run in
//! parallel in fixed-size chunks, each chunk with its own RNG derived from
//! the master seed, so a seeded run reproduces exactly regardless of thread
//! scheduling.

use rand::rngs::StdRng;
use rand::SeedableRng;
use rayon::prelude::*;
use statrs::statistics::Statistics;

use estimation_core::{
    CurvePoint, DistributionResult, EstimateTriple, EstimationAlgorithm, Percentiles, Portfolio,
};

use crate::pert::pert_shape;
use crate::special::sample_beta;

/// Default iteration count for aggregate and per-category views.
pub const DEFAULT_ITERATIONS: usize = 50_000;

/// Lighter default for single-item views where latency matters more than
/// tail precision.
pub const SINGLE_ITEM_ITERATIONS: usize = 10_000;

const HISTOGRAM_BUCKETS: usize = 25;
const CHUNK_SIZE: usize = 1_024;

/// Stochastic portfolio-sum estimator.
///
/// `new` seeds each run from entropy; `with_seed` fixes the master seed so
/// two runs over the same portfolio produce identical samples.
#[derive(Debug, Clone, Copy, Default)]
pub struct MonteCarlo {
    seed: Option<u64>,
}

impl MonteCarlo {
    pub fn new() -> Self {
        Self { seed: None }
    }

    pub fn with_seed(seed: u64) -> Self {
        Self { seed: Some(seed) }
    }
}

/// One bucket's sampling model.
enum SimBucket {
    /// Zero-width (or inverted) support: contributes a constant.
    Fixed(f64),
    /// Beta-distributed on `[offset, offset + range]`.
    Variable {
        offset: f64,
        range: f64,
        alpha: f64,
        beta: f64,
    },
}

impl SimBucket {
    fn from_triple(triple: &EstimateTriple) -> Self {
        match pert_shape(triple) {
            Some((alpha, beta)) => SimBucket::Variable {
                offset: triple.optimistic,
                range: triple.pessimistic - triple.optimistic,
                alpha,
                beta,
            },
            None => SimBucket::Fixed(triple.optimistic),
        }
    }
}

fn draw_total(buckets: &[SimBucket], rng: &mut StdRng) -> f64 {
    buckets
        .iter()
        .map(|bucket| match bucket {
            SimBucket::Fixed(value) => *value,
            SimBucket::Variable {
                offset,
                range,
                alpha,
                beta,
            } => offset + sample_beta(rng, *alpha, *beta) * range,
        })
        .sum()
}

/// Inclusive linear-interpolation percentile over sorted samples: index
/// `p/100 * (n-1)`, interpolated between the two bracketing samples.
fn percentile_sorted(sorted: &[f64], p: f64) -> f64 {
    if sorted.is_empty() {
        return 0.0;
    }
    let rank = (p / 100.0) * (sorted.len() - 1) as f64;
    let lo = rank.floor() as usize;
    let hi = rank.ceil() as usize;
    if lo == hi {
        return sorted[lo];
    }
    sorted[lo] + (sorted[hi] - sorted[lo]) * (rank - lo as f64)
}

/// 25 equal-width density buckets over the support, with zero-density anchor
/// points added at the extremes when the edge buckets carry mass.
fn density_histogram(samples: &[f64], total_min: f64, total_max: f64, mean: f64) -> Vec<CurvePoint> {
    let width = (total_max - total_min) / HISTOGRAM_BUCKETS as f64;
    if width <= 0.0 {
        // Inverted support only happens with malformed input; fall back to a
        // point mass rather than emit negative-width buckets.
        return vec![CurvePoint {
            value: mean,
            density: 1.0,
        }];
    }

    let mut counts = vec![0usize; HISTOGRAM_BUCKETS];
    for &sample in samples {
        let idx = (((sample - total_min) / width) as usize).min(HISTOGRAM_BUCKETS - 1);
        counts[idx] += 1;
    }

    let n = samples.len() as f64;
    let mut curve: Vec<CurvePoint> = counts
        .iter()
        .enumerate()
        .map(|(i, &count)| CurvePoint {
            value: total_min + (i as f64 + 0.5) * width,
            density: count as f64 / (n * width),
        })
        .collect();

    // Anchor the rendered curve at the support extremes.
    if curve.first().is_some_and(|p| p.density > 0.0) {
        curve.insert(
            0,
            CurvePoint {
                value: total_min,
                density: 0.0,
            },
        );
    }
    if curve.last().is_some_and(|p| p.density > 0.0) {
        curve.push(CurvePoint {
            value: total_max,
            density: 0.0,
        });
    }
    curve
}

impl EstimationAlgorithm for MonteCarlo {
    fn name(&self) -> &'static str {
        "Monte Carlo"
    }

    fn calculate(&self, portfolio: &Portfolio, iterations: Option<usize>) -> DistributionResult {
        let triples = portfolio.effective_triples();
        if triples.is_empty() {
            return DistributionResult::empty();
        }

        let (total_min, total_max) = portfolio.support();
        if total_min == total_max {
            // Every bucket is fixed; nothing to simulate.
            return DistributionResult::point(total_min);
        }

        let n = iterations.unwrap_or(DEFAULT_ITERATIONS).max(1);
        let buckets: Vec<SimBucket> = triples.iter().map(SimBucket::from_triple).collect();
        let buckets = buckets.as_slice();
        let seed = self.seed.unwrap_or_else(|| rand::random());

        tracing::debug!(
            "Monte Carlo: {} buckets, {} iterations, support [{}, {}]",
            buckets.len(),
            n,
            total_min,
            total_max
        );

        let chunks = (n + CHUNK_SIZE - 1) / CHUNK_SIZE;
        let mut samples: Vec<f64> = (0..chunks)
            .into_par_iter()
            .flat_map_iter(|chunk| {
                let mut rng = StdRng::seed_from_u64(
                    seed.wrapping_add((chunk as u64).wrapping_mul(0x9E37_79B9_7F4A_7C15)),
                );
                let len = CHUNK_SIZE.min(n - chunk * CHUNK_SIZE);
                (0..len).map(move |_| draw_total(buckets, &mut rng))
            })
            .collect();

        samples.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));
        let sorted = samples.as_slice();
        let mean = sorted.mean();

        DistributionResult {
            curve: density_histogram(sorted, total_min, total_max, mean),
            percentiles: Percentiles {
                p50: percentile_sorted(sorted, 50.0),
                p70: percentile_sorted(sorted, 70.0),
                p80: percentile_sorted(sorted, 80.0),
                p95: percentile_sorted(sorted, 95.0),
            },
            mean,
        }
    }
}
