//! Method-of-moments estimator for the portfolio-sum distribution.
//!
//! Deterministic alternative to simulation: fits a single aggregate Beta
//! curve to the portfolio's summed mean and variance, then integrates its
//! density numerically. Smoother output, no randomness, approximate — the
//! true sum of independent Betas is not itself a Beta.

use estimation_core::{
    CurvePoint, DistributionResult, EstimationAlgorithm, Percentiles, Portfolio,
};

use crate::pert::{pert_mean, pert_variance, MIN_SHAPE};
use crate::special::beta_pdf;

/// Grid resolution: densities are evaluated at `CURVE_STEPS + 1` equally
/// spaced points across the support.
const CURVE_STEPS: usize = 100;

/// Fallback when the aggregated variance is impossible for a Beta on [0, 1]
/// with the aggregated mean.
const FALLBACK_COMMON_FACTOR: f64 = 0.1;

const THRESHOLDS: [f64; 4] = [0.50, 0.70, 0.80, 0.95];

/// Deterministic moment-matching estimator.
#[derive(Debug, Clone, Copy, Default)]
pub struct MethodOfMoments;

impl EstimationAlgorithm for MethodOfMoments {
    fn name(&self) -> &'static str {
        "Method of Moments"
    }

    fn calculate(&self, portfolio: &Portfolio, _iterations: Option<usize>) -> DistributionResult {
        let triples = portfolio.effective_triples();
        if triples.is_empty() {
            return DistributionResult::empty();
        }

        let mut total_mean = 0.0;
        let mut total_var = 0.0;
        let mut total_min = 0.0;
        let mut total_max = 0.0;
        for triple in &triples {
            if triple.pessimistic <= triple.optimistic {
                // No support width: point mass at the optimistic value.
                total_min += triple.optimistic;
                total_max += triple.optimistic;
                total_mean += triple.optimistic;
            } else {
                total_min += triple.optimistic;
                total_max += triple.pessimistic;
                total_mean += pert_mean(triple);
                total_var += pert_variance(triple);
            }
        }

        if total_var == 0.0 || total_min == total_max {
            return DistributionResult::point(total_mean);
        }

        // Match the normalized aggregate moments to Beta shape parameters:
        // common = mean(1 - mean) / var - 1, alpha = mean * common,
        // beta = (1 - mean) * common.
        let range = total_max - total_min;
        let mean_norm = (total_mean - total_min) / range;
        let var_norm = total_var / (range * range);

        let mut common_factor = mean_norm * (1.0 - mean_norm) / var_norm - 1.0;
        if common_factor < 0.0 {
            // Variance this large cannot come from consistent PERT inputs.
            tracing::warn!(
                "moment fit outside Beta range (mean_norm={}, var_norm={}), clamping",
                mean_norm,
                var_norm
            );
            common_factor = FALLBACK_COMMON_FACTOR;
        }
        let alpha = (mean_norm * common_factor).max(MIN_SHAPE);
        let beta = ((1.0 - mean_norm) * common_factor).max(MIN_SHAPE);

        // Walk the grid once: record the curve, accumulate the trapezoidal
        // CDF, and take each percentile at the first grid value whose
        // cumulative probability reaches its threshold.
        let step = range / CURVE_STEPS as f64;
        let mut curve = Vec::with_capacity(CURVE_STEPS + 1);
        let mut crossings: [Option<f64>; 4] = [None; 4];
        let mut cumulative = 0.0;
        let mut prev_density = 0.0;

        for i in 0..=CURVE_STEPS {
            let x_norm = i as f64 / CURVE_STEPS as f64;
            let value = total_min + x_norm * range;
            let density = beta_pdf(x_norm, alpha, beta) / range;
            curve.push(CurvePoint { value, density });

            if i > 0 {
                cumulative += (prev_density + density) * 0.5 * step;
            }
            prev_density = density;

            for (slot, threshold) in crossings.iter_mut().zip(THRESHOLDS) {
                if slot.is_none() && cumulative >= threshold {
                    *slot = Some(value);
                }
            }
        }

        // Truncation error can leave a threshold unreached; those default to
        // the top of the support.
        let percentiles = Percentiles {
            p50: crossings[0].unwrap_or(total_max),
            p70: crossings[1].unwrap_or(total_max),
            p80: crossings[2].unwrap_or(total_max),
            p95: crossings[3].unwrap_or(total_max),
        };

        DistributionResult {
            curve,
            percentiles,
            mean: total_mean,
        }
    }
}
