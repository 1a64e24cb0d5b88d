//! Closed-form PERT point statistics for a single three-point estimate.

use estimation_core::EstimateTriple;

/// Floor for Beta shape parameters. `ln_gamma` and `beta_pdf` diverge at
/// zero, and the samplers reject non-positive shapes, so anything computed
/// at or below zero is clamped here.
pub const MIN_SHAPE: f64 = 0.1;

/// Expected duration: `(O + 4M + P) / 6`.
pub fn pert_mean(triple: &EstimateTriple) -> f64 {
    (triple.optimistic + 4.0 * triple.most_likely + triple.pessimistic) / 6.0
}

/// PERT standard deviation: `(P - O) / 6`.
pub fn pert_std_dev(triple: &EstimateTriple) -> f64 {
    (triple.pessimistic - triple.optimistic) / 6.0
}

pub fn pert_variance(triple: &EstimateTriple) -> f64 {
    let sd = pert_std_dev(triple);
    sd * sd
}

/// Beta shape parameters `(alpha, beta)` implied by a triple on the support
/// `[optimistic, pessimistic]`, or `None` when the support has no width
/// (including inverted supports from malformed input — those buckets are
/// point masses at the optimistic value, not Beta-distributed).
///
/// A most-likely value outside the support would push a shape to zero or
/// below; shapes are floored at [`MIN_SHAPE`] instead.
pub fn pert_shape(triple: &EstimateTriple) -> Option<(f64, f64)> {
    let range = triple.pessimistic - triple.optimistic;
    if range <= 0.0 {
        return None;
    }
    let alpha = 1.0 + 4.0 * (triple.most_likely - triple.optimistic) / range;
    let beta = 1.0 + 4.0 * (triple.pessimistic - triple.most_likely) / range;
    Some((alpha.max(MIN_SHAPE), beta.max(MIN_SHAPE)))
}
